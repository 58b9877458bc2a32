use colored::Colorize;
use rustc_hash::FxHashMap;
use serde::Serialize;

use esdown_common::{Diagnostic, DiagnosticCategory};

/// Renders diagnostics against the sources they point into.
pub struct Reporter {
    color: bool,
    /// Start offset of every line, per file.
    line_starts: FxHashMap<String, Vec<u32>>,
}

/// A diagnostic as written by `--diagnostics-format json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonDiagnostic<'a> {
    file: &'a str,
    start: u32,
    length: u32,
    line: u32,
    column: u32,
    category: DiagnosticCategory,
    code: u32,
    message: &'a str,
}

impl Reporter {
    #[must_use]
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            line_starts: FxHashMap::default(),
        }
    }

    /// Register the text of `file` so positions can be turned into lines.
    pub fn add_source(&mut self, file: &str, source: &str) {
        let mut starts = vec![0u32];
        for (offset, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                starts.push(offset as u32 + 1);
            }
        }
        self.line_starts.insert(file.to_string(), starts);
    }

    /// One-based line and column of `offset` in `file`.
    #[must_use]
    pub fn position_for(&self, file: &str, offset: u32) -> Option<(u32, u32)> {
        let starts = self.line_starts.get(file)?;
        let line = starts.partition_point(|&start| start <= offset).checked_sub(1)?;
        let column = offset - starts[line];
        Some((line as u32 + 1, column + 1))
    }

    #[must_use]
    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for diagnostic in diagnostics {
            out.push_str(&self.format_diagnostic(diagnostic));
            out.push('\n');
        }
        out
    }

    #[must_use]
    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let location = match self.position_for(&diagnostic.file, diagnostic.start) {
            Some((line, column)) => format!("{}:{line}:{column}", diagnostic.file),
            None if diagnostic.file.is_empty() => "<unknown>".to_string(),
            None => diagnostic.file.clone(),
        };
        let category = self.format_category(diagnostic.category);
        let code = format!("ES{}", diagnostic.code);
        if self.color {
            format!(
                "{} - {} {}: {}",
                location.cyan(),
                category,
                code.dimmed(),
                diagnostic.message_text
            )
        } else {
            format!("{location} - {category} {code}: {}", diagnostic.message_text)
        }
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let text = match category {
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        };
        if !self.color {
            return text.to_string();
        }
        match category {
            DiagnosticCategory::Error => text.red().bold().to_string(),
            DiagnosticCategory::Warning => text.yellow().bold().to_string(),
            _ => text.blue().to_string(),
        }
    }

    /// All of `diagnostics` as one pretty-printed JSON array.
    pub fn render_json(&self, diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
        let records: Vec<JsonDiagnostic<'_>> = diagnostics
            .iter()
            .map(|d| {
                let (line, column) = self.position_for(&d.file, d.start).unwrap_or((0, 0));
                JsonDiagnostic {
                    file: &d.file,
                    start: d.start,
                    length: d.length,
                    line,
                    column,
                    category: d.category,
                    code: d.code,
                    message: &d.message_text,
                }
            })
            .collect();
        serde_json::to_string_pretty(&records)
    }
}
