//! Compilation driver.
//!
//! Every input file is one compilation unit: it is parsed, lowered and
//! printed independently, with its own `UniqueIdSupplier`, so units are
//! processed in parallel with `rayon`.

use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::ResolvedOptions;
use esdown_common::diagnostics::diagnostic_codes;
use esdown_common::{Diagnostic, FeatureSet, UniqueIdSupplier};
use esdown_emitter::{ClassMembersSummary, print_to_string, rewrite_class_members};
use esdown_parser::ParserState;

/// Result of lowering one compilation unit.
#[derive(Debug, Clone)]
pub struct UnitResult {
    /// Name the unit's diagnostics refer to.
    pub file_name: String,
    /// Lowered program text, `None` when code generation was skipped.
    pub output: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: ClassMembersSummary,
    /// Features recorded for the unit after lowering.
    pub features: FeatureSet,
}

impl UnitResult {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

/// One unit read from disk.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub path: PathBuf,
    pub source: String,
    pub result: UnitResult,
}

#[derive(Debug, Default)]
pub struct CompilationResult {
    /// Units in input order.
    pub units: Vec<CompiledUnit>,
    pub emitted_files: Vec<PathBuf>,
}

impl CompilationResult {
    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.units.iter().flat_map(|u| u.result.diagnostics.iter())
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.units.iter().any(|u| u.result.has_errors())
    }
}

/// Parse, lower and print `source`.
///
/// A unit with syntax errors is not lowered. A unit containing a construct
/// that can never be converted is lowered but not printed.
#[must_use]
pub fn lower_source(file_name: &str, source: &str) -> UnitResult {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let root = parser.parse_source_file();
    let mut diagnostics: Vec<Diagnostic> = parser
        .get_diagnostics()
        .iter()
        .map(|d| {
            Diagnostic::error(
                file_name.to_string(),
                d.start,
                d.length,
                d.message.clone(),
                d.code,
            )
        })
        .collect();
    let mut arena = parser.into_arena();

    if !diagnostics.is_empty() {
        warn!(
            file = file_name,
            errors = diagnostics.len(),
            "syntax errors, unit not lowered"
        );
        let features = arena.script_features(root).unwrap_or_default();
        return UnitResult {
            file_name: file_name.to_string(),
            output: None,
            diagnostics,
            summary: ClassMembersSummary::default(),
            features,
        };
    }

    let mut ids = UniqueIdSupplier::new(file_name);
    let summary = rewrite_class_members(&mut arena, root, &mut ids, file_name, &mut diagnostics);
    let fatal = diagnostics
        .iter()
        .any(|d| d.code == diagnostic_codes::CANNOT_CONVERT);
    let output = (!fatal).then(|| print_to_string(&arena, root));
    let features = arena.script_features(root).unwrap_or_default();

    UnitResult {
        file_name: file_name.to_string(),
        output,
        diagnostics,
        summary,
        features,
    }
}

/// Read and lower every input, then write outputs when an output
/// directory is configured.
pub fn compile(options: &ResolvedOptions) -> Result<CompilationResult> {
    let units = options
        .files
        .par_iter()
        .map(|path| compile_file(path))
        .collect::<Result<Vec<_>>>()?;

    let mut emitted_files = Vec::new();
    if let Some(out_dir) = &options.out_dir {
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
        emitted_files = output_targets(out_dir, &options.root_dir, &units)?
            .into_par_iter()
            .map(|(target, output)| write_output(target, output))
            .collect::<Result<Vec<_>>>()?;
    }

    let lowered: usize = units.iter().map(|u| u.result.summary.classes_lowered).sum();
    info!(
        units = units.len(),
        classes_lowered = lowered,
        emitted = emitted_files.len(),
        "compilation finished"
    );
    Ok(CompilationResult {
        units,
        emitted_files,
    })
}

/// Features the parser records for each input, in input order.
pub fn list_features(options: &ResolvedOptions) -> Result<Vec<(PathBuf, FeatureSet)>> {
    options
        .files
        .par_iter()
        .map(|path| {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let mut parser = ParserState::new(path.display().to_string(), source);
            let root = parser.parse_source_file();
            let features = parser.into_arena().script_features(root).unwrap_or_default();
            Ok((path.clone(), features))
        })
        .collect()
}

fn compile_file(path: &Path) -> Result<CompiledUnit> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file_name = path.display().to_string();
    debug!(file = %file_name, bytes = source.len(), "lowering unit");
    let result = lower_source(&file_name, &source);
    Ok(CompiledUnit {
        path: path.to_path_buf(),
        source,
        result,
    })
}

/// Target path under `out_dir` for every unit that has output, in input
/// order. Fails when two units would be written to the same file.
fn output_targets<'u>(
    out_dir: &Path,
    root_dir: &Path,
    units: &'u [CompiledUnit],
) -> Result<Vec<(PathBuf, &'u str)>> {
    let root_dir = normalize_path(&canonicalize_or_owned(root_dir));
    let mut claimed: FxHashMap<PathBuf, &Path> = FxHashMap::default();
    let mut targets = Vec::with_capacity(units.len());
    for unit in units {
        let Some(output) = unit.result.output.as_deref() else {
            continue;
        };
        let target = out_dir.join(output_relative_path(&root_dir, &unit.path)?);
        if let Some(previous) = claimed.insert(target.clone(), &unit.path) {
            bail!(
                "{} and {} would both be written to {}",
                previous.display(),
                unit.path.display(),
                target.display()
            );
        }
        targets.push((target, output));
    }
    Ok(targets)
}

/// Path of `input` below `root_dir`, or its bare file name when it is
/// outside `root_dir`. Never contains `..`.
fn output_relative_path(root_dir: &Path, input: &Path) -> Result<PathBuf> {
    let input = normalize_path(&canonicalize_or_owned(input));
    if let Ok(relative) = input.strip_prefix(root_dir)
        && relative.file_name().is_some()
        && relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
    {
        return Ok(relative.to_path_buf());
    }
    let name = input
        .file_name()
        .with_context(|| format!("input {} has no file name", input.display()))?;
    Ok(PathBuf::from(name))
}

fn write_output(target: PathBuf, output: &str) -> Result<PathBuf> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(&target, output)
        .with_context(|| format!("failed to write {}", target.display()))?;
    Ok(target)
}

fn canonicalize_or_owned(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Resolve `.` and `..` without touching the file system.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::RootDir | Component::Normal(_) | Component::Prefix(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }
    normalized
}
