//! Parser state and token handling.
//!
//! `ParserState` drives a `ScannerState` and builds nodes straight into a
//! `NodeArena`. Syntax errors are collected, never raised: every parse
//! function returns a node (possibly an error placeholder) and parsing
//! continues with the next token.

use super::base::NodeIndex;
use super::node::NodeArena;
use super::syntax_kind_ext;
use esdown_common::diagnostics::{
    Diagnostic, DiagnosticSink, diagnostic_codes, diagnostic_messages, format_message,
};
use esdown_common::limits::MAX_PARSER_RECURSION_DEPTH;
use esdown_common::FeatureSet;
use esdown_scanner::{ScannerState, SyntaxKind, token_text};
use tracing::debug;

/// A syntax error found while parsing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) file_name: String,
    pub(crate) scanner: ScannerState,
    pub(crate) arena: NodeArena,
    pub(crate) diagnostics: Vec<ParseDiagnostic>,
    /// Features seen so far in the script.
    pub(crate) features: FeatureSet,
    /// End of the last consumed token; used as the end of finished nodes.
    pub(crate) last_token_end: u32,
    /// Set while parsing a `for` initializer, where `in` is not a binary operator.
    pub(crate) disallow_in: bool,
    pub(crate) recursion_depth: u32,
    /// Position of the last reported error, to avoid cascades at one spot.
    last_error_pos: Option<u32>,
}

impl ParserState {
    #[must_use]
    pub fn new(file_name: String, source_text: String) -> Self {
        let capacity = source_text.len() / 4;
        Self {
            file_name,
            scanner: ScannerState::new(source_text),
            arena: NodeArena::with_capacity(capacity),
            diagnostics: Vec::new(),
            features: FeatureSet::empty(),
            last_token_end: 0,
            disallow_in: false,
            recursion_depth: 0,
            last_error_pos: None,
        }
    }

    /// Parse the whole source text into a `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();
        let root = self.arena.add_node(syntax_kind_ext::SOURCE_FILE, "", &[], 0, 0);
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let start = self.scanner.token_pos();
            let statement = self.parse_statement();
            self.arena.append_child(root, statement);
            if self.scanner.token_pos() == start && !self.is_token(SyntaxKind::EndOfFileToken) {
                // No progress; skip the offending token.
                self.error_at_current(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        let end = self.scanner.source_text().len() as u32;
        self.arena.set_range(root, 0, end);
        self.arena.set_script_features(root, self.features);

        for diag in self.scanner.get_scanner_diagnostics() {
            self.diagnostics.push(ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message.to_string(),
                code: diag.code,
            });
        }
        self.diagnostics.sort_by_key(|d| d.start);

        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            diagnostics = self.diagnostics.len(),
            "parsed source file"
        );
        root
    }

    #[must_use]
    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Features recorded while parsing.
    #[must_use]
    pub const fn features(&self) -> FeatureSet {
        self.features
    }

    #[must_use]
    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    /// Report every parse diagnostic to `sink` as a file diagnostic.
    pub fn report_diagnostics(&self, sink: &mut dyn DiagnosticSink) {
        for diag in &self.diagnostics {
            sink.report(Diagnostic::error(
                self.file_name.clone(),
                diag.start,
                diag.length,
                diag.message.clone(),
                diag.code,
            ));
        }
    }

    // =========================================================================
    // Tokens
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.scanner.token()
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.scanner.token() == kind
    }

    /// Whether the current token is the identifier `text` (contextual keyword).
    #[inline]
    pub(crate) fn is_identifier_text(&self, text: &str) -> bool {
        self.is_token(SyntaxKind::Identifier) && self.scanner.token_value() == text
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos() as u32
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.token_value().to_string()
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.last_token_end = self.scanner.token_end() as u32;
        self.scanner.scan()
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        let message = format_message(diagnostic_messages::EXPECTED, &[token_text(kind)]);
        self.error_owned_at_current(message, diagnostic_codes::EXPECTED);
        false
    }

    /// Whether a statement may end here under automatic semicolon insertion.
    pub(crate) fn can_parse_semicolon(&self) -> bool {
        self.is_token(SyntaxKind::SemicolonToken)
            || self.is_token(SyntaxKind::CloseBraceToken)
            || self.is_token(SyntaxKind::EndOfFileToken)
            || self.scanner.has_preceding_line_break()
    }

    pub(crate) fn parse_semicolon(&mut self) -> bool {
        if self.can_parse_semicolon() {
            self.parse_optional(SyntaxKind::SemicolonToken);
            return true;
        }
        self.parse_expected(SyntaxKind::SemicolonToken)
    }

    /// Run `callback` speculatively and rewind the scanner afterwards.
    pub(crate) fn look_ahead<T>(&mut self, callback: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.snapshot();
        let last_token_end = self.last_token_end;
        let node_count = self.arena.nodes.len();
        let diagnostics = self.diagnostics.len();
        let features = self.features;
        let result = callback(self);
        self.features = features;
        self.scanner.restore(snapshot);
        self.last_token_end = last_token_end;
        self.arena.nodes.truncate(node_count);
        self.diagnostics.truncate(diagnostics);
        result
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    /// Create a node spanning from `start` to the end of the last consumed token.
    pub(crate) fn finish_node(
        &mut self,
        kind: u16,
        text: impl Into<String>,
        children: &[NodeIndex],
        start: u32,
    ) -> NodeIndex {
        let end = self.last_token_end.max(start);
        self.arena.add_node(kind, text, children, start, end)
    }

    pub(crate) fn empty_node(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_node(syntax_kind_ext::EMPTY, "", &[], pos, pos)
    }

    /// Placeholder identifier for a missing expression.
    pub(crate) fn missing_node(&mut self) -> NodeIndex {
        let pos = self.token_pos();
        self.arena.add_node(syntax_kind_ext::IDENTIFIER, "", &[], pos, pos)
    }

    pub(crate) fn mark_feature(&mut self, feature: FeatureSet) {
        self.features |= feature;
    }

    // =========================================================================
    // Diagnostics and limits
    // =========================================================================

    pub(crate) fn error_at_current(&mut self, message: &str, code: u32) {
        self.error_owned_at_current(message.to_string(), code);
    }

    fn error_owned_at_current(&mut self, message: String, code: u32) {
        let start = self.token_pos();
        if self.last_error_pos == Some(start) {
            return;
        }
        self.last_error_pos = Some(start);
        let length = (self.scanner.token_end() as u32).saturating_sub(start).max(1);
        self.diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code,
        });
    }

    pub(crate) fn error_at(&mut self, start: u32, end: u32, message: &str, code: u32) {
        self.diagnostics.push(ParseDiagnostic {
            start,
            length: end.saturating_sub(start).max(1),
            message: message.to_string(),
            code,
        });
    }

    /// Increase nesting depth; `false` (with a diagnostic) when too deep.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_PARSER_RECURSION_DEPTH {
            self.error_at_current(
                diagnostic_messages::EXPRESSION_EXPECTED,
                diagnostic_codes::EXPRESSION_EXPECTED,
            );
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}
