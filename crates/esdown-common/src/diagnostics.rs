//! Diagnostic types and message lookup.
//!
//! Parser and transform diagnostics share one message table. Messages are
//! templates with `{0}`, `{1}` placeholders filled by `format_message()`.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

/// A diagnostic message anchored at a source range of one file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub const fn error(file: String, start: u32, length: u32, message: String, code: u32) -> Self {
        Self {
            file,
            start,
            length,
            message_text: message,
            category: DiagnosticCategory::Error,
            code,
        }
    }

    /// Create a diagnostic from a message definition and its arguments.
    #[must_use]
    pub fn from_message(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: &DiagnosticMessage,
        args: &[&str],
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: format_message(message.message, args),
            category: message.category,
            code: message.code,
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.category, DiagnosticCategory::Error)
    }
}

/// Receives diagnostics as they are produced.
///
/// Producers never abort on a diagnostic; the sink decides what to keep.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const EXPECTED: u32 = 1005;
    pub const ASTERISK_SLASH_EXPECTED: u32 = 1010;
    pub const UNEXPECTED_TOKEN_CLASS_MEMBER_EXPECTED: u32 = 1068;
    pub const EXPRESSION_EXPECTED: u32 = 1109;
    pub const INVALID_CHARACTER: u32 = 1127;
    pub const DECLARATION_OR_STATEMENT_EXPECTED: u32 = 1128;
    pub const IDENTIFIER_EXPECTED: u32 = 1003;
    pub const CANNOT_CONVERT: u32 = 9001;
    pub const CANNOT_CONVERT_YET: u32 = 9002;
    pub const PRIVATE_NAMES_NOT_SUPPORTED: u32 = 9003;
    pub const DECORATORS_NOT_SUPPORTED: u32 = 9004;
}

pub mod diagnostic_messages {
    pub const UNTERMINATED_STRING_LITERAL: &str = "Unterminated string literal.";
    pub const EXPECTED: &str = "'{0}' expected.";
    pub const ASTERISK_SLASH_EXPECTED: &str = "'*/' expected.";
    pub const UNEXPECTED_TOKEN_CLASS_MEMBER_EXPECTED: &str =
        "Unexpected token. A constructor, method, accessor, or property was expected.";
    pub const EXPRESSION_EXPECTED: &str = "Expression expected.";
    pub const INVALID_CHARACTER: &str = "Invalid character.";
    pub const DECLARATION_OR_STATEMENT_EXPECTED: &str = "Declaration or statement expected.";
    pub const IDENTIFIER_EXPECTED: &str = "Identifier expected.";
    pub const CANNOT_CONVERT: &str = "This code cannot be converted from ES2022. {0}";
    pub const CANNOT_CONVERT_YET: &str = "ES2022 transpilation of '{0}' is not yet implemented.";
    pub const PRIVATE_NAMES_NOT_SUPPORTED: &str = "Private names are not supported.";
    pub const DECORATORS_NOT_SUPPORTED: &str = "Decorators are not supported.";
}

macro_rules! message {
    ($name:ident, $category:ident) => {
        DiagnosticMessage {
            code: diagnostic_codes::$name,
            category: DiagnosticCategory::$category,
            message: diagnostic_messages::$name,
        }
    };
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    message!(UNTERMINATED_STRING_LITERAL, Error),
    message!(EXPECTED, Error),
    message!(ASTERISK_SLASH_EXPECTED, Error),
    message!(UNEXPECTED_TOKEN_CLASS_MEMBER_EXPECTED, Error),
    message!(EXPRESSION_EXPECTED, Error),
    message!(INVALID_CHARACTER, Error),
    message!(DECLARATION_OR_STATEMENT_EXPECTED, Error),
    message!(IDENTIFIER_EXPECTED, Error),
    message!(CANNOT_CONVERT, Error),
    message!(CANNOT_CONVERT_YET, Error),
    message!(PRIVATE_NAMES_NOT_SUPPORTED, Error),
    message!(DECORATORS_NOT_SUPPORTED, Error),
];

/// Look up a diagnostic message definition by code.
///
/// Returns the `DiagnosticMessage` with template string containing `{0}`, `{1}`, etc. placeholders.
/// Use `format_message()` to fill in the placeholders.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}

#[cfg(test)]
#[path = "tests/diagnostics.rs"]
mod tests;
