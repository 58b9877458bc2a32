//! ECMAScript scanner/tokenizer for the esdown compiler.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine

pub mod syntax_kind;
pub use syntax_kind::{SyntaxKind, keyword_kind, token_text};

pub mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerSnapshot, ScannerState};
