//! Centralized limits and thresholds.
//!
//! Recursive algorithms over the program tree stop descending past these
//! depths instead of overflowing the stack on pathological input.

/// Maximum nesting depth the parser accepts for statements and expressions.
///
/// Deeper input produces a parse diagnostic and an `EMPTY` placeholder node.
pub const MAX_PARSER_RECURSION_DEPTH: u32 = 1_000;

/// Maximum recursion depth for transform traversals.
///
/// Mirrors the parser limit so any tree the parser accepts can be walked.
pub const MAX_AST_DEPTH: u32 = 1_000;

/// Maximum number of links followed when printing a qualified name (`a.b.c`).
pub const MAX_QUALIFIED_NAME_DEPTH: u32 = 100;
