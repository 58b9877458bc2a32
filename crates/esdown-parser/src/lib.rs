//! ECMAScript parser and program tree for the esdown compiler.
//!
//! This crate provides:
//! - `NodeArena` / `NodeIndex` / `Node` - the arena-allocated program tree
//! - Tree mutation primitives (detach, replace, insert, clone)
//! - `AstFactory` - construction of synthesized nodes
//! - `ParserState` - recursive descent parser producing the tree
//! - Syntax utilities shared by transforms

pub mod parser;
pub use parser::{ColorId, Node, NodeArena, NodeIndex, ParseDiagnostic, ParserState};
pub use parser::{node_flags, syntax_kind_ext};

pub mod factory;
pub use factory::AstFactory;

pub mod syntax;
