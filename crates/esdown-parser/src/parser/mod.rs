//! Parser and program tree.

pub mod base;
pub use base::{ColorId, NodeIndex};

pub mod syntax_kind_ext;

pub mod node;
pub use node::{Node, NodeArena, node_flags};

mod node_access;
pub use node_access::is_statement_container;
mod node_arena;

mod state;
pub use state::{ParseDiagnostic, ParserState};
mod state_class_members;
mod state_expressions;
mod state_statements;
