//! JavaScript printer.
//!
//! Prints a program tree back to source text with deterministic formatting:
//! four-space indentation, one statement per line, a semicolon after every
//! simple statement and parentheses only where precedence requires them.
//! Formatting never depends on source positions, so a lowered tree and a
//! freshly parsed tree of the same program print identically.

mod expressions;
mod functions;
mod helpers;
mod literals;
mod statements;

use esdown_parser::parser::{NodeArena, NodeIndex, syntax_kind_ext};

const INDENT: &str = "    ";

/// Printer over one arena.
pub struct Printer<'a> {
    arena: &'a NodeArena,
    output: String,
    indent_level: u32,
    at_line_start: bool,
}

impl<'a> Printer<'a> {
    #[must_use]
    pub fn new(arena: &'a NodeArena) -> Self {
        Printer {
            arena,
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Print any node: a source file, a statement or an expression.
    pub fn emit(&mut self, index: NodeIndex) {
        let arena = self.arena;
        match arena.kind(index) {
            syntax_kind_ext::SOURCE_FILE => self.emit_statement_list(arena.children(index)),
            kind if is_statement_kind(kind) => self.emit_statement(index),
            _ => self.emit_expression(index, helpers::precedence::COMMA),
        }
    }

    /// Consume the printer and return the text printed so far.
    #[must_use]
    pub fn finish(self) -> String {
        self.output
    }
}

/// Print `root` and everything below it.
#[must_use]
pub fn print_to_string(arena: &NodeArena, root: NodeIndex) -> String {
    let mut printer = Printer::new(arena);
    printer.emit(root);
    printer.finish()
}

fn is_statement_kind(kind: u16) -> bool {
    matches!(
        kind,
        syntax_kind_ext::BLOCK
            | syntax_kind_ext::VARIABLE_STATEMENT
            | syntax_kind_ext::EXPRESSION_STATEMENT
            | syntax_kind_ext::RETURN_STATEMENT
            | syntax_kind_ext::THROW_STATEMENT
            | syntax_kind_ext::IF_STATEMENT
            | syntax_kind_ext::WHILE_STATEMENT
            | syntax_kind_ext::DO_STATEMENT
            | syntax_kind_ext::FOR_STATEMENT
            | syntax_kind_ext::FOR_IN_STATEMENT
            | syntax_kind_ext::FOR_OF_STATEMENT
            | syntax_kind_ext::BREAK_STATEMENT
            | syntax_kind_ext::CONTINUE_STATEMENT
            | syntax_kind_ext::EMPTY_STATEMENT
            | syntax_kind_ext::FUNCTION_DECLARATION
    )
}
