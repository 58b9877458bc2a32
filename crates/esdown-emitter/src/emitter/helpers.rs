use super::{INDENT, Printer};
use esdown_parser::parser::{NodeIndex, node_flags, syntax_kind_ext};
use esdown_parser::syntax::operators::{binary_operator_precedence, is_right_associative};

/// Expression precedence levels; higher binds tighter.
pub(super) mod precedence {
    pub const COMMA: u8 = 0;
    pub const ASSIGNMENT: u8 = 2;
    pub const CONDITIONAL: u8 = 3;
    /// Binary operators sit at `BINARY_BASE + binary_operator_precedence(op)`.
    pub const BINARY_BASE: u8 = 3;
    pub const UNARY: u8 = 15;
    pub const POSTFIX: u8 = 16;
    pub const CALL: u8 = 17;
    pub const MEMBER: u8 = 18;
    pub const PRIMARY: u8 = 19;
}

impl<'a> Printer<'a> {
    // =========================================================================
    // Output
    // =========================================================================

    pub(super) fn write(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.indent_level {
                self.output.push_str(INDENT);
            }
            self.at_line_start = false;
        }
        self.output.push_str(text);
    }

    pub(super) fn write_space(&mut self) {
        self.write(" ");
    }

    pub(super) fn write_line(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    pub(super) fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub(super) fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Print `items` separated by `, `, each at `min_precedence`.
    pub(super) fn emit_comma_list(&mut self, items: &[NodeIndex], min_precedence: u8) {
        for (i, &item) in items.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.emit_expression(item, min_precedence);
        }
    }

    // =========================================================================
    // Precedence
    // =========================================================================

    pub(super) fn precedence_of(&self, index: NodeIndex) -> u8 {
        match self.arena.kind(index) {
            syntax_kind_ext::BINARY_EXPRESSION => {
                let op = self.arena.text(index);
                if op == "," {
                    precedence::COMMA
                } else {
                    precedence::BINARY_BASE + binary_operator_precedence(op)
                }
            }
            syntax_kind_ext::ASSIGNMENT_EXPRESSION
            | syntax_kind_ext::ARROW_FUNCTION
            | syntax_kind_ext::SPREAD_ELEMENT => precedence::ASSIGNMENT,
            syntax_kind_ext::CONDITIONAL_EXPRESSION => precedence::CONDITIONAL,
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => precedence::UNARY,
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => precedence::POSTFIX,
            syntax_kind_ext::CALL_EXPRESSION => precedence::CALL,
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
            | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
            | syntax_kind_ext::NEW_EXPRESSION => precedence::MEMBER,
            _ => precedence::PRIMARY,
        }
    }

    /// Whether `child`, printed as operand `slot` of `parent`, needs parentheses.
    pub(super) fn operand_needs_parens(
        &self,
        parent: NodeIndex,
        slot: usize,
        child: NodeIndex,
    ) -> bool {
        let arena = self.arena;
        let child_precedence = self.precedence_of(child);
        match arena.kind(parent) {
            syntax_kind_ext::BINARY_EXPRESSION => {
                let op = arena.text(parent);
                if op == "," {
                    let min = if slot == 0 {
                        precedence::COMMA
                    } else {
                        precedence::ASSIGNMENT
                    };
                    return child_precedence < min;
                }
                if mixes_nullish_with_logical(op, arena.text(child))
                    && arena.is_kind(child, syntax_kind_ext::BINARY_EXPRESSION)
                {
                    return true;
                }
                let own = self.precedence_of(parent);
                let min = match (slot, is_right_associative(op)) {
                    // `(-a) ** b`: a unary operand of `**` must be wrapped.
                    (0, true) => precedence::POSTFIX,
                    (0, false) => own,
                    (_, true) => own,
                    (_, false) => own + 1,
                };
                child_precedence < min
            }
            syntax_kind_ext::ASSIGNMENT_EXPRESSION => {
                let min = if slot == 0 {
                    precedence::CALL
                } else {
                    precedence::ASSIGNMENT
                };
                child_precedence < min
            }
            syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                let min = if slot == 0 {
                    precedence::CONDITIONAL + 1
                } else {
                    precedence::ASSIGNMENT
                };
                child_precedence < min
            }
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => child_precedence < precedence::UNARY,
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => child_precedence < precedence::CALL,
            syntax_kind_ext::CALL_EXPRESSION if slot == 0 => {
                is_iife_callee(arena.kind(child)) || child_precedence < precedence::CALL
            }
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
                if slot == 0 =>
            {
                child_precedence < precedence::CALL || self.is_bare_integer(child)
            }
            syntax_kind_ext::NEW_EXPRESSION if slot == 0 => {
                child_precedence < precedence::MEMBER || self.member_chain_has_call(child)
            }
            _ => child_precedence < precedence::ASSIGNMENT,
        }
    }

    /// `1.toString()` does not parse; `(1).toString()` does.
    fn is_bare_integer(&self, index: NodeIndex) -> bool {
        self.arena.is_kind(index, syntax_kind_ext::NUMERIC_LITERAL)
            && self
                .arena
                .text(index)
                .bytes()
                .all(|b| b.is_ascii_digit())
    }

    /// `new (a().b)()` must keep its parentheses.
    fn member_chain_has_call(&self, mut index: NodeIndex) -> bool {
        loop {
            match self.arena.kind(index) {
                syntax_kind_ext::CALL_EXPRESSION => return true,
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
                | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                    index = self.arena.first_child(index);
                }
                _ => return false,
            }
        }
    }

    /// Whether an expression statement starting with `expression` would be
    /// read as a block, a function declaration or a class declaration.
    pub(super) fn starts_with_ambiguous_token(&self, expression: NodeIndex) -> bool {
        let arena = self.arena;
        let mut current = expression;
        loop {
            match arena.kind(current) {
                syntax_kind_ext::OBJECT_LITERAL
                | syntax_kind_ext::FUNCTION_EXPRESSION
                | syntax_kind_ext::CLASS => return true,
                syntax_kind_ext::CALL_EXPRESSION
                | syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
                | syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION
                | syntax_kind_ext::BINARY_EXPRESSION
                | syntax_kind_ext::ASSIGNMENT_EXPRESSION
                | syntax_kind_ext::CONDITIONAL_EXPRESSION
                | syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => {
                    let first = arena.first_child(current);
                    if self.operand_needs_parens(current, 0, first) {
                        return false;
                    }
                    current = first;
                }
                _ => return false,
            }
        }
    }

    pub(super) fn is_optional_chain(&self, index: NodeIndex) -> bool {
        self.arena.has_flag(index, node_flags::OPTIONAL_CHAIN)
    }
}

fn is_iife_callee(kind: u16) -> bool {
    matches!(
        kind,
        syntax_kind_ext::ARROW_FUNCTION | syntax_kind_ext::FUNCTION_EXPRESSION
    )
}

/// `a ?? b || c` is a syntax error; either side must be parenthesized.
fn mixes_nullish_with_logical(parent_op: &str, child_op: &str) -> bool {
    match parent_op {
        "??" => matches!(child_op, "||" | "&&"),
        "||" | "&&" => child_op == "??",
        _ => false,
    }
}
