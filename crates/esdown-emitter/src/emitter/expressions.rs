use super::Printer;
use super::helpers::precedence;
use esdown_parser::parser::{NodeIndex, syntax_kind_ext};

impl<'a> Printer<'a> {
    /// Print `index`, parenthesized when it binds looser than `min_precedence`.
    pub(super) fn emit_expression(&mut self, index: NodeIndex, min_precedence: u8) {
        let parens = self.precedence_of(index) < min_precedence;
        self.emit_maybe_parenthesized(index, parens);
    }

    /// Print operand `slot` of `parent`.
    fn emit_operand(&mut self, parent: NodeIndex, slot: usize) {
        let child = self.arena.child(parent, slot);
        let parens = self.operand_needs_parens(parent, slot, child);
        self.emit_maybe_parenthesized(child, parens);
    }

    fn emit_maybe_parenthesized(&mut self, index: NodeIndex, parens: bool) {
        if parens {
            self.write("(");
            self.emit_expression_worker(index);
            self.write(")");
        } else {
            self.emit_expression_worker(index);
        }
    }

    fn emit_expression_worker(&mut self, index: NodeIndex) {
        let arena = self.arena;
        match arena.kind(index) {
            syntax_kind_ext::EMPTY => {}
            syntax_kind_ext::IDENTIFIER | syntax_kind_ext::NUMERIC_LITERAL => {
                self.write(arena.text(index));
            }
            syntax_kind_ext::THIS_KEYWORD => self.write("this"),
            syntax_kind_ext::SUPER_KEYWORD => self.write("super"),
            syntax_kind_ext::TRUE_KEYWORD => self.write("true"),
            syntax_kind_ext::FALSE_KEYWORD => self.write("false"),
            syntax_kind_ext::NULL_KEYWORD => self.write("null"),
            syntax_kind_ext::STRING_LITERAL => self.emit_string_literal(arena.text(index)),

            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                self.emit_operand(index, 0);
                self.write(if self.is_optional_chain(index) { "?." } else { "." });
                self.write(arena.text(index));
            }
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION => {
                self.emit_operand(index, 0);
                self.write(if self.is_optional_chain(index) { "?.[" } else { "[" });
                self.emit_expression(arena.child(index, 1), precedence::COMMA);
                self.write("]");
            }
            syntax_kind_ext::CALL_EXPRESSION => {
                self.emit_operand(index, 0);
                if self.is_optional_chain(index) {
                    self.write("?.");
                }
                self.emit_arguments(arena.children(index).get(1..).unwrap_or_default());
            }
            syntax_kind_ext::NEW_EXPRESSION => {
                self.write("new ");
                self.emit_operand(index, 0);
                self.emit_arguments(arena.children(index).get(1..).unwrap_or_default());
            }

            syntax_kind_ext::BINARY_EXPRESSION => {
                let op = arena.text(index);
                self.emit_operand(index, 0);
                if op == "," {
                    self.write(", ");
                } else {
                    self.write_space();
                    self.write(op);
                    self.write_space();
                }
                self.emit_operand(index, 1);
            }
            syntax_kind_ext::ASSIGNMENT_EXPRESSION => {
                self.emit_operand(index, 0);
                self.write_space();
                self.write(arena.text(index));
                self.write_space();
                self.emit_operand(index, 1);
            }
            syntax_kind_ext::CONDITIONAL_EXPRESSION => {
                self.emit_operand(index, 0);
                self.write(" ? ");
                self.emit_operand(index, 1);
                self.write(" : ");
                self.emit_operand(index, 2);
            }
            syntax_kind_ext::PREFIX_UNARY_EXPRESSION => self.emit_prefix_unary(index),
            syntax_kind_ext::POSTFIX_UNARY_EXPRESSION => {
                self.emit_operand(index, 0);
                self.write(arena.text(index));
            }
            syntax_kind_ext::SPREAD_ELEMENT => {
                self.write("...");
                self.emit_expression(arena.first_child(index), precedence::ASSIGNMENT);
            }

            syntax_kind_ext::ARRAY_LITERAL => self.emit_array_literal(index),
            syntax_kind_ext::OBJECT_LITERAL => self.emit_object_literal(index),
            syntax_kind_ext::FUNCTION_EXPRESSION | syntax_kind_ext::FUNCTION_DECLARATION => {
                self.emit_function(index);
            }
            syntax_kind_ext::ARROW_FUNCTION => self.emit_arrow_function(index),
            syntax_kind_ext::CLASS => self.emit_class(index),
            kind if super::is_statement_kind(kind) => self.emit_statement(index),
            kind => {
                tracing::trace!(kind, "no printer for node kind");
            }
        }
    }

    fn emit_arguments(&mut self, arguments: &[NodeIndex]) {
        self.write("(");
        self.emit_comma_list(arguments, precedence::ASSIGNMENT);
        self.write(")");
    }

    fn emit_prefix_unary(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let op = arena.text(index);
        let operand = arena.first_child(index);
        self.write(op);
        let is_word = op.bytes().all(|b| b.is_ascii_alphabetic());
        // `- -a` and `+ ++a` must not fuse into `--a` and `+++a`.
        let fuses = arena.is_kind(operand, syntax_kind_ext::PREFIX_UNARY_EXPRESSION)
            && matches!(op, "+" | "-")
            && arena.text(operand).starts_with(op);
        if is_word || fuses {
            self.write_space();
        }
        self.emit_operand(index, 0);
    }

    fn emit_array_literal(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let elements = arena.children(index);
        self.write("[");
        self.emit_comma_list(elements, precedence::ASSIGNMENT);
        // A trailing hole needs its own comma to survive.
        if elements.last().is_some_and(|&e| arena.is_empty_node(e)) {
            self.write(",");
        }
        self.write("]");
    }

    fn emit_object_literal(&mut self, index: NodeIndex) {
        let arena = self.arena;
        let properties = arena.children(index);
        if properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, &property) in properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match arena.kind(property) {
                syntax_kind_ext::PROPERTY_ASSIGNMENT => {
                    self.emit_property_key(arena.first_child(property));
                    self.write(": ");
                    self.emit_expression(arena.child(property, 1), precedence::ASSIGNMENT);
                }
                syntax_kind_ext::SHORTHAND_PROPERTY => self.write(arena.text(property)),
                syntax_kind_ext::COMPUTED_PROPERTY_ASSIGNMENT => {
                    self.emit_computed_key(arena.first_child(property));
                    self.write(": ");
                    self.emit_expression(arena.child(property, 1), precedence::ASSIGNMENT);
                }
                syntax_kind_ext::METHOD_DECLARATION
                | syntax_kind_ext::COMPUTED_METHOD_DECLARATION => self.emit_method(property),
                _ => self.emit_expression(property, precedence::ASSIGNMENT),
            }
        }
        self.write(" }");
    }
}
