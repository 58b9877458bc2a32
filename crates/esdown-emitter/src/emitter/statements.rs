use super::Printer;
use super::helpers::precedence;
use esdown_parser::parser::{NodeIndex, node_flags, syntax_kind_ext};

impl<'a> Printer<'a> {
    // =========================================================================
    // Statement lists and blocks
    // =========================================================================

    /// One statement per line.
    pub(super) fn emit_statement_list(&mut self, statements: &[NodeIndex]) {
        for &statement in statements {
            if self.arena.is_empty_node(statement) {
                continue;
            }
            self.emit_statement(statement);
            self.write_line();
        }
    }

    pub(super) fn emit_block(&mut self, block: NodeIndex) {
        let arena = self.arena;
        let statements = arena.children(block);
        if statements.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        self.emit_statement_list(statements);
        self.decrease_indent();
        self.write("}");
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub(super) fn emit_statement(&mut self, statement: NodeIndex) {
        let arena = self.arena;
        match arena.kind(statement) {
            syntax_kind_ext::BLOCK => self.emit_block(statement),
            syntax_kind_ext::EMPTY_STATEMENT => self.write(";"),
            syntax_kind_ext::VARIABLE_STATEMENT => {
                self.emit_variable_declaration_list(statement);
                self.write(";");
            }
            syntax_kind_ext::EXPRESSION_STATEMENT => self.emit_expression_statement(statement),
            syntax_kind_ext::RETURN_STATEMENT => self.emit_keyword_statement("return", statement),
            syntax_kind_ext::THROW_STATEMENT => self.emit_keyword_statement("throw", statement),
            syntax_kind_ext::BREAK_STATEMENT => self.emit_jump("break", statement),
            syntax_kind_ext::CONTINUE_STATEMENT => self.emit_jump("continue", statement),
            syntax_kind_ext::IF_STATEMENT => self.emit_if_statement(statement),
            syntax_kind_ext::WHILE_STATEMENT => {
                self.write("while (");
                self.emit_expression(arena.child(statement, 0), precedence::COMMA);
                self.write(") ");
                self.emit_block(arena.child(statement, 1));
            }
            syntax_kind_ext::DO_STATEMENT => {
                self.write("do ");
                self.emit_block(arena.child(statement, 0));
                self.write(" while (");
                self.emit_expression(arena.child(statement, 1), precedence::COMMA);
                self.write(");");
            }
            syntax_kind_ext::FOR_STATEMENT => self.emit_for_statement(statement),
            syntax_kind_ext::FOR_IN_STATEMENT => self.emit_for_each_statement("in", statement),
            syntax_kind_ext::FOR_OF_STATEMENT => self.emit_for_each_statement("of", statement),
            syntax_kind_ext::FUNCTION_DECLARATION => self.emit_function(statement),
            syntax_kind_ext::CLASS => self.emit_class(statement),
            _ => self.emit_expression(statement, precedence::COMMA),
        }
    }

    /// `var a = 1, b` without the semicolon, shared with `for` heads.
    fn emit_variable_declaration_list(&mut self, list: NodeIndex) {
        let arena = self.arena;
        let keyword = if arena.has_flag(list, node_flags::CONST) {
            "const"
        } else if arena.has_flag(list, node_flags::LET) {
            "let"
        } else {
            "var"
        };
        self.write(keyword);
        self.write_space();
        for (i, &declaration) in arena.children(list).iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(arena.text(arena.first_child(declaration)));
            let initializer = arena.child(declaration, 1);
            if initializer.is_some() {
                self.write(" = ");
                self.emit_expression(initializer, precedence::ASSIGNMENT);
            }
        }
    }

    fn emit_expression_statement(&mut self, statement: NodeIndex) {
        let expression = self.arena.first_child(statement);
        if self.starts_with_ambiguous_token(expression) {
            self.write("(");
            self.emit_expression(expression, precedence::COMMA);
            self.write(")");
        } else {
            self.emit_expression(expression, precedence::COMMA);
        }
        self.write(";");
    }

    fn emit_keyword_statement(&mut self, keyword: &str, statement: NodeIndex) {
        self.write(keyword);
        let expression = self.arena.first_child(statement);
        if expression.is_some() {
            self.write_space();
            self.emit_expression(expression, precedence::COMMA);
        }
        self.write(";");
    }

    fn emit_jump(&mut self, keyword: &str, statement: NodeIndex) {
        self.write(keyword);
        let label = self.arena.text(statement);
        if !label.is_empty() {
            self.write_space();
            self.write(label);
        }
        self.write(";");
    }

    fn emit_if_statement(&mut self, statement: NodeIndex) {
        let arena = self.arena;
        self.write("if (");
        self.emit_expression(arena.child(statement, 0), precedence::COMMA);
        self.write(") ");
        self.emit_block(arena.child(statement, 1));

        let else_branch = arena.child(statement, 2);
        if else_branch.is_none() {
            return;
        }
        self.write(" else ");
        // `else { if (..) }` and `else if (..)` parse to the same tree.
        match arena.children(else_branch) {
            [only] if arena.is_kind(*only, syntax_kind_ext::IF_STATEMENT) => {
                self.emit_if_statement(*only);
            }
            _ => self.emit_block(else_branch),
        }
    }

    fn emit_for_statement(&mut self, statement: NodeIndex) {
        let arena = self.arena;
        self.write("for (");
        self.emit_for_initializer(arena.child(statement, 0));
        self.write(";");
        for slot in 1..3 {
            let part = arena.child(statement, slot);
            if !arena.is_empty_node(part) {
                self.write_space();
                self.emit_expression(part, precedence::COMMA);
            }
            if slot == 1 {
                self.write(";");
            }
        }
        self.write(") ");
        self.emit_block(arena.child(statement, 3));
    }

    fn emit_for_each_statement(&mut self, keyword: &str, statement: NodeIndex) {
        let arena = self.arena;
        self.write("for (");
        self.emit_for_initializer(arena.child(statement, 0));
        self.write_space();
        self.write(keyword);
        self.write_space();
        let min = if keyword == "of" {
            precedence::ASSIGNMENT
        } else {
            precedence::COMMA
        };
        self.emit_expression(arena.child(statement, 1), min);
        self.write(") ");
        self.emit_block(arena.child(statement, 2));
    }

    fn emit_for_initializer(&mut self, initializer: NodeIndex) {
        match self.arena.kind(initializer) {
            syntax_kind_ext::EMPTY => {}
            syntax_kind_ext::VARIABLE_STATEMENT => self.emit_variable_declaration_list(initializer),
            _ => self.emit_expression(initializer, precedence::COMMA),
        }
    }
}
