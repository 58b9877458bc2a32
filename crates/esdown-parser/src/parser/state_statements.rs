//! Statement parsing.

use super::base::NodeIndex;
use super::node::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;
use esdown_common::FeatureSet;
use esdown_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use esdown_scanner::SyntaxKind;

impl ParserState {
    pub(crate) fn parse_statement(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            self.next_token();
            return self.empty_node();
        }
        let statement = self.parse_statement_worker();
        self.exit_recursion();
        statement
    }

    fn parse_statement_worker(&mut self) -> NodeIndex {
        match self.token() {
            SyntaxKind::OpenBraceToken => self.parse_block(),
            SyntaxKind::SemicolonToken => {
                let start = self.token_pos();
                self.next_token();
                self.finish_node(syntax_kind_ext::EMPTY_STATEMENT, "", &[], start)
            }
            SyntaxKind::VarKeyword => self.parse_variable_statement(node_flags::VAR),
            SyntaxKind::ConstKeyword => self.parse_variable_statement(node_flags::CONST),
            SyntaxKind::Identifier if self.is_let_declaration() => {
                self.parse_variable_statement(node_flags::LET)
            }
            SyntaxKind::FunctionKeyword => self.parse_function(true),
            SyntaxKind::ClassKeyword => self.parse_class(true),
            SyntaxKind::IfKeyword => self.parse_if_statement(),
            SyntaxKind::WhileKeyword => self.parse_while_statement(),
            SyntaxKind::DoKeyword => self.parse_do_statement(),
            SyntaxKind::ForKeyword => self.parse_for_statement(),
            SyntaxKind::ReturnKeyword => self.parse_return_or_throw(
                syntax_kind_ext::RETURN_STATEMENT,
                /*expression_required*/ false,
            ),
            SyntaxKind::ThrowKeyword => self.parse_return_or_throw(
                syntax_kind_ext::THROW_STATEMENT,
                /*expression_required*/ true,
            ),
            SyntaxKind::BreakKeyword => self.parse_jump(syntax_kind_ext::BREAK_STATEMENT),
            SyntaxKind::ContinueKeyword => self.parse_jump(syntax_kind_ext::CONTINUE_STATEMENT),
            SyntaxKind::AtToken => {
                self.skip_decorator();
                self.parse_statement_worker()
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// `let` starts a declaration when followed by a binding name.
    fn is_let_declaration(&mut self) -> bool {
        if !self.is_identifier_text("let") {
            return false;
        }
        self.look_ahead(|p| {
            p.next_token();
            p.token().is_identifier_or_keyword()
                || p.is_token(SyntaxKind::OpenBracketToken)
                || p.is_token(SyntaxKind::OpenBraceToken)
        })
    }

    /// Report `@decorator` and skip over it.
    pub(crate) fn skip_decorator(&mut self) {
        let start = self.token_pos();
        self.next_token();
        self.parse_left_hand_side_expression();
        let end = self.last_token_end;
        self.error_at(
            start,
            end,
            diagnostic_messages::DECORATORS_NOT_SUPPORTED,
            diagnostic_codes::DECORATORS_NOT_SUPPORTED,
        );
    }

    /// `{ statements }`
    pub(crate) fn parse_block(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let statements = self.parse_statement_list();
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(syntax_kind_ext::BLOCK, "", &statements, start)
    }

    /// Statements up to (not including) the closing `}`.
    pub(crate) fn parse_statement_list(&mut self) -> Vec<NodeIndex> {
        let mut statements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let start = self.token_pos();
            statements.push(self.parse_statement());
            if self.token_pos() == start {
                self.error_at_current(
                    diagnostic_messages::DECLARATION_OR_STATEMENT_EXPECTED,
                    diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED,
                );
                self.next_token();
            }
        }
        statements
    }

    /// Body of `if`/`while`/`for`/`do`; a single statement is wrapped in a block.
    fn parse_embedded_statement(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::OpenBraceToken) {
            return self.parse_block();
        }
        let start = self.token_pos();
        let statement = self.parse_statement();
        self.finish_node(syntax_kind_ext::BLOCK, "", &[statement], start)
    }

    fn parse_variable_statement(&mut self, flags: u32) -> NodeIndex {
        let start = self.token_pos();
        let list = self.parse_variable_declaration_list(flags);
        self.parse_semicolon();
        self.arena.set_range(list, start, self.last_token_end);
        list
    }

    /// `var|let|const a = 1, b` without the terminating semicolon.
    pub(crate) fn parse_variable_declaration_list(&mut self, flags: u32) -> NodeIndex {
        let start = self.token_pos();
        if flags & node_flags::LET != 0 {
            self.mark_feature(FeatureSet::LET_DECLARATIONS);
        } else if flags & node_flags::CONST != 0 {
            self.mark_feature(FeatureSet::CONST_DECLARATIONS);
        }
        self.next_token();

        let mut declarations = Vec::new();
        loop {
            let decl_start = self.token_pos();
            let name = self.parse_binding_identifier();
            let mut children = vec![name];
            if self.parse_optional(SyntaxKind::EqualsToken) {
                children.push(self.parse_assignment_expression());
            }
            declarations.push(self.finish_node(
                syntax_kind_ext::VARIABLE_DECLARATION,
                "",
                &children,
                decl_start,
            ));
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }

        let list = self.finish_node(syntax_kind_ext::VARIABLE_STATEMENT, "", &declarations, start);
        self.arena.set_flags(list, flags);
        list
    }

    /// A plain identifier in binding position.
    pub(crate) fn parse_binding_identifier(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.is_token(SyntaxKind::Identifier) {
            let name = self.token_value();
            self.next_token();
            return self.finish_node(syntax_kind_ext::IDENTIFIER, name, &[], start);
        }
        self.error_at_current(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
        self.missing_node()
    }

    fn parse_if_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let then_branch = self.parse_embedded_statement();
        let mut children = vec![condition, then_branch];
        if self.parse_optional(SyntaxKind::ElseKeyword) {
            children.push(self.parse_embedded_statement());
        }
        self.finish_node(syntax_kind_ext::IF_STATEMENT, "", &children, start)
    }

    fn parse_while_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_embedded_statement();
        self.finish_node(syntax_kind_ext::WHILE_STATEMENT, "", &[condition, body], start)
    }

    fn parse_do_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let body = self.parse_embedded_statement();
        self.parse_expected(SyntaxKind::WhileKeyword);
        self.parse_expected(SyntaxKind::OpenParenToken);
        let condition = self.parse_expression();
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.parse_optional(SyntaxKind::SemicolonToken);
        self.finish_node(syntax_kind_ext::DO_STATEMENT, "", &[body, condition], start)
    }

    /// `for (;;)`, `for (x in o)` and `for (x of o)`.
    fn parse_for_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        self.parse_expected(SyntaxKind::OpenParenToken);

        let saved_disallow_in = self.disallow_in;
        self.disallow_in = true;
        let initializer = if self.is_token(SyntaxKind::SemicolonToken) {
            self.empty_node()
        } else if self.is_token(SyntaxKind::VarKeyword) {
            self.parse_variable_declaration_list(node_flags::VAR)
        } else if self.is_token(SyntaxKind::ConstKeyword) {
            self.parse_variable_declaration_list(node_flags::CONST)
        } else if self.is_let_declaration() {
            self.parse_variable_declaration_list(node_flags::LET)
        } else {
            self.parse_expression()
        };
        self.disallow_in = saved_disallow_in;

        if self.parse_optional(SyntaxKind::InKeyword) {
            let object = self.parse_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let body = self.parse_embedded_statement();
            return self.finish_node(
                syntax_kind_ext::FOR_IN_STATEMENT,
                "",
                &[initializer, object, body],
                start,
            );
        }
        if self.is_identifier_text("of") {
            self.next_token();
            let iterable = self.parse_assignment_expression();
            self.parse_expected(SyntaxKind::CloseParenToken);
            let body = self.parse_embedded_statement();
            return self.finish_node(
                syntax_kind_ext::FOR_OF_STATEMENT,
                "",
                &[initializer, iterable, body],
                start,
            );
        }

        self.parse_expected(SyntaxKind::SemicolonToken);
        let condition = if self.is_token(SyntaxKind::SemicolonToken) {
            self.empty_node()
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::SemicolonToken);
        let incrementor = if self.is_token(SyntaxKind::CloseParenToken) {
            self.empty_node()
        } else {
            self.parse_expression()
        };
        self.parse_expected(SyntaxKind::CloseParenToken);
        let body = self.parse_embedded_statement();
        self.finish_node(
            syntax_kind_ext::FOR_STATEMENT,
            "",
            &[initializer, condition, incrementor, body],
            start,
        )
    }

    fn parse_return_or_throw(&mut self, kind: u16, expression_required: bool) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut children = Vec::new();
        if expression_required || !self.can_parse_semicolon() {
            children.push(self.parse_expression());
        }
        self.parse_semicolon();
        self.finish_node(kind, "", &children, start)
    }

    /// `break;` / `continue;` with an optional label kept in `text`.
    fn parse_jump(&mut self, kind: u16) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let mut label = String::new();
        if self.is_token(SyntaxKind::Identifier) && !self.scanner.has_preceding_line_break() {
            label = self.token_value();
            self.next_token();
        }
        self.parse_semicolon();
        self.finish_node(kind, label, &[], start)
    }

    fn parse_expression_statement(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = self.parse_expression();
        self.parse_semicolon();
        self.finish_node(syntax_kind_ext::EXPRESSION_STATEMENT, "", &[expression], start)
    }
}
