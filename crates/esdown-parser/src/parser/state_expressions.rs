//! Expression parsing.

use super::base::NodeIndex;
use super::node::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;
use crate::syntax::operators::binary_operator_precedence;
use esdown_common::FeatureSet;
use esdown_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use esdown_scanner::{SyntaxKind, token_text};

impl ParserState {
    /// Comma-separated sequence of assignment expressions.
    pub(crate) fn parse_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let mut expression = self.parse_assignment_expression();
        while self.parse_optional(SyntaxKind::CommaToken) {
            let right = self.parse_assignment_expression();
            expression =
                self.finish_node(syntax_kind_ext::BINARY_EXPRESSION, ",", &[expression, right], start);
        }
        expression
    }

    pub(crate) fn parse_assignment_expression(&mut self) -> NodeIndex {
        if !self.enter_recursion() {
            return self.missing_node();
        }
        let expression = self.parse_assignment_expression_worker();
        self.exit_recursion();
        expression
    }

    fn parse_assignment_expression_worker(&mut self) -> NodeIndex {
        if self.is_arrow_function_start() {
            return self.parse_arrow_function();
        }
        let start = self.token_pos();
        let left = self.parse_conditional_expression();
        let operator = self.token();
        if operator.is_assignment_operator() {
            self.next_token();
            let right = self.parse_assignment_expression();
            return self.finish_node(
                syntax_kind_ext::ASSIGNMENT_EXPRESSION,
                token_text(operator),
                &[left, right],
                start,
            );
        }
        left
    }

    // =========================================================================
    // Arrow functions
    // =========================================================================

    fn is_arrow_function_start(&mut self) -> bool {
        match self.token() {
            SyntaxKind::Identifier => self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::EqualsGreaterThanToken)
                    && !p.scanner.has_preceding_line_break()
            }),
            SyntaxKind::OpenParenToken => self.look_ahead(|p| {
                let mut depth = 0u32;
                loop {
                    match p.token() {
                        SyntaxKind::OpenParenToken
                        | SyntaxKind::OpenBracketToken
                        | SyntaxKind::OpenBraceToken => depth += 1,
                        SyntaxKind::CloseParenToken
                        | SyntaxKind::CloseBracketToken
                        | SyntaxKind::CloseBraceToken => {
                            depth = depth.saturating_sub(1);
                            if depth == 0 {
                                p.next_token();
                                return p.is_token(SyntaxKind::EqualsGreaterThanToken)
                                    && !p.scanner.has_preceding_line_break();
                            }
                        }
                        SyntaxKind::EndOfFileToken => return false,
                        _ => {}
                    }
                    p.next_token();
                }
            }),
            _ => false,
        }
    }

    fn parse_arrow_function(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.mark_feature(FeatureSet::ARROW_FUNCTIONS);
        let name = self.empty_node();
        let params = if self.is_token(SyntaxKind::Identifier) {
            let param_start = self.token_pos();
            let param_name = self.parse_binding_identifier();
            let param =
                self.finish_node(syntax_kind_ext::PARAMETER, "", &[param_name], param_start);
            self.finish_node(syntax_kind_ext::PARAMETER_LIST, "", &[param], param_start)
        } else {
            self.parse_parameter_list()
        };
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);

        if self.is_token(SyntaxKind::OpenBraceToken) {
            let body = self.parse_function_body();
            return self.finish_node(syntax_kind_ext::ARROW_FUNCTION, "", &[name, params, body], start);
        }
        let body = self.parse_assignment_expression();
        let arrow =
            self.finish_node(syntax_kind_ext::ARROW_FUNCTION, "", &[name, params, body], start);
        self.arena.set_flags(arrow, node_flags::EXPRESSION_BODY);
        arrow
    }

    // =========================================================================
    // Functions
    // =========================================================================

    /// `function [*][name](params) { body }`
    pub(crate) fn parse_function(&mut self, is_declaration: bool) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::FunctionKeyword);
        let generator = self.parse_optional(SyntaxKind::AsteriskToken);
        let name = if self.is_token(SyntaxKind::Identifier) || is_declaration {
            self.parse_binding_identifier()
        } else {
            self.empty_node()
        };
        let params = self.parse_parameter_list();
        let body = self.parse_function_body();
        let kind = if is_declaration {
            syntax_kind_ext::FUNCTION_DECLARATION
        } else {
            syntax_kind_ext::FUNCTION_EXPRESSION
        };
        let function = self.finish_node(kind, "", &[name, params, body], start);
        if generator {
            self.arena.set_flags(function, node_flags::GENERATOR);
        }
        function
    }

    /// Parameters and body of a method, as an anonymous `FUNCTION_EXPRESSION`.
    pub(crate) fn parse_method_function(&mut self, generator: bool) -> NodeIndex {
        let start = self.token_pos();
        let name = self.empty_node();
        let params = self.parse_parameter_list();
        let body = self.parse_function_body();
        let function =
            self.finish_node(syntax_kind_ext::FUNCTION_EXPRESSION, "", &[name, params, body], start);
        if generator {
            self.arena.set_flags(function, node_flags::GENERATOR);
        }
        function
    }

    pub(crate) fn parse_function_body(&mut self) -> NodeIndex {
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let body = self.parse_block();
        self.disallow_in = saved_disallow_in;
        body
    }

    /// `(a, b = 1, ...rest)`
    pub(crate) fn parse_parameter_list(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenParenToken);
        let mut params = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let param_start = self.token_pos();
            let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
            let name = self.parse_binding_identifier();
            let mut children = vec![name];
            if self.parse_optional(SyntaxKind::EqualsToken) {
                self.mark_feature(FeatureSet::DEFAULT_PARAMETERS);
                children.push(self.parse_assignment_expression());
            }
            let param = self.finish_node(syntax_kind_ext::PARAMETER, "", &children, param_start);
            if rest {
                self.mark_feature(FeatureSet::REST_PARAMETERS);
                self.arena.set_flags(param, node_flags::REST);
            }
            params.push(param);
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseParenToken);
        self.finish_node(syntax_kind_ext::PARAMETER_LIST, "", &params, start)
    }

    // =========================================================================
    // Operators
    // =========================================================================

    fn parse_conditional_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let condition = self.parse_binary_expression(0);
        if !self.parse_optional(SyntaxKind::QuestionToken) {
            return condition;
        }
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let when_true = self.parse_assignment_expression();
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::ColonToken);
        let when_false = self.parse_assignment_expression();
        self.finish_node(
            syntax_kind_ext::CONDITIONAL_EXPRESSION,
            "",
            &[condition, when_true, when_false],
            start,
        )
    }

    /// Precedence climbing over binary operators binding tighter than `min_precedence`.
    fn parse_binary_expression(&mut self, min_precedence: u8) -> NodeIndex {
        let start = self.token_pos();
        let mut left = self.parse_unary_expression();
        loop {
            let operator = self.token();
            if operator == SyntaxKind::InKeyword && self.disallow_in {
                break;
            }
            let text = token_text(operator);
            let precedence = binary_operator_precedence(text);
            if precedence == 0 || precedence <= min_precedence {
                break;
            }
            self.next_token();
            // `**` is right-associative.
            let right = if operator == SyntaxKind::AsteriskAsteriskToken {
                self.parse_binary_expression(precedence - 1)
            } else {
                self.parse_binary_expression(precedence)
            };
            left = self.finish_node(syntax_kind_ext::BINARY_EXPRESSION, text, &[left, right], start);
        }
        left
    }

    fn parse_unary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::ExclamationToken
            | SyntaxKind::TildeToken
            | SyntaxKind::PlusToken
            | SyntaxKind::MinusToken
            | SyntaxKind::PlusPlusToken
            | SyntaxKind::MinusMinusToken
            | SyntaxKind::TypeOfKeyword
            | SyntaxKind::VoidKeyword
            | SyntaxKind::DeleteKeyword => {
                let operator = token_text(self.token());
                self.next_token();
                if !self.enter_recursion() {
                    return self.missing_node();
                }
                let operand = self.parse_unary_expression();
                self.exit_recursion();
                self.finish_node(
                    syntax_kind_ext::PREFIX_UNARY_EXPRESSION,
                    operator,
                    &[operand],
                    start,
                )
            }
            _ => self.parse_postfix_expression(),
        }
    }

    fn parse_postfix_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let operand = self.parse_left_hand_side_expression();
        if (self.is_token(SyntaxKind::PlusPlusToken) || self.is_token(SyntaxKind::MinusMinusToken))
            && !self.scanner.has_preceding_line_break()
        {
            let operator = token_text(self.token());
            self.next_token();
            return self.finish_node(
                syntax_kind_ext::POSTFIX_UNARY_EXPRESSION,
                operator,
                &[operand],
                start,
            );
        }
        operand
    }

    // =========================================================================
    // Calls and member access
    // =========================================================================

    pub(crate) fn parse_left_hand_side_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let expression = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        self.parse_member_and_call_rest(start, expression, /*allow_calls*/ true)
    }

    fn parse_new_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.next_token();
        let callee_start = self.token_pos();
        let callee = if self.is_token(SyntaxKind::NewKeyword) {
            self.parse_new_expression()
        } else {
            self.parse_primary_expression()
        };
        let callee = self.parse_member_and_call_rest(callee_start, callee, false);
        let mut children = vec![callee];
        if self.is_token(SyntaxKind::OpenParenToken) {
            children.extend(self.parse_arguments());
        }
        self.finish_node(syntax_kind_ext::NEW_EXPRESSION, "", &children, start)
    }

    fn parse_member_and_call_rest(
        &mut self,
        start: u32,
        mut expression: NodeIndex,
        allow_calls: bool,
    ) -> NodeIndex {
        loop {
            match self.token() {
                SyntaxKind::DotToken => {
                    self.next_token();
                    let name = self.parse_member_name();
                    expression = self.finish_node(
                        syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                        name,
                        &[expression],
                        start,
                    );
                }
                SyntaxKind::QuestionDotToken if allow_calls => {
                    self.next_token();
                    expression = if self.is_token(SyntaxKind::OpenParenToken) {
                        let mut children = vec![expression];
                        children.extend(self.parse_arguments());
                        self.finish_node(syntax_kind_ext::CALL_EXPRESSION, "", &children, start)
                    } else if self.is_token(SyntaxKind::OpenBracketToken) {
                        let key = self.parse_bracketed_expression();
                        self.finish_node(
                            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                            "",
                            &[expression, key],
                            start,
                        )
                    } else {
                        let name = self.parse_member_name();
                        self.finish_node(
                            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
                            name,
                            &[expression],
                            start,
                        )
                    };
                    self.arena.set_flags(expression, node_flags::OPTIONAL_CHAIN);
                }
                SyntaxKind::OpenBracketToken => {
                    let key = self.parse_bracketed_expression();
                    expression = self.finish_node(
                        syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
                        "",
                        &[expression, key],
                        start,
                    );
                }
                SyntaxKind::OpenParenToken if allow_calls => {
                    let mut children = vec![expression];
                    children.extend(self.parse_arguments());
                    expression =
                        self.finish_node(syntax_kind_ext::CALL_EXPRESSION, "", &children, start);
                }
                _ => break,
            }
        }
        expression
    }

    /// `[expression]`, with `in` allowed inside.
    pub(crate) fn parse_bracketed_expression(&mut self) -> NodeIndex {
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let expression = self.parse_assignment_expression();
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBracketToken);
        expression
    }

    /// Name after `.`: any identifier or reserved word.
    fn parse_member_name(&mut self) -> String {
        if self.token().is_identifier_or_keyword() {
            let name = self.token_value();
            self.next_token();
            return name;
        }
        if self.is_token(SyntaxKind::PrivateIdentifier) {
            self.error_at_current(
                diagnostic_messages::PRIVATE_NAMES_NOT_SUPPORTED,
                diagnostic_codes::PRIVATE_NAMES_NOT_SUPPORTED,
            );
            let name = format!("#{}", self.token_value());
            self.next_token();
            return name;
        }
        self.error_at_current(
            diagnostic_messages::IDENTIFIER_EXPECTED,
            diagnostic_codes::IDENTIFIER_EXPECTED,
        );
        String::new()
    }

    /// `(a, ...b)` as a list of argument nodes.
    fn parse_arguments(&mut self) -> Vec<NodeIndex> {
        self.parse_expected(SyntaxKind::OpenParenToken);
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let mut arguments = Vec::new();
        while !self.is_token(SyntaxKind::CloseParenToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            arguments.push(self.parse_spread_or_assignment_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == before {
                break;
            }
        }
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseParenToken);
        arguments
    }

    fn parse_spread_or_assignment_expression(&mut self) -> NodeIndex {
        if !self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_assignment_expression();
        }
        let start = self.token_pos();
        self.next_token();
        self.mark_feature(FeatureSet::SPREAD_EXPRESSIONS);
        let operand = self.parse_assignment_expression();
        self.finish_node(syntax_kind_ext::SPREAD_ELEMENT, "", &[operand], start)
    }

    // =========================================================================
    // Primary expressions
    // =========================================================================

    fn parse_primary_expression(&mut self) -> NodeIndex {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::Identifier => {
                let name = self.token_value();
                self.next_token();
                self.finish_node(syntax_kind_ext::IDENTIFIER, name, &[], start)
            }
            kind @ (SyntaxKind::ThisKeyword
            | SyntaxKind::SuperKeyword
            | SyntaxKind::TrueKeyword
            | SyntaxKind::FalseKeyword
            | SyntaxKind::NullKeyword) => {
                self.next_token();
                self.finish_node(kind as u16, token_text(kind), &[], start)
            }
            SyntaxKind::NumericLiteral => {
                let raw = self.token_value();
                self.next_token();
                self.finish_node(syntax_kind_ext::NUMERIC_LITERAL, raw, &[], start)
            }
            SyntaxKind::StringLiteral | SyntaxKind::NoSubstitutionTemplateLiteral => {
                let value = self.token_value();
                self.next_token();
                self.finish_node(syntax_kind_ext::STRING_LITERAL, value, &[], start)
            }
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let saved_disallow_in = self.disallow_in;
                self.disallow_in = false;
                let expression = self.parse_expression();
                self.disallow_in = saved_disallow_in;
                self.parse_expected(SyntaxKind::CloseParenToken);
                expression
            }
            SyntaxKind::OpenBracketToken => self.parse_array_literal(),
            SyntaxKind::OpenBraceToken => self.parse_object_literal(),
            SyntaxKind::FunctionKeyword => self.parse_function(false),
            SyntaxKind::ClassKeyword => self.parse_class(false),
            SyntaxKind::PrivateIdentifier => {
                self.error_at_current(
                    diagnostic_messages::PRIVATE_NAMES_NOT_SUPPORTED,
                    diagnostic_codes::PRIVATE_NAMES_NOT_SUPPORTED,
                );
                let name = format!("#{}", self.token_value());
                self.next_token();
                self.finish_node(syntax_kind_ext::IDENTIFIER, name, &[], start)
            }
            _ => {
                self.error_at_current(
                    diagnostic_messages::EXPRESSION_EXPECTED,
                    diagnostic_codes::EXPRESSION_EXPECTED,
                );
                self.missing_node()
            }
        }
    }

    fn parse_array_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBracketToken);
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            if self.is_token(SyntaxKind::CommaToken) {
                // Hole
                elements.push(self.empty_node());
                self.next_token();
                continue;
            }
            let before = self.token_pos();
            elements.push(self.parse_spread_or_assignment_expression());
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == before {
                break;
            }
        }
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBracketToken);
        self.finish_node(syntax_kind_ext::ARRAY_LITERAL, "", &elements, start)
    }

    fn parse_object_literal(&mut self) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let mut properties = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            properties.push(self.parse_object_literal_element());
            if !self.parse_optional(SyntaxKind::CommaToken) || self.token_pos() == before {
                break;
            }
        }
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBraceToken);
        self.finish_node(syntax_kind_ext::OBJECT_LITERAL, "", &properties, start)
    }

    fn parse_object_literal_element(&mut self) -> NodeIndex {
        let start = self.token_pos();
        if self.is_token(SyntaxKind::DotDotDotToken) {
            return self.parse_spread_or_assignment_expression();
        }

        let accessor = self.parse_accessor_keyword();
        let generator = accessor == 0 && self.parse_optional(SyntaxKind::AsteriskToken);

        if self.is_token(SyntaxKind::OpenBracketToken) {
            self.mark_feature(FeatureSet::COMPUTED_PROPERTIES);
            let key = self.parse_bracketed_expression();
            if accessor != 0 || generator || self.is_token(SyntaxKind::OpenParenToken) {
                let function = self.parse_method_function(generator);
                let method = self.finish_node(
                    syntax_kind_ext::COMPUTED_METHOD_DECLARATION,
                    "",
                    &[key, function],
                    start,
                );
                self.arena.set_flags(method, accessor);
                return method;
            }
            self.parse_expected(SyntaxKind::ColonToken);
            let value = self.parse_assignment_expression();
            return self.finish_node(
                syntax_kind_ext::COMPUTED_PROPERTY_ASSIGNMENT,
                "",
                &[key, value],
                start,
            );
        }

        let is_identifier = self.is_token(SyntaxKind::Identifier);
        let key = self.parse_property_key();
        if accessor != 0 || generator || self.is_token(SyntaxKind::OpenParenToken) {
            let function = self.parse_method_function(generator);
            let method = if self.arena.is_kind(key, syntax_kind_ext::IDENTIFIER) {
                let name = self.arena.text(key).to_string();
                self.finish_node(syntax_kind_ext::METHOD_DECLARATION, name, &[function], start)
            } else {
                self.finish_node(
                    syntax_kind_ext::COMPUTED_METHOD_DECLARATION,
                    "",
                    &[key, function],
                    start,
                )
            };
            self.arena.set_flags(method, accessor);
            return method;
        }
        if self.parse_optional(SyntaxKind::ColonToken) {
            let value = self.parse_assignment_expression();
            return self.finish_node(syntax_kind_ext::PROPERTY_ASSIGNMENT, "", &[key, value], start);
        }
        if !is_identifier {
            self.parse_expected(SyntaxKind::ColonToken);
        }
        let name = self.arena.text(key).to_string();
        self.finish_node(syntax_kind_ext::SHORTHAND_PROPERTY, name, &[], start)
    }

    /// `get`/`set` followed by a property name; returns the accessor flag or 0.
    pub(crate) fn parse_accessor_keyword(&mut self) -> u32 {
        let flag = if self.is_identifier_text("get") {
            node_flags::GETTER
        } else if self.is_identifier_text("set") {
            node_flags::SETTER
        } else {
            return 0;
        };
        let is_accessor = self.look_ahead(|p| {
            p.next_token();
            p.is_property_name_start()
        });
        if !is_accessor {
            return 0;
        }
        self.next_token();
        flag
    }

    /// Whether the current token can start a (possibly computed) property name.
    pub(crate) fn is_property_name_start(&self) -> bool {
        self.token().is_identifier_or_keyword()
            || matches!(
                self.token(),
                SyntaxKind::StringLiteral
                    | SyntaxKind::NumericLiteral
                    | SyntaxKind::OpenBracketToken
                    | SyntaxKind::PrivateIdentifier
            )
    }

    /// Literal property key: identifier (including reserved words), string or number.
    pub(crate) fn parse_property_key(&mut self) -> NodeIndex {
        let start = self.token_pos();
        let kind = match self.token() {
            SyntaxKind::StringLiteral => syntax_kind_ext::STRING_LITERAL,
            SyntaxKind::NumericLiteral => syntax_kind_ext::NUMERIC_LITERAL,
            kind if kind.is_identifier_or_keyword() => syntax_kind_ext::IDENTIFIER,
            _ => {
                self.error_at_current(
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
                return self.missing_node();
            }
        };
        let text = self.token_value();
        self.next_token();
        self.finish_node(kind, text, &[], start)
    }
}
