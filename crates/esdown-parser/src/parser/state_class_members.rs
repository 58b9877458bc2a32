//! Class declaration and class member parsing.

use super::base::NodeIndex;
use super::node::node_flags;
use super::state::ParserState;
use super::syntax_kind_ext;
use esdown_common::FeatureSet;
use esdown_common::diagnostics::{diagnostic_codes, diagnostic_messages};
use esdown_scanner::SyntaxKind;

impl ParserState {
    /// `class [Name] [extends Heritage] { members }`
    ///
    /// Produces a `CLASS` node with children `[name | EMPTY, heritage | EMPTY, CLASS_MEMBERS]`.
    pub(crate) fn parse_class(&mut self, is_declaration: bool) -> NodeIndex {
        let start = self.token_pos();
        self.parse_expected(SyntaxKind::ClassKeyword);
        self.mark_feature(FeatureSet::CLASSES);

        let name = if self.is_token(SyntaxKind::Identifier) {
            self.parse_binding_identifier()
        } else {
            if is_declaration {
                self.error_at_current(
                    diagnostic_messages::IDENTIFIER_EXPECTED,
                    diagnostic_codes::IDENTIFIER_EXPECTED,
                );
            }
            self.empty_node()
        };

        let heritage = if self.parse_optional(SyntaxKind::ExtendsKeyword) {
            self.parse_left_hand_side_expression()
        } else {
            self.empty_node()
        };

        let members_start = self.token_pos();
        self.parse_expected(SyntaxKind::OpenBraceToken);
        let saved_disallow_in = self.disallow_in;
        self.disallow_in = false;
        let mut members = Vec::new();
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            if let Some(member) = self.parse_class_member() {
                members.push(member);
            }
            if self.token_pos() == before {
                self.error_at_current(
                    diagnostic_messages::UNEXPECTED_TOKEN_CLASS_MEMBER_EXPECTED,
                    diagnostic_codes::UNEXPECTED_TOKEN_CLASS_MEMBER_EXPECTED,
                );
                self.next_token();
            }
        }
        self.disallow_in = saved_disallow_in;
        self.parse_expected(SyntaxKind::CloseBraceToken);
        let members =
            self.finish_node(syntax_kind_ext::CLASS_MEMBERS, "", &members, members_start);

        self.finish_node(syntax_kind_ext::CLASS, "", &[name, heritage, members], start)
    }

    /// One class element. `None` for a stray `;`.
    fn parse_class_member(&mut self) -> Option<NodeIndex> {
        if self.parse_optional(SyntaxKind::SemicolonToken) {
            return None;
        }
        while self.is_token(SyntaxKind::AtToken) {
            self.skip_decorator();
        }

        let start = self.token_pos();
        let is_static = self.is_identifier_text("static") && self.is_modifier_keyword();
        if is_static {
            self.next_token();
            if self.is_token(SyntaxKind::OpenBraceToken) {
                self.mark_feature(FeatureSet::CLASS_STATIC_BLOCK);
                let block = self.parse_function_body();
                self.arena.set_range(block, start, self.last_token_end);
                return Some(block);
            }
        }
        let static_flag = if is_static { node_flags::STATIC } else { 0 };

        let accessor = self.parse_accessor_keyword();
        if accessor != 0 {
            self.mark_feature(FeatureSet::CLASS_GETTER_SETTER);
        }
        let generator = accessor == 0 && self.parse_optional(SyntaxKind::AsteriskToken);

        // Member key: `[expr]`, a string or numeric literal, or a plain name.
        let (name, key) = if self.is_token(SyntaxKind::OpenBracketToken) {
            self.mark_feature(FeatureSet::COMPUTED_PROPERTIES);
            (None, self.parse_bracketed_expression())
        } else if self.is_token(SyntaxKind::PrivateIdentifier) {
            self.error_at_current(
                diagnostic_messages::PRIVATE_NAMES_NOT_SUPPORTED,
                diagnostic_codes::PRIVATE_NAMES_NOT_SUPPORTED,
            );
            let name = format!("#{}", self.token_value());
            self.next_token();
            (Some(name), NodeIndex::NONE)
        } else if self.token().is_identifier_or_keyword() {
            let name = self.token_value();
            self.next_token();
            (Some(name), NodeIndex::NONE)
        } else if matches!(
            self.token(),
            SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral
        ) {
            (None, self.parse_property_key())
        } else {
            return None;
        };

        if accessor != 0 || generator || self.is_token(SyntaxKind::OpenParenToken) {
            let function = self.parse_method_function(generator);
            let method = match name {
                Some(name) => {
                    self.finish_node(syntax_kind_ext::METHOD_DECLARATION, name, &[function], start)
                }
                None => self.finish_node(
                    syntax_kind_ext::COMPUTED_METHOD_DECLARATION,
                    "",
                    &[key, function],
                    start,
                ),
            };
            self.arena.set_flags(method, static_flag | accessor);
            return Some(method);
        }

        // Field
        self.mark_feature(FeatureSet::PUBLIC_CLASS_FIELDS);
        let initializer = if self.parse_optional(SyntaxKind::EqualsToken) {
            Some(self.parse_assignment_expression())
        } else {
            None
        };
        self.parse_semicolon();
        let field = match name {
            Some(name) => {
                let children: Vec<NodeIndex> = initializer.into_iter().collect();
                self.finish_node(syntax_kind_ext::PROPERTY_DECLARATION, name, &children, start)
            }
            None => {
                let mut children = vec![key];
                children.extend(initializer);
                self.finish_node(
                    syntax_kind_ext::COMPUTED_PROPERTY_DECLARATION,
                    "",
                    &children,
                    start,
                )
            }
        };
        self.arena.set_flags(field, static_flag);
        Some(field)
    }

    /// Whether the `static` at the current token is a modifier rather than a member name.
    fn is_modifier_keyword(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_property_name_start()
                || p.is_token(SyntaxKind::OpenBraceToken)
                || p.is_token(SyntaxKind::AsteriskToken)
        })
    }
}
