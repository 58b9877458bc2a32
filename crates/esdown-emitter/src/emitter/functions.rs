use super::Printer;
use super::helpers::precedence;
use esdown_parser::parser::{NodeIndex, node_flags, syntax_kind_ext};

impl<'a> Printer<'a> {
    // =========================================================================
    // Functions
    // =========================================================================

    /// `function [*]name(params) {...}` for declarations and expressions.
    pub(super) fn emit_function(&mut self, function: NodeIndex) {
        let arena = self.arena;
        self.write("function");
        if arena.has_flag(function, node_flags::GENERATOR) {
            self.write("*");
        }
        self.write_space();
        let name = arena.child(function, 0);
        if !arena.is_empty_node(name) {
            self.write(arena.text(name));
        }
        self.emit_parameters(arena.function_params(function));
        self.write_space();
        self.emit_block(arena.function_body(function));
    }

    pub(super) fn emit_arrow_function(&mut self, arrow: NodeIndex) {
        let arena = self.arena;
        self.emit_parameters(arena.function_params(arrow));
        self.write(" => ");
        let body = arena.function_body(arrow);
        if !arena.has_flag(arrow, node_flags::EXPRESSION_BODY) {
            self.emit_block(body);
        } else if arena.is_kind(body, syntax_kind_ext::OBJECT_LITERAL) {
            self.write("(");
            self.emit_expression(body, precedence::COMMA);
            self.write(")");
        } else {
            self.emit_expression(body, precedence::ASSIGNMENT);
        }
    }

    fn emit_parameters(&mut self, params: NodeIndex) {
        let arena = self.arena;
        self.write("(");
        for (i, &param) in arena.children(params).iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if arena.has_flag(param, node_flags::REST) {
                self.write("...");
            }
            self.write(arena.text(arena.first_child(param)));
            let default = arena.child(param, 1);
            if default.is_some() {
                self.write(" = ");
                self.emit_expression(default, precedence::ASSIGNMENT);
            }
        }
        self.write(")");
    }

    // =========================================================================
    // Classes
    // =========================================================================

    pub(super) fn emit_class(&mut self, class: NodeIndex) {
        let arena = self.arena;
        self.write("class");
        let name = arena.class_name(class);
        if name.is_some() {
            self.write_space();
            self.write(arena.text(name));
        }
        let heritage = arena.class_heritage(class);
        if heritage.is_some() {
            self.write(" extends ");
            self.emit_expression(heritage, precedence::CALL);
        }
        self.write_space();

        let members = arena.children(arena.class_members(class));
        if members.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.write_line();
        self.increase_indent();
        for &member in members {
            self.emit_class_member(member);
            self.write_line();
        }
        self.decrease_indent();
        self.write("}");
    }

    fn emit_class_member(&mut self, member: NodeIndex) {
        let arena = self.arena;
        match arena.kind(member) {
            syntax_kind_ext::BLOCK => {
                self.write("static ");
                self.emit_block(member);
            }
            syntax_kind_ext::METHOD_DECLARATION | syntax_kind_ext::COMPUTED_METHOD_DECLARATION => {
                self.emit_method(member);
            }
            syntax_kind_ext::PROPERTY_DECLARATION => {
                self.emit_static_modifier(member);
                self.write(arena.text(member));
                self.emit_field_initializer(arena.first_child(member));
            }
            syntax_kind_ext::COMPUTED_PROPERTY_DECLARATION => {
                self.emit_static_modifier(member);
                self.emit_computed_key(arena.first_child(member));
                self.emit_field_initializer(arena.child(member, 1));
            }
            _ => {}
        }
    }

    fn emit_field_initializer(&mut self, initializer: NodeIndex) {
        if initializer.is_some() {
            self.write(" = ");
            self.emit_expression(initializer, precedence::ASSIGNMENT);
        }
        self.write(";");
    }

    fn emit_static_modifier(&mut self, member: NodeIndex) {
        if self.arena.has_flag(member, node_flags::STATIC) {
            self.write("static ");
        }
    }

    /// Class or object literal method, including accessors and generators.
    pub(super) fn emit_method(&mut self, method: NodeIndex) {
        let arena = self.arena;
        self.emit_static_modifier(method);
        if arena.has_flag(method, node_flags::GETTER) {
            self.write("get ");
        } else if arena.has_flag(method, node_flags::SETTER) {
            self.write("set ");
        }
        let function = arena.method_function(method);
        if arena.has_flag(function, node_flags::GENERATOR) {
            self.write("*");
        }
        if arena.is_kind(method, syntax_kind_ext::METHOD_DECLARATION) {
            self.write(arena.text(method));
        } else {
            self.emit_computed_key(arena.first_child(method));
        }
        self.emit_parameters(arena.function_params(function));
        self.write_space();
        self.emit_block(arena.function_body(function));
    }
}
