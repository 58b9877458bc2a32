//! Construction of synthesized nodes.
//!
//! Every created node is detached, has no source range and carries the
//! color passed in. Callers attach the result with the arena's mutation
//! primitives and give it a range with `srcref_tree_if_missing`.

use crate::parser::{ColorId, NodeArena, NodeIndex, node_flags, syntax_kind_ext};

/// Node factory over a `NodeArena`.
pub trait AstFactory {
    fn create_empty(&mut self) -> NodeIndex;
    fn create_name(&mut self, name: &str, color: Option<ColorId>) -> NodeIndex;
    fn create_this(&mut self, color: Option<ColorId>) -> NodeIndex;
    fn create_super(&mut self, color: Option<ColorId>) -> NodeIndex;
    fn create_string(&mut self, value: &str, color: Option<ColorId>) -> NodeIndex;

    /// `a.b.c` from dotted text.
    fn create_qname(&mut self, dotted: &str, color: Option<ColorId>) -> NodeIndex;
    fn create_get_prop(
        &mut self,
        object: NodeIndex,
        name: &str,
        color: Option<ColorId>,
    ) -> NodeIndex;
    fn create_get_elem(&mut self, object: NodeIndex, key: NodeIndex) -> NodeIndex;
    fn create_assign(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex;
    fn create_call(
        &mut self,
        callee: NodeIndex,
        args: &[NodeIndex],
        color: Option<ColorId>,
    ) -> NodeIndex;
    fn create_spread(&mut self, operand: NodeIndex) -> NodeIndex;

    fn expr_result(&mut self, expression: NodeIndex) -> NodeIndex;
    /// `target = value;`
    fn create_assign_statement(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex;
    fn create_block(&mut self, statements: &[NodeIndex]) -> NodeIndex;
    fn create_return(&mut self, expression: NodeIndex) -> NodeIndex;
    /// `const name = value;`
    fn create_single_const_declaration(&mut self, name: &str, value: NodeIndex) -> NodeIndex;

    fn create_param_list(&mut self, params: &[NodeIndex]) -> NodeIndex;
    /// `function() {}`
    fn create_empty_function(&mut self, color: Option<ColorId>) -> NodeIndex;
    /// `() => body` where `body` is a block.
    fn create_zero_arg_arrow_function(&mut self, body: NodeIndex) -> NodeIndex;
    /// `name() {...}` class member wrapping `function`.
    fn create_member_function_def(&mut self, name: &str, function: NodeIndex) -> NodeIndex;
    /// `(() => body)()`
    fn create_zero_arg_iife(&mut self, body: NodeIndex, color: Option<ColorId>) -> NodeIndex;
}

impl AstFactory for NodeArena {
    fn create_empty(&mut self) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::EMPTY, "", &[], None)
    }

    fn create_name(&mut self, name: &str, color: Option<ColorId>) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::IDENTIFIER, name, &[], color)
    }

    fn create_this(&mut self, color: Option<ColorId>) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::THIS_KEYWORD, "this", &[], color)
    }

    fn create_super(&mut self, color: Option<ColorId>) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::SUPER_KEYWORD, "super", &[], color)
    }

    fn create_string(&mut self, value: &str, color: Option<ColorId>) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::STRING_LITERAL, value, &[], color)
    }

    fn create_qname(&mut self, dotted: &str, color: Option<ColorId>) -> NodeIndex {
        let mut parts = dotted.split('.');
        let first = parts.next().unwrap_or_default();
        let mut node = if first == "this" {
            self.create_this(None)
        } else {
            self.create_name(first, None)
        };
        for part in parts {
            node = self.create_get_prop(node, part, None);
        }
        self.set_color(node, color);
        node
    }

    fn create_get_prop(
        &mut self,
        object: NodeIndex,
        name: &str,
        color: Option<ColorId>,
    ) -> NodeIndex {
        self.add_synthetic(
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION,
            name,
            &[object],
            color,
        )
    }

    fn create_get_elem(&mut self, object: NodeIndex, key: NodeIndex) -> NodeIndex {
        self.add_synthetic(
            syntax_kind_ext::ELEMENT_ACCESS_EXPRESSION,
            "",
            &[object, key],
            None,
        )
    }

    fn create_assign(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        let color = self.color(value);
        self.add_synthetic(
            syntax_kind_ext::ASSIGNMENT_EXPRESSION,
            "=",
            &[target, value],
            color,
        )
    }

    fn create_call(
        &mut self,
        callee: NodeIndex,
        args: &[NodeIndex],
        color: Option<ColorId>,
    ) -> NodeIndex {
        let mut children = Vec::with_capacity(args.len() + 1);
        children.push(callee);
        children.extend_from_slice(args);
        self.add_synthetic(syntax_kind_ext::CALL_EXPRESSION, "", &children, color)
    }

    fn create_spread(&mut self, operand: NodeIndex) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::SPREAD_ELEMENT, "", &[operand], None)
    }

    fn expr_result(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::EXPRESSION_STATEMENT, "", &[expression], None)
    }

    fn create_assign_statement(&mut self, target: NodeIndex, value: NodeIndex) -> NodeIndex {
        let assign = self.create_assign(target, value);
        self.expr_result(assign)
    }

    fn create_block(&mut self, statements: &[NodeIndex]) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::BLOCK, "", statements, None)
    }

    fn create_return(&mut self, expression: NodeIndex) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::RETURN_STATEMENT, "", &[expression], None)
    }

    fn create_single_const_declaration(&mut self, name: &str, value: NodeIndex) -> NodeIndex {
        let color = self.color(value);
        let name = self.create_name(name, color);
        let declaration =
            self.add_synthetic(syntax_kind_ext::VARIABLE_DECLARATION, "", &[name, value], None);
        let statement =
            self.add_synthetic(syntax_kind_ext::VARIABLE_STATEMENT, "", &[declaration], None);
        self.set_flags(statement, node_flags::CONST);
        statement
    }

    fn create_param_list(&mut self, params: &[NodeIndex]) -> NodeIndex {
        self.add_synthetic(syntax_kind_ext::PARAMETER_LIST, "", params, None)
    }

    fn create_empty_function(&mut self, color: Option<ColorId>) -> NodeIndex {
        let name = self.create_empty();
        let params = self.create_param_list(&[]);
        let body = self.create_block(&[]);
        self.add_synthetic(
            syntax_kind_ext::FUNCTION_EXPRESSION,
            "",
            &[name, params, body],
            color,
        )
    }

    fn create_zero_arg_arrow_function(&mut self, body: NodeIndex) -> NodeIndex {
        let name = self.create_empty();
        let params = self.create_param_list(&[]);
        self.add_synthetic(
            syntax_kind_ext::ARROW_FUNCTION,
            "",
            &[name, params, body],
            None,
        )
    }

    fn create_member_function_def(&mut self, name: &str, function: NodeIndex) -> NodeIndex {
        let color = self.color(function);
        self.add_synthetic(syntax_kind_ext::METHOD_DECLARATION, name, &[function], color)
    }

    fn create_zero_arg_iife(&mut self, body: NodeIndex, color: Option<ColorId>) -> NodeIndex {
        let arrow = self.create_zero_arg_arrow_function(body);
        self.create_call(arrow, &[], color)
    }
}
