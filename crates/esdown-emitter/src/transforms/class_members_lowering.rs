//! Turning recorded members into plain code.

use super::ClassMembersTransform;
use super::MEM_FUNC_PREFIX;
use crate::transforms::explicit_constructors::ensure_constructor;
use esdown_parser::AstFactory;
use esdown_parser::parser::{NodeIndex, syntax_kind_ext};
use esdown_parser::syntax::transform_utils::vars_declared_in_branch;
use tracing::{trace, warn};

impl<'a> ClassMembersTransform<'a> {
    // =========================================================================
    // Instance members
    // =========================================================================

    /// Move `fields` into a generated method and call it from the
    /// constructor, right after `super(...)` in a derived class.
    pub(super) fn lower_instance_members(&mut self, class: NodeIndex, fields: &[NodeIndex]) {
        if fields.is_empty() {
            return;
        }
        let constructor = ensure_constructor(self.arena, class);
        let body = self
            .arena
            .function_body(self.arena.method_function(constructor));
        let super_call = if self.arena.class_heritage(class).is_some() {
            let found = self.find_super_call(body);
            if found.is_none() {
                warn!(
                    class = class.0,
                    "no top-level super() call, field initializers run first"
                );
            }
            found
        } else {
            NodeIndex::NONE
        };

        let name = self.ids.fresh_name(MEM_FUNC_PREFIX);
        let class_color = self.arena.color(class);
        let instance_color = self.arena.instance_color(class);

        let function = self.arena.create_empty_function(class_color);
        let method = self.arena.create_member_function_def(&name, function);
        let receiver = self.arena.create_this(instance_color);
        let callee = self.arena.create_get_prop(receiver, &name, None);
        let call = self.arena.create_call(callee, &[], None);
        let statement = self.arena.expr_result(call);
        self.arena.srcref_tree_if_missing(statement, class);
        if super_call.is_some() {
            self.arena.insert_after(super_call, statement);
        } else {
            self.arena.add_child_to_front(body, statement);
        }

        let members = self.arena.class_members(class);
        self.arena.add_child_to_front(members, method);
        self.arena.srcref_tree_if_missing(method, class);

        let method_body = self.arena.function_body(function);
        for &field in fields {
            let receiver = self.arena.create_this(instance_color);
            let assignment = self.field_to_assignment(receiver, field);
            self.arena.append_child(method_body, assignment);
        }
        trace!(method = %name, fields = fields.len(), "generated field initializer");
    }

    /// First top-level `super(...);` statement of a constructor body.
    fn find_super_call(&self, body: NodeIndex) -> NodeIndex {
        let arena = &*self.arena;
        arena
            .children(body)
            .iter()
            .copied()
            .find(|&statement| {
                if !arena.is_kind(statement, syntax_kind_ext::EXPRESSION_STATEMENT) {
                    return false;
                }
                let call = arena.first_child(statement);
                arena.is_kind(call, syntax_kind_ext::CALL_EXPRESSION)
                    && arena.is_kind(arena.first_child(call), syntax_kind_ext::SUPER_KEYWORD)
            })
            .unwrap_or(NodeIndex::NONE)
    }

    // =========================================================================
    // Static members
    // =========================================================================

    /// Place `members` after `declaring_statement`, in order.
    pub(super) fn lower_static_members(
        &mut self,
        class_name: &str,
        declaring_statement: NodeIndex,
        members: &[NodeIndex],
    ) {
        let mut cursor = declaring_statement;
        for &member in members {
            let statement = if self.arena.is_field(member) {
                let receiver = self.arena.create_qname(class_name, None);
                self.arena.srcref_tree(receiver, member);
                self.field_to_assignment(receiver, member)
            } else {
                self.static_block_to_statement(member)
            };
            self.arena.insert_after(cursor, statement);
            cursor = statement;
        }
    }

    /// A bare block, or an IIFE when a `var` would leak out of the block.
    fn static_block_to_statement(&mut self, block: NodeIndex) -> NodeIndex {
        self.arena.detach(block);
        if vars_declared_in_branch(self.arena, block).is_empty() {
            return block;
        }
        let call = self.arena.create_zero_arg_iife(block, None);
        let statement = self.arena.expr_result(call);
        self.arena.srcref_tree_if_missing(statement, block);
        statement
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Detach `field` and turn it into `receiver.key = value;`, or
    /// `receiver[key] = value;` for a computed key. A field without an
    /// initializer becomes the bare access.
    fn field_to_assignment(&mut self, receiver: NodeIndex, field: NodeIndex) -> NodeIndex {
        let (target, value) = if self.arena.is_kind(field, syntax_kind_ext::PROPERTY_DECLARATION) {
            let name = self.arena.text(field).to_string();
            let color = self.arena.color(field);
            let value = self.arena.first_child(field);
            (self.arena.create_get_prop(receiver, &name, color), value)
        } else {
            let key = self.arena.first_child(field);
            let value = self.arena.child(field, 1);
            self.arena.detach(key);
            (self.arena.create_get_elem(receiver, key), value)
        };

        self.arena.detach(field);
        let statement = if value.is_some() {
            self.arena.detach(value);
            self.arena.create_assign_statement(target, value)
        } else {
            self.arena.expr_result(target)
        };
        self.arena.srcref_tree_if_missing(statement, field);
        statement
    }
}
