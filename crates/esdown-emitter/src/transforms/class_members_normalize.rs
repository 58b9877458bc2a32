//! Giving a class a statement to anchor static code to.
//!
//! Static members become statements after the one declaring the class. A
//! class without such a statement, or whose own name differs from the name
//! it is bound to, is moved into an arrow IIFE:
//!
//! ```javascript
//! foo(class { static x = 1; });
//! // becomes
//! foo((() => {
//!     class $esdown$class$name$test$0 {
//!         static x = 1;
//!     }
//!     return $esdown$class$name$test$0;
//! })());
//! ```

use super::class_members_validate::global_this_access;
use super::{CLASS_NAME_PREFIX, ClassMembersTransform};
use esdown_parser::AstFactory;
use esdown_parser::parser::NodeIndex;
use esdown_parser::syntax::transform_utils::{
    ReceiverReferences, class_name_node, statement_declaring_class,
};
use tracing::trace;

impl<'a> ClassMembersTransform<'a> {
    /// Wrap `class` in an arrow IIFE unless it already has a declaring
    /// statement under a name that agrees with its own.
    pub(super) fn put_class_in_iife(&mut self, class: NodeIndex) {
        let name_node = class_name_node(self.arena, class);
        let anchor = statement_declaring_class(self.arena, class, name_node);
        let mut inner = self.arena.class_name(class);
        if anchor.is_some()
            && (inner.is_none() || self.arena.matches_qualified_name(name_node, inner))
        {
            return;
        }

        let color = self.arena.color(class);
        if inner.is_none() {
            let name = self.ids.fresh_name(CLASS_NAME_PREFIX);
            inner = self.arena.create_name(&name, color);
            self.arena.srcref_tree_if_missing(inner, class);
            let placeholder = self.arena.first_child(class);
            self.arena.replace_with(placeholder, inner);
        }

        let returned = self.arena.clone_node(inner);
        let ret = self.arena.create_return(returned);
        let block = self.arena.create_block(&[ret]);
        let call = self.arena.create_zero_arg_iife(block, color);
        self.arena.srcref_tree_if_missing(call, class);
        self.arena.replace_with(class, call);
        self.arena.add_child_to_front(block, class);
        trace!(class = %self.arena.text(inner), "wrapped class in IIFE");
    }

    /// `this.name` in the global parts of an outermost class becomes `name`.
    pub(super) fn rewrite_global_this(&mut self, refs: &ReceiverReferences) {
        for &this_node in &refs.this_nodes {
            let Some(access) = global_this_access(self.arena, this_node) else {
                continue;
            };
            let name = self.arena.text(access).to_string();
            let color = self.arena.color(access);
            let global = self.arena.create_name(&name, color);
            self.arena.srcref_tree_if_missing(global, access);
            self.arena.replace_with(access, global);
        }
    }

    /// The name static code refers to `class` by, and the statement to put
    /// that code after.
    pub(super) fn class_anchor(&self, class: NodeIndex) -> Option<(String, NodeIndex)> {
        let arena = &*self.arena;
        let name_node = class_name_node(arena, class);
        let anchor = statement_declaring_class(arena, class, name_node);
        if anchor.is_none() {
            return None;
        }
        arena.qualified_name(name_node).map(|name| (name, anchor))
    }
}
