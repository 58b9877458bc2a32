//! Hoisting of computed member keys.
//!
//! A lowered field's key is evaluated where the field is assigned, not where
//! the class is defined. Keys that might have side effects are computed once
//! ahead of the class instead:
//!
//! ```javascript
//! class C { [f()] = 1; }
//! // becomes
//! const $esdown$comp$key$test$0 = f();
//! class C { [$esdown$comp$key$test$0] = 1; }
//! ```

use super::{COMP_KEY_PREFIX, ClassMembersTransform};
use esdown_parser::AstFactory;
use esdown_parser::parser::NodeIndex;
use esdown_parser::syntax::transform_utils::{enclosing_statement, is_pure_key};
use tracing::trace;

impl<'a> ClassMembersTransform<'a> {
    /// Move the key of a computed `member` of `class` into a constant placed
    /// before the statement containing the class. Returns the new `const`
    /// statement, `NONE` when the key was left in place.
    pub(super) fn hoist_computed_key(&mut self, class: NodeIndex, member: NodeIndex) -> NodeIndex {
        let key = self.arena.first_child(member);
        if key.is_none() || is_pure_key(self.arena, key) {
            return NodeIndex::NONE;
        }
        let anchor = enclosing_statement(self.arena, class);
        if anchor.is_none() {
            return NodeIndex::NONE;
        }

        let name = self.ids.fresh_name(COMP_KEY_PREFIX);
        let color = self.arena.color(key);
        let reference = self.arena.create_name(&name, color);
        self.arena.srcref_tree_if_missing(reference, key);
        self.arena.replace_with(key, reference);

        let declaration = self.arena.create_single_const_declaration(&name, key);
        self.arena.srcref_tree_if_missing(declaration, key);
        self.arena.insert_before(anchor, declaration);
        trace!(name = %name, "hoisted computed key");
        declaration
    }
}
