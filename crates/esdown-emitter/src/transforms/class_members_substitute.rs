//! `this` and `super` in field initializers.
//!
//! Initializers move out of the class body, so the receivers they use must
//! be spelled out for their new location:
//!
//! - static: `this` becomes the class name, `super` the superclass
//! - instance: `this` becomes a receiver for the generated method, `super`
//!   stays since that method is a member of the same class
//!
//! Ordinary functions rebind `this` and are not entered. Arrow functions are.

use super::ClassMembersTransform;
use esdown_parser::AstFactory;
use esdown_parser::parser::NodeIndex;
use esdown_parser::syntax::transform_utils::collect_receiver_references;

impl<'a> ClassMembersTransform<'a> {
    /// Rewrite the receivers of a static initializer `value`. `super` was
    /// validated to have a qualified-name superclass to refer to.
    pub(super) fn substitute_static_receivers(
        &mut self,
        class: NodeIndex,
        class_name: &str,
        value: NodeIndex,
    ) {
        let refs = collect_receiver_references(self.arena, value, None);
        for this_node in refs.this_nodes {
            let color = self.arena.color(this_node);
            let name = self.arena.create_qname(class_name, color);
            self.arena.srcref_tree(name, this_node);
            self.arena.replace_with(this_node, name);
        }
        if refs.super_nodes.is_empty() {
            return;
        }
        let heritage = self.arena.class_heritage(class);
        for super_node in refs.super_nodes {
            let superclass = self.arena.clone_tree(heritage);
            self.arena.srcref_tree(superclass, super_node);
            self.arena.replace_with(super_node, superclass);
        }
    }

    /// Give every `this` of an instance initializer `value` the color of
    /// the class's instances.
    pub(super) fn substitute_instance_receivers(&mut self, class: NodeIndex, value: NodeIndex) {
        let refs = collect_receiver_references(self.arena, value, None);
        let color = self.arena.instance_color(class);
        for this_node in refs.this_nodes {
            let receiver = self.arena.create_this(color);
            self.arena.srcref_tree(receiver, this_node);
            self.arena.replace_with(this_node, receiver);
        }
    }
}
