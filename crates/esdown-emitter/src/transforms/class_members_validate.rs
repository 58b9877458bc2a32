//! Checks run before a class is touched.
//!
//! Every reason to leave a class unconverted is found here, before the
//! normalizer or the member visitors mutate anything.

use super::{ClassMembersTransform, TranspilationErrorKind};
use esdown_parser::parser::{NodeArena, NodeIndex, node_flags, syntax_kind_ext};
use esdown_parser::syntax::transform_utils::{
    ReceiverReferences, collect_receiver_references, is_in_ordinary_function,
    references_enclosing_receiver, references_super,
};

/// One reason a class cannot be lowered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Rejection {
    pub(super) node: NodeIndex,
    pub(super) kind: TranspilationErrorKind,
    pub(super) detail: &'static str,
}

impl Rejection {
    const fn new(node: NodeIndex, kind: TranspilationErrorKind, detail: &'static str) -> Self {
        Self { node, kind, detail }
    }
}

impl<'a> ClassMembersTransform<'a> {
    /// Receivers of the global scope reachable from `class`: those in its
    /// heritage clause and computed keys. `None` unless `class` is an
    /// outermost class outside any ordinary function.
    pub(super) fn global_receiver_references(
        &self,
        class: NodeIndex,
    ) -> Option<ReceiverReferences> {
        let arena = &*self.arena;
        if !self.class_stack.is_empty() || is_in_ordinary_function(arena, class) {
            return None;
        }
        Some(collect_receiver_references(arena, class, None))
    }

    /// Every rejection for `class`, in member order.
    pub(super) fn validate_class(
        &self,
        class: NodeIndex,
        global_refs: Option<&ReceiverReferences>,
    ) -> Vec<Rejection> {
        let arena = &*self.arena;
        let mut rejections = Vec::new();

        for &member in arena.children(arena.class_members(class)) {
            if arena.is_class_static_block(member) {
                if references_enclosing_receiver(arena, member) {
                    rejections.push(Rejection::new(
                        member,
                        TranspilationErrorKind::CannotConvertYet,
                        "Member references this or super",
                    ));
                }
                continue;
            }
            if !arena.is_field(member) || !arena.has_flag(member, node_flags::STATIC) {
                continue;
            }
            let value = field_value(arena, member);
            if value.is_none() || !references_super(arena, value) {
                continue;
            }
            let heritage = arena.class_heritage(class);
            if heritage.is_none() {
                rejections.push(Rejection::new(
                    member,
                    TranspilationErrorKind::CannotConvert,
                    "Super node with no superclass",
                ));
            } else if !arena.is_qualified_name(heritage) {
                rejections.push(Rejection::new(
                    member,
                    TranspilationErrorKind::CannotConvertYet,
                    "super with a computed superclass",
                ));
            }
        }

        if let Some(refs) = global_refs {
            for &node in &refs.super_nodes {
                rejections.push(Rejection::new(
                    node,
                    TranspilationErrorKind::CannotConvert,
                    "Illegal super usage",
                ));
            }
            for &node in &refs.this_nodes {
                if global_this_access(arena, node).is_none() {
                    rejections.push(Rejection::new(
                        node,
                        TranspilationErrorKind::CannotConvert,
                        "Improper global this use",
                    ));
                }
            }
        }
        rejections
    }
}

/// Initializer of a field, `NONE` when it has none.
pub(super) fn field_value(arena: &NodeArena, field: NodeIndex) -> NodeIndex {
    match arena.kind(field) {
        syntax_kind_ext::PROPERTY_DECLARATION => arena.first_child(field),
        syntax_kind_ext::COMPUTED_PROPERTY_DECLARATION => arena.child(field, 1),
        _ => NodeIndex::NONE,
    }
}

/// The `this.name` access around a global `this`, if it is one.
pub(super) fn global_this_access(arena: &NodeArena, this_node: NodeIndex) -> Option<NodeIndex> {
    let parent = arena.parent(this_node);
    let is_plain_access = arena.is_kind(parent, syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION)
        && arena.first_child(parent) == this_node
        && !arena.has_flag(parent, node_flags::OPTIONAL_CHAIN);
    is_plain_access.then_some(parent)
}
