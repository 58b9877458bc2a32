//! Class Members Transform
//!
//! Lowers public class fields and `static { }` blocks for targets that have
//! neither. Instance fields move into a generated method called from the
//! constructor; static fields and blocks become statements placed right after
//! the statement declaring the class.
//!
//! ```javascript
//! class C extends B {
//!     x = f();
//!     static y = this.x;
//!     static { log(); }
//! }
//! ```
//!
//! becomes
//!
//! ```javascript
//! class C extends B {
//!     $esdown$mem$func$name$test$0() {
//!         this.x = f();
//!     }
//!     constructor() {
//!         super(...arguments);
//!         this.$esdown$mem$func$name$test$0();
//!     }
//! }
//! C.y = C.x;
//! {
//!     log();
//! }
//! ```
//!
//! # Architecture
//!
//! A single recursive walk with an explicit stack of `ClassRecord`s:
//!
//! 1. On entering a class with fields or static blocks, its members are
//!    validated (`class_members_validate`). A rejected class is reported and
//!    its subtree is left as parsed.
//! 2. The class is given a statement to anchor static code to, wrapping it
//!    in an arrow IIFE when it has none (`class_members_normalize`).
//! 3. Each member is visited in source order: impure computed keys are
//!    hoisted (`class_members_keys`), `this`/`super` in initializers are
//!    substituted (`class_members_substitute`) and the member is recorded.
//! 4. On leaving the class, instance then static members are lowered
//!    (`class_members_lowering`). Inner classes are lowered before the
//!    classes that contain them.

#[path = "class_members_keys.rs"]
mod class_members_keys;
#[path = "class_members_lowering.rs"]
mod class_members_lowering;
#[path = "class_members_normalize.rs"]
mod class_members_normalize;
#[path = "class_members_record.rs"]
mod class_members_record;
#[path = "class_members_substitute.rs"]
mod class_members_substitute;
#[path = "class_members_validate.rs"]
mod class_members_validate;

use class_members_record::ClassRecord;
use class_members_validate::field_value;
use esdown_common::diagnostics::{
    Diagnostic, DiagnosticSink, diagnostic_codes, diagnostic_messages, format_message,
};
use esdown_common::limits::MAX_AST_DEPTH;
use esdown_common::{FeatureSet, UniqueIdSupplier};
use esdown_parser::parser::{Node, NodeArena, NodeIndex, node_flags, syntax_kind_ext};
use tracing::{debug, trace, warn};

/// Prefix of the generated instance-field initializer methods.
pub const MEM_FUNC_PREFIX: &str = "$esdown$mem$func$name$";
/// Prefix of the names given to anonymous classes that must be wrapped.
pub const CLASS_NAME_PREFIX: &str = "$esdown$class$name$";
/// Prefix of the constants holding hoisted computed keys.
pub const COMP_KEY_PREFIX: &str = "$esdown$comp$key$";

/// The two ways a class can fail to be lowered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TranspilationErrorKind {
    /// The input is invalid regardless of lowering (code 9001).
    CannotConvert,
    /// Valid input this pass does not lower (code 9002).
    CannotConvertYet,
}

impl TranspilationErrorKind {
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::CannotConvert => diagnostic_codes::CANNOT_CONVERT,
            Self::CannotConvertYet => diagnostic_codes::CANNOT_CONVERT_YET,
        }
    }

    #[must_use]
    pub const fn template(self) -> &'static str {
        match self {
            Self::CannotConvert => diagnostic_messages::CANNOT_CONVERT,
            Self::CannotConvertYet => diagnostic_messages::CANNOT_CONVERT_YET,
        }
    }
}

/// Counts reported by one run of the pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassMembersSummary {
    /// Classes whose fields and static blocks were lowered.
    pub classes_lowered: usize,
    /// Classes with fields or static blocks that were left as parsed.
    pub classes_unconverted: usize,
}

/// Lower every class field and static block under `root`.
///
/// `root` is normally the `SOURCE_FILE` node; its recorded features gate the
/// walk. When every class was lowered, public class fields and class static
/// blocks are removed from the recorded features.
pub fn rewrite_class_members(
    arena: &mut NodeArena,
    root: NodeIndex,
    ids: &mut UniqueIdSupplier,
    file_name: &str,
    sink: &mut dyn DiagnosticSink,
) -> ClassMembersSummary {
    let features = arena.script_features(root);
    if let Some(features) = features
        && !features.intersects(FeatureSet::ES2022_CLASS_MEMBERS)
    {
        debug!(file = file_name, "no class fields or static blocks, skipping");
        return ClassMembersSummary::default();
    }

    let mut transform = ClassMembersTransform {
        arena,
        ids,
        sink,
        file_name,
        class_stack: Vec::new(),
        summary: ClassMembersSummary::default(),
        visit_depth: 0,
        depth_exceeded: false,
    };
    transform.visit(root);
    let summary = transform.summary;
    let depth_exceeded = transform.depth_exceeded;

    if summary.classes_unconverted == 0
        && !depth_exceeded
        && let Some(features) = features
    {
        arena.set_script_features(root, features.difference(FeatureSet::ES2022_CLASS_MEMBERS));
    }
    debug!(
        file = file_name,
        lowered = summary.classes_lowered,
        unconverted = summary.classes_unconverted,
        "class members rewritten"
    );
    summary
}

struct ClassMembersTransform<'a> {
    arena: &'a mut NodeArena,
    ids: &'a mut UniqueIdSupplier,
    sink: &'a mut dyn DiagnosticSink,
    file_name: &'a str,
    /// Innermost open class last.
    class_stack: Vec<ClassRecord>,
    summary: ClassMembersSummary,
    visit_depth: u32,
    /// Part of the tree was too deep to walk; features stay recorded.
    depth_exceeded: bool,
}

impl<'a> ClassMembersTransform<'a> {
    // =========================================================================
    // Traversal
    // =========================================================================

    fn visit(&mut self, index: NodeIndex) {
        if self.visit_depth >= MAX_AST_DEPTH {
            self.abandon_open_classes(index);
            return;
        }
        self.visit_depth += 1;
        match self.arena.kind(index) {
            syntax_kind_ext::CLASS => self.visit_class(index),
            syntax_kind_ext::PROPERTY_DECLARATION
            | syntax_kind_ext::COMPUTED_PROPERTY_DECLARATION
            | syntax_kind_ext::COMPUTED_METHOD_DECLARATION
            | syntax_kind_ext::BLOCK
                if self.is_member_of_current_class(index) =>
            {
                let hoisted = self.visit_member(index);
                if hoisted.is_some() {
                    self.visit(hoisted);
                }
                self.visit_children(index);
            }
            _ => self.visit_children(index),
        }
        self.visit_depth -= 1;
    }

    /// Visit the children `parent` had on entry. Nodes inserted while
    /// visiting are not visited, nodes moved away are skipped.
    fn visit_children(&mut self, parent: NodeIndex) {
        let children = self.arena.children(parent).to_vec();
        for child in children {
            if self.arena.parent(child) == parent {
                self.visit(child);
            }
        }
    }

    fn visit_class(&mut self, class: NodeIndex) {
        if self.enter_class(class) {
            self.visit_children(class);
            self.exit_class();
        }
    }

    /// Leave every open class as parsed. Members below `index` are never
    /// recorded.
    fn abandon_open_classes(&mut self, index: NodeIndex) {
        warn!(node = index.0, "maximum tree depth reached, class members left as is");
        for record in &mut self.class_stack {
            if record.is_lowered() {
                record.abandon();
                self.summary.classes_unconverted += 1;
            }
        }
        if !self.depth_exceeded {
            self.depth_exceeded = true;
            self.report(
                index,
                TranspilationErrorKind::CannotConvertYet,
                "Deeply nested code",
            );
        }
    }

    fn is_member_of_current_class(&self, member: NodeIndex) -> bool {
        self.class_stack.last().is_some_and(|record| {
            record.is_lowered() && self.arena.parent(member) == self.arena.class_members(record.class)
        })
    }

    // =========================================================================
    // Class entry and exit
    // =========================================================================

    /// Validate and normalize `class`, then push its record. Returns `false`
    /// when the class was rejected and its subtree must not be visited.
    fn enter_class(&mut self, class: NodeIndex) -> bool {
        if !self.has_lowerable_members(class) {
            self.class_stack.push(ClassRecord::passive(class));
            return true;
        }

        let global_refs = self.global_receiver_references(class);
        let rejections = self.validate_class(class, global_refs.as_ref());
        if !rejections.is_empty() {
            for rejection in &rejections {
                self.report(rejection.node, rejection.kind, rejection.detail);
            }
            self.summary.classes_unconverted += 1;
            return false;
        }

        self.put_class_in_iife(class);
        if let Some(refs) = &global_refs {
            self.rewrite_global_this(refs);
        }

        match self.class_anchor(class) {
            Some((qualified_name, declaring_statement)) => {
                self.class_stack
                    .push(ClassRecord::new(class, qualified_name, declaring_statement));
            }
            None => {
                warn!(class = class.0, "class has no declaring statement, members left as is");
                self.summary.classes_unconverted += 1;
                self.class_stack.push(ClassRecord::passive(class));
            }
        }
        true
    }

    fn exit_class(&mut self) {
        let Some(record) = self.class_stack.pop() else {
            return;
        };
        if !record.is_lowered() {
            return;
        }
        let class = record.class;
        self.lower_instance_members(class, &record.instance_members);
        self.lower_static_members(
            &record.qualified_name,
            record.declaring_statement,
            &record.static_members,
        );
        self.summary.classes_lowered += 1;
        debug!(
            class = %record.qualified_name,
            instance = record.instance_members.len(),
            statics = record.static_members.len(),
            "lowered class members"
        );
    }

    // =========================================================================
    // Members
    // =========================================================================

    /// Hoist, substitute and record one member of the innermost class.
    /// Returns the statement a hoisted key was moved to, or `NONE`.
    fn visit_member(&mut self, member: NodeIndex) -> NodeIndex {
        let Some(record) = self.class_stack.last() else {
            return NodeIndex::NONE;
        };
        let class = record.class;
        let qualified_name = record.qualified_name.clone();

        let hoisted = match self.arena.kind(member) {
            syntax_kind_ext::COMPUTED_PROPERTY_DECLARATION
            | syntax_kind_ext::COMPUTED_METHOD_DECLARATION => {
                self.hoist_computed_key(class, member)
            }
            _ => NodeIndex::NONE,
        };
        if self.arena.is_kind(member, syntax_kind_ext::COMPUTED_METHOD_DECLARATION) {
            return hoisted;
        }

        let is_static = self.arena.is_class_static_block(member)
            || self.arena.has_flag(member, node_flags::STATIC);
        let value = field_value(self.arena, member);
        if value.is_some() {
            if is_static {
                self.substitute_static_receivers(class, &qualified_name, value);
            } else {
                self.substitute_instance_receivers(class, value);
            }
        }
        if let Some(record) = self.class_stack.last_mut() {
            record.record(member, is_static);
        }
        trace!(
            class = %qualified_name,
            member = member.0,
            is_static,
            "recorded class member"
        );
        hoisted
    }

    fn has_lowerable_members(&self, class: NodeIndex) -> bool {
        self.arena
            .children(self.arena.class_members(class))
            .iter()
            .any(|&m| self.arena.is_field(m) || self.arena.is_class_static_block(m))
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    fn report(&mut self, node: NodeIndex, kind: TranspilationErrorKind, detail: &str) {
        let (start, length) = match self.arena.get(node) {
            Some(n) if n.pos != Node::NO_POS => (n.pos, n.end.saturating_sub(n.pos)),
            _ => (0, 0),
        };
        let message = format_message(kind.template(), &[detail]);
        debug!(code = kind.code(), start, %message, "class left unconverted");
        self.sink.report(Diagnostic::error(
            self.file_name.to_string(),
            start,
            length,
            message,
            kind.code(),
        ));
    }
}

#[cfg(test)]
#[path = "tests/class_members.rs"]
mod tests;
