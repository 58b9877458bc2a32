//! Program tree nodes and the arena that owns them.
//!
//! Every node lives in `NodeArena::nodes` and is addressed by `NodeIndex`.
//! Children are stored as index lists on the parent and every node records
//! its parent, so moving a subtree is a matter of rewriting two index slots.
//! A node with `parent == NodeIndex::NONE` is detached (or a root).

use super::base::{ColorId, NodeIndex};
use esdown_common::FeatureSet;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Node flag bits.
pub mod node_flags {
    /// `var` declaration list.
    pub const VAR: u32 = 1 << 0;
    /// `let` declaration list.
    pub const LET: u32 = 1 << 1;
    /// `const` declaration list.
    pub const CONST: u32 = 1 << 2;
    /// Static class member.
    pub const STATIC: u32 = 1 << 3;
    /// `get` accessor.
    pub const GETTER: u32 = 1 << 4;
    /// `set` accessor.
    pub const SETTER: u32 = 1 << 5;
    /// Arrow function whose body is an expression.
    pub const EXPRESSION_BODY: u32 = 1 << 6;
    /// Rest parameter.
    pub const REST: u32 = 1 << 7;
    /// `?.` property access or call.
    pub const OPTIONAL_CHAIN: u32 = 1 << 8;
    /// Generator function or method.
    pub const GENERATOR: u32 = 1 << 9;

    pub const BLOCK_SCOPED: u32 = LET | CONST;
}

/// A single node of the program tree.
#[derive(Clone, Debug)]
pub struct Node {
    /// `SyntaxKind` for leaves, `syntax_kind_ext` constant otherwise.
    pub kind: u16,
    pub flags: u32,
    /// Identifier name, cooked literal value, member name or operator.
    pub text: String,
    pub children: SmallVec<[NodeIndex; 4]>,
    pub parent: NodeIndex,
    /// Start position in source (byte offset). `Node::NO_POS` for synthesized nodes.
    pub pos: u32,
    pub end: u32,
    pub color: Option<ColorId>,
}

impl Node {
    /// Position of a node that has no source range.
    pub const NO_POS: u32 = u32::MAX;

    #[inline]
    #[must_use]
    pub fn new(kind: u16, pos: u32, end: u32) -> Self {
        Self {
            kind,
            flags: 0,
            text: String::new(),
            children: SmallVec::new(),
            parent: NodeIndex::NONE,
            pos,
            end,
            color: None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn has_flag(&self, flag: u32) -> bool {
        self.flags & flag != 0
    }

    #[inline]
    #[must_use]
    pub const fn has_source_range(&self) -> bool {
        self.pos != Self::NO_POS
    }
}

/// Arena owning every node of one compilation unit.
#[derive(Debug, Default)]
pub struct NodeArena {
    pub(crate) nodes: Vec<Node>,
    /// Color of `this` inside the instance members of a class, keyed by class node.
    pub(crate) instance_colors: FxHashMap<NodeIndex, ColorId>,
    /// Features recorded by the parser, keyed by source file node.
    pub(crate) script_features: FxHashMap<NodeIndex, FeatureSet>,
}
