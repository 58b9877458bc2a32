//! Base index types for the program tree.

/// Index of a node in a `NodeArena`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    /// The absent node.
    pub const NONE: Self = Self(u32::MAX);

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Opaque type annotation ("color") attached to a node.
///
/// Colors are assigned by an external type system. The tree only carries
/// them: derived nodes copy the color of the node they replace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorId(pub u32);
