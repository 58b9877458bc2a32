//! Typed read access to the program tree.

use super::base::{ColorId, NodeIndex};
use super::node::{Node, NodeArena, node_flags};
use super::syntax_kind_ext;
use esdown_common::limits::MAX_QUALIFIED_NAME_DEPTH;

impl NodeArena {
    /// Get a node by index.
    #[inline]
    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    /// Get a mutable node by index.
    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    /// Kind of a node, `0` (`SyntaxKind::Unknown`) when absent.
    #[inline]
    #[must_use]
    pub fn kind(&self, index: NodeIndex) -> u16 {
        self.get(index).map_or(0, |n| n.kind)
    }

    #[inline]
    #[must_use]
    pub fn is_kind(&self, index: NodeIndex, kind: u16) -> bool {
        self.get(index).is_some_and(|n| n.kind == kind)
    }

    #[inline]
    #[must_use]
    pub fn has_flag(&self, index: NodeIndex, flag: u32) -> bool {
        self.get(index).is_some_and(|n| n.has_flag(flag))
    }

    #[inline]
    #[must_use]
    pub fn text(&self, index: NodeIndex) -> &str {
        self.get(index).map_or("", |n| n.text.as_str())
    }

    #[inline]
    #[must_use]
    pub fn color(&self, index: NodeIndex) -> Option<ColorId> {
        self.get(index).and_then(|n| n.color)
    }

    #[inline]
    #[must_use]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get(index).map_or(&[][..], |n| n.children.as_slice())
    }

    /// The `slot`-th child, `NONE` when absent.
    #[inline]
    #[must_use]
    pub fn child(&self, index: NodeIndex, slot: usize) -> NodeIndex {
        self.children(index)
            .get(slot)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    #[inline]
    #[must_use]
    pub fn first_child(&self, index: NodeIndex) -> NodeIndex {
        self.child(index, 0)
    }

    #[inline]
    #[must_use]
    pub fn last_child(&self, index: NodeIndex) -> NodeIndex {
        self.children(index)
            .last()
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    #[inline]
    #[must_use]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    #[must_use]
    pub fn next_sibling(&self, index: NodeIndex) -> NodeIndex {
        let siblings = self.children(self.parent(index));
        siblings
            .iter()
            .position(|&c| c == index)
            .and_then(|slot| siblings.get(slot + 1).copied())
            .unwrap_or(NodeIndex::NONE)
    }

    #[must_use]
    pub fn previous_sibling(&self, index: NodeIndex) -> NodeIndex {
        let siblings = self.children(self.parent(index));
        siblings
            .iter()
            .position(|&c| c == index)
            .and_then(|slot| slot.checked_sub(1))
            .and_then(|slot| siblings.get(slot).copied())
            .unwrap_or(NodeIndex::NONE)
    }

    /// Whether the optional-child placeholder stands at `index`.
    #[inline]
    #[must_use]
    pub fn is_empty_node(&self, index: NodeIndex) -> bool {
        self.is_kind(index, syntax_kind_ext::EMPTY)
    }

    // =========================================================================
    // Classes
    // =========================================================================

    /// Internal name of a class (`NONE` if the class is anonymous).
    #[must_use]
    pub fn class_name(&self, class: NodeIndex) -> NodeIndex {
        let name = self.child(class, 0);
        if self.is_kind(name, syntax_kind_ext::IDENTIFIER) {
            name
        } else {
            NodeIndex::NONE
        }
    }

    /// Heritage expression of a class (`NONE` when it has no `extends`).
    #[must_use]
    pub fn class_heritage(&self, class: NodeIndex) -> NodeIndex {
        let heritage = self.child(class, 1);
        if self.is_empty_node(heritage) {
            NodeIndex::NONE
        } else {
            heritage
        }
    }

    #[must_use]
    pub fn class_members(&self, class: NodeIndex) -> NodeIndex {
        self.child(class, 2)
    }

    /// Whether `member` is a `static { }` block.
    #[must_use]
    pub fn is_class_static_block(&self, member: NodeIndex) -> bool {
        self.is_kind(member, syntax_kind_ext::BLOCK)
            && self.is_kind(self.parent(member), syntax_kind_ext::CLASS_MEMBERS)
    }

    /// Whether `member` is a field (computed or not).
    #[must_use]
    pub fn is_field(&self, member: NodeIndex) -> bool {
        matches!(
            self.kind(member),
            syntax_kind_ext::PROPERTY_DECLARATION | syntax_kind_ext::COMPUTED_PROPERTY_DECLARATION
        )
    }

    #[must_use]
    pub fn is_static_member(&self, member: NodeIndex) -> bool {
        self.has_flag(member, node_flags::STATIC)
    }

    /// The `constructor` method of a class, `NONE` if it has none.
    #[must_use]
    pub fn class_constructor(&self, class: NodeIndex) -> NodeIndex {
        self.children(self.class_members(class))
            .iter()
            .copied()
            .find(|&m| {
                self.is_kind(m, syntax_kind_ext::METHOD_DECLARATION)
                    && !self.is_static_member(m)
                    && self.text(m) == "constructor"
            })
            .unwrap_or(NodeIndex::NONE)
    }

    // =========================================================================
    // Functions
    // =========================================================================

    #[must_use]
    pub fn is_function_kind(&self, index: NodeIndex) -> bool {
        matches!(
            self.kind(index),
            syntax_kind_ext::FUNCTION_DECLARATION
                | syntax_kind_ext::FUNCTION_EXPRESSION
                | syntax_kind_ext::ARROW_FUNCTION
        )
    }

    /// Functions that bind their own `this`: everything but arrows.
    #[must_use]
    pub fn is_ordinary_function(&self, index: NodeIndex) -> bool {
        matches!(
            self.kind(index),
            syntax_kind_ext::FUNCTION_DECLARATION | syntax_kind_ext::FUNCTION_EXPRESSION
        )
    }

    #[must_use]
    pub fn function_params(&self, function: NodeIndex) -> NodeIndex {
        self.child(function, 1)
    }

    #[must_use]
    pub fn function_body(&self, function: NodeIndex) -> NodeIndex {
        self.child(function, 2)
    }

    /// Function expression of a method declaration.
    #[must_use]
    pub fn method_function(&self, method: NodeIndex) -> NodeIndex {
        match self.kind(method) {
            syntax_kind_ext::METHOD_DECLARATION => self.child(method, 0),
            syntax_kind_ext::COMPUTED_METHOD_DECLARATION => self.child(method, 1),
            _ => NodeIndex::NONE,
        }
    }

    // =========================================================================
    // Statements and names
    // =========================================================================

    /// Whether `index` sits directly in a statement list.
    #[must_use]
    pub fn is_statement(&self, index: NodeIndex) -> bool {
        is_statement_container(self.kind(self.parent(index)))
    }

    /// Whether the node is a `name` or `a.b.c` chain of identifiers.
    #[must_use]
    pub fn is_qualified_name(&self, index: NodeIndex) -> bool {
        match self.kind(index) {
            syntax_kind_ext::IDENTIFIER | syntax_kind_ext::THIS_KEYWORD => true,
            syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION => {
                !self.has_flag(index, node_flags::OPTIONAL_CHAIN)
                    && self.is_qualified_name(self.first_child(index))
            }
            _ => false,
        }
    }

    /// Dotted text of a qualified name, `None` for other expressions and
    /// for chains longer than `MAX_QUALIFIED_NAME_DEPTH`.
    #[must_use]
    pub fn qualified_name(&self, index: NodeIndex) -> Option<String> {
        let mut segments: Vec<&str> = Vec::new();
        let mut current = index;
        for _ in 0..MAX_QUALIFIED_NAME_DEPTH {
            match self.kind(current) {
                syntax_kind_ext::IDENTIFIER => segments.push(self.text(current)),
                syntax_kind_ext::THIS_KEYWORD => segments.push("this"),
                syntax_kind_ext::PROPERTY_ACCESS_EXPRESSION
                    if !self.has_flag(current, node_flags::OPTIONAL_CHAIN) =>
                {
                    segments.push(self.text(current));
                    current = self.first_child(current);
                    continue;
                }
                _ => return None,
            }
            segments.reverse();
            return Some(segments.join("."));
        }
        None
    }

    #[must_use]
    pub fn matches_qualified_name(&self, a: NodeIndex, b: NodeIndex) -> bool {
        match (self.qualified_name(a), self.qualified_name(b)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

/// Kinds whose children are statements.
#[must_use]
pub const fn is_statement_container(kind: u16) -> bool {
    matches!(kind, syntax_kind_ext::SOURCE_FILE | syntax_kind_ext::BLOCK)
}
