//! NodeArena creation and mutation methods.
//!
//! Mutation follows a strict move discipline: a node is attached to at most
//! one parent at a time. Attaching a node that still has a parent is a
//! contract violation; callers `detach` first or build a copy with
//! `clone_tree`, the only duplication path.

use super::base::{ColorId, NodeIndex};
use super::node::{Node, NodeArena};
use esdown_common::FeatureSet;
use tracing::trace;

impl NodeArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    /// Allocate a node with the given children; the children are attached to it.
    pub fn add_node(
        &mut self,
        kind: u16,
        text: impl Into<String>,
        children: &[NodeIndex],
        pos: u32,
        end: u32,
    ) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        let mut node = Node::new(kind, pos, end);
        node.text = text.into();
        self.nodes.push(node);
        for &child in children {
            self.append_child(index, child);
        }
        index
    }

    /// Allocate a node without a source range.
    pub fn add_synthetic(
        &mut self,
        kind: u16,
        text: impl Into<String>,
        children: &[NodeIndex],
        color: Option<ColorId>,
    ) -> NodeIndex {
        let index = self.add_node(kind, text, children, Node::NO_POS, Node::NO_POS);
        self.set_color(index, color);
        index
    }

    pub fn set_flags(&mut self, index: NodeIndex, flags: u32) {
        if let Some(node) = self.get_mut(index) {
            node.flags |= flags;
        }
    }

    pub fn clear_flags(&mut self, index: NodeIndex, flags: u32) {
        if let Some(node) = self.get_mut(index) {
            node.flags &= !flags;
        }
    }

    pub fn set_text(&mut self, index: NodeIndex, text: impl Into<String>) {
        if let Some(node) = self.get_mut(index) {
            node.text = text.into();
        }
    }

    pub fn set_range(&mut self, index: NodeIndex, pos: u32, end: u32) {
        if let Some(node) = self.get_mut(index) {
            node.pos = pos;
            node.end = end;
        }
    }

    pub fn set_color(&mut self, index: NodeIndex, color: Option<ColorId>) {
        if let Some(node) = self.get_mut(index) {
            node.color = color;
        }
    }

    // =========================================================================
    // Side tables
    // =========================================================================

    /// Register the color of `this` inside instance members of `class`.
    pub fn set_instance_color(&mut self, class: NodeIndex, color: ColorId) {
        self.instance_colors.insert(class, color);
    }

    #[must_use]
    pub fn instance_color(&self, class: NodeIndex) -> Option<ColorId> {
        self.instance_colors.get(&class).copied()
    }

    /// Features recorded for a script. `None` when nothing was recorded.
    #[must_use]
    pub fn script_features(&self, source_file: NodeIndex) -> Option<FeatureSet> {
        self.script_features.get(&source_file).copied()
    }

    pub fn set_script_features(&mut self, source_file: NodeIndex, features: FeatureSet) {
        self.script_features.insert(source_file, features);
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        if child.is_none() {
            return;
        }
        self.adopt(parent, child);
        if let Some(node) = self.get_mut(parent) {
            node.children.push(child);
        }
    }

    /// Insert `child` as the first child of `parent`.
    pub fn add_child_to_front(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.insert_child_at(parent, 0, child);
    }

    /// Insert `child` at position `slot` of `parent`'s children.
    pub fn insert_child_at(&mut self, parent: NodeIndex, slot: usize, child: NodeIndex) {
        if child.is_none() {
            return;
        }
        self.adopt(parent, child);
        if let Some(node) = self.get_mut(parent) {
            let slot = slot.min(node.children.len());
            node.children.insert(slot, child);
        }
    }

    /// Insert `node` as the sibling immediately before `anchor`.
    pub fn insert_before(&mut self, anchor: NodeIndex, node: NodeIndex) {
        let Some((parent, slot)) = self.slot_of(anchor) else {
            trace!(anchor = anchor.0, "insert_before on detached anchor");
            return;
        };
        self.insert_child_at(parent, slot, node);
    }

    /// Insert `node` as the sibling immediately after `anchor`.
    pub fn insert_after(&mut self, anchor: NodeIndex, node: NodeIndex) {
        let Some((parent, slot)) = self.slot_of(anchor) else {
            trace!(anchor = anchor.0, "insert_after on detached anchor");
            return;
        };
        self.insert_child_at(parent, slot + 1, node);
    }

    /// Remove `index` from its parent. Returns `index` for chaining.
    pub fn detach(&mut self, index: NodeIndex) -> NodeIndex {
        if let Some((parent, slot)) = self.slot_of(index) {
            if let Some(node) = self.get_mut(parent) {
                node.children.remove(slot);
            }
        }
        if let Some(node) = self.get_mut(index) {
            node.parent = NodeIndex::NONE;
        }
        index
    }

    /// Put the detached `replacement` where `old` is; `old` ends up detached.
    pub fn replace_with(&mut self, old: NodeIndex, replacement: NodeIndex) {
        let Some((parent, slot)) = self.slot_of(old) else {
            return;
        };
        self.adopt(parent, replacement);
        if let Some(node) = self.get_mut(parent) {
            node.children[slot] = replacement;
        }
        if let Some(node) = self.get_mut(old) {
            node.parent = NodeIndex::NONE;
        }
    }

    /// Deep copy of a subtree. The copy is detached.
    pub fn clone_tree(&mut self, index: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        let mut copy = node.clone();
        let children: Vec<NodeIndex> = copy.children.drain(..).collect();
        copy.parent = NodeIndex::NONE;

        let new_index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(copy);
        for child in children {
            let child_copy = self.clone_tree(child);
            self.append_child(new_index, child_copy);
        }
        new_index
    }

    /// Shallow copy: same kind, flags, text, range and color, no children.
    pub fn clone_node(&mut self, index: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        let mut copy = node.clone();
        copy.children.clear();
        copy.parent = NodeIndex::NONE;
        let new_index = NodeIndex(self.nodes.len() as u32);
        self.nodes.push(copy);
        new_index
    }

    /// Give every node of the subtree without a source range the range of `source`.
    pub fn srcref_tree_if_missing(&mut self, index: NodeIndex, source: NodeIndex) {
        let Some(src) = self.get(source) else {
            return;
        };
        let (pos, end) = (src.pos, src.end);
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get_mut(current) else {
                continue;
            };
            if !node.has_source_range() {
                node.pos = pos;
                node.end = end;
            }
            stack.extend(node.children.iter().copied());
        }
    }

    /// Give every node of the subtree the range of `source`, overwriting.
    pub fn srcref_tree(&mut self, index: NodeIndex, source: NodeIndex) {
        let Some(src) = self.get(source) else {
            return;
        };
        let (pos, end) = (src.pos, src.end);
        let mut stack = vec![index];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get_mut(current) else {
                continue;
            };
            node.pos = pos;
            node.end = end;
            stack.extend(node.children.iter().copied());
        }
    }

    fn adopt(&mut self, parent: NodeIndex, child: NodeIndex) {
        let Some(node) = self.get_mut(child) else {
            return;
        };
        debug_assert!(
            node.parent.is_none(),
            "node {} is still attached to {}",
            child.0,
            node.parent.0
        );
        node.parent = parent;
    }

    /// Parent and position of `index` among its siblings.
    fn slot_of(&self, index: NodeIndex) -> Option<(NodeIndex, usize)> {
        let parent = self.get(index)?.parent;
        let slot = self
            .get(parent)?
            .children
            .iter()
            .position(|&c| c == index)?;
        Some((parent, slot))
    }
}

#[cfg(test)]
#[path = "tests/node_arena.rs"]
mod tests;
