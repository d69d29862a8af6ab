//! Tree storage: insert, walk, leaf order.

use slotmap::{SecondaryMap, SlotMap};

use super::node::{ContainerStyle, LayoutNode, NodeId, NodeKind};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// The layout tree of one line, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`; ordered child lists are stored in a
/// secondary map. There are no parent links: the evaluator keeps its own
/// container stack. Leaves are additionally recorded in creation order,
/// which is the order of the action list.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: SlotMap<NodeId, LayoutNode>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    root: NodeId,
    leaves: Vec<NodeId>,
}

impl LayoutTree {
    /// Create a tree holding only `root`.
    pub fn new(root: LayoutNode) -> Self {
        let mut nodes = SlotMap::with_key();
        let mut children = SecondaryMap::new();
        let root = nodes.insert(root);
        children.insert(root, Vec::new());
        Self { nodes, children, root, leaves: Vec::new() }
    }

    /// Append `node` as the last child of `parent`.
    ///
    /// Returns `None` if `parent` is not a container of this tree.
    pub fn insert_child(&mut self, parent: NodeId, node: LayoutNode) -> Option<NodeId> {
        if !matches!(self.nodes.get(parent)?.kind, NodeKind::Container(_)) {
            return None;
        }
        let is_leaf = node.is_leaf();
        let id = self.nodes.insert(node);
        self.children.insert(id, Vec::new());
        if let Some(siblings) = self.children.get_mut(parent) {
            siblings.push(id);
        }
        if is_leaf {
            self.leaves.push(id);
        }
        Some(id)
    }

    /// The root container.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Children of a node in insertion order. Empty for leaves and unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Leaves in creation order.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Immutable access to a node.
    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id)
    }

    /// Mutable access to a node.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut LayoutNode> {
        self.nodes.get_mut(id)
    }

    /// Mutable access to a container's style.
    pub fn container_mut(&mut self, id: NodeId) -> Option<&mut ContainerStyle> {
        match &mut self.nodes.get_mut(id)?.kind {
            NodeKind::Container(style) => Some(style),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a tree has at least its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first walk starting at `from` (inclusive).
    #[cfg(test)]
    pub(crate) fn walk_depth_first(&self, from: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if !self.nodes.contains_key(id) {
                continue;
            }
            result.push(id);
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}
