//! TaffyTree-backed layout solver.
//!
//! [`TaffySolver`] mirrors a [`LayoutTree`] into a fresh taffy tree, runs
//! flexbox layout against the viewport and reports absolute [`Frame`]s.

use taffy::prelude::*;

use crate::error::{Error, Result};
use crate::geometry::{Frame, Size};
use crate::tree::{LayoutTree, NodeId};

use super::resolve::resolve_node;
use super::{Frames, LayoutSolver};

/// Flexbox solver on the `taffy` crate.
///
/// Every solve builds a new taffy tree, so no state carries over between
/// lines or viewport changes.
#[derive(Debug, Default)]
pub struct TaffySolver;

impl TaffySolver {
    pub fn new() -> Self {
        Self
    }
}

impl LayoutSolver for TaffySolver {
    fn solve(&mut self, tree: &LayoutTree, viewport: Size) -> Result<Frames> {
        let mut taffy: TaffyTree<()> = TaffyTree::new();
        let root = build(&mut taffy, tree, tree.root())?;

        taffy
            .compute_layout(
                root,
                taffy::geometry::Size {
                    width: AvailableSpace::Definite(viewport.width),
                    height: AvailableSpace::Definite(viewport.height),
                },
            )
            .map_err(Error::Layout)?;

        let mut frames = Frames::new();
        collect(&taffy, tree, tree.root(), root, (0.0, 0.0), &mut frames)?;
        log::trace!("solved {} frames in {}x{}", frames.len(), viewport.width, viewport.height);
        Ok(frames)
    }
}

/// Sibling order for layout: stable sort by the `order` property, so equal
/// orders keep creation order.
fn ordered_children(tree: &LayoutTree, id: NodeId) -> Vec<NodeId> {
    let mut children = tree.children(id).to_vec();
    children.sort_by_key(|&child| tree.get(child).map_or(0, |node| node.item.order));
    children
}

/// Create the taffy subtree for `id`, children first.
fn build(
    taffy: &mut TaffyTree<()>,
    tree: &LayoutTree,
    id: NodeId,
) -> Result<taffy::NodeId> {
    let style = tree.get(id).map(resolve_node).unwrap_or_default();

    let children = ordered_children(tree, id);
    if children.is_empty() {
        taffy.new_leaf(style).map_err(Error::Layout)
    } else {
        let mut taffy_children = Vec::with_capacity(children.len());
        for child in children {
            taffy_children.push(build(taffy, tree, child)?);
        }
        taffy
            .new_with_children(style, &taffy_children)
            .map_err(Error::Layout)
    }
}

/// Walk both trees in parallel, accumulating parent offsets into absolute
/// frames.
fn collect(
    taffy: &TaffyTree<()>,
    tree: &LayoutTree,
    id: NodeId,
    taffy_id: taffy::NodeId,
    origin: (f32, f32),
    frames: &mut Frames,
) -> Result<()> {
    let layout = taffy.layout(taffy_id).map_err(Error::Layout)?;
    let frame = Frame::new(
        origin.0 + layout.location.x,
        origin.1 + layout.location.y,
        layout.size.width,
        layout.size.height,
    );
    frames.insert(id, frame);

    let taffy_children = taffy.children(taffy_id).map_err(Error::Layout)?;
    for (child, taffy_child) in ordered_children(tree, id).into_iter().zip(taffy_children) {
        collect(taffy, tree, child, taffy_child, (frame.x, frame.y), frames)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::markup::Direction;
    use crate::paint::{LineStyle, Paint};
    use crate::tree::{ContainerStyle, FlexItem, LayoutNode};

    const VP: Size = Size::new(20.0, 1.0);

    fn root_tree(viewport: Size) -> LayoutTree {
        LayoutTree::new(LayoutNode::container(ContainerStyle::ROOT, FlexItem::sized(viewport)))
    }

    fn leaf(width: f32, height: f32) -> LayoutNode {
        LayoutNode::leaf(
            Rgba::BLACK,
            Paint::Rule { fg: Rgba::WHITE, line: LineStyle::default() },
            FlexItem::sized(Size::new(width, height)),
        )
    }

    fn leaf_with(width: f32, f: impl FnOnce(&mut FlexItem)) -> LayoutNode {
        let mut node = leaf(width, 1.0);
        f(&mut node.item);
        node
    }

    #[test]
    fn root_fills_viewport() {
        let tree = root_tree(VP);
        let frames = TaffySolver::new().solve(&tree, VP).unwrap();
        assert_eq!(frames.get(tree.root()), Some(Frame::new(0.0, 0.0, 20.0, 1.0)));
    }

    #[test]
    fn row_places_leaves_side_by_side() {
        let mut tree = root_tree(VP);
        let root = tree.root();
        let a = tree.insert_child(root, leaf(3.0, 1.0)).unwrap();
        let b = tree.insert_child(root, leaf(5.0, 1.0)).unwrap();

        let frames = TaffySolver::new().solve(&tree, VP).unwrap();
        assert_eq!(frames.get(a), Some(Frame::new(0.0, 0.0, 3.0, 1.0)));
        assert_eq!(frames.get(b), Some(Frame::new(3.0, 0.0, 5.0, 1.0)));
    }

    #[test]
    fn grow_takes_free_space() {
        let mut tree = root_tree(VP);
        let root = tree.root();
        let a = tree.insert_child(root, leaf(2.0, 1.0)).unwrap();
        let r = tree.insert_child(root, leaf_with(1.0, |item| item.grow = 10.0)).unwrap();
        let b = tree.insert_child(root, leaf(2.0, 1.0)).unwrap();

        let frames = TaffySolver::new().solve(&tree, VP).unwrap();
        assert_eq!(frames.get(r).unwrap().width, 16.0);
        assert_eq!(frames.get(b).unwrap().x, 18.0);
        assert_eq!(frames.get(a).unwrap().x, 0.0);
    }

    #[test]
    fn order_sorts_siblings_stably() {
        let mut tree = root_tree(VP);
        let root = tree.root();
        let a = tree.insert_child(root, leaf_with(1.0, |item| item.order = 1)).unwrap();
        let b = tree.insert_child(root, leaf(2.0, 1.0)).unwrap();
        let c = tree.insert_child(root, leaf(3.0, 1.0)).unwrap();

        let frames = TaffySolver::new().solve(&tree, VP).unwrap();
        assert_eq!(frames.get(b).unwrap().x, 0.0);
        assert_eq!(frames.get(c).unwrap().x, 2.0);
        assert_eq!(frames.get(a).unwrap().x, 5.0);
    }

    #[test]
    fn nested_frames_are_absolute() {
        let viewport = Size::new(20.0, 4.0);
        let mut tree = root_tree(viewport);
        let root = tree.root();
        tree.insert_child(root, leaf(4.0, 4.0)).unwrap();
        let style = ContainerStyle { direction: Direction::Column, ..ContainerStyle::default() };
        let bx = tree
            .insert_child(root, LayoutNode::container(style, FlexItem::sized(Size::new(6.0, 4.0))))
            .unwrap();
        let top = tree.insert_child(bx, leaf(6.0, 1.0)).unwrap();
        let bottom = tree.insert_child(bx, leaf(6.0, 1.0)).unwrap();

        let frames = TaffySolver::new().solve(&tree, viewport).unwrap();
        assert_eq!(frames.get(bx), Some(Frame::new(4.0, 0.0, 6.0, 4.0)));
        assert_eq!(frames.get(top), Some(Frame::new(4.0, 0.0, 6.0, 1.0)));
        assert_eq!(frames.get(bottom), Some(Frame::new(4.0, 1.0, 6.0, 1.0)));
    }

    #[test]
    fn root_aligns_items_to_the_end() {
        let viewport = Size::new(10.0, 3.0);
        let mut tree = root_tree(viewport);
        let root = tree.root();
        let a = tree.insert_child(root, leaf(2.0, 1.0)).unwrap();

        let frames = TaffySolver::new().solve(&tree, viewport).unwrap();
        assert_eq!(frames.get(a), Some(Frame::new(0.0, 2.0, 2.0, 1.0)));
    }

    #[test]
    fn solving_twice_is_identical() {
        let mut tree = root_tree(VP);
        let root = tree.root();
        tree.insert_child(root, leaf(3.0, 1.0)).unwrap();
        tree.insert_child(root, leaf_with(1.0, |item| item.grow = 1.0)).unwrap();

        let mut solver = TaffySolver::new();
        let first = solver.solve(&tree, VP).unwrap();
        let second = solver.solve(&tree, VP).unwrap();
        assert_eq!(first, second);
    }
}
