//! Node types: NodeId, LayoutNode, FlexItem, ContainerStyle.

use slotmap::new_key_type;

use crate::color::Rgba;
use crate::geometry::{Edges, Size};
use crate::markup::{Align, Direction, Justify, Wrap};
use crate::paint::Paint;

new_key_type! {
    /// Unique identifier for a layout node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Flex properties carried by every node, container or leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexItem {
    /// Position among siblings; lower comes first, ties keep creation order.
    pub order: i32,
    pub grow: f32,
    pub shrink: f32,
    /// Flex basis; `None` is `auto`.
    pub basis: Option<f32>,
    pub align_self: Align,
    pub margin: Edges,
    pub padding: Edges,
    /// Clickable-area name, if the node is hit-testable.
    pub clickable: Option<String>,
    /// Definite size (padding included). Non-finite means unsized.
    pub size: Size,
}

impl FlexItem {
    /// An item of the given size with every other property at its default.
    pub fn sized(size: Size) -> Self {
        Self {
            order: 0,
            grow: 0.0,
            shrink: 0.0,
            basis: None,
            align_self: Align::Auto,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            clickable: None,
            size,
        }
    }

    /// Whether the node has a defined intrinsic size.
    pub fn is_sized(&self) -> bool {
        self.size.is_definite()
    }
}

/// Layout parameters that apply to a container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerStyle {
    pub direction: Direction,
    pub wrap: Wrap,
    pub justify: Justify,
    pub align_items: Align,
    pub align_content: Align,
}

impl ContainerStyle {
    /// The style of the root container: a row whose items sit at the end of
    /// the cross axis, with wrapped lines centered.
    pub const ROOT: ContainerStyle = ContainerStyle {
        direction: Direction::Row,
        wrap: Wrap::NoWrap,
        justify: Justify::Start,
        align_items: Align::End,
        align_content: Align::Center,
    };
}

impl Default for ContainerStyle {
    /// The starting style of a nested container: a column with stretched
    /// items and lines.
    fn default() -> Self {
        Self {
            direction: Direction::Column,
            wrap: Wrap::NoWrap,
            justify: Justify::Start,
            align_items: Align::Stretch,
            align_content: Align::Stretch,
        }
    }
}

/// Content of a leaf: what to draw and the background behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct Leaf {
    pub background: Rgba,
    pub paint: Paint,
}

/// What a node is.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Container(ContainerStyle),
    Leaf(Leaf),
}

/// One node of the layout tree.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub kind: NodeKind,
    pub item: FlexItem,
}

impl LayoutNode {
    /// A container node.
    pub fn container(style: ContainerStyle, item: FlexItem) -> Self {
        Self { kind: NodeKind::Container(style), item }
    }

    /// A leaf node.
    pub fn leaf(background: Rgba, paint: Paint, item: FlexItem) -> Self {
        Self { kind: NodeKind::Leaf(Leaf { background, paint }), item }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// The container style, if this is a container.
    pub fn container_style(&self) -> Option<&ContainerStyle> {
        match &self.kind {
            NodeKind::Container(style) => Some(style),
            NodeKind::Leaf(_) => None,
        }
    }

    /// The leaf content, if this is a leaf.
    pub fn leaf_content(&self) -> Option<&Leaf> {
        match &self.kind {
            NodeKind::Leaf(leaf) => Some(leaf),
            NodeKind::Container(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::LineStyle;

    #[test]
    fn sized_item_defaults() {
        let item = FlexItem::sized(Size::new(3.0, 1.0));
        assert!(item.is_sized());
        assert_eq!(item.grow, 0.0);
        assert_eq!(item.shrink, 0.0);
        assert_eq!(item.basis, None);
        assert_eq!(item.order, 0);
        assert_eq!(item.clickable, None);
    }

    #[test]
    fn unsized_item() {
        let item = FlexItem::sized(Size::new(f32::NAN, f32::NAN));
        assert!(!item.is_sized());
    }

    #[test]
    fn root_and_nested_container_styles_differ() {
        assert_eq!(ContainerStyle::ROOT.direction, Direction::Row);
        assert_eq!(ContainerStyle::ROOT.align_items, Align::End);
        assert_eq!(ContainerStyle::ROOT.align_content, Align::Center);
        assert_eq!(ContainerStyle::default().direction, Direction::Column);
        assert_eq!(ContainerStyle::default().align_items, Align::Stretch);
    }

    #[test]
    fn accessors_match_kind() {
        let leaf = LayoutNode::leaf(
            Rgba::BLACK,
            Paint::Rule { fg: Rgba::WHITE, line: LineStyle::default() },
            FlexItem::sized(Size::new(1.0, 1.0)),
        );
        assert!(leaf.is_leaf());
        assert_eq!(leaf.leaf_content().unwrap().background, Rgba::BLACK);
        assert!(leaf.container_style().is_none());

        let container = LayoutNode::container(
            ContainerStyle::default(),
            FlexItem::sized(Size::new(1.0, 1.0)),
        );
        assert!(!container.is_leaf());
        assert!(container.container_style().is_some());
    }
}
