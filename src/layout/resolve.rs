//! Layout node -> taffy Style conversion.
//!
//! Maps flexbar's node properties ([`FlexItem`], [`ContainerStyle`]) to
//! taffy's layout types ([`taffy::Style`], [`Dimension`], etc.).

use taffy::prelude::*;

use crate::geometry::Edges;
use crate::markup::{Align, Direction, Justify, Wrap};
use crate::tree::{ContainerStyle, FlexItem, LayoutNode, NodeKind};

/// Convert a length to a [`Dimension`]. Non-finite lengths are `auto`.
fn resolve_dimension(length: f32) -> Dimension {
    if length.is_finite() {
        Dimension::from_length(length)
    } else {
        Dimension::AUTO
    }
}

/// Convert margins to a taffy [`Rect<LengthPercentageAuto>`].
pub fn resolve_margin(edges: Edges) -> taffy::geometry::Rect<LengthPercentageAuto> {
    taffy::geometry::Rect {
        top: LengthPercentageAuto::from_length(edges.top),
        right: LengthPercentageAuto::from_length(edges.right),
        bottom: LengthPercentageAuto::from_length(edges.bottom),
        left: LengthPercentageAuto::from_length(edges.left),
    }
}

/// Convert padding to a taffy [`Rect<LengthPercentage>`].
pub fn resolve_padding(edges: Edges) -> taffy::geometry::Rect<LengthPercentage> {
    taffy::geometry::Rect {
        top: LengthPercentage::from_length(edges.top),
        right: LengthPercentage::from_length(edges.right),
        bottom: LengthPercentage::from_length(edges.bottom),
        left: LengthPercentage::from_length(edges.left),
    }
}

pub fn resolve_direction(direction: Direction) -> FlexDirection {
    match direction {
        Direction::Row => FlexDirection::Row,
        Direction::RowReverse => FlexDirection::RowReverse,
        Direction::Column => FlexDirection::Column,
        Direction::ColumnReverse => FlexDirection::ColumnReverse,
    }
}

pub fn resolve_wrap(wrap: Wrap) -> FlexWrap {
    match wrap {
        Wrap::NoWrap => FlexWrap::NoWrap,
        Wrap::Wrap => FlexWrap::Wrap,
        Wrap::WrapReverse => FlexWrap::WrapReverse,
    }
}

pub fn resolve_justify(justify: Justify) -> JustifyContent {
    match justify {
        Justify::Start => JustifyContent::FlexStart,
        Justify::End => JustifyContent::FlexEnd,
        Justify::Center => JustifyContent::Center,
        Justify::SpaceBetween => JustifyContent::SpaceBetween,
        Justify::SpaceAround => JustifyContent::SpaceAround,
        Justify::SpaceEvenly => JustifyContent::SpaceEvenly,
    }
}

/// Item alignment. `auto` defers to taffy's default.
pub fn resolve_align_items(align: Align) -> Option<AlignItems> {
    match align {
        Align::Auto => None,
        Align::Start => Some(AlignItems::FlexStart),
        Align::End => Some(AlignItems::FlexEnd),
        Align::Center => Some(AlignItems::Center),
        Align::Stretch => Some(AlignItems::Stretch),
    }
}

/// Line alignment for wrapped containers. `auto` defers to taffy's default.
pub fn resolve_align_content(align: Align) -> Option<AlignContent> {
    match align {
        Align::Auto => None,
        Align::Start => Some(AlignContent::FlexStart),
        Align::End => Some(AlignContent::FlexEnd),
        Align::Center => Some(AlignContent::Center),
        Align::Stretch => Some(AlignContent::Stretch),
    }
}

/// Apply the properties every node carries as a flex item.
fn apply_item(item: &FlexItem, style: &mut taffy::Style) {
    style.size = taffy::geometry::Size {
        width: resolve_dimension(item.size.width),
        height: resolve_dimension(item.size.height),
    };
    style.flex_grow = item.grow;
    style.flex_shrink = item.shrink;
    style.flex_basis = item.basis.map_or(Dimension::AUTO, Dimension::from_length);
    style.align_self = resolve_align_items(item.align_self);
    style.margin = resolve_margin(item.margin);
    style.padding = resolve_padding(item.padding);
}

/// Apply the properties a container imposes on its children.
fn apply_container(container: &ContainerStyle, style: &mut taffy::Style) {
    style.flex_direction = resolve_direction(container.direction);
    style.flex_wrap = resolve_wrap(container.wrap);
    style.justify_content = Some(resolve_justify(container.justify));
    style.align_items = resolve_align_items(container.align_items);
    style.align_content = resolve_align_content(container.align_content);
}

/// Convert a full [`LayoutNode`] into a [`taffy::Style`].
///
/// Mapping summary:
/// - every node is `Display::Flex`
/// - `size` -> `size` (non-finite -> auto)
/// - `grow`/`shrink`/`basis` -> `flex_grow`/`flex_shrink`/`flex_basis`
/// - `align_self` -> `align_self` (auto -> unset)
/// - `margin`/`padding` -> `margin`/`padding`
/// - containers additionally map direction, wrap, justify, align-items and
///   align-content
///
/// `order` has no taffy counterpart; the solver sorts siblings instead.
pub fn resolve_node(node: &LayoutNode) -> taffy::Style {
    let mut style = taffy::Style {
        display: Display::Flex,
        ..taffy::Style::default()
    };
    apply_item(&node.item, &mut style);
    if let NodeKind::Container(container) = &node.kind {
        apply_container(container, &mut style);
    }
    style
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::geometry::Size;
    use crate::paint::{LineStyle, Paint};

    fn leaf(item: FlexItem) -> LayoutNode {
        LayoutNode::leaf(
            Rgba::BLACK,
            Paint::Rule { fg: Rgba::WHITE, line: LineStyle::default() },
            item,
        )
    }

    // ── Item properties ─────────────────────────────────────────────

    #[test]
    fn sized_leaf() {
        let style = resolve_node(&leaf(FlexItem::sized(Size::new(4.0, 1.0))));
        assert_eq!(style.display, Display::Flex);
        assert_eq!(style.size.width, Dimension::from_length(4.0));
        assert_eq!(style.size.height, Dimension::from_length(1.0));
        assert_eq!(style.flex_grow, 0.0);
        assert_eq!(style.flex_shrink, 0.0);
        assert_eq!(style.flex_basis, Dimension::AUTO);
        assert_eq!(style.align_self, None);
    }

    #[test]
    fn unsized_leaf_is_auto() {
        let style = resolve_node(&leaf(FlexItem::sized(Size::new(f32::NAN, f32::NAN))));
        assert_eq!(style.size.width, Dimension::AUTO);
        assert_eq!(style.size.height, Dimension::AUTO);
    }

    #[test]
    fn flex_factors_and_basis() {
        let mut item = FlexItem::sized(Size::new(1.0, 1.0));
        item.grow = 2.0;
        item.shrink = 1.0;
        item.basis = Some(5.0);
        item.align_self = Align::Center;
        let style = resolve_node(&leaf(item));
        assert_eq!(style.flex_grow, 2.0);
        assert_eq!(style.flex_shrink, 1.0);
        assert_eq!(style.flex_basis, Dimension::from_length(5.0));
        assert_eq!(style.align_self, Some(AlignSelf::Center));
    }

    #[test]
    fn margin_and_padding() {
        let mut item = FlexItem::sized(Size::new(1.0, 1.0));
        item.margin = Edges::new(1.0, 2.0, 3.0, 4.0);
        item.padding = Edges::all(1.0);
        let style = resolve_node(&leaf(item));
        assert_eq!(style.margin.top, LengthPercentageAuto::from_length(1.0));
        assert_eq!(style.margin.left, LengthPercentageAuto::from_length(4.0));
        assert_eq!(style.padding.right, LengthPercentage::from_length(1.0));
    }

    // ── Container properties ────────────────────────────────────────

    #[test]
    fn root_container() {
        let node = LayoutNode::container(ContainerStyle::ROOT, FlexItem::sized(Size::new(80.0, 1.0)));
        let style = resolve_node(&node);
        assert_eq!(style.flex_direction, FlexDirection::Row);
        assert_eq!(style.flex_wrap, FlexWrap::NoWrap);
        assert_eq!(style.justify_content, Some(JustifyContent::FlexStart));
        assert_eq!(style.align_items, Some(AlignItems::FlexEnd));
        assert_eq!(style.align_content, Some(AlignContent::Center));
    }

    #[test]
    fn enum_mappings() {
        assert_eq!(resolve_direction(Direction::ColumnReverse), FlexDirection::ColumnReverse);
        assert_eq!(resolve_wrap(Wrap::WrapReverse), FlexWrap::WrapReverse);
        assert_eq!(resolve_justify(Justify::SpaceEvenly), JustifyContent::SpaceEvenly);
        assert_eq!(resolve_align_items(Align::Auto), None);
        assert_eq!(resolve_align_content(Align::Stretch), Some(AlignContent::Stretch));
    }
}
