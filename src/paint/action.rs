//! Actions: the positioned, paint-ready form of each leaf.

use std::borrow::Cow;

use crate::color::Rgba;
use crate::geometry::{Edges, Frame};
use crate::layout::Frames;
use crate::markup::text::{is_bold, plain_text};
use crate::markup::{Ellipsize, LineCap, LineJoin};
use crate::shape::Font;
use crate::tree::{LayoutTree, NodeKind};

use super::image::ImageHandle;

/// Stroke parameters of a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub cap: LineCap,
    pub join: LineJoin,
    pub offset: f32,
    pub width: f32,
    pub miter_limit: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            offset: 0.0,
            width: 1.0,
            miter_limit: 10.0,
        }
    }
}

/// Kind-specific paint data, fully resolved at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Text {
        fg: Rgba,
        font: Font,
        /// The argument as written: literal text, or markup if `markup` is set.
        text: String,
        markup: bool,
        ellipsize: Ellipsize,
    },
    Rule {
        fg: Rgba,
        line: LineStyle,
    },
    Image {
        image: ImageHandle,
    },
}

impl Paint {
    pub fn kind(&self) -> ActionKind {
        match self {
            Paint::Text { .. } => ActionKind::Text,
            Paint::Rule { .. } => ActionKind::Rule,
            Paint::Image { .. } => ActionKind::Image,
        }
    }

    /// The text to display, with markup reduced to plain characters.
    pub fn display_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Paint::Text { text, markup: true, .. } => Some(Cow::Owned(plain_text(text))),
            Paint::Text { text, .. } => Some(Cow::Borrowed(text)),
            _ => None,
        }
    }

    /// Whether text should be drawn bold, from the font or the markup.
    pub fn is_bold(&self) -> bool {
        match self {
            Paint::Text { font, text, markup, .. } => font.is_bold() || (*markup && is_bold(text)),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Text,
    Rule,
    Image,
}

/// One leaf, positioned and ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub frame: Frame,
    pub margin: Edges,
    pub padding: Edges,
    pub background: Rgba,
    pub clickable: Option<String>,
    pub paint: Paint,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        self.paint.kind()
    }

    /// The frame minus padding: where content is drawn.
    pub fn content_frame(&self) -> Frame {
        self.frame.shrink(self.padding)
    }
}

/// Every leaf of one line, in leaf-creation order.
///
/// Both painting and hit-testing read this list rather than the tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionList {
    actions: Vec<Action>,
}

impl ActionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit one action per leaf of `tree`, in creation order.
    ///
    /// A leaf the solver did not reach gets an empty frame at the origin.
    pub fn flatten(tree: &LayoutTree, frames: &Frames) -> Self {
        let actions = tree
            .leaves()
            .iter()
            .filter_map(|&id| {
                let node = tree.get(id)?;
                let NodeKind::Leaf(leaf) = &node.kind else {
                    return None;
                };
                Some(Action {
                    frame: frames.get(id).unwrap_or_default(),
                    margin: node.item.margin,
                    padding: node.item.padding,
                    background: leaf.background,
                    clickable: node.item.clickable.clone(),
                    paint: leaf.paint.clone(),
                })
            })
            .collect();
        Self { actions }
    }

    /// The first action, by creation order, that has a clickable area and
    /// whose frame contains `(x, y)` (edges included).
    pub fn hit_test(&self, x: f32, y: f32) -> Option<&Action> {
        self.actions
            .iter()
            .find(|action| action.clickable.is_some() && action.frame.contains(x, y))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.actions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Action> {
        self.actions.get(index)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl From<Vec<Action>> for ActionList {
    fn from(actions: Vec<Action>) -> Self {
        Self { actions }
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::tree::{ContainerStyle, FlexItem, LayoutNode};

    fn text(content: &str) -> Paint {
        Paint::Text {
            fg: Rgba::WHITE,
            font: Font::default(),
            text: content.to_owned(),
            markup: false,
            ellipsize: Ellipsize::None,
        }
    }

    fn action(frame: Frame, clickable: Option<&str>) -> Action {
        Action {
            frame,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            background: Rgba::BLACK,
            clickable: clickable.map(str::to_owned),
            paint: text("x"),
        }
    }

    // ── Paint ───────────────────────────────────────────────────────

    #[test]
    fn display_text_reduces_markup() {
        let plain = text("a <b>b</b>");
        assert_eq!(plain.display_text().unwrap(), "a <b>b</b>");

        let markup = Paint::Text {
            fg: Rgba::WHITE,
            font: Font::default(),
            text: "a <b>b</b>".into(),
            markup: true,
            ellipsize: Ellipsize::None,
        };
        assert_eq!(markup.display_text().unwrap(), "a b");
        assert!(markup.is_bold());
        assert!(!plain.is_bold());
    }

    #[test]
    fn rule_has_no_text() {
        let rule = Paint::Rule { fg: Rgba::WHITE, line: LineStyle::default() };
        assert_eq!(rule.display_text(), None);
        assert_eq!(rule.kind(), ActionKind::Rule);
    }

    #[test]
    fn line_style_defaults() {
        let line = LineStyle::default();
        assert_eq!(line.cap, LineCap::Butt);
        assert_eq!(line.join, LineJoin::Miter);
        assert_eq!(line.width, 1.0);
        assert_eq!(line.miter_limit, 10.0);
    }

    // ── Flatten ─────────────────────────────────────────────────────

    #[test]
    fn flatten_follows_leaf_creation_order() {
        let mut tree = LayoutTree::new(LayoutNode::container(
            ContainerStyle::ROOT,
            FlexItem::sized(Size::new(10.0, 1.0)),
        ));
        let root = tree.root();
        let bx = tree
            .insert_child(
                root,
                LayoutNode::container(ContainerStyle::default(), FlexItem::sized(Size::new(5.0, 1.0))),
            )
            .unwrap();
        let a = tree
            .insert_child(bx, LayoutNode::leaf(Rgba::BLACK, text("a"), FlexItem::sized(Size::new(1.0, 1.0))))
            .unwrap();
        let b = tree
            .insert_child(root, LayoutNode::leaf(Rgba::WHITE, text("b"), FlexItem::sized(Size::new(1.0, 1.0))))
            .unwrap();

        let mut frames = Frames::new();
        frames.insert(a, Frame::new(0.0, 0.0, 1.0, 1.0));
        frames.insert(b, Frame::new(5.0, 0.0, 1.0, 1.0));

        let list = ActionList::flatten(&tree, &frames);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().paint.display_text().unwrap(), "a");
        assert_eq!(list.get(1).unwrap().frame, Frame::new(5.0, 0.0, 1.0, 1.0));
        assert_eq!(list.get(1).unwrap().background, Rgba::WHITE);
    }

    // ── Hit testing ─────────────────────────────────────────────────

    #[test]
    fn hit_test_skips_unnamed_actions() {
        let list = ActionList::from(vec![
            action(Frame::new(0.0, 0.0, 10.0, 1.0), None),
            action(Frame::new(0.0, 0.0, 10.0, 1.0), Some("btn")),
        ]);
        assert_eq!(list.hit_test(3.0, 0.5).unwrap().clickable.as_deref(), Some("btn"));
    }

    #[test]
    fn hit_test_first_by_creation_order_wins() {
        let list = ActionList::from(vec![
            action(Frame::new(0.0, 0.0, 5.0, 1.0), Some("first")),
            action(Frame::new(2.0, 0.0, 5.0, 1.0), Some("second")),
        ]);
        assert_eq!(list.hit_test(3.0, 0.0).unwrap().clickable.as_deref(), Some("first"));
        assert_eq!(list.hit_test(6.0, 0.0).unwrap().clickable.as_deref(), Some("second"));
    }

    #[test]
    fn hit_test_edges_are_inclusive() {
        let list = ActionList::from(vec![action(Frame::new(2.0, 0.0, 3.0, 1.0), Some("btn"))]);
        assert!(list.hit_test(2.0, 0.0).is_some());
        assert!(list.hit_test(5.0, 1.0).is_some());
        assert!(list.hit_test(5.1, 1.0).is_none());
        assert!(list.hit_test(1.9, 0.0).is_none());
    }

    #[test]
    fn hit_test_empty_list() {
        assert!(ActionList::new().hit_test(0.0, 0.0).is_none());
    }
}
