//! Style state of one line: persistent fields and one-shot fields.
//!
//! Persistent fields stay attached to every node created after them until a
//! command overwrites them. One-shot fields are staged by a command and
//! handed to the next node through [`StyleState::consume`], the single place
//! where they are reset.

use crate::color::Rgba;
use crate::geometry::Edges;
use crate::markup::{Align, Ellipsize};
use crate::paint::LineStyle;
use crate::shape::Font;

/// Fields that survive until overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistentStyle {
    pub fg: Rgba,
    pub bg: Rgba,
    pub font: Font,
    pub margin: Edges,
    pub padding: Edges,
    pub ellipsize: Ellipsize,
    pub line: LineStyle,
}

impl Default for PersistentStyle {
    fn default() -> Self {
        Self {
            fg: Rgba::WHITE,
            bg: Rgba::BLACK,
            font: Font::default(),
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            ellipsize: Ellipsize::None,
            line: LineStyle::default(),
        }
    }
}

/// Fields staged for the next created node.
///
/// `grow` and `shrink` are optional so a rule can tell "nothing staged" from
/// an explicit zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingOneShot {
    pub grow: Option<f32>,
    pub shrink: Option<f32>,
    pub basis: Option<f32>,
    pub order: i32,
    pub align_self: Align,
    pub clickable: Option<String>,
}

/// What one node receives from [`PendingOneShot`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consumed {
    pub order: i32,
    pub grow: Option<f32>,
    pub shrink: Option<f32>,
    pub basis: Option<f32>,
    pub align_self: Align,
    pub clickable: Option<String>,
}

impl PendingOneShot {
    /// Hand the staged fields to one node and reset what it took.
    ///
    /// `order` is always taken. Everything else is taken only by a sized
    /// node; an unsized node leaves grow, shrink and the clickable area
    /// staged for the next node, and sees align-self and basis without
    /// taking them.
    pub fn consume(&mut self, sized: bool) -> Consumed {
        let order = std::mem::take(&mut self.order);
        if sized {
            Consumed {
                order,
                grow: self.grow.take(),
                shrink: self.shrink.take(),
                basis: self.basis.take(),
                align_self: std::mem::take(&mut self.align_self),
                clickable: self.clickable.take(),
            }
        } else {
            Consumed {
                order,
                basis: self.basis,
                align_self: self.align_self,
                ..Consumed::default()
            }
        }
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        *self == PendingOneShot::default()
    }
}

/// The evaluator's style state, created fresh for every line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleState {
    pub persistent: PersistentStyle,
    pub pending: PendingOneShot,
}

impl StyleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// See [`PendingOneShot::consume`].
    pub fn consume(&mut self, sized: bool) -> Consumed {
        self.pending.consume(sized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged() -> PendingOneShot {
        PendingOneShot {
            grow: Some(2.0),
            shrink: Some(1.0),
            basis: Some(4.0),
            order: 3,
            align_self: Align::Center,
            clickable: Some("btn".into()),
        }
    }

    #[test]
    fn defaults() {
        let state = StyleState::new();
        assert_eq!(state.persistent.fg, Rgba::WHITE);
        assert_eq!(state.persistent.bg, Rgba::BLACK);
        assert_eq!(state.persistent.font, Font::new("Sans"));
        assert_eq!(state.persistent.margin, Edges::ZERO);
        assert!(state.pending.is_empty());
    }

    #[test]
    fn sized_node_takes_everything() {
        let mut pending = staged();
        let consumed = pending.consume(true);
        assert_eq!(consumed.grow, Some(2.0));
        assert_eq!(consumed.shrink, Some(1.0));
        assert_eq!(consumed.basis, Some(4.0));
        assert_eq!(consumed.order, 3);
        assert_eq!(consumed.align_self, Align::Center);
        assert_eq!(consumed.clickable.as_deref(), Some("btn"));
        assert!(pending.is_empty());
    }

    #[test]
    fn second_node_sees_defaults() {
        let mut pending = staged();
        pending.consume(true);
        assert_eq!(pending.consume(true), Consumed::default());
    }

    #[test]
    fn unsized_node_takes_only_order() {
        let mut pending = staged();
        let consumed = pending.consume(false);
        assert_eq!(consumed.order, 3);
        assert_eq!(consumed.grow, None);
        assert_eq!(consumed.shrink, None);
        assert_eq!(consumed.clickable, None);
        assert_eq!(consumed.basis, Some(4.0));
        assert_eq!(consumed.align_self, Align::Center);

        assert_eq!(pending.order, 0);
        assert_eq!(pending.grow, Some(2.0));
        assert_eq!(pending.clickable.as_deref(), Some("btn"));
        assert_eq!(pending.basis, Some(4.0));
        assert_eq!(pending.align_self, Align::Center);
    }

    #[test]
    fn consume_leaves_persistent_fields_alone() {
        let mut state = StyleState::new();
        state.persistent.fg = Rgba::new(1.0, 0.0, 0.0, 1.0);
        state.pending.grow = Some(1.0);
        state.consume(true);
        state.consume(true);
        assert_eq!(state.persistent.fg, Rgba::new(1.0, 0.0, 0.0, 1.0));
    }
}
