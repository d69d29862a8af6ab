//! Layout solving: node tree -> absolute frame per node.

pub mod engine;
pub mod resolve;

use slotmap::SecondaryMap;

use crate::error::Result;
use crate::geometry::{Frame, Size};
use crate::tree::{LayoutTree, NodeId};

pub use engine::TaffySolver;

/// Layout-solving collaborator.
pub trait LayoutSolver {
    /// Assign every node of `tree` an absolute frame inside `viewport`.
    fn solve(&mut self, tree: &LayoutTree, viewport: Size) -> Result<Frames>;
}

/// Solved frames, keyed by node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frames {
    frames: SecondaryMap<NodeId, Frame>,
}

impl Frames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: NodeId, frame: Frame) {
        self.frames.insert(id, frame);
    }

    /// The frame of `id`, if the solver reached it.
    pub fn get(&self, id: NodeId) -> Option<Frame> {
        self.frames.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
