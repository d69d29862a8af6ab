//! Layout node tree: the evaluator's output and the layout solver's input.

pub mod arena;
pub mod node;

pub use arena::LayoutTree;
pub use node::{ContainerStyle, FlexItem, LayoutNode, Leaf, NodeId, NodeKind};
