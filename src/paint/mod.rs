//! Paint-ready output: actions, action lists and image handles.

pub mod action;
pub mod image;

pub use action::{Action, ActionKind, ActionList, LineStyle, Paint};
pub use self::image::{FileImages, ImageHandle, ImageLoader};
