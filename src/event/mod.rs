//! Event system: windowing events, pipeline messages.

pub mod input;
pub mod message;

pub use input::{
    from_crossterm, ButtonPress, CrosstermEvents, EventSource, Key, KeyEvent, Modifiers,
    WindowEvent,
};
pub use message::{translate, Message};
