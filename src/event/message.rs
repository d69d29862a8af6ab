//! Pipeline messages and the mapping from windowing events.
//!
//! Every role of the pipeline talks to the consumer through [`Message`]s on
//! one ordered channel. [`translate`] maps a [`WindowEvent`] onto at most
//! one message, dropping redundant expose notifications.

use crate::error::Error;
use crate::geometry::Size;

use super::input::{ButtonPress, KeyEvent, WindowEvent};

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Tagged message carried on the consumer's queue.
#[derive(Debug)]
pub enum Message {
    /// The token buffer holds a new line.
    OpsReady,
    /// The viewport changed.
    Resize(Size),
    ButtonPress(ButtonPress),
    /// Paint the current action list.
    Repaint,
    KeyPress(KeyEvent),
    /// The line source reached end of input.
    InputClosed,
    /// A producer hit a fatal error.
    Abort(Error),
    /// Stop the consumer.
    Exit,
}

impl Message {
    /// Human-readable name for this message, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Message::OpsReady => "OpsReady",
            Message::Resize(_) => "Resize",
            Message::ButtonPress(_) => "ButtonPress",
            Message::Repaint => "Repaint",
            Message::KeyPress(_) => "KeyPress",
            Message::InputClosed => "InputClosed",
            Message::Abort(_) => "Abort",
            Message::Exit => "Exit",
        }
    }
}

/// Map a windowing event onto a message.
///
/// Returns `None` for an expose that more exposures will follow: only the
/// last of a burst triggers a repaint.
pub fn translate(event: WindowEvent) -> Option<Message> {
    match event {
        WindowEvent::Resize { width, height } => Some(Message::Resize(Size::new(width, height))),
        WindowEvent::Button(press) => Some(Message::ButtonPress(press)),
        WindowEvent::Key(key) => Some(Message::KeyPress(key)),
        WindowEvent::Expose { count: 0 } => Some(Message::Repaint),
        WindowEvent::Expose { .. } => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================
