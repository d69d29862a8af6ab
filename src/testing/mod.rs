//! Headless testing framework: Pilot, snapshot helpers.
//!
//! Use the [`Pilot`] to drive a consumer without a terminal. Use
//! [`render_line`] and [`describe_actions`] to capture one line's output as
//! plain text for snapshot-style assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::{Pilot, Recorder};
pub use snapshot::{describe_actions, line_to_actions, render_line};
