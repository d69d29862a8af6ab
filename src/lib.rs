//! # flexbar
//!
//! A status bar driven by a small flexbox markup language read line by line.
//!
//! Each input line describes the whole bar: text, rules and images laid out
//! with flexbox properties, styled with colors and fonts, and optionally
//! marked as clickable areas. flexbar tokenizes the line, evaluates it into a
//! layout tree, solves the layout with [taffy](https://crates.io/crates/taffy),
//! flattens the result into drawing actions and paints them. Clicks on
//! clickable areas are reported by name.
//!
//! ## Core Systems
//!
//! - **[`markup`]**: Tokenizer, command table and keyword arguments
//! - **[`eval`]**: Style-state machine turning tokens into a layout tree
//! - **[`tree`]**: Slotmap-backed layout node arena
//! - **[`layout`]**: Taffy-powered flexbox solving into absolute frames
//! - **[`paint`]**: Action list, hit testing, image decoding
//! - **[`render`]**: Cell compositor, crossterm driver, rasterizers
//! - **[`event`]**: Windowing events and pipeline messages
//! - **[`pipeline`]**: Line producer, event producer and the single consumer
//! - **[`app`]**: Terminal and headless run modes
//! - **[`testing`]**: Headless pilot and snapshot helpers

// Foundation
pub mod color;
pub mod error;
pub mod geometry;
pub mod shape;

// Markup and layout
pub mod eval;
pub mod layout;
pub mod markup;
pub mod tree;

// Painting
pub mod paint;
pub mod render;

// Events and the pipeline
pub mod event;
pub mod pipeline;

// Application
pub mod app;
pub mod cli;
pub mod config;
pub mod logging;

// Test harness
pub mod testing;

pub use error::{Error, ErrorPolicy, Result};
