//! Rendering: cell canvas, rasterizers, crossterm driver.

pub mod cell;
pub mod compositor;
pub mod driver;
pub mod rasterizer;

pub use cell::{CellStyle, CellUpdate, StyledCell};
pub use compositor::{ellipsize, Canvas, BACKDROP};
pub use driver::Driver;
pub use rasterizer::{
    render, to_image, OutputFormat, PngRasterizer, Rasterizer, TerminalRasterizer, TextRasterizer,
};
