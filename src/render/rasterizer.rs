//! Rasterizers: the consumer's painting collaborator.

use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{Error, Result};
use crate::geometry::Size;
use crate::paint::ActionList;

use super::cell::StyledCell;
use super::compositor::Canvas;
use super::driver::Driver;

/// Paints a complete action list. Called with the action-list lock held.
pub trait Rasterizer {
    fn paint(&mut self, actions: &ActionList, viewport: Size) -> Result<()>;
}

/// Canvas dimensions in cells for a viewport in layout units.
pub fn canvas_size(viewport: Size) -> (u16, u16) {
    let cells = |v: f32| v.round().clamp(0.0, f32::from(u16::MAX)) as u16;
    (cells(viewport.width), cells(viewport.height))
}

/// Paint `actions` onto a new canvas the size of `viewport`.
pub fn render(actions: &ActionList, viewport: Size) -> Canvas {
    let (width, height) = canvas_size(viewport);
    let mut canvas = Canvas::new(width, height);
    canvas.paint(actions);
    canvas
}

// ---------------------------------------------------------------------------
// TerminalRasterizer
// ---------------------------------------------------------------------------

/// Paints into the terminal, sending only the cells that changed since the
/// previous paint.
pub struct TerminalRasterizer {
    driver: Driver,
    previous: Option<Canvas>,
}

impl TerminalRasterizer {
    /// Take over the terminal.
    pub fn new() -> Result<Self> {
        let mut driver = Driver::new()?;
        driver.enter()?;
        Ok(Self { driver, previous: None })
    }

    /// Give the terminal back. Also done on drop.
    pub fn restore(&mut self) -> Result<()> {
        self.driver.leave()?;
        Ok(())
    }
}

impl Rasterizer for TerminalRasterizer {
    fn paint(&mut self, actions: &ActionList, viewport: Size) -> Result<()> {
        let canvas = render(actions, viewport);
        let updates = match &self.previous {
            Some(previous) if previous.width == canvas.width && previous.height == canvas.height => {
                canvas.diff(previous)
            }
            _ => canvas.all_cells(),
        };
        log::trace!("painting {} changed cells", updates.len());
        self.driver.apply_updates(&updates)?;
        self.driver.flush()?;
        self.previous = Some(canvas);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TextRasterizer
// ---------------------------------------------------------------------------

/// Writes each paint to a file as plain text, replacing the previous one.
#[derive(Debug, Clone)]
pub struct TextRasterizer {
    path: PathBuf,
    paints: usize,
}

impl TextRasterizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), paints: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How many times the file has been written.
    pub fn paints(&self) -> usize {
        self.paints
    }
}

impl Rasterizer for TextRasterizer {
    fn paint(&mut self, actions: &ActionList, viewport: Size) -> Result<()> {
        let mut text = render(actions, viewport).to_text();
        text.push('\n');
        std::fs::write(&self.path, text)?;
        self.paints += 1;
        log::debug!("wrote {} ({} actions)", self.path.display(), actions.len());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PngRasterizer
// ---------------------------------------------------------------------------

/// Pixel size of one cell in PNG output.
pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

/// File format for headless output, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Png,
}

impl OutputFormat {
    /// `.png` (any case) is an image; everything else is a text dump.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => OutputFormat::Png,
            _ => OutputFormat::Text,
        }
    }
}

/// Writes each paint to a PNG file, one `CELL_WIDTH` x `CELL_HEIGHT` block
/// per cell.
///
/// A cell block is filled with the cell's background. With no font
/// rasterizer, a visible character is drawn as a solid box in its foreground
/// color and a rule glyph as a horizontal bar across the block.
#[derive(Debug, Clone)]
pub struct PngRasterizer {
    path: PathBuf,
    paints: usize,
}

impl PngRasterizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), paints: 0 }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn paints(&self) -> usize {
        self.paints
    }
}

impl Rasterizer for PngRasterizer {
    fn paint(&mut self, actions: &ActionList, viewport: Size) -> Result<()> {
        let canvas = render(actions, viewport);
        to_image(&canvas)
            .save(&self.path)
            .map_err(|source| Error::Resource { path: self.path.clone(), source })?;
        self.paints += 1;
        log::debug!("wrote {} ({} actions)", self.path.display(), actions.len());
        Ok(())
    }
}

/// Rasterize a canvas into an RGBA image.
pub fn to_image(canvas: &Canvas) -> RgbaImage {
    let width = u32::from(canvas.width) * CELL_WIDTH;
    let height = u32::from(canvas.height) * CELL_HEIGHT;
    RgbaImage::from_fn(width, height, |px, py| {
        let (x, y) = (px / CELL_WIDTH, py / CELL_HEIGHT);
        let cell = u16::try_from(x)
            .ok()
            .zip(u16::try_from(y).ok())
            .and_then(|(x, y)| canvas.get_cell(x, y).copied())
            .unwrap_or_default();
        let ink = covers(&cell, px % CELL_WIDTH, py % CELL_HEIGHT);
        let color = if ink { cell.style.fg } else { cell.style.bg };
        image::Rgba(color.to_rgba8())
    })
}

/// Whether the glyph of `cell` covers pixel (`x`, `y`) of its block.
fn covers(cell: &StyledCell, x: u32, y: u32) -> bool {
    let middle = CELL_HEIGHT / 2;
    match cell.ch {
        ' ' => false,
        '\u{2500}' => y == middle,
        '\u{2501}' => y == middle || y + 1 == middle,
        _ => (1..CELL_WIDTH - 1).contains(&x) && (4..CELL_HEIGHT - 3).contains(&y),
    }
}
