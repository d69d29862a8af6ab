//! Canvas: paints an action list onto a grid of terminal cells.
//!
//! The `Canvas` maintains a 2D grid of `StyledCell`s representing the bar.
//! [`Canvas::paint`] draws every action in list order over a backdrop; the
//! `diff` method compares two canvases and produces only the `CellUpdate`s
//! needed to transition between them.

use std::ops::Range;

use crate::color::Rgba;
use crate::geometry::Frame;
use crate::markup::Ellipsize;
use crate::paint::{Action, ActionList, Paint};

use super::cell::{CellStyle, CellUpdate, StyledCell};

/// Color behind everything, visible wherever no leaf is painted.
pub const BACKDROP: Rgba = Rgba::new(0.2, 0.3, 0.4, 1.0);

const ELLIPSIS: char = '…';
const RULE_THIN: char = '─';
const RULE_THICK: char = '━';

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A painted bar, one layout unit per cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    /// The 2D cell buffer. `cells[y][x]` is the cell at column x, row y.
    cells: Vec<Vec<StyledCell>>,
    pub width: u16,
    pub height: u16,
}

impl Canvas {
    /// Create a canvas filled with the backdrop.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![vec![StyledCell::blank(BACKDROP); width as usize]; height as usize],
            width,
            height,
        }
    }

    /// Paint `actions` in list order onto a fresh backdrop.
    pub fn paint(&mut self, actions: &ActionList) {
        self.fill(BACKDROP);
        for action in actions {
            self.paint_action(action);
        }
    }

    fn paint_action(&mut self, action: &Action) {
        let (columns, rows) = self.cells_of(action.frame);
        for y in rows {
            for x in columns.clone() {
                if let Some(cell) = self.cell_mut(x, y) {
                    *cell = StyledCell::blank(action.background.over(cell.style.bg));
                }
            }
        }

        let content = action.content_frame();
        match &action.paint {
            Paint::Text { fg, ellipsize, .. } => {
                let text = action.paint.display_text().unwrap_or_default();
                self.paint_text(content, &text, *fg, *ellipsize, action.paint.is_bold());
            }
            Paint::Rule { fg, line } => {
                let ch = if line.width > 1.0 { RULE_THICK } else { RULE_THIN };
                self.paint_rule(content, ch, *fg);
            }
            Paint::Image { image } => {
                let (columns, rows) = self.cells_of(content);
                let (x0, y0) = (columns.start, rows.start);
                for y in rows {
                    for x in columns.clone() {
                        let Some(pixel) = image.pixel(u32::from(x - x0), u32::from(y - y0)) else {
                            continue;
                        };
                        if let Some(cell) = self.cell_mut(x, y) {
                            *cell = StyledCell::blank(pixel.over(cell.style.bg));
                        }
                    }
                }
            }
        }
    }

    /// Text on the top row of the content box, elided to fit its width.
    fn paint_text(&mut self, content: Frame, text: &str, fg: Rgba, mode: Ellipsize, bold: bool) {
        let (columns, rows) = self.cells_of(content);
        if rows.is_empty() {
            return;
        }
        let y = rows.start;
        let fitted = ellipsize(text, columns.len(), mode);
        for (x, ch) in columns.zip(fitted.chars()) {
            if let Some(cell) = self.cell_mut(x, y) {
                let bg = cell.style.bg;
                *cell = StyledCell::new(ch, CellStyle { fg: fg.over(bg), bg, bold });
            }
        }
    }

    /// A horizontal line across the vertical middle of the content box.
    fn paint_rule(&mut self, content: Frame, ch: char, fg: Rgba) {
        let (columns, rows) = self.cells_of(content);
        if rows.is_empty() {
            return;
        }
        let middle = (content.y + content.height / 2.0).floor().max(0.0) as u16;
        let y = middle.clamp(rows.start, rows.end - 1);
        for x in columns {
            if let Some(cell) = self.cell_mut(x, y) {
                let bg = cell.style.bg;
                *cell = StyledCell::new(ch, CellStyle { fg: fg.over(bg), bg, bold: false });
            }
        }
    }

    /// Columns and rows covered by a frame, clipped to the canvas.
    fn cells_of(&self, frame: Frame) -> (Range<u16>, Range<u16>) {
        (
            span(frame.x, frame.right(), self.width),
            span(frame.y, frame.bottom(), self.height),
        )
    }

    fn cell_mut(&mut self, x: u16, y: u16) -> Option<&mut StyledCell> {
        self.cells
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
    }

    /// Get a reference to the cell at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_cell(&self, x: u16, y: u16) -> Option<&StyledCell> {
        self.cells
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
    }

    /// Fill the entire canvas with blank cells on `bg`.
    pub fn fill(&mut self, bg: Rgba) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                *cell = StyledCell::blank(bg);
            }
        }
    }

    /// Compare this canvas against a previous one and return only the changed
    /// cells.
    pub fn diff(&self, previous: &Canvas) -> Vec<CellUpdate> {
        let mut updates = Vec::new();
        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let unchanged = previous
                    .cells
                    .get(y)
                    .and_then(|prev| prev.get(x))
                    .is_some_and(|prev| prev == cell);
                if !unchanged {
                    updates.push(CellUpdate { x: x as u16, y: y as u16, cell: *cell });
                }
            }
        }
        updates
    }

    /// Every cell as an update, for a first full draw.
    pub fn all_cells(&self) -> Vec<CellUpdate> {
        self.diff(&Canvas::new(0, 0))
    }

    /// The characters of each row, right-trimmed, one row per line.
    pub fn to_text(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row.iter().map(|cell| cell.ch).collect();
                line.trim_end().to_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Cell indices covered by `[start, end)` in layout units, clipped to `limit`.
fn span(start: f32, end: f32, limit: u16) -> Range<u16> {
    let clamp = |v: f32| v.round().clamp(0.0, f32::from(limit)) as u16;
    let (start, end) = (clamp(start), clamp(end));
    start..end.max(start)
}

/// Fit `text` into `width` characters, eliding per `mode`. `Ellipsize::None`
/// clips at the end without a marker.
pub fn ellipsize(text: &str, width: usize, mode: Ellipsize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_owned();
    }
    if width == 0 {
        return String::new();
    }
    let keep = width - 1;
    match mode {
        Ellipsize::None => chars[..width].iter().collect(),
        Ellipsize::End => chars[..keep].iter().chain([ELLIPSIS].iter()).collect(),
        Ellipsize::Start => [ELLIPSIS].iter().chain(&chars[chars.len() - keep..]).collect(),
        Ellipsize::Middle => {
            let head = keep.div_ceil(2);
            let tail = keep - head;
            chars[..head]
                .iter()
                .chain([ELLIPSIS].iter())
                .chain(&chars[chars.len() - tail..])
                .collect()
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
