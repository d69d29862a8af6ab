//! Cell: one character of the terminal grid with its colors.

use crate::color::Rgba;

// ---------------------------------------------------------------------------
// CellStyle
// ---------------------------------------------------------------------------

/// Visual style for a single terminal cell. Colors are opaque once painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellStyle {
    pub fg: Rgba,
    pub bg: Rgba,
    pub bold: bool,
}

impl CellStyle {
    /// A plain cell style on the given background.
    pub fn on(bg: Rgba) -> Self {
        Self { fg: Rgba::WHITE, bg, bold: false }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::on(Rgba::BLACK)
    }
}

// ---------------------------------------------------------------------------
// StyledCell
// ---------------------------------------------------------------------------

/// A single terminal cell: one character with associated style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyledCell {
    pub ch: char,
    pub style: CellStyle,
}

impl StyledCell {
    pub fn new(ch: char, style: CellStyle) -> Self {
        Self { ch, style }
    }

    /// A blank (space) cell on the given background.
    pub fn blank(bg: Rgba) -> Self {
        Self { ch: ' ', style: CellStyle::on(bg) }
    }
}

impl Default for StyledCell {
    fn default() -> Self {
        Self::blank(Rgba::BLACK)
    }
}

// ---------------------------------------------------------------------------
// CellUpdate
// ---------------------------------------------------------------------------

/// A single cell that changed between frames.
///
/// Used by the driver to emit minimal terminal escape sequences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellUpdate {
    pub x: u16,
    pub y: u16,
    pub cell: StyledCell,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cell() {
        let cell = StyledCell::blank(Rgba::TRANSPARENT);
        assert_eq!(cell.ch, ' ');
        assert_eq!(cell.style.bg, Rgba::TRANSPARENT);
        assert!(!cell.style.bold);
    }

    #[test]
    fn default_is_white_on_black() {
        let style = CellStyle::default();
        assert_eq!(style.fg, Rgba::WHITE);
        assert_eq!(style.bg, Rgba::BLACK);
    }
}
