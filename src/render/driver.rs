//! Crossterm terminal output backend.
//!
//! The `Driver` wraps a buffered stdout writer and provides methods for
//! entering/leaving the bar's terminal mode, applying cell updates from the
//! canvas, and controlling the cursor.

use std::io::{self, BufWriter, Stdout, Write};

use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::color::Rgba;

use super::cell::{CellStyle, CellUpdate};

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Terminal output backend using crossterm.
///
/// Wraps a `BufWriter<Stdout>` for batched writes. The driver does NOT
/// automatically enter the alternate screen on creation; call `enter`
/// explicitly.
pub struct Driver {
    writer: BufWriter<Stdout>,
    entered: bool,
}

impl Driver {
    /// Create a new driver wrapping stdout.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(io::stdout()),
            entered: false,
        })
    }

    /// Alternate screen, raw mode, hidden cursor, mouse and focus reporting.
    pub fn enter(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture,
            EnableFocusChange
        )?;
        terminal::enable_raw_mode()?;
        self.entered = true;
        Ok(())
    }

    /// Undo [`Driver::enter`]. Does nothing if it was never entered.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.writer,
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            LeaveAlternateScreen
        )?;
        Ok(())
    }

    /// Apply a batch of cell updates to the terminal.
    ///
    /// For each update, the cursor is moved to the cell's position, the style
    /// is applied, and the character is printed. Uses `queue!` for batching;
    /// call `flush()` afterward to send to the terminal.
    pub fn apply_updates(&mut self, updates: &[CellUpdate]) -> io::Result<()> {
        for update in updates {
            queue!(self.writer, cursor::MoveTo(update.x, update.y))?;
            self.apply_cell_style(&update.cell.style)?;
            queue!(self.writer, Print(update.cell.ch))?;
            queue!(self.writer, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        Ok(())
    }

    /// Flush the internal write buffer to the terminal.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Get the terminal size (columns, rows) via crossterm.
    pub fn terminal_size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Queue crossterm style commands for a given `CellStyle`.
    fn apply_cell_style(&mut self, style: &CellStyle) -> io::Result<()> {
        queue!(
            self.writer,
            SetForegroundColor(to_color(style.fg)),
            SetBackgroundColor(to_color(style.bg))
        )?;
        if style.bold {
            queue!(self.writer, SetAttribute(Attribute::Bold))?;
        }
        Ok(())
    }
}

impl Drop for Driver {
    fn drop(&mut self) {
        if let Err(err) = self.leave() {
            log::warn!("failed to restore the terminal: {err}");
        }
    }
}

// ---------------------------------------------------------------------------
// Color conversion
// ---------------------------------------------------------------------------

/// Convert an [`Rgba`] to a 24-bit crossterm `Color`. Alpha is dropped;
/// canvas colors are already composited.
pub fn to_color(color: Rgba) -> Color {
    let [r, g, b, _] = color.to_rgba8();
    Color::Rgb { r, g, b }
}

// ===========================================================================
// Tests
// ===========================================================================
