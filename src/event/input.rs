//! Windowing event types wrapping crossterm for decoupling.
//!
//! Defines [`WindowEvent`], [`KeyEvent`], [`ButtonPress`] and [`Modifiers`].
//! Crossterm events are converted by [`from_crossterm`] so the pipeline
//! never depends on crossterm directly.

use std::fmt;
use std::ops::{BitAnd, BitOr};

use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use crate::error::Result;

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key, decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    F(u8),
    Other,
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier and button-state bitmask, laid out like the X11 state mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u16);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1 << 0);
    pub const LOCK: Modifiers = Modifiers(1 << 1);
    pub const CTRL: Modifiers = Modifiers(1 << 2);
    pub const ALT: Modifiers = Modifiers(1 << 3);
    pub const MOD2: Modifiers = Modifiers(1 << 4);
    pub const MOD3: Modifiers = Modifiers(1 << 5);
    pub const MOD4: Modifiers = Modifiers(1 << 6);
    pub const MOD5: Modifiers = Modifiers(1 << 7);
    pub const BUTTON1: Modifiers = Modifiers(1 << 8);
    pub const BUTTON2: Modifiers = Modifiers(1 << 9);
    pub const BUTTON3: Modifiers = Modifiers(1 << 10);
    pub const BUTTON4: Modifiers = Modifiers(1 << 11);
    pub const BUTTON5: Modifiers = Modifiers(1 << 12);

    const NAMES: [&'static str; 13] = [
        "Shift", "Lock", "Ctrl", "Alt", "Mod2", "Mod3", "Mod4", "Mod5", "Button1", "Button2",
        "Button3", "Button4", "Button5",
    ];

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Names of the set bits, lowest bit first.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        Self::NAMES
            .into_iter()
            .enumerate()
            .filter(move |&(bit, _)| self.0 & (1 << bit) != 0)
            .map(|(_, name)| name)
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

impl fmt::Display for Modifiers {
    /// Space-separated names, e.g. `Shift Ctrl`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(name)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// KeyEvent / ButtonPress
// ---------------------------------------------------------------------------

/// A keyboard event with key and modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// `q` or Ctrl+C.
    pub fn is_quit(&self) -> bool {
        match self.code {
            Key::Char('q') => !self.modifiers.contains(Modifiers::CTRL),
            Key::Char('c') => self.modifiers.contains(Modifiers::CTRL),
            _ => false,
        }
    }
}

/// A pointer button press at a position in layout units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonPress {
    pub x: f32,
    pub y: f32,
    /// 1 left, 2 middle, 3 right, 4/5 scroll up/down.
    pub button: u8,
    pub modifiers: Modifiers,
}

// ---------------------------------------------------------------------------
// WindowEvent
// ---------------------------------------------------------------------------

/// Events from the windowing collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowEvent {
    Resize { width: f32, height: f32 },
    Button(ButtonPress),
    Key(KeyEvent),
    /// Part of the window needs repainting; `count` more exposures follow.
    Expose { count: u32 },
}

/// Blocking source of windowing events.
pub trait EventSource: Send {
    /// Wait for the next event. `Ok(None)` means the source is closed.
    fn next_event(&mut self) -> Result<Option<WindowEvent>>;
}

// ---------------------------------------------------------------------------
// Crossterm conversion
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    if m.contains(KeyModifiers::SUPER) {
        out = out | Modifiers::MOD4;
    }
    out
}

fn convert_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::F(n) => Key::F(n),
        _ => Key::Other,
    }
}

fn convert_button(kind: MouseEventKind) -> Option<u8> {
    match kind {
        MouseEventKind::Down(MouseButton::Left) => Some(1),
        MouseEventKind::Down(MouseButton::Middle) => Some(2),
        MouseEventKind::Down(MouseButton::Right) => Some(3),
        MouseEventKind::ScrollUp => Some(4),
        MouseEventKind::ScrollDown => Some(5),
        _ => None,
    }
}

/// Convert a crossterm `Event` into a `WindowEvent`.
///
/// `height` overrides the terminal's row count in resize events, since the
/// bar occupies a fixed number of rows. Clicks land on the center of their
/// cell. Returns `None` for events the bar does not handle.
pub fn from_crossterm(event: Event, height: Option<u16>) -> Option<WindowEvent> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => Some(WindowEvent::Key(
            KeyEvent::new(convert_key(key.code), convert_modifiers(key.modifiers)),
        )),
        Event::Mouse(mouse) => {
            let button = convert_button(mouse.kind)?;
            Some(WindowEvent::Button(ButtonPress {
                x: f32::from(mouse.column) + 0.5,
                y: f32::from(mouse.row) + 0.5,
                button,
                modifiers: convert_modifiers(mouse.modifiers),
            }))
        }
        Event::Resize(width, rows) => Some(WindowEvent::Resize {
            width: f32::from(width),
            height: f32::from(height.unwrap_or(rows)),
        }),
        Event::FocusGained => Some(WindowEvent::Expose { count: 0 }),
        _ => None,
    }
}

/// Terminal events read with `crossterm::event::read`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrosstermEvents {
    height: Option<u16>,
}

impl CrosstermEvents {
    pub fn new(height: Option<u16>) -> Self {
        Self { height }
    }
}

impl EventSource for CrosstermEvents {
    fn next_event(&mut self) -> Result<Option<WindowEvent>> {
        loop {
            let event = crossterm::event::read()?;
            if let Some(converted) = from_crossterm(event.clone(), self.height) {
                return Ok(Some(converted));
            }
            log::trace!("ignored terminal event {event:?}");
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================
