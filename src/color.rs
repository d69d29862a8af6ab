//! RGBA colors resolved from CSS names or `#` hex literals.
//!
//! Hex literals accept exactly 3, 6 or 8 digits:
//! - `#rgb` expands each nibble (`x * 0x11`) and appends full alpha
//! - `#rrggbb` appends full alpha
//! - `#rrggbbaa` is taken literally, alpha included
//!
//! Everything else must be a bare CSS color name; names are resolved through
//! `csscolorparser`, functional forms like `rgb(...)` are rejected.

use crate::error::{Error, Result};

/// A color as four channels in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);

    /// Create a color from float channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit channels.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    /// Parse a color argument (`^fg{...}`, `^bg{...}`).
    pub fn parse(input: &str) -> Result<Rgba> {
        let invalid = || Error::InvalidColor { value: input.to_owned() };

        if let Some(hex) = input.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        if input.is_empty() || !input.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let named: csscolorparser::Color = input.parse().map_err(|_| invalid())?;
        let [r, g, b, a] = named.to_rgba8();
        Ok(Rgba::from_rgba8(r, g, b, a))
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Composite `self` over an opaque `below` (source-over, straight alpha).
    /// The result is always opaque.
    pub fn over(self, below: Rgba) -> Rgba {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |top: f32, bottom: f32| top * a + bottom * (1.0 - a);
        Rgba::new(mix(self.r, below.r), mix(self.g, below.g), mix(self.b, below.b), 1.0)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::BLACK
    }
}

/// Parse the digits after `#`.
fn parse_hex(hex: &str) -> Option<Rgba> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 0x11);

    match hex.len() {
        3 => Some(Rgba::from_rgba8(nibble(0)?, nibble(1)?, nibble(2)?, 0xff)),
        6 => Some(Rgba::from_rgba8(byte(0)?, byte(2)?, byte(4)?, 0xff)),
        8 => Some(Rgba::from_rgba8(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Hex ──────────────────────────────────────────────────────────

    #[test]
    fn short_hex_expands_nibbles() {
        assert_eq!(Rgba::parse("#abc").unwrap(), Rgba::parse("#aabbccff").unwrap());
    }

    #[test]
    fn six_digit_hex_is_opaque() {
        assert_eq!(Rgba::parse("#abcdef").unwrap(), Rgba::parse("#abcdefff").unwrap());
    }

    #[test]
    fn eight_digit_hex_keeps_alpha() {
        let c = Rgba::parse("#abcdef12").unwrap();
        assert_eq!(c.to_rgba8(), [0xab, 0xcd, 0xef, 0x12]);
    }

    #[test]
    fn primary_colors() {
        assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(Rgba::parse("#00ff00").unwrap(), Rgba::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(Rgba::parse("#f00").unwrap(), Rgba::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn other_hex_lengths_are_invalid() {
        for bad in ["#", "#a", "#ab", "#abcd", "#abcde", "#abcdef1", "#abcdef123"] {
            let err = Rgba::parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidColor { .. }), "{bad}");
        }
    }

    #[test]
    fn non_hex_digits_are_invalid() {
        assert!(Rgba::parse("#ggg").is_err());
        assert!(Rgba::parse("#12345z").is_err());
    }

    // ── Names ────────────────────────────────────────────────────────

    #[test]
    fn css_names() {
        assert_eq!(Rgba::parse("white").unwrap(), Rgba::WHITE);
        assert_eq!(Rgba::parse("black").unwrap(), Rgba::BLACK);
        assert_eq!(Rgba::parse("red").unwrap().to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(Rgba::parse("rebeccapurple").unwrap().to_rgba8(), [102, 51, 153, 255]);
    }

    #[test]
    fn unknown_names_and_functions_are_invalid() {
        assert!(Rgba::parse("notacolor").is_err());
        assert!(Rgba::parse("").is_err());
        assert!(Rgba::parse("rgb(1,2,3)").is_err());
    }

    // ── Compositing ──────────────────────────────────────────────────

    #[test]
    fn over_blends_by_alpha() {
        let half_white = Rgba::new(1.0, 1.0, 1.0, 0.5);
        let out = half_white.over(Rgba::BLACK);
        assert_eq!(out, Rgba::new(0.5, 0.5, 0.5, 1.0));
        assert_eq!(Rgba::TRANSPARENT.over(Rgba::WHITE), Rgba::WHITE);
    }
}
