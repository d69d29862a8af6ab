//! Text-shaping collaborator.
//!
//! The evaluator needs the intrinsic size of every text leaf before layout.
//! [`TextShaper`] is the seam; [`CellShaper`] is the terminal implementation
//! where one character occupies one cell and a line is one cell tall.

use crate::geometry::Size;

/// A font description such as `Sans`, `Monospace Bold 10`.
///
/// The description is carried through to the rasterizer untouched; shapers
/// interpret as much of it as they can.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Font(pub String);

impl Font {
    pub fn new(description: impl Into<String>) -> Self {
        Self(description.into())
    }

    /// The raw description.
    pub fn description(&self) -> &str {
        &self.0
    }

    /// Whether the description names a bold weight.
    pub fn is_bold(&self) -> bool {
        self.0
            .split_whitespace()
            .any(|word| word.eq_ignore_ascii_case("bold"))
    }
}

impl Default for Font {
    fn default() -> Self {
        Font::new("Sans")
    }
}

/// Measures text for layout.
pub trait TextShaper {
    /// Intrinsic width and height of `text` set in `font`. `text` is plain
    /// (markup already reduced).
    fn measure(&self, font: &Font, text: &str) -> Size;
}

/// Shapes text on a character-cell grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellShaper;

impl TextShaper for CellShaper {
    fn measure(&self, _font: &Font, text: &str) -> Size {
        Size::new(text.chars().count() as f32, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_count_characters() {
        let shaper = CellShaper;
        assert_eq!(shaper.measure(&Font::default(), "hello"), Size::new(5.0, 1.0));
        assert_eq!(shaper.measure(&Font::default(), "héllo ✓"), Size::new(7.0, 1.0));
        assert_eq!(shaper.measure(&Font::default(), ""), Size::new(0.0, 1.0));
    }

    #[test]
    fn bold_fonts() {
        assert!(Font::new("Sans Bold 10").is_bold());
        assert!(Font::new("monospace bold").is_bold());
        assert!(!Font::new("Bolder Sans").is_bold());
        assert!(!Font::default().is_bold());
    }
}
