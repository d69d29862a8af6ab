//! Core geometry types: Size, Frame, Edges.
//!
//! Layout works in abstract units. The terminal backend maps one unit to one
//! cell; the headless text backend does the same. Frames produced by the
//! layout solver are absolute (relative to the viewport origin), contain the
//! node's padding and exclude its margin.

use std::ops::Add;

// ---------------------------------------------------------------------------
// Size
// ---------------------------------------------------------------------------

/// A 2D size (width x height).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// A zero-sized size.
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Grow this size by the horizontal and vertical sums of `edges`.
    #[inline]
    pub fn inflate(self, edges: Edges) -> Size {
        Size {
            width: self.width + edges.horizontal(),
            height: self.height + edges.vertical(),
        }
    }

    /// Whether both dimensions are finite (a defined, "sized" extent).
    #[inline]
    pub fn is_definite(self) -> bool {
        self.width.is_finite() && self.height.is_finite()
    }
}

impl Add for Size {
    type Output = Size;
    #[inline]
    fn add(self, rhs: Size) -> Size {
        Size { width: self.width + rhs.width, height: self.height + rhs.height }
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// A positioned rectangle: the solved geometry of one layout node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    /// Create a new frame.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// The right edge: `x + width`.
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge: `y + height`.
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside this frame. All four edges are inclusive,
    /// so a click on the boundary shared by two frames hits both.
    #[inline]
    pub fn contains(self, x: f32, y: f32) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// The frame with `edges` removed from each side (e.g. the content box
    /// inside the padding). Never produces a negative size.
    #[inline]
    pub fn shrink(self, edges: Edges) -> Frame {
        Frame {
            x: self.x + edges.left,
            y: self.y + edges.top,
            width: (self.width - edges.horizontal()).max(0.0),
            height: (self.height - edges.vertical()).max(0.0),
        }
    }

    /// Translate the frame by `(dx, dy)`.
    #[inline]
    pub fn translate(self, dx: f32, dy: f32) -> Frame {
        Frame { x: self.x + dx, y: self.y + dy, ..self }
    }
}

// ---------------------------------------------------------------------------
// Edges
// ---------------------------------------------------------------------------

/// Four-sided spacing (margin or padding).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    /// No spacing on any side.
    pub const ZERO: Edges = Edges { top: 0.0, right: 0.0, bottom: 0.0, left: 0.0 };

    /// Create edges from explicit sides (CSS order: top, right, bottom, left).
    #[inline]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// The same value on every side.
    #[inline]
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Build edges from a CSS-style shorthand of 1 to 4 values.
    ///
    /// - 1 value: all sides
    /// - 2 values: vertical, horizontal
    /// - 3 values: top, horizontal, bottom
    /// - 4 values: top, right, bottom, left
    ///
    /// Returns `None` for any other count.
    pub fn from_shorthand(values: &[f32]) -> Option<Self> {
        match *values {
            [all] => Some(Self::all(all)),
            [vertical, horizontal] => Some(Self::new(vertical, horizontal, vertical, horizontal)),
            [top, horizontal, bottom] => Some(Self::new(top, horizontal, bottom, horizontal)),
            [top, right, bottom, left] => Some(Self::new(top, right, bottom, left)),
            _ => None,
        }
    }

    /// Left + right.
    #[inline]
    pub fn horizontal(self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom.
    #[inline]
    pub fn vertical(self) -> f32 {
        self.top + self.bottom
    }
}

// ===========================================================================
// Tests
// ===========================================================================
