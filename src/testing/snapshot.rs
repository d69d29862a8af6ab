//! Snapshot rendering helpers.
//!
//! Functions that run one markup line through the whole stack and return
//! something printable, for snapshot tests and assertions.

use std::fmt::Write as _;

use crate::error::Result;
use crate::eval::evaluate;
use crate::geometry::Size;
use crate::layout::{LayoutSolver, TaffySolver};
use crate::markup::tokenize;
use crate::paint::{ActionKind, ActionList, ImageLoader};
use crate::render::render;
use crate::shape::CellShaper;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Tokenize, evaluate, solve and flatten `line` for a `width` x `height` bar.
///
/// Text is measured in cells and images come from `images`.
pub fn line_to_actions(
    line: &str,
    width: u16,
    height: u16,
    images: &dyn ImageLoader,
) -> Result<ActionList> {
    let viewport = Size::new(f32::from(width), f32::from(height));
    let tokens = tokenize(line)?;
    let tree = evaluate(&tokens, viewport, &CellShaper, images)?;
    let frames = TaffySolver::new().solve(&tree, viewport)?;
    Ok(ActionList::flatten(&tree, &frames))
}

/// Render `line` to plain text, one row per line, trailing spaces trimmed.
///
/// # Examples
///
/// ```
/// use flexbar::paint::FileImages;
/// use flexbar::testing::render_line;
///
/// let text = render_line("^ca{clock}12:00", 20, 1, &FileImages).unwrap();
/// assert_eq!(text, "12:00");
/// ```
pub fn render_line(line: &str, width: u16, height: u16, images: &dyn ImageLoader) -> Result<String> {
    let actions = line_to_actions(line, width, height, images)?;
    let viewport = Size::new(f32::from(width), f32::from(height));
    Ok(render(&actions, viewport).to_text())
}

/// One line per action: kind, frame, clickable area and text.
///
/// ```text
/// text  0,0 1x1 [a] "A"
/// rule  1,0 11x1
/// ```
pub fn describe_actions(actions: &ActionList) -> String {
    let mut out = String::new();
    for action in actions {
        let kind = match action.kind() {
            ActionKind::Text => "text",
            ActionKind::Rule => "rule",
            ActionKind::Image => "image",
        };
        let f = action.frame;
        let _ = write!(out, "{kind:<5} {},{} {}x{}", f.x, f.y, f.width, f.height);
        if let Some(name) = &action.clickable {
            let _ = write!(out, " [{name}]");
        }
        if let Some(text) = action.paint.display_text() {
            let _ = write!(out, " {text:?}");
        }
        out.push('\n');
    }
    out
}
