//! Style-state evaluator: token stream -> layout node tree.
//!
//! The evaluator walks the tokens of one line with a fresh [`StyleState`]
//! and an explicit stack of open containers. Style commands update the
//! state, layout commands update the container on top of the stack, and
//! content (plain text, `^text`, `^markup`, `^rule`, `^img`) creates a leaf
//! whose intrinsic size is measured on the spot.

pub mod state;

use std::path::Path;

pub use state::{Consumed, PendingOneShot, PersistentStyle, StyleState};

use crate::color::Rgba;
use crate::error::{Brace, Error, NumberProblem, Result};
use crate::geometry::{Edges, Size};
use crate::markup::command::{parse_integer, parse_number, parse_numbers};
use crate::markup::text::plain_text;
use crate::markup::{
    Align, CommandKind, Direction, Ellipsize, Justify, LineCap, LineJoin, Token, Wrap,
};
use crate::paint::{ImageLoader, Paint};
use crate::shape::TextShaper;
use crate::tree::{ContainerStyle, FlexItem, LayoutNode, LayoutTree, NodeId};

/// Grow factor of a rule when no grow is staged.
pub const RULE_GROW: f32 = 10.0;

/// Text whose height gives the side of a rule.
const RULE_PROBE: &str = "M";

/// Evaluate `tokens` into a layout tree for `viewport`.
pub fn evaluate(
    tokens: &[Token],
    viewport: Size,
    shaper: &dyn TextShaper,
    images: &dyn ImageLoader,
) -> Result<LayoutTree> {
    Evaluator::new(shaper, images).evaluate(tokens, viewport)
}

/// Turns token streams into layout trees using the given collaborators.
pub struct Evaluator<'a> {
    shaper: &'a dyn TextShaper,
    images: &'a dyn ImageLoader,
}

impl<'a> Evaluator<'a> {
    pub fn new(shaper: &'a dyn TextShaper, images: &'a dyn ImageLoader) -> Self {
        Self { shaper, images }
    }

    /// Evaluate one line.
    ///
    /// # Errors
    ///
    /// Any argument error of a command, [`Error::UnknownCommand`],
    /// [`Error::InvalidCombination`] for a clickable rule, or
    /// [`Error::UnbalancedBrace`] when braces do not pair up.
    pub fn evaluate(&self, tokens: &[Token], viewport: Size) -> Result<LayoutTree> {
        let mut build = Build::new(viewport);
        for token in tokens {
            match token {
                Token::Open => build.open()?,
                Token::Close => build.close()?,
                Token::Text { content } => {
                    let paint = build.text(content.clone(), false);
                    let size = self.measure_text(&build.state, content);
                    build.leaf(paint, size, 0.0)?;
                }
                Token::Command { name, arg } => {
                    let kind = CommandKind::from_name(name)?;
                    self.command(&mut build, kind, arg)?;
                }
            }
        }
        build.finish()
    }

    fn command(&self, build: &mut Build, kind: CommandKind, arg: &str) -> Result<()> {
        let state = &mut build.state;
        match kind {
            CommandKind::Bg => state.persistent.bg = Rgba::parse(arg)?,
            CommandKind::Fg => state.persistent.fg = Rgba::parse(arg)?,
            CommandKind::Font => state.persistent.font = crate::shape::Font::new(arg),
            CommandKind::Ellipsize => state.persistent.ellipsize = Ellipsize::parse(arg)?,
            CommandKind::Margin => state.persistent.margin = parse_edges(kind, arg)?,
            CommandKind::Padding => state.persistent.padding = parse_edges(kind, arg)?,
            CommandKind::LineCap => state.persistent.line.cap = LineCap::parse(arg)?,
            CommandKind::LineJoin => state.persistent.line.join = LineJoin::parse(arg)?,
            CommandKind::LineOffset => state.persistent.line.offset = non_negative(kind, arg)?,
            CommandKind::LineWidth => state.persistent.line.width = non_negative(kind, arg)?,
            CommandKind::MiterLimit => state.persistent.line.miter_limit = non_negative(kind, arg)?,

            CommandKind::Dir => build.container()?.direction = Direction::parse(arg)?,
            CommandKind::Wrap => build.container()?.wrap = Wrap::parse(arg)?,
            CommandKind::JustifyContent => build.container()?.justify = Justify::parse(arg)?,
            CommandKind::AlignItems => build.container()?.align_items = Align::parse(arg)?,

            CommandKind::Ca => state.pending.clickable = Some(arg.to_owned()),
            CommandKind::AlignSelf => state.pending.align_self = Align::parse(arg)?,
            CommandKind::Grow => state.pending.grow = Some(non_negative(kind, arg)?),
            CommandKind::Shrink => state.pending.shrink = Some(non_negative(kind, arg)?),
            CommandKind::Basis => state.pending.basis = Some(non_negative(kind, arg)?),
            CommandKind::Order => state.pending.order = parse_integer(kind, arg, 0, i32::MAX)?,

            CommandKind::Text => {
                let paint = build.text(arg.to_owned(), false);
                let size = self.measure_text(&build.state, arg);
                build.leaf(paint, size, 0.0)?;
            }
            CommandKind::Markup => {
                let paint = build.text(arg.to_owned(), true);
                let size = self.measure_text(&build.state, &plain_text(arg));
                build.leaf(paint, size, 0.0)?;
            }
            CommandKind::Rule => {
                if build.state.pending.clickable.is_some() {
                    return Err(Error::InvalidCombination("^rule{} is a non-clickable area"));
                }
                let persistent = &build.state.persistent;
                let side = self.shaper.measure(&persistent.font, RULE_PROBE).height;
                let paint = Paint::Rule { fg: persistent.fg, line: persistent.line };
                let size = Size::new(side, side).inflate(persistent.padding);
                build.leaf(paint, size, RULE_GROW)?;
            }
            CommandKind::Img => {
                let image = self.images.load(Path::new(arg))?;
                let size = image.size().inflate(build.state.persistent.padding);
                build.leaf(Paint::Image { image }, size, 0.0)?;
            }
        }
        Ok(())
    }

    fn measure_text(&self, state: &StyleState, plain: &str) -> Size {
        self.shaper
            .measure(&state.persistent.font, plain)
            .inflate(state.persistent.padding)
    }
}

// ---------------------------------------------------------------------------
// Build: the tree under construction and its container stack
// ---------------------------------------------------------------------------

struct Build {
    tree: LayoutTree,
    stack: Vec<NodeId>,
    state: StyleState,
}

impl Build {
    fn new(viewport: Size) -> Self {
        let tree = LayoutTree::new(LayoutNode::container(
            ContainerStyle::ROOT,
            FlexItem::sized(viewport),
        ));
        let stack = vec![tree.root()];
        Self { tree, stack, state: StyleState::new() }
    }

    fn current(&self) -> NodeId {
        self.stack.last().copied().unwrap_or_else(|| self.tree.root())
    }

    fn container(&mut self) -> Result<&mut ContainerStyle> {
        let current = self.current();
        self.tree
            .container_mut(current)
            .ok_or(Error::InvalidCombination("layout command outside a container"))
    }

    fn text(&self, text: String, markup: bool) -> Paint {
        let persistent = &self.state.persistent;
        Paint::Text {
            fg: persistent.fg,
            font: persistent.font.clone(),
            text,
            markup,
            ellipsize: persistent.ellipsize,
        }
    }

    /// Flex properties for a new node of `size`: consumes the staged one-shot
    /// fields, copies the persistent spacing.
    fn item(&mut self, size: Size, default_grow: f32) -> FlexItem {
        let mut item = FlexItem::sized(size);
        let consumed = self.state.consume(item.is_sized());
        item.order = consumed.order;
        item.grow = consumed.grow.unwrap_or(default_grow);
        item.shrink = consumed.shrink.unwrap_or(0.0);
        item.basis = consumed.basis;
        item.align_self = consumed.align_self;
        item.clickable = consumed.clickable;
        item.margin = self.state.persistent.margin;
        item.padding = self.state.persistent.padding;
        item
    }

    fn insert(&mut self, node: LayoutNode) -> Result<NodeId> {
        let parent = self.current();
        self.tree
            .insert_child(parent, node)
            .ok_or(Error::InvalidCombination("node inserted outside a container"))
    }

    fn leaf(&mut self, paint: Paint, size: Size, default_grow: f32) -> Result<()> {
        let item = self.item(size, default_grow);
        let background = self.state.persistent.bg;
        self.insert(LayoutNode::leaf(background, paint, item))?;
        Ok(())
    }

    /// `{`: a nested container the size of the current one.
    fn open(&mut self) -> Result<()> {
        let size = self
            .tree
            .get(self.current())
            .map_or(Size::new(f32::NAN, f32::NAN), |node| node.item.size);
        let item = self.item(size, 0.0);
        let id = self.insert(LayoutNode::container(ContainerStyle::default(), item))?;
        self.stack.push(id);
        Ok(())
    }

    /// `}`: back to the enclosing container.
    fn close(&mut self) -> Result<()> {
        if self.stack.len() <= 1 {
            return Err(Error::UnbalancedBrace(Brace::Close));
        }
        self.stack.pop();
        Ok(())
    }

    fn finish(self) -> Result<LayoutTree> {
        if self.stack.len() != 1 {
            return Err(Error::UnbalancedBrace(Brace::Open));
        }
        Ok(self.tree)
    }
}

fn non_negative(kind: CommandKind, arg: &str) -> Result<f32> {
    parse_number(kind, arg, 0.0, f32::INFINITY)
}

/// `^margin{...}` / `^padding{...}`: 1 to 4 values in CSS shorthand order.
fn parse_edges(kind: CommandKind, arg: &str) -> Result<Edges> {
    let values = parse_numbers(kind, arg)?;
    Edges::from_shorthand(&values).ok_or_else(|| Error::InvalidNumber {
        command: kind.name(),
        value: arg.to_owned(),
        problem: NumberProblem::NotANumber,
    })
}

// ===========================================================================
// Tests
// ===========================================================================
