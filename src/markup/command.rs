//! Command vocabulary: names, keyword arguments and numeric arguments.
//!
//! Every `^name{arg}` token is resolved to a [`CommandKind`] before it is
//! evaluated. Keyword arguments (`^dir{col}`, `^wrap{wrap-rev}`, ...) parse
//! into the small enums below; numeric arguments go through
//! [`parse_number`] and [`parse_integer`], which accept only a fully
//! consumed, finite, in-range value.

use crate::error::{Error, NumberProblem, Result};

// ---------------------------------------------------------------------------
// CommandKind
// ---------------------------------------------------------------------------

/// Every command the evaluator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    // Persistent style
    Bg,
    Fg,
    Font,
    Ellipsize,
    Margin,
    Padding,
    LineCap,
    LineJoin,
    LineOffset,
    LineWidth,
    MiterLimit,
    // Current container
    Dir,
    Wrap,
    JustifyContent,
    AlignItems,
    // One-shot, applied to the next node
    Ca,
    AlignSelf,
    Grow,
    Shrink,
    Order,
    Basis,
    // Content
    Img,
    Rule,
    Markup,
    Text,
}

impl CommandKind {
    /// Every command, in vocabulary order.
    pub const ALL: [CommandKind; 25] = [
        CommandKind::Ca,
        CommandKind::Bg,
        CommandKind::Fg,
        CommandKind::Font,
        CommandKind::Dir,
        CommandKind::Wrap,
        CommandKind::Ellipsize,
        CommandKind::JustifyContent,
        CommandKind::AlignItems,
        CommandKind::AlignSelf,
        CommandKind::Grow,
        CommandKind::Shrink,
        CommandKind::Order,
        CommandKind::Basis,
        CommandKind::Margin,
        CommandKind::Padding,
        CommandKind::LineCap,
        CommandKind::LineJoin,
        CommandKind::LineOffset,
        CommandKind::LineWidth,
        CommandKind::MiterLimit,
        CommandKind::Img,
        CommandKind::Rule,
        CommandKind::Markup,
        CommandKind::Text,
    ];

    /// The command's name as written in markup.
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Bg => "bg",
            CommandKind::Fg => "fg",
            CommandKind::Font => "font",
            CommandKind::Ellipsize => "ellipsize",
            CommandKind::Margin => "margin",
            CommandKind::Padding => "padding",
            CommandKind::LineCap => "line-cap",
            CommandKind::LineJoin => "line-join",
            CommandKind::LineOffset => "line-offset",
            CommandKind::LineWidth => "line-width",
            CommandKind::MiterLimit => "miter-limit",
            CommandKind::Dir => "dir",
            CommandKind::Wrap => "wrap",
            CommandKind::JustifyContent => "justify-content",
            CommandKind::AlignItems => "align-items",
            CommandKind::Ca => "ca",
            CommandKind::AlignSelf => "align-self",
            CommandKind::Grow => "grow",
            CommandKind::Shrink => "shrink",
            CommandKind::Order => "order",
            CommandKind::Basis => "basis",
            CommandKind::Img => "img",
            CommandKind::Rule => "rule",
            CommandKind::Markup => "markup",
            CommandKind::Text => "text",
        }
    }

    /// Resolve a command name.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownCommand`] for names outside the vocabulary.
    pub fn from_name(name: &str) -> Result<Self> {
        CommandKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| Error::UnknownCommand { name: name.to_owned() })
    }
}

// ---------------------------------------------------------------------------
// Keyword arguments
// ---------------------------------------------------------------------------

/// Look up `value` in a keyword table, or fail naming `kind`.
fn keyword<T: Copy>(kind: &'static str, table: &[(&str, T)], value: &str) -> Result<T> {
    table
        .iter()
        .find(|(name, _)| *name == value)
        .map(|(_, v)| *v)
        .ok_or_else(|| Error::UnrecognizedEnum { kind, value: value.to_owned() })
}

/// Main axis of a container (`^dir{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl Direction {
    pub fn parse(value: &str) -> Result<Self> {
        keyword(
            "direction",
            &[
                ("row", Direction::Row),
                ("row-rev", Direction::RowReverse),
                ("col", Direction::Column),
                ("col-rev", Direction::ColumnReverse),
            ],
            value,
        )
    }
}

/// Line wrapping of a container (`^wrap{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

impl Wrap {
    pub fn parse(value: &str) -> Result<Self> {
        keyword(
            "wrap",
            &[
                ("no-wrap", Wrap::NoWrap),
                ("wrap", Wrap::Wrap),
                ("wrap-rev", Wrap::WrapReverse),
            ],
            value,
        )
    }
}

/// Main-axis distribution (`^justify-content{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Justify {
    #[default]
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl Justify {
    pub fn parse(value: &str) -> Result<Self> {
        keyword(
            "justify-content",
            &[
                ("start", Justify::Start),
                ("end", Justify::End),
                ("center", Justify::Center),
                ("space-between", Justify::SpaceBetween),
                ("space-around", Justify::SpaceAround),
                ("space-evenly", Justify::SpaceEvenly),
            ],
            value,
        )
    }
}

/// Cross-axis alignment (`^align-items{...}`, `^align-self{...}`).
///
/// `Auto` defers to the container: for `align-self` it means "use the
/// parent's align-items".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    #[default]
    Auto,
    Start,
    End,
    Center,
    Stretch,
}

impl Align {
    pub fn parse(value: &str) -> Result<Self> {
        keyword(
            "alignment",
            &[
                ("auto", Align::Auto),
                ("start", Align::Start),
                ("end", Align::End),
                ("center", Align::Center),
                ("stretch", Align::Stretch),
            ],
            value,
        )
    }
}

/// Where text is elided when it does not fit (`^ellipsize{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Ellipsize {
    #[default]
    None,
    Start,
    Middle,
    End,
}

impl Ellipsize {
    pub fn parse(value: &str) -> Result<Self> {
        keyword(
            "ellipsize mode",
            &[
                ("none", Ellipsize::None),
                ("start", Ellipsize::Start),
                ("middle", Ellipsize::Middle),
                ("end", Ellipsize::End),
            ],
            value,
        )
    }
}

/// Stroke end style for rules (`^line-cap{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl LineCap {
    pub fn parse(value: &str) -> Result<Self> {
        keyword(
            "line cap",
            &[
                ("butt", LineCap::Butt),
                ("round", LineCap::Round),
                ("square", LineCap::Square),
            ],
            value,
        )
    }
}

/// Stroke corner style for rules (`^line-join{...}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl LineJoin {
    pub fn parse(value: &str) -> Result<Self> {
        keyword(
            "line join",
            &[
                ("miter", LineJoin::Miter),
                ("round", LineJoin::Round),
                ("bevel", LineJoin::Bevel),
            ],
            value,
        )
    }
}

// ---------------------------------------------------------------------------
// Numeric arguments
// ---------------------------------------------------------------------------

/// Parse a float argument of `command`, requiring `min <= x <= max`.
///
/// # Errors
///
/// [`Error::InvalidNumber`] if `value` is empty, has trailing characters, is
/// not finite, or falls outside the range.
pub fn parse_number(command: CommandKind, value: &str, min: f32, max: f32) -> Result<f32> {
    let invalid = |problem| Error::InvalidNumber {
        command: command.name(),
        value: value.to_owned(),
        problem,
    };

    let x: f32 = value.parse().map_err(|_| invalid(NumberProblem::NotANumber))?;
    if !x.is_finite() {
        return Err(invalid(NumberProblem::NotANumber));
    }
    if x < min || x > max {
        return Err(invalid(NumberProblem::OutOfRange));
    }
    Ok(x)
}

/// Parse a base-10 integer argument of `command`, requiring `min <= n <= max`.
///
/// # Errors
///
/// [`Error::InvalidNumber`] if `value` is not an integer or is out of range.
pub fn parse_integer(command: CommandKind, value: &str, min: i32, max: i32) -> Result<i32> {
    let invalid = |problem| Error::InvalidNumber {
        command: command.name(),
        value: value.to_owned(),
        problem,
    };

    let n: i64 = value.parse().map_err(|_| invalid(NumberProblem::NotANumber))?;
    if n < i64::from(min) || n > i64::from(max) {
        return Err(invalid(NumberProblem::OutOfRange));
    }
    Ok(n as i32)
}

/// Parse a 1 to 4 value spacing shorthand (`^margin{1 2}`), each value
/// non-negative.
pub fn parse_numbers(command: CommandKind, value: &str) -> Result<Vec<f32>> {
    value
        .split_whitespace()
        .map(|part| parse_number(command, part, 0.0, f32::INFINITY))
        .collect()
}
