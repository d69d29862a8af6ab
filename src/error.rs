//! Error taxonomy for the interpreter and the pipeline.
//!
//! Every failure in the core is one [`Error`] variant. Whether an error ends
//! the process or only drops the offending line is decided by
//! [`ErrorPolicy`], never at the point where the error is raised.

use std::path::PathBuf;

/// Which brace was left unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Brace {
    /// A `{` was never closed before the line ended.
    Open,
    /// A `}` tried to close the root container.
    Close,
}

/// Why a numeric argument was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberProblem {
    /// Empty, not fully consumed, or not finite.
    NotANumber,
    /// Parsed, but outside the range allowed for the command.
    OutOfRange,
}

impl std::fmt::Display for Brace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Brace::Open => f.write_str("{"),
            Brace::Close => f.write_str("}"),
        }
    }
}

impl std::fmt::Display for NumberProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumberProblem::NotANumber => f.write_str("not a number"),
            NumberProblem::OutOfRange => f.write_str("out of range"),
        }
    }
}

/// All errors produced by flexbar.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Markup errors ────────────────────────────────────────────────

    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: &'static str },

    #[error("syntax error: unbalanced '{0}'")]
    UnbalancedBrace(Brace),

    #[error("line of {len} bytes exceeds the maximum of {max}")]
    Overflow { len: usize, max: usize },

    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },

    #[error("^{name}{{}}: unrecognised command")]
    UnknownCommand { name: String },

    #[error("^{command}{{{value}}}: invalid number: {problem}")]
    InvalidNumber {
        command: &'static str,
        value: String,
        problem: NumberProblem,
    },

    #[error("{value}: invalid color")]
    InvalidColor { value: String },

    #[error("{value}: unrecognised {kind}")]
    UnrecognizedEnum { kind: &'static str, value: String },

    #[error("invalid combination: {0}")]
    InvalidCombination(&'static str),

    // ── Collaborator errors ──────────────────────────────────────────

    #[error("{}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("layout solver failed: {0}")]
    Layout(taffy::TaffyError),

    // ── Pipeline errors ──────────────────────────────────────────────

    #[error("{role} thread: {message}")]
    Thread { role: &'static str, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// What the pipeline does with a markup or evaluation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the whole process with a diagnostic.
    #[default]
    Abort,
    /// Log a warning, discard the offending line and keep the previous render.
    SkipLine,
}

impl Error {
    /// Whether the error comes from one bad input line, as opposed to the
    /// pipeline or the environment. Only these are eligible for
    /// [`ErrorPolicy::SkipLine`].
    pub fn is_line_error(&self) -> bool {
        !matches!(self, Error::Layout(_) | Error::Thread { .. } | Error::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbalanced_messages_name_the_brace() {
        assert_eq!(
            Error::UnbalancedBrace(Brace::Open).to_string(),
            "syntax error: unbalanced '{'"
        );
        assert_eq!(
            Error::UnbalancedBrace(Brace::Close).to_string(),
            "syntax error: unbalanced '}'"
        );
    }

    #[test]
    fn invalid_number_message() {
        let err = Error::InvalidNumber {
            command: "grow",
            value: "x".into(),
            problem: NumberProblem::NotANumber,
        };
        assert_eq!(err.to_string(), "^grow{x}: invalid number: not a number");
    }

    #[test]
    fn unknown_command_message() {
        let err = Error::UnknownCommand { name: "blink".into() };
        assert_eq!(err.to_string(), "^blink{}: unrecognised command");
    }

    #[test]
    fn line_errors_are_skippable() {
        assert!(Error::InvalidColor { value: "#12".into() }.is_line_error());
        assert!(Error::InvalidCombination("x").is_line_error());
        assert!(Error::InvalidUtf8 { offset: 3 }.is_line_error());
        let io = Error::Io(std::io::Error::other("closed"));
        assert!(!io.is_line_error());
    }

    #[test]
    fn default_policy_aborts() {
        assert_eq!(ErrorPolicy::default(), ErrorPolicy::Abort);
    }
}
