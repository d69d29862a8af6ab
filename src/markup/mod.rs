//! The markup language: tokenizer, command vocabulary, inline text markup.

pub mod command;
pub mod text;
pub mod tokenizer;

pub use command::{Align, CommandKind, Direction, Ellipsize, Justify, LineCap, LineJoin, Wrap};
pub use tokenizer::{tokenize, Token, MAX_LINE_LEN};
