//! logos-based line tokenizer.
//!
//! One input line is split into [`Token`]s. The grammar has four shapes:
//! - `{` and `}` open and close a container
//! - `^name{arg}` is a command; the name runs to the first `{`, the argument
//!   to the first `}`
//! - everything else is text, and a text run ends at `{`, `}` or `^`
//!
//! Because text can never contain a structural character, a brace or caret
//! that follows text always terminates the text token first and is then
//! lexed on its own.

use logos::Logos;

use crate::error::{Error, Result};

/// Longest accepted line, in bytes, not counting the line terminator.
pub const MAX_LINE_LEN: usize = 8192;

/// A token of the markup language. Strings are owned so a token buffer can
/// outlive the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `{`: open a nested container.
    Open,
    /// `}`: close the current container.
    Close,
    /// `^name{arg}`.
    Command { name: String, arg: String },
    /// A run of plain text.
    Text { content: String },
}

impl Token {
    /// Shorthand for building a command token.
    pub fn command(name: impl Into<String>, arg: impl Into<String>) -> Self {
        Token::Command { name: name.into(), arg: arg.into() }
    }

    /// Shorthand for building a text token.
    pub fn text(content: impl Into<String>) -> Self {
        Token::Text { content: content.into() }
    }
}

/// Raw lexemes recognized by logos. Payloads are sliced out afterwards.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
enum Lexeme {
    #[token("{")]
    Open,

    #[token("}")]
    Close,

    /// `^` + name + `{` + arg + `}`. Longest match wins over the error path,
    /// so an unterminated command falls through to a lexer error.
    #[regex(r"\^[^{]*\{[^}]*\}")]
    Command,

    #[regex(r"[^{}\^]+")]
    Text,
}

/// Tokenize one line of markup.
///
/// The line ends at the first `\n` or `\0`; anything after is ignored.
/// Form-feed, tab and vertical-tab inside text become a single space.
///
/// # Errors
///
/// - [`Error::Overflow`] if the line is longer than [`MAX_LINE_LEN`].
/// - [`Error::Syntax`] if a command's name or argument is unterminated.
pub fn tokenize(line: &str) -> Result<Vec<Token>> {
    let line = match line.find(['\n', '\0']) {
        Some(end) => &line[..end],
        None => line,
    };
    let line = line.strip_suffix('\r').unwrap_or(line);

    if line.len() > MAX_LINE_LEN {
        return Err(Error::Overflow { len: line.len(), max: MAX_LINE_LEN });
    }

    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(line);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        let token = match result {
            Ok(Lexeme::Open) => Token::Open,
            Ok(Lexeme::Close) => Token::Close,
            Ok(Lexeme::Command) => split_command(slice),
            Ok(Lexeme::Text) => Token::text(normalize_whitespace(slice)),
            Err(()) => return Err(syntax_error(line, span.start)),
        };
        tokens.push(token);
    }

    Ok(tokens)
}

/// Split a matched `^name{arg}` slice into its parts.
fn split_command(slice: &str) -> Token {
    let body = &slice[1..slice.len() - 1];
    let (name, arg) = body.split_once('{').unwrap_or((body, ""));
    Token::command(name, arg)
}

fn normalize_whitespace(text: &str) -> String {
    text.replace(['\t', '\u{0b}', '\u{0c}'], " ")
}

/// Describe why lexing failed at `offset`.
fn syntax_error(line: &str, offset: usize) -> Error {
    let rest = &line[offset..];
    let message = match rest.strip_prefix('^') {
        Some(after) if !after.contains('{') => "command name is missing its '{'",
        Some(_) => "command argument is missing its '}'",
        None => "unexpected character",
    };
    Error::Syntax { offset, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Compact one-line rendering for snapshot assertions.
    fn render(tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(|t| match t {
                Token::Open => "Open".to_owned(),
                Token::Close => "Close".to_owned(),
                Token::Command { name, arg } => format!("Cmd({name}={arg})"),
                Token::Text { content } => format!("Text({content:?})"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ── Basic shapes ─────────────────────────────────────────────────

    #[test]
    fn plain_text_is_one_token() {
        assert_eq!(tokenize("hello world").unwrap(), vec![Token::text("hello world")]);
    }

    #[test]
    fn empty_line_has_no_tokens() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("\n").unwrap().is_empty());
    }

    #[test]
    fn braces() {
        assert_eq!(
            tokenize("{}").unwrap(),
            vec![Token::Open, Token::Close]
        );
    }

    #[test]
    fn command_with_argument() {
        assert_eq!(
            tokenize("^bg{#ff0000}").unwrap(),
            vec![Token::command("bg", "#ff0000")]
        );
    }

    #[test]
    fn command_with_empty_argument() {
        assert_eq!(tokenize("^rule{}").unwrap(), vec![Token::command("rule", "")]);
    }

    // ── Text termination ─────────────────────────────────────────────

    #[test]
    fn text_ends_at_structural_characters() {
        let tokens = tokenize("^bg{#ff0000}A^bg{#00ff00}B").unwrap();
        insta::assert_snapshot!(
            render(&tokens),
            @r#"Cmd(bg=#ff0000) Text("A") Cmd(bg=#00ff00) Text("B")"#
        );
    }

    #[test]
    fn brace_after_text_splits_the_text() {
        assert_eq!(
            tokenize("A{B}C").unwrap(),
            vec![
                Token::text("A"),
                Token::Open,
                Token::text("B"),
                Token::Close,
                Token::text("C"),
            ]
        );
    }

    #[test]
    fn nested_container_line() {
        let tokens = tokenize("{^dir{col}A B}").unwrap();
        insta::assert_snapshot!(render(&tokens), @r#"Open Cmd(dir=col) Text("A B") Close"#);
    }

    #[test]
    fn argument_may_contain_open_brace_and_caret() {
        assert_eq!(
            tokenize("^text{a{b^c}").unwrap(),
            vec![Token::command("text", "a{b^c")]
        );
    }

    // ── Whitespace and terminators ───────────────────────────────────

    #[test]
    fn control_whitespace_becomes_space() {
        assert_eq!(tokenize("a\tb\u{0b}c\u{0c}d").unwrap(), vec![Token::text("a b c d")]);
    }

    #[test]
    fn newline_and_nul_end_the_line() {
        assert_eq!(tokenize("abc\n").unwrap(), vec![Token::text("abc")]);
        assert_eq!(tokenize("abc\ndef").unwrap(), vec![Token::text("abc")]);
        assert_eq!(tokenize("abc\0def").unwrap(), vec![Token::text("abc")]);
        assert_eq!(tokenize("abc\r\n").unwrap(), vec![Token::text("abc")]);
    }

    #[test]
    fn multibyte_text() {
        assert_eq!(tokenize("héllo ✓").unwrap(), vec![Token::text("héllo ✓")]);
    }

    // ── Errors ───────────────────────────────────────────────────────

    #[test]
    fn unterminated_name_is_syntax_error() {
        let err = tokenize("abc ^bg").unwrap_err();
        match err {
            Error::Syntax { offset, message } => {
                assert_eq!(offset, 4);
                assert!(message.contains("name"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unterminated_argument_is_syntax_error() {
        let err = tokenize("^bg{#fff").unwrap_err();
        match err {
            Error::Syntax { message, .. } => assert!(message.contains("argument")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn overlong_line_overflows() {
        let line = "x".repeat(MAX_LINE_LEN + 1);
        assert!(matches!(
            tokenize(&line),
            Err(Error::Overflow { len, max }) if len == MAX_LINE_LEN + 1 && max == MAX_LINE_LEN
        ));
    }

    #[test]
    fn line_at_the_limit_is_accepted() {
        let line = "x".repeat(MAX_LINE_LEN);
        assert_eq!(tokenize(&line).unwrap().len(), 1);
    }

    #[test]
    fn tokenize_is_restartable() {
        let first = tokenize("^fg{red}A").unwrap();
        let second = tokenize("^fg{red}A").unwrap();
        assert_eq!(first, second);
    }
}
