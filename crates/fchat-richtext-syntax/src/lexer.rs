//! # Lexer - Raw Tokens
//!
//! The first stage of scanning: breaking a message into raw tokens with the
//! [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one raw token. Nothing is
//! skipped, so the [`Scanner`](crate::scanner::Scanner) can always fall back to
//! re-emitting the exact source text.
//!
//! ```
//! use fchat_richtext_syntax::lexer::lex;
//!
//! let input = "[b]**hi**[/b]";
//! let reconstructed: String = lex(input).iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Context-Free Tokens
//!
//! Raw tokens know nothing about tags. A `[` is only a bracket here; whether it
//! starts `[color=red]`, `[/]` or nothing at all is decided by the scanner.
//! The markdown delimiters are lexed longest-match-first, so `***` is one
//! token and `****` is `***` followed by `*`.
//!
//! Everything else becomes `Text`, grouped into runs.

use logos::Logos;

use crate::token::Delimiter;

/// Raw token kinds produced by the Logos lexer.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    /// `[`, the start of every bracket tag
    #[token("[")]
    LBracket,

    /// `__` underline
    #[token("__")]
    DoubleUnderscore,

    /// `~~` strikethrough
    #[token("~~")]
    DoubleTilde,

    /// `***` bold and italic at once
    #[token("***")]
    TripleStar,

    /// `**` bold
    #[token("**")]
    DoubleStar,

    /// `*` italic
    #[token("*")]
    Star,

    /// `_` italic
    #[token("_")]
    Underscore,

    /// `||` spoiler
    #[token("||")]
    DoublePipe,

    /// `:` emote shorthand
    #[token(":")]
    Colon,

    /// A lone `~` or `|`, which has no meaning on its own
    #[regex(r"[~|]")]
    Mark,

    /// Plain text - anything not matched by other rules
    #[regex(r"[^\[*_~|:]+")]
    Text,
}

impl RawKind {
    /// The markdown delimiter this raw token spells, if any.
    pub fn delimiter(self) -> Option<Delimiter> {
        match self {
            RawKind::DoubleUnderscore => Some(Delimiter::DoubleUnderscore),
            RawKind::DoubleTilde => Some(Delimiter::DoubleTilde),
            RawKind::TripleStar => Some(Delimiter::TripleStar),
            RawKind::DoubleStar => Some(Delimiter::DoubleStar),
            RawKind::Star => Some(Delimiter::Star),
            RawKind::Underscore => Some(Delimiter::Underscore),
            RawKind::DoublePipe => Some(Delimiter::DoublePipe),
            RawKind::Colon => Some(Delimiter::Colon),
            RawKind::LBracket | RawKind::Mark | RawKind::Text => None,
        }
    }
}

/// A lexed raw token with its kind and text slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub kind: RawKind,
    pub text: &'a str,
}

/// Lex the input into a sequence of raw tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<RawToken<'_>> {
    lex_with_spans(input)
        .into_iter()
        .map(|(token, _)| token)
        .collect()
}

/// Lex and return raw tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(RawToken<'_>, std::ops::Range<usize>)> {
    let mut tokens = Vec::new();
    let mut lexer = RawKind::lexer(input);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let text = lexer.slice();
        // Logos error means unrecognized input - treat as TEXT
        let kind = result.unwrap_or(RawKind::Text);
        tokens.push((RawToken { kind, text }, span));
    }

    tokens
}

/// Lex a single raw token starting at byte `at`, returning its kind and
/// exclusive end offset. `None` at end of input.
pub(crate) fn lex_at(input: &str, at: usize) -> Option<(RawKind, usize)> {
    let rest = input.get(at..)?;
    let mut lexer = RawKind::lexer(rest);
    let result = lexer.next()?;
    let mut end = lexer.span().end;
    if end == 0 {
        // Never stall: consume at least one whole character.
        end = rest.chars().next().map_or(0, char::len_utf8);
    }
    Some((result.unwrap_or(RawKind::Text), at + end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(kind: RawKind, text: &str) -> RawToken<'_> {
        RawToken { kind, text }
    }

    #[test]
    fn lex_empty_input() {
        assert_eq!(lex(""), vec![]);
    }

    #[test]
    fn lex_plain_text() {
        assert_eq!(lex("hello world"), vec![token(RawKind::Text, "hello world")]);
    }

    #[test]
    fn lex_bracket_tag_is_not_one_token() {
        assert_eq!(
            lex("[b]hi"),
            vec![
                token(RawKind::LBracket, "["),
                token(RawKind::Text, "b]hi"),
            ]
        );
    }

    #[test]
    fn lex_star_runs_longest_first() {
        assert_eq!(
            lex("****"),
            vec![
                token(RawKind::TripleStar, "***"),
                token(RawKind::Star, "*"),
            ]
        );
        assert_eq!(
            lex("**a*"),
            vec![
                token(RawKind::DoubleStar, "**"),
                token(RawKind::Text, "a"),
                token(RawKind::Star, "*"),
            ]
        );
    }

    #[test]
    fn lex_lone_marks() {
        assert_eq!(
            lex("a~b|c"),
            vec![
                token(RawKind::Text, "a"),
                token(RawKind::Mark, "~"),
                token(RawKind::Text, "b"),
                token(RawKind::Mark, "|"),
                token(RawKind::Text, "c"),
            ]
        );
    }

    #[test]
    fn lex_pairs() {
        assert_eq!(
            lex("__~~||:"),
            vec![
                token(RawKind::DoubleUnderscore, "__"),
                token(RawKind::DoubleTilde, "~~"),
                token(RawKind::DoublePipe, "||"),
                token(RawKind::Colon, ":"),
            ]
        );
    }

    #[test]
    fn all_bytes_preserved() {
        let input = "[color=red]**héllo**[/color] ~~ :wave: ||[/]||";
        let reconstructed: String = lex(input).iter().map(|t| t.text).collect();
        assert_eq!(input, reconstructed);
    }

    #[test]
    fn spans_are_correct() {
        let input = "a*b[/i]";
        for (token, span) in &lex_with_spans(input) {
            assert_eq!(token.text, &input[span.clone()]);
        }
    }

    #[test]
    fn lex_at_offsets_are_absolute() {
        let input = "ab**cd";
        assert_eq!(lex_at(input, 2), Some((RawKind::DoubleStar, 4)));
        assert_eq!(lex_at(input, 4), Some((RawKind::Text, 6)));
        assert_eq!(lex_at(input, 6), None);
    }

    #[test]
    fn delimiter_mapping() {
        assert_eq!(RawKind::TripleStar.delimiter(), Some(Delimiter::TripleStar));
        assert_eq!(RawKind::Mark.delimiter(), None);
        assert_eq!(RawKind::LBracket.delimiter(), None);
    }
}
