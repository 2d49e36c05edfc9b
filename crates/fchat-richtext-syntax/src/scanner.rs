//! # Scanner - Tags, Delimiters and Text Runs
//!
//! The scanner turns raw tokens into the four token kinds the parser works
//! with, checked in this order at each position:
//!
//! 1. Opening tag `[name]` / `[name=value]`
//! 2. Closing tag `[/name]` / quick-close `[/]`
//! 3. Markdown delimiter (markdown mode only)
//! 4. Plain text, up to the next recognized token start
//!
//! It never fails. Bracket or delimiter sequences that don't form a token are
//! absorbed into the surrounding text run.
//!
//! ## Verbatim Mode
//!
//! Exclusive tags and `noparse` need their content untouched. Instead of a
//! mode flag, the parser asks [`Scanner::find_close_tag`] for the next closing
//! tag with a given name and then jumps past it with [`Scanner::skip_to`];
//! nothing in between is ever tokenized.

use crate::cursor::Cursor;
use crate::lexer::{RawKind, lex_at};
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Bytes that delimit bracket tags.
pub struct Bracket;

impl Bracket {
    pub const OPEN: u8 = b'[';
    pub const CLOSE: u8 = b']';
    pub const VALUE: u8 = b'=';
    /// Prefix shared by every closing tag.
    pub const CLOSING: &'static str = "[/";
}

/// Location of a closing tag found by a verbatim search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseMatch {
    /// The text between the search start and the closing tag.
    pub content: Span,
    /// The closing tag itself.
    pub close: Span,
}

/// Pull-based token scanner over a single message.
pub struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    markdown: bool,
    /// Offset of the last `]` in the input. A tag value starting past it
    /// can never be terminated.
    last_close: Option<usize>,
    /// A recognized token found while extending a text run.
    pending: Option<Token<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str, markdown: bool) -> Self {
        Self {
            input,
            pos: 0,
            markdown,
            last_close: input.rfind(char::from(Bracket::CLOSE)),
            pending: None,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Byte offset just past the last token handed out.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Returns the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if let Some(token) = self.pending.take() {
            self.pos = token.span.end;
            return Some(token);
        }

        let start = self.pos;
        while self.pos < self.input.len() {
            match self.scan_at(self.pos) {
                Scanned::Token(token) if self.pos == start => {
                    self.pos = token.span.end;
                    return Some(token);
                }
                Scanned::Token(token) => {
                    self.pending = Some(token);
                    break;
                }
                Scanned::Text(end) => self.pos = end,
            }
        }

        (self.pos > start).then(|| Token::text(self.input, Span::new(start, self.pos)))
    }

    /// Resumes scanning at `offset`, dropping anything in between.
    pub fn skip_to(&mut self, offset: usize) {
        debug_assert!(offset >= self.pos && offset <= self.input.len());
        self.pending = None;
        self.pos = offset;
    }

    /// Finds the first closing tag at or after the current position whose name
    /// is one of `names` (`""` matches the quick-close `[/]`). Content in
    /// between is not interpreted.
    pub fn find_close_tag(&self, names: &[&str]) -> Option<CloseMatch> {
        let mut cur = Cursor::new(self.input, self.pos);
        while cur.seek(Bracket::CLOSING) {
            let at = cur.pos();
            if let Some((TokenKind::CloseTag { name }, end)) = match_close_tag(self.input, at) {
                if names.contains(&name) {
                    return Some(CloseMatch {
                        content: Span::new(self.pos, at),
                        close: Span::new(at, end),
                    });
                }
            }
            cur.bump_n(Bracket::CLOSING.len());
        }
        None
    }

    fn scan_at(&self, at: usize) -> Scanned<'a> {
        let Some((kind, end)) = lex_at(self.input, at) else {
            return Scanned::Text(self.input.len());
        };
        match kind {
            RawKind::LBracket => match match_tag(self.input, at, self.last_close) {
                Some((kind, end)) => Scanned::Token(Token::new(kind, self.input, Span::new(at, end))),
                None => Scanned::Text(end),
            },
            kind => match kind.delimiter() {
                Some(delimiter) if self.markdown => Scanned::Token(Token::new(
                    TokenKind::Delimiter(delimiter),
                    self.input,
                    Span::new(at, end),
                )),
                _ => Scanned::Text(end),
            },
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

enum Scanned<'a> {
    Token(Token<'a>),
    /// Plain text up to this offset.
    Text(usize),
}

/// Matches an opening or closing tag at `at`, returning its kind and end.
fn match_tag(
    input: &str,
    at: usize,
    last_close: Option<usize>,
) -> Option<(TokenKind<'_>, usize)> {
    match_open_tag(input, at, last_close).or_else(|| match_close_tag(input, at))
}

/// `[` name `]` or `[` name `=` value `]`, where name is `[a-z]+` and value is
/// `[^\]]+`.
///
/// `last_close` is the offset of the input's last `]`. Values that start
/// after it are rejected without being scanned, which keeps a run of
/// unterminated `[name=` openers linear.
fn match_open_tag(
    input: &str,
    at: usize,
    last_close: Option<usize>,
) -> Option<(TokenKind<'_>, usize)> {
    let mut cur = Cursor::new(input, at);
    if !cur.eat(Bracket::OPEN) {
        return None;
    }

    let name_start = cur.pos();
    if cur.eat_while(|b| b.is_ascii_lowercase()) == 0 {
        return None;
    }
    let name = &input[name_start..cur.pos()];

    let mut value = None;
    if cur.eat(Bracket::VALUE) {
        let value_start = cur.pos();
        if last_close.is_none_or(|close| close <= value_start) {
            return None;
        }
        if cur.eat_while(|b| b != Bracket::CLOSE) == 0 {
            return None;
        }
        value = Some(&input[value_start..cur.pos()]);
    }

    if !cur.eat(Bracket::CLOSE) {
        return None;
    }
    Some((TokenKind::OpenTag { name, value }, cur.pos()))
}

/// `[/` name `]` where name is `[a-z]*`.
fn match_close_tag(input: &str, at: usize) -> Option<(TokenKind<'_>, usize)> {
    let mut cur = Cursor::new(input, at);
    if !cur.starts_with(Bracket::CLOSING.as_bytes()) {
        return None;
    }
    cur.bump_n(Bracket::CLOSING.len());

    let name_start = cur.pos();
    cur.eat_while(|b| b.is_ascii_lowercase());
    let name = &input[name_start..cur.pos()];

    if !cur.eat(Bracket::CLOSE) {
        return None;
    }
    Some((TokenKind::CloseTag { name }, cur.pos()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Delimiter;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn kinds(input: &str, markdown: bool) -> Vec<(TokenKind<'_>, &str)> {
        Scanner::new(input, markdown)
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert_eq!(kinds("", true), vec![]);
    }

    #[test]
    fn plain_text_is_one_run() {
        assert_eq!(
            kinds("hello *world* :)", false),
            vec![(TokenKind::Text, "hello *world* :)")]
        );
    }

    #[test]
    fn open_and_close_tags() {
        assert_eq!(
            kinds("[b]hi[/b]", false),
            vec![
                (TokenKind::OpenTag { name: "b", value: None }, "[b]"),
                (TokenKind::Text, "hi"),
                (TokenKind::CloseTag { name: "b" }, "[/b]"),
            ]
        );
    }

    #[test]
    fn tag_with_value() {
        assert_eq!(
            kinds("[url=https://example.com/a?b=c]x", false),
            vec![
                (
                    TokenKind::OpenTag {
                        name: "url",
                        value: Some("https://example.com/a?b=c"),
                    },
                    "[url=https://example.com/a?b=c]",
                ),
                (TokenKind::Text, "x"),
            ]
        );
    }

    #[test]
    fn quick_close() {
        let tokens: Vec<_> = Scanner::new("[/]", false).collect();
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_quick_close());
    }

    #[test]
    fn unknown_names_still_tokenize() {
        assert_eq!(
            kinds("[foo]", false),
            vec![(TokenKind::OpenTag { name: "foo", value: None }, "[foo]")]
        );
    }

    #[rstest]
    #[case::uppercase("[B]x")]
    #[case::empty_name("[]x")]
    #[case::empty_value("[color=]x")]
    #[case::unterminated("[b")]
    #[case::unterminated_value("[url=abc")]
    #[case::space_in_name("[b i]")]
    #[case::digit_in_name("[h1]")]
    #[case::double_slash("[//]")]
    fn malformed_brackets_are_text(#[case] input: &str) {
        assert_eq!(kinds(input, false), vec![(TokenKind::Text, input)]);
    }

    #[test]
    fn text_run_stops_at_tag() {
        assert_eq!(
            kinds("a [ b[i]", false),
            vec![
                (TokenKind::Text, "a [ b"),
                (TokenKind::OpenTag { name: "i", value: None }, "[i]"),
            ]
        );
    }

    #[rstest]
    #[case("__", Delimiter::DoubleUnderscore)]
    #[case("~~", Delimiter::DoubleTilde)]
    #[case("***", Delimiter::TripleStar)]
    #[case("**", Delimiter::DoubleStar)]
    #[case("*", Delimiter::Star)]
    #[case("_", Delimiter::Underscore)]
    #[case("||", Delimiter::DoublePipe)]
    #[case(":", Delimiter::Colon)]
    fn markdown_delimiters(#[case] input: &str, #[case] expected: Delimiter) {
        assert_eq!(kinds(input, true), vec![(TokenKind::Delimiter(expected), input)]);
        assert_eq!(expected.spelling(), input);
    }

    #[test]
    fn markdown_off_absorbs_delimiters() {
        assert_eq!(kinds("**a**", false), vec![(TokenKind::Text, "**a**")]);
    }

    #[test]
    fn markdown_mixed_with_tags() {
        assert_eq!(
            kinds("[b]a*b[/b]", true),
            vec![
                (TokenKind::OpenTag { name: "b", value: None }, "[b]"),
                (TokenKind::Text, "a"),
                (TokenKind::Delimiter(Delimiter::Star), "*"),
                (TokenKind::Text, "b"),
                (TokenKind::CloseTag { name: "b" }, "[/b]"),
            ]
        );
    }

    #[test]
    fn lone_tilde_and_pipe_are_text() {
        assert_eq!(kinds("a~b|c", true), vec![(TokenKind::Text, "a~b|c")]);
    }

    #[test]
    fn tag_value_may_contain_markdown() {
        assert_eq!(
            kinds("[url=a_b*c]", true),
            vec![(
                TokenKind::OpenTag {
                    name: "url",
                    value: Some("a_b*c"),
                },
                "[url=a_b*c]",
            )]
        );
    }

    #[test]
    fn find_close_tag_is_verbatim() {
        let mut scanner = Scanner::new("[eicon]a[b]*[/i][/eicon] tail", true);
        let open = scanner.next_token().unwrap();
        assert_eq!(open.text, "[eicon]");

        let found = scanner.find_close_tag(&["eicon"]).unwrap();
        assert_eq!(found.content.slice(scanner.input()), "a[b]*[/i]");
        assert_eq!(found.close.slice(scanner.input()), "[/eicon]");

        scanner.skip_to(found.close.end);
        assert_eq!(
            scanner.map(|t| t.text).collect::<Vec<_>>(),
            vec![" tail"]
        );
    }

    #[test]
    fn find_close_tag_accepts_quick_close() {
        let mut scanner = Scanner::new("[noparse]x[/]", false);
        scanner.next_token();
        let found = scanner.find_close_tag(&["noparse", ""]).unwrap();
        assert_eq!(found.content.slice(scanner.input()), "x");
    }

    #[test]
    fn find_close_tag_missing() {
        let mut scanner = Scanner::new("[icon]bob", false);
        scanner.next_token();
        assert_eq!(scanner.find_close_tag(&["icon"]), None);
        assert_eq!(scanner.pos(), 6);
    }

    #[test]
    fn unterminated_values_after_last_bracket_are_text() {
        let input = format!("[b]x]{}", "[color=red".repeat(3));
        assert_eq!(
            kinds(&input, false),
            vec![
                (TokenKind::OpenTag { name: "b", value: None }, "[b]"),
                (TokenKind::Text, &input[3..]),
            ]
        );
    }

    #[test]
    fn pending_token_follows_text() {
        let mut scanner = Scanner::new("ab[/]", false);
        assert_eq!(scanner.next_token().unwrap().text, "ab");
        assert_eq!(scanner.pos(), 2);
        assert_eq!(scanner.next_token().unwrap().text, "[/]");
        assert_eq!(scanner.pos(), 5);
        assert_eq!(scanner.next_token(), None);
    }

    #[test]
    fn tokens_cover_input() {
        let input = "x[color=red]**é**[/color]:wave: [b";
        let joined: String = Scanner::new(input, true).map(|t| t.text).collect();
        assert_eq!(joined, input);
    }
}
