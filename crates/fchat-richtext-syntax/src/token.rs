//! Scanner-level tokens.

use crate::span::Span;

/// A markdown delimiter spelling.
///
/// Spellings stay distinct even where they mean the same thing: a `*` opener
/// only closes with `*`, never with `_`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Delimiter {
    /// `__` underline
    DoubleUnderscore,
    /// `~~` strikethrough
    DoubleTilde,
    /// `***` bold and italic
    TripleStar,
    /// `**` bold
    DoubleStar,
    /// `*` italic
    Star,
    /// `_` italic
    Underscore,
    /// `||` spoiler
    DoublePipe,
    /// `:` emote shorthand
    Colon,
}

impl Delimiter {
    pub const ALL: [Delimiter; 8] = [
        Delimiter::DoubleUnderscore,
        Delimiter::DoubleTilde,
        Delimiter::TripleStar,
        Delimiter::DoubleStar,
        Delimiter::Star,
        Delimiter::Underscore,
        Delimiter::DoublePipe,
        Delimiter::Colon,
    ];

    /// The source spelling of this delimiter.
    pub fn spelling(self) -> &'static str {
        match self {
            Delimiter::DoubleUnderscore => "__",
            Delimiter::DoubleTilde => "~~",
            Delimiter::TripleStar => "***",
            Delimiter::DoubleStar => "**",
            Delimiter::Star => "*",
            Delimiter::Underscore => "_",
            Delimiter::DoublePipe => "||",
            Delimiter::Colon => ":",
        }
    }
}

/// What a [`Token`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    /// `[name]` or `[name=value]`. The name is any run of lowercase ASCII
    /// letters; whether it means anything is decided later.
    OpenTag {
        name: &'a str,
        value: Option<&'a str>,
    },
    /// `[/name]`, or the quick-close `[/]` when `name` is empty.
    CloseTag { name: &'a str },
    /// A markdown delimiter. Only produced in markdown mode.
    Delimiter(Delimiter),
    /// A maximal run of plain text.
    Text,
}

/// A scanned token with its kind, source text and byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, input: &'a str, span: Span) -> Self {
        Self {
            kind,
            text: span.slice(input),
            span,
        }
    }

    pub fn text(input: &'a str, span: Span) -> Self {
        Self::new(TokenKind::Text, input, span)
    }

    /// True for the quick-close form `[/]`.
    pub fn is_quick_close(&self) -> bool {
        matches!(self.kind, TokenKind::CloseTag { name: "" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spellings_are_unique() {
        let mut spellings: Vec<_> = Delimiter::ALL.iter().map(|d| d.spelling()).collect();
        spellings.sort_unstable();
        spellings.dedup();
        assert_eq!(spellings.len(), Delimiter::ALL.len());
    }

    #[test]
    fn token_text_borrows_input() {
        let input = "[b]x";
        let token = Token::new(
            TokenKind::OpenTag {
                name: "b",
                value: None,
            },
            input,
            Span::new(0, 3),
        );
        assert_eq!(token.text, "[b]");
        assert!(!token.is_quick_close());
    }

    #[test]
    fn quick_close_detection() {
        let token = Token::new(TokenKind::CloseTag { name: "" }, "[/]", Span::new(0, 3));
        assert!(token.is_quick_close());
    }
}
