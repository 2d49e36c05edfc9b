use fchat_richtext_syntax::{Delimiter, Span, cursor::Cursor};

use crate::node::Attributes;

/// Adds the formatting a markdown delimiter stands for.
///
/// `:` carries no formatting; it only ever produces an emote.
pub fn apply_delimiter(delimiter: Delimiter, attrs: &mut Attributes<'_>) {
    match delimiter {
        Delimiter::DoubleUnderscore => attrs.underline = true,
        Delimiter::DoubleTilde => attrs.strike = true,
        Delimiter::TripleStar => {
            attrs.bold = true;
            attrs.italic = true;
        }
        Delimiter::DoubleStar => attrs.bold = true,
        Delimiter::Star | Delimiter::Underscore => attrs.italic = true,
        Delimiter::DoublePipe => attrs.spoiler = true,
        Delimiter::Colon => {}
    }
}

/// The `:name:` emote shorthand.
///
/// A name is ASCII letters, digits, `_` and `-`, with at least one letter,
/// so clock times like `12:30:45` stay text.
pub struct EmoteShorthand;

impl EmoteShorthand {
    pub const MARK: u8 = b':';

    /// Matches a name and closing `:` starting at `at`, just past the
    /// opening `:`. Returns the name span and the offset after the closer.
    pub fn match_at(input: &str, at: usize) -> Option<(Span, usize)> {
        let mut cur = Cursor::new(input, at);
        let len = cur.eat_while(Self::is_name_byte);
        let name = Span::new(at, cur.pos());
        if len == 0 || !cur.eat(Self::MARK) {
            return None;
        }
        if !name.slice(input).bytes().any(|b| b.is_ascii_alphabetic()) {
            return None;
        }
        Some((name, cur.pos()))
    }

    fn is_name_byte(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Delimiter::DoubleUnderscore, "underline")]
    #[case(Delimiter::DoubleTilde, "strike")]
    #[case(Delimiter::TripleStar, "bold, italic")]
    #[case(Delimiter::DoubleStar, "bold")]
    #[case(Delimiter::Star, "italic")]
    #[case(Delimiter::Underscore, "italic")]
    #[case(Delimiter::DoublePipe, "spoiler")]
    #[case(Delimiter::Colon, "")]
    fn delimiter_formatting(#[case] delimiter: Delimiter, #[case] expected: &str) {
        let mut attrs = Attributes::default();
        apply_delimiter(delimiter, &mut attrs);
        assert_eq!(attrs.to_string(), expected);
    }

    #[test]
    fn shorthand_matches_name() {
        let input = ":wave_hi-2: rest";
        let (name, end) = EmoteShorthand::match_at(input, 1).unwrap();
        assert_eq!(name.slice(input), "wave_hi-2");
        assert_eq!(&input[end..], " rest");
    }

    #[rstest]
    #[case::no_closer(":wave")]
    #[case::empty("::")]
    #[case::space(":two words:")]
    #[case::digits_only("12:30:45")]
    #[case::bracket(":a[b]:")]
    fn shorthand_rejects(#[case] input: &str) {
        let at = input.find(':').unwrap() + 1;
        assert_eq!(EmoteShorthand::match_at(input, at), None);
    }
}
