/// A byte cursor over the input, used for the bracket-tag shapes and the
/// verbatim searches that sit outside the Logos lexer.
///
/// All positions are absolute byte offsets into `s`. The cursor only ever
/// stops on ASCII delimiters, so every position it reports is a valid
/// `char` boundary as long as it started on one.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The full input.
    pub s: &'a str,
    /// Current byte index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at byte offset `i` of `s`.
    pub fn new(s: &'a str, i: usize) -> Self {
        Self { s, i }
    }

    /// Returns the current byte position.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Peeks at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s.as_bytes().get(self.i..).is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Consumes `b` if it is the current byte.
    pub fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.i += 1;
            true
        } else {
            false
        }
    }

    /// Consumes bytes while `pred` holds, returning how many were consumed.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let start = self.i;
        while let Some(b) = self.peek() {
            if !pred(b) {
                break;
            }
            self.i += 1;
        }
        self.i - start
    }

    /// Moves to the next occurrence of `pat` at or after the current
    /// position. Returns `false` and leaves the cursor untouched when there
    /// is none.
    pub fn seek(&mut self, pat: &str) -> bool {
        match self.s.get(self.i..).and_then(|rest| rest.find(pat)) {
            Some(offset) => {
                self.i += offset;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 0);
        assert_eq!(cur.pos(), 0);
        assert_eq!(cur.peek(), Some(b'h'));
        assert!(cur.eat(b'h'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn cursor_starts_with() {
        let cur = Cursor::new("[/b]", 0);
        assert!(cur.starts_with(b"[/"));
        assert!(!cur.starts_with(b"]"));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("", 0);
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn starts_with_at_eof() {
        let mut cur = Cursor::new("ab", 0);
        cur.bump_n(2);
        assert_eq!(cur.peek(), None);
        assert!(cur.starts_with(b""));
        assert!(!cur.starts_with(b"a"));
    }

    #[test]
    fn starts_with_past_end_is_false() {
        let mut cur = Cursor::new("hi", 0);
        cur.bump_n(10);
        assert!(!cur.starts_with(b"h"));
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn eat_only_matching_byte() {
        let mut cur = Cursor::new("=x", 0);
        assert!(!cur.eat(b'x'));
        assert!(cur.eat(b'='));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn eat_while_counts_consumed() {
        let mut cur = Cursor::new("color=red]", 0);
        assert_eq!(cur.eat_while(|b| b.is_ascii_lowercase()), 5);
        assert_eq!(cur.peek(), Some(b'='));
        assert_eq!(cur.eat_while(|b| b.is_ascii_digit()), 0);
    }

    #[test]
    fn seek_finds_later_pattern() {
        let mut cur = Cursor::new("foo[/eicon]", 0);
        assert!(cur.seek("[/"));
        assert_eq!(cur.pos(), 3);
        assert!(cur.seek("[/"));
        assert_eq!(cur.pos(), 3);
    }

    #[test]
    fn seek_missing_pattern_keeps_position() {
        let mut cur = Cursor::new("foo", 1);
        assert!(!cur.seek("[/"));
        assert_eq!(cur.pos(), 1);
    }
}
