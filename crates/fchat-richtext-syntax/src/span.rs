/// A byte range `[start, end)` into the scanned input.
///
/// Tokens and text leaves store spans rather than copied text, so slicing the
/// input with any span reproduces the exact source bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted span {start}..{end}");
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The source text covered by this span.
    pub fn slice(self, input: &str) -> &str {
        &input[self.start..self.end]
    }

    /// True when `next` begins exactly where this span ends.
    pub fn abuts(self, next: Span) -> bool {
        self.end == next.start
    }
}
