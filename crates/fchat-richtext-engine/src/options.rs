/// Knobs for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Recognize markdown delimiters in addition to bracket tags.
    pub markdown: bool,
    /// Maximum number of simultaneously open spans. Openers beyond this are
    /// kept as literal text. Never more than [`Self::MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
    /// Ceiling on `max_depth`. Building, dumping and dropping a tree recurse
    /// once per nesting level.
    pub const MAX_DEPTH_LIMIT: usize = 1024;

    pub fn new(markdown: bool) -> Self {
        Self {
            markdown,
            ..Self::default()
        }
    }

    /// Sets the depth cap, clamped to [`Self::MAX_DEPTH_LIMIT`].
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(Self::MAX_DEPTH_LIMIT);
        self
    }

    /// The depth cap actually enforced, even when `max_depth` was set
    /// directly.
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(Self::MAX_DEPTH_LIMIT)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            markdown: false,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
