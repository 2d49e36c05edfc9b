//! # Kinds
//!
//! The tag vocabulary and the markdown delimiter table. Every tag name and
//! delimiter meaning lives here; the parser asks these types rather than
//! hardcoding `"url"` or `**`.
//!
//! - **`tag`**: bracket tag names → [`Tag`] (combining, exclusive, `noparse`)
//! - **`markdown`**: delimiter → attributes, and the `:name:` emote shorthand

pub mod markdown;
pub mod tag;

pub use markdown::{EmoteShorthand, apply_delimiter};
pub use tag::{CombiningTag, Noparse, Tag};
