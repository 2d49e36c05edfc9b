//! # fchat-richtext-engine
//!
//! Turns an F-Chat message into a tree of rich-text nodes. Two notations are
//! understood at once: bracket tags (`[b]`, `[color=red]`, `[url=...]`,
//! `[eicon]`, quick-close `[/]`, ...) and, when enabled, Discord-style
//! markdown (`**bold**`, `__underline__`, `||spoiler||`, `:emote:`).
//!
//! ```
//! use fchat_richtext_engine::{Attributes, RichTextNode, parse};
//!
//! let nodes = parse("[b]hi[/b]", false);
//! let bold = Attributes { bold: true, ..Attributes::default() };
//! assert_eq!(nodes, vec![RichTextNode::combining(bold, vec![RichTextNode::Text("hi")])]);
//! ```
//!
//! Parsing is pure and total: no I/O, no shared state, no error path. Text
//! leaves borrow from the input.

pub mod kinds;
pub mod node;
pub mod options;
pub mod parsing;
pub mod snapshot;

pub use node::{Attributes, Color, ExclusiveKind, RichTextNode, plain_text};
pub use options::ParseOptions;
pub use parsing::{parse, parse_with};
