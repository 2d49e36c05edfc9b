//! # Parsing
//!
//! ```text
//! input → Scanner → TagStackMachine ⇄ markdown::classify
//!                          ↓
//!                     TreeBuilder → Vec<RichTextNode>
//! ```
//!
//! - **`machine`**: the tag stack machine, one decision per token
//! - **`markdown`**: opener/closer classification for markdown delimiters
//! - **`builder`**: the open span stack and folding into nodes

pub mod builder;
pub mod machine;
pub mod markdown;

use crate::node::RichTextNode;
use crate::options::ParseOptions;

use machine::TagStackMachine;

/// Parses a message into rich text, with or without markdown.
///
/// Every input produces a tree; malformed markup degrades to literal text.
pub fn parse(input: &str, markdown: bool) -> Vec<RichTextNode<'_>> {
    parse_with(input, &ParseOptions::new(markdown))
}

pub fn parse_with<'a>(input: &'a str, options: &ParseOptions) -> Vec<RichTextNode<'a>> {
    TagStackMachine::new(input, options).run()
}
