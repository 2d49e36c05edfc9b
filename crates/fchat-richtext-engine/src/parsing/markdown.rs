//! # Markdown Disambiguator
//!
//! Decides whether a markdown delimiter opens or closes a span. It shares the
//! tree builder's stack but matches by spelling, not by tag name.
//!
//! The search is pessimistic: it walks down from the top of the stack through
//! markdown frames only. The first bracket-tag frame is a wall, so a
//! delimiter never closes a span opened on the far side of `[b]...[/b]`.

use fchat_richtext_syntax::{Delimiter, Span};

use crate::kinds::EmoteShorthand;
use crate::node::{ExclusiveKind, RichTextNode};

use super::builder::{Frame, Origin};

/// What a delimiter occurrence does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Opener,
    /// Closes the frame at this stack index.
    Closer(usize),
}

pub fn classify(frames: &[Frame<'_>], delimiter: Delimiter) -> Role {
    for (index, frame) in frames.iter().enumerate().rev() {
        match frame.origin {
            Origin::Markdown(open) if open == delimiter => return Role::Closer(index),
            Origin::Markdown(_) => {}
            Origin::Tag { .. } | Origin::Root => break,
        }
    }
    Role::Opener
}

/// `:` only counts as markdown when the innermost open span (if any) is
/// markdown too; inside a bracket tag it is ordinary text.
pub fn colon_allowed(frames: &[Frame<'_>]) -> bool {
    !frames.last().is_some_and(|frame| frame.origin.is_tag())
}

/// Reads `:name:` starting at the `colon` token. Returns the emote node and
/// the offset just past its closing colon.
pub fn emote<'a>(input: &'a str, colon: Span) -> Option<(RichTextNode<'a>, usize)> {
    let (name, end) = EmoteShorthand::match_at(input, colon.end)?;
    Some((
        RichTextNode::exclusive(ExclusiveKind::EmoteIcon, name.slice(input)),
        end,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::CombiningTag;
    use crate::parsing::builder::TreeBuilder;
    use pretty_assertions::assert_eq;

    fn tree_with(origins: &[Origin<'static>]) -> TreeBuilder<'static> {
        let mut tree = TreeBuilder::new("");
        for origin in origins {
            tree.open(*origin, Span::new(0, 0), None);
        }
        tree
    }

    const BOLD: Origin<'static> = Origin::Tag {
        name: "b",
        tag: Some(CombiningTag::Bold),
    };

    #[test]
    fn empty_stack_opens() {
        let tree = tree_with(&[]);
        assert_eq!(classify(tree.frames(), Delimiter::Star), Role::Opener);
    }

    #[test]
    fn same_spelling_on_top_closes() {
        let tree = tree_with(&[Origin::Markdown(Delimiter::Star)]);
        assert_eq!(classify(tree.frames(), Delimiter::Star), Role::Closer(1));
    }

    #[test]
    fn spellings_do_not_cross_match() {
        let tree = tree_with(&[Origin::Markdown(Delimiter::Star)]);
        assert_eq!(classify(tree.frames(), Delimiter::Underscore), Role::Opener);
        assert_eq!(classify(tree.frames(), Delimiter::DoubleStar), Role::Opener);
    }

    #[test]
    fn search_passes_other_markdown() {
        let tree = tree_with(
            &[
                Origin::Markdown(Delimiter::Star),
                Origin::Markdown(Delimiter::Underscore),
            ],
        );
        assert_eq!(classify(tree.frames(), Delimiter::Star), Role::Closer(1));
    }

    #[test]
    fn bracket_tag_is_a_wall() {
        let tree = tree_with(&[Origin::Markdown(Delimiter::Star), BOLD]);
        assert_eq!(classify(tree.frames(), Delimiter::Star), Role::Opener);
    }

    #[test]
    fn innermost_same_spelling_wins() {
        let tree = tree_with(
            &[
                Origin::Markdown(Delimiter::DoublePipe),
                BOLD,
                Origin::Markdown(Delimiter::DoublePipe),
            ],
        );
        assert_eq!(classify(tree.frames(), Delimiter::DoublePipe), Role::Closer(3));
    }

    #[test]
    fn colon_context() {
        assert!(colon_allowed(tree_with(&[]).frames()));
        assert!(colon_allowed(
            tree_with(&[BOLD, Origin::Markdown(Delimiter::Star)]).frames()
        ));
        assert!(!colon_allowed(
            tree_with(&[Origin::Markdown(Delimiter::Star), BOLD]).frames()
        ));
    }

    #[test]
    fn emote_reads_name() {
        let input = "hi :wave: there";
        let (node, end) = emote(input, Span::new(3, 4)).unwrap();
        assert_eq!(node, RichTextNode::exclusive(ExclusiveKind::EmoteIcon, "wave"));
        assert_eq!(&input[end..], " there");
        assert_eq!(emote("a: b", Span::new(1, 2)), None);
    }
}
