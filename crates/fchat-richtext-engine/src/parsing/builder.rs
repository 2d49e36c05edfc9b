//! # Tree Builder
//!
//! Owns the stack of open spans and folds each one into a node when it closes.
//!
//! The stack is a plain `Vec<Frame>` indexed by depth, with the root frame at
//! index 0 collecting the output. Children accumulate on whichever frame is on
//! top, so nothing ever points back up the stack.
//!
//! A frame leaves the stack in one of two ways:
//!
//! - **fold**: it becomes one formatted span appended to the frame below.
//!   Unknown tags fold by splicing their children into the parent instead,
//!   since they add no formatting.
//! - **dissolve**: its opening token is re-emitted as text and its children
//!   are spliced into the parent, as if it had never opened. This is how
//!   unbalanced markdown and dangling unknown tags degrade.
//!
//! Attributes are resolved top-down in [`TreeBuilder::finish`], once every
//! span has its final parent. A folded span inside a frame that later
//! dissolves therefore inherits nothing from it.

use fchat_richtext_syntax::{Delimiter, Span};

use crate::kinds::{CombiningTag, apply_delimiter};
use crate::node::{Attributes, RichTextNode};

/// Where an open span came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin<'a> {
    Root,
    /// A bracket tag. `tag` is `None` for names outside the vocabulary.
    Tag {
        name: &'a str,
        tag: Option<CombiningTag>,
    },
    Markdown(Delimiter),
}

impl<'a> Origin<'a> {
    pub fn is_tag(&self) -> bool {
        matches!(self, Origin::Tag { .. })
    }

    /// Adds this span's own formatting to the inherited `attrs`.
    pub fn apply(self, attrs: &mut Attributes<'a>, value: Option<&'a str>) {
        match self {
            Origin::Tag { tag: Some(tag), .. } => tag.apply(attrs, value),
            Origin::Markdown(delimiter) => apply_delimiter(delimiter, attrs),
            Origin::Tag { tag: None, .. } | Origin::Root => {}
        }
    }
}

/// Accumulated content of an open frame. Text stays a span until output is
/// built so contiguous pieces can merge.
#[derive(Debug)]
enum Child<'a> {
    Text(Span),
    /// A finished node that carries its own formatting (exclusive, noparse).
    Node(RichTextNode<'a>),
    /// A closed span, formatting not yet resolved.
    Folded(Folded<'a>),
}

#[derive(Debug)]
struct Folded<'a> {
    origin: Origin<'a>,
    value: Option<&'a str>,
    children: Vec<Child<'a>>,
}

/// One open span.
#[derive(Debug)]
pub struct Frame<'a> {
    pub origin: Origin<'a>,
    /// The token that opened this frame.
    pub opener: Span,
    /// The tag value (`red` in `[color=red]`), if any.
    pub value: Option<&'a str>,
    children: Vec<Child<'a>>,
}

impl<'a> Frame<'a> {
    fn root() -> Self {
        Self {
            origin: Origin::Root,
            opener: Span::new(0, 0),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn has_content(&self) -> bool {
        !self.children.is_empty()
    }
}

pub struct TreeBuilder<'a> {
    input: &'a str,
    stack: Vec<Frame<'a>>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            stack: vec![Frame::root()],
        }
    }

    /// Number of open spans, not counting the root.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// The open frames, root first.
    pub fn frames(&self) -> &[Frame<'a>] {
        &self.stack
    }

    fn top_mut(&mut self) -> &mut Frame<'a> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Opens a span on top of the stack.
    pub fn open(&mut self, origin: Origin<'a>, opener: Span, value: Option<&'a str>) {
        self.stack.push(Frame {
            origin,
            opener,
            value,
            children: Vec::new(),
        });
    }

    /// Appends source text to the innermost open span.
    pub fn text(&mut self, span: Span) {
        if span.is_empty() {
            return;
        }
        let children = &mut self.top_mut().children;
        if let Some(Child::Text(prev)) = children.last_mut() {
            if prev.abuts(span) {
                prev.end = span.end;
                return;
            }
        }
        children.push(Child::Text(span));
    }

    /// Appends a finished node to the innermost open span.
    pub fn node(&mut self, node: RichTextNode<'a>) {
        self.top_mut().children.push(Child::Node(node));
    }

    /// Closes the frame at `index` and every frame above it, innermost first.
    pub fn close(&mut self, index: usize) {
        debug_assert!(index > 0 && index < self.stack.len());
        self.unwind_above(index);
        if let Some(frame) = self.stack.pop() {
            self.fold(frame);
        }
    }

    /// Closes the markdown frame at `index` with its matching `closer`. A span
    /// with nothing inside stays literal text, delimiters included.
    pub fn close_markdown(&mut self, index: usize, closer: Span) {
        debug_assert!(index > 0 && index < self.stack.len());
        self.unwind_above(index);
        let Some(frame) = self.stack.pop() else {
            return;
        };
        if frame.has_content() {
            self.fold(frame);
        } else {
            self.dissolve(frame);
            self.text(closer);
        }
    }

    /// Closes everything still open at end of input and returns the output.
    ///
    /// Known tags close silently as spans over the rest of the input. Markdown
    /// openers and unknown tags were never balanced and revert to text.
    pub fn finish(mut self) -> Vec<RichTextNode<'a>> {
        while self.depth() > 0 {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            match frame.origin {
                Origin::Tag { tag: Some(_), .. } => self.fold(frame),
                _ => self.dissolve(frame),
            }
        }

        let input = self.input;
        self.stack
            .pop()
            .map(|root| to_nodes(input, root.children, Attributes::default()))
            .unwrap_or_default()
    }

    /// Pops the frames above `index` on behalf of a close aimed lower down.
    /// Bracket tags fold; markdown, which must be closed by its own
    /// delimiter, dissolves.
    fn unwind_above(&mut self, index: usize) {
        while self.stack.len() > index + 1 {
            let Some(frame) = self.stack.pop() else {
                break;
            };
            match frame.origin {
                Origin::Markdown(_) => self.dissolve(frame),
                _ => self.fold(frame),
            }
        }
    }

    fn fold(&mut self, frame: Frame<'a>) {
        match frame.origin {
            Origin::Tag { tag: None, .. } | Origin::Root => self.splice(frame.children),
            Origin::Tag { .. } | Origin::Markdown(_) => {
                self.top_mut().children.push(Child::Folded(Folded {
                    origin: frame.origin,
                    value: frame.value,
                    children: frame.children,
                }));
            }
        }
    }

    fn dissolve(&mut self, frame: Frame<'a>) {
        log::trace!(
            "unbalanced opener {:?} at {} kept as text",
            frame.opener.slice(self.input),
            frame.opener.start
        );
        self.text(frame.opener);
        self.splice(frame.children);
    }

    fn splice(&mut self, children: Vec<Child<'a>>) {
        for child in children {
            match child {
                Child::Text(span) => self.text(span),
                other => self.top_mut().children.push(other),
            }
        }
    }
}

/// Builds output nodes for `children` of a span whose effective formatting
/// is `attrs`.
fn to_nodes<'a>(
    input: &'a str,
    children: Vec<Child<'a>>,
    attrs: Attributes<'a>,
) -> Vec<RichTextNode<'a>> {
    children
        .into_iter()
        .map(|child| match child {
            Child::Text(span) => RichTextNode::Text(span.slice(input)),
            Child::Node(node) => node,
            Child::Folded(folded) => {
                let mut own = attrs;
                folded.origin.apply(&mut own, folded.value);
                RichTextNode::combining(own, to_nodes(input, folded.children, own))
            }
        })
        .collect()
}
