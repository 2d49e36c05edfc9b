//! # Tag Stack Machine
//!
//! Drives the scanner and decides, token by token, what happens to the open
//! span stack:
//!
//! | Token | Effect |
//! |-------|--------|
//! | `[b]`, `[color=red]`, unknown `[x]` | push a frame |
//! | `[url=...]` inside a url | literal text |
//! | `[eicon]`, `[icon]`, `[user]` | verbatim scan to the matching close, one exclusive node |
//! | `[noparse]` | verbatim scan to `[/noparse]` or `[/]` |
//! | `[/name]` | close the nearest frame with that name and everything above it |
//! | `[/]` | close the innermost frame |
//! | markdown delimiter | ask the disambiguator |
//! | text | append to the innermost frame |
//!
//! Nothing here can fail. Whatever doesn't fit is re-emitted as the literal
//! text it was written as.
//!
//! Verbatim searches that come up empty are remembered per closer set. The
//! scanner only moves forward, so the same search would fail again, and
//! repeating it for every unclosed opener would make parsing quadratic.

use fchat_richtext_syntax::{CloseMatch, Delimiter, Scanner, Token, TokenKind};

use crate::kinds::{CombiningTag, Noparse, Tag};
use crate::node::{Attributes, ExclusiveKind, RichTextNode};
use crate::options::ParseOptions;

use super::builder::{Origin, TreeBuilder};
use super::markdown::{self, Role};

pub struct TagStackMachine<'a> {
    scanner: Scanner<'a>,
    tree: TreeBuilder<'a>,
    options: ParseOptions,
    /// Closer sets with no occurrence left in the rest of the input.
    unclosed: Vec<&'static [&'static str]>,
}

impl<'a> TagStackMachine<'a> {
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(input, options.markdown),
            tree: TreeBuilder::new(input),
            options: *options,
            unclosed: Vec::new(),
        }
    }

    /// Consumes the whole input and returns the finished nodes.
    pub fn run(mut self) -> Vec<RichTextNode<'a>> {
        while let Some(token) = self.scanner.next_token() {
            match token.kind {
                TokenKind::Text => self.tree.text(token.span),
                TokenKind::OpenTag { name, value } => self.open_tag(token, name, value),
                TokenKind::CloseTag { name } => self.close_tag(token, name),
                TokenKind::Delimiter(delimiter) => self.delimiter(token, delimiter),
            }
        }
        self.tree.finish()
    }

    fn open_tag(&mut self, token: Token<'a>, name: &'a str, value: Option<&'a str>) {
        match Tag::from_name(name) {
            Tag::Exclusive(kind) => self.exclusive(token, kind),
            Tag::Noparse => self.noparse(token),
            Tag::Combining(CombiningTag::Url) => self.url(token, name, value),
            Tag::Combining(tag) => self.push_tag(token, name, Some(tag), value),
            Tag::Unknown => self.push_tag(token, name, None, value),
        }
    }

    fn push_tag(
        &mut self,
        token: Token<'a>,
        name: &'a str,
        tag: Option<CombiningTag>,
        value: Option<&'a str>,
    ) {
        if self.at_depth_limit(&token) {
            return;
        }
        self.tree.open(Origin::Tag { name, tag }, token.span, value);
    }

    /// Urls never nest. A valueless `[url]` links to its own raw content.
    fn url(&mut self, token: Token<'a>, name: &'a str, value: Option<&'a str>) {
        let in_url = self.tree.frames().iter().any(|frame| {
            matches!(
                frame.origin,
                Origin::Tag {
                    tag: Some(CombiningTag::Url),
                    ..
                }
            )
        });
        if in_url {
            self.literal(&token, "url inside url");
            return;
        }

        let target = match value {
            Some(value) => value,
            None => self.url_target(),
        };
        self.push_tag(token, name, Some(CombiningTag::Url), Some(target));
    }

    fn url_target(&mut self) -> &'a str {
        let input = self.scanner.input();
        match self.find_close(&CombiningTag::URL_CLOSERS) {
            Some(found) => found.content.slice(input),
            None => &input[self.scanner.pos()..],
        }
    }

    fn exclusive(&mut self, token: Token<'a>, kind: ExclusiveKind) {
        match self.find_close(kind.closers()) {
            Some(found) => {
                let name = found.content.slice(self.scanner.input());
                self.tree.node(RichTextNode::exclusive(kind, name));
                self.scanner.skip_to(found.close.end);
            }
            None => self.literal(&token, "unclosed exclusive tag"),
        }
    }

    fn noparse(&mut self, token: Token<'a>) {
        match self.find_close(&Noparse::CLOSERS) {
            Some(found) => {
                let mut children = Vec::new();
                if !found.content.is_empty() {
                    children.push(RichTextNode::Text(
                        found.content.slice(self.scanner.input()),
                    ));
                }
                self.tree
                    .node(RichTextNode::combining(Attributes::noparse(), children));
                self.scanner.skip_to(found.close.end);
            }
            None => self.literal(&token, "unclosed noparse"),
        }
    }

    /// Verbatim search for the next closing tag named in `closers`.
    fn find_close(&mut self, closers: &'static [&'static str]) -> Option<CloseMatch> {
        if self.unclosed.contains(&closers) {
            return None;
        }
        let found = self.scanner.find_close_tag(closers);
        if found.is_none() {
            log::trace!("no {closers:?} closer after {}", self.scanner.pos());
            self.unclosed.push(closers);
        }
        found
    }

    fn close_tag(&mut self, token: Token<'a>, name: &'a str) {
        if token.is_quick_close() {
            match self.tree.depth() {
                0 => self.literal(&token, "quick-close with nothing open"),
                top => self.tree.close(top),
            }
            return;
        }

        // Markdown frames carry no name, so they are never a match here.
        let found = self.tree.frames().iter().rposition(
            |frame| matches!(frame.origin, Origin::Tag { name: open, .. } if open == name),
        );
        match found {
            Some(index) => self.tree.close(index),
            None => self.literal(&token, "unmatched closing tag"),
        }
    }

    fn delimiter(&mut self, token: Token<'a>, delimiter: Delimiter) {
        if delimiter == Delimiter::Colon {
            self.colon(token);
            return;
        }

        match markdown::classify(self.tree.frames(), delimiter) {
            Role::Closer(index) => self.tree.close_markdown(index, token.span),
            Role::Opener => {
                if !self.at_depth_limit(&token) {
                    self.tree.open(Origin::Markdown(delimiter), token.span, None);
                }
            }
        }
    }

    fn colon(&mut self, token: Token<'a>) {
        if !markdown::colon_allowed(self.tree.frames()) {
            self.tree.text(token.span);
            return;
        }
        match markdown::emote(self.scanner.input(), token.span) {
            Some((node, end)) => {
                self.tree.node(node);
                self.scanner.skip_to(end);
            }
            None => self.tree.text(token.span),
        }
    }

    /// Keeps an opener as text once the depth limit is reached.
    fn at_depth_limit(&mut self, token: &Token<'a>) -> bool {
        let limit = self.options.depth_limit();
        if self.tree.depth() < limit {
            return false;
        }
        log::debug!(
            "depth limit {} reached; {:?} at {} kept as text",
            limit,
            token.text,
            token.span.start
        );
        self.tree.text(token.span);
        true
    }

    fn literal(&mut self, token: &Token<'a>, reason: &str) {
        log::trace!("{reason}: {:?} at {} kept as text", token.text, token.span.start);
        self.tree.text(token.span);
    }
}
