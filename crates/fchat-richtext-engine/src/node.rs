//! Rich-text nodes produced by the parser.
//!
//! Text leaves borrow from the parsed message, so a node tree lives no longer
//! than its input.

use std::fmt;

use serde::{Serialize, Serializer};

/// One node of parsed rich text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RichTextNode<'a> {
    /// Plain text. Carries no formatting of its own; it is formatted by the
    /// `Combining` node it sits in.
    Text(&'a str),
    /// A formatted span. `attrs` is the complete, effective formatting of the
    /// span, including everything inherited from enclosing spans.
    Combining {
        attrs: Attributes<'a>,
        children: Vec<RichTextNode<'a>>,
    },
    /// An atomic element (emote icon, character reference or icon). Never
    /// carries or inherits formatting.
    Exclusive { kind: ExclusiveKind, name: &'a str },
}

impl<'a> RichTextNode<'a> {
    pub fn combining(attrs: Attributes<'a>, children: Vec<RichTextNode<'a>>) -> Self {
        RichTextNode::Combining { attrs, children }
    }

    pub fn exclusive(kind: ExclusiveKind, name: &'a str) -> Self {
        RichTextNode::Exclusive { kind, name }
    }

    /// Returns the text when this node is a `Text` leaf.
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            RichTextNode::Text(text) => Some(*text),
            _ => None,
        }
    }

    /// Returns the children of a `Combining` node.
    pub fn children(&self) -> Option<&[RichTextNode<'a>]> {
        match self {
            RichTextNode::Combining { children, .. } => Some(children.as_slice()),
            _ => None,
        }
    }

    /// Returns the formatting of a `Combining` node.
    pub fn attrs(&self) -> Option<&Attributes<'a>> {
        match self {
            RichTextNode::Combining { attrs, .. } => Some(attrs),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, RichTextNode::Text(_))
    }

    /// Concatenated visible text of this node and its descendants. Exclusive
    /// nodes contribute their name.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.write_plain_text(&mut out);
        out
    }

    fn write_plain_text(&self, out: &mut String) {
        match self {
            RichTextNode::Text(text) => out.push_str(text),
            RichTextNode::Combining { children, .. } => {
                for child in children {
                    child.write_plain_text(out);
                }
            }
            RichTextNode::Exclusive { name, .. } => out.push_str(name),
        }
    }
}

/// Concatenated visible text of a whole node sequence.
pub fn plain_text(nodes: &[RichTextNode<'_>]) -> String {
    nodes.iter().map(RichTextNode::plain_text).collect()
}

/// The formatting of a `Combining` span.
///
/// Everything is additive across nesting except `color`, where the innermost
/// value wins, and `url`, which never nests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Attributes<'a> {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub italic: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub underline: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub strike: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub superscript: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub subscript: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub spoiler: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub noparse: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color<'a>>,
}

impl<'a> Attributes<'a> {
    /// The formatting of a `noparse` span, which inherits nothing.
    pub fn noparse() -> Self {
        Self {
            noparse: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for Attributes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.bold, "bold"),
            (self.italic, "italic"),
            (self.underline, "underline"),
            (self.strike, "strike"),
            (self.superscript, "sup"),
            (self.subscript, "sub"),
            (self.spoiler, "spoiler"),
            (self.noparse, "noparse"),
        ];

        let mut sep = "";
        for (set, name) in flags {
            if set {
                write!(f, "{sep}{name}")?;
                sep = ", ";
            }
        }
        if let Some(url) = self.url {
            write!(f, "{sep}url={url}")?;
            sep = ", ";
        }
        if let Some(color) = self.color {
            write!(f, "{sep}color={color}")?;
        }
        Ok(())
    }
}

/// A `[color=...]` value. Anything outside the twelve named colors is kept
/// as-is in `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color<'a> {
    Red,
    Orange,
    Yellow,
    Green,
    Cyan,
    Blue,
    Purple,
    Pink,
    Black,
    Brown,
    White,
    Gray,
    Other(&'a str),
}

impl<'a> Color<'a> {
    pub const NAMED: [Color<'static>; 12] = [
        Color::Red,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Cyan,
        Color::Blue,
        Color::Purple,
        Color::Pink,
        Color::Black,
        Color::Brown,
        Color::White,
        Color::Gray,
    ];

    /// Reads a color value. Names are matched exactly (lowercase).
    pub fn parse(value: &'a str) -> Self {
        match value {
            "red" => Color::Red,
            "orange" => Color::Orange,
            "yellow" => Color::Yellow,
            "green" => Color::Green,
            "cyan" => Color::Cyan,
            "blue" => Color::Blue,
            "purple" => Color::Purple,
            "pink" => Color::Pink,
            "black" => Color::Black,
            "brown" => Color::Brown,
            "white" => Color::White,
            "gray" => Color::Gray,
            other => Color::Other(other),
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::Black => "black",
            Color::Brown => "brown",
            Color::White => "white",
            Color::Gray => "gray",
            Color::Other(value) => *value,
        }
    }
}

impl fmt::Display for Color<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Color<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The kinds of atomic element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExclusiveKind {
    /// `[eicon]name[/eicon]`, or `:name:` in markdown mode
    EmoteIcon,
    /// `[user]name[/user]`
    CharacterReference,
    /// `[icon]name[/icon]`
    CharacterIcon,
}

impl ExclusiveKind {
    pub const ALL: [ExclusiveKind; 3] = [
        ExclusiveKind::EmoteIcon,
        ExclusiveKind::CharacterReference,
        ExclusiveKind::CharacterIcon,
    ];

    /// The bracket tag name that opens and closes this kind.
    pub fn tag_name(self) -> &'static str {
        match self {
            ExclusiveKind::EmoteIcon => "eicon",
            ExclusiveKind::CharacterReference => "user",
            ExclusiveKind::CharacterIcon => "icon",
        }
    }

    /// Closing tag names that end this kind's verbatim content.
    pub fn closers(self) -> &'static [&'static str] {
        match self {
            ExclusiveKind::EmoteIcon => &["eicon"],
            ExclusiveKind::CharacterReference => &["user"],
            ExclusiveKind::CharacterIcon => &["icon"],
        }
    }

    pub fn from_tag_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag_name() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExclusiveKind::EmoteIcon => "emote-icon",
            ExclusiveKind::CharacterReference => "character-reference",
            ExclusiveKind::CharacterIcon => "character-icon",
        }
    }
}

impl fmt::Display for ExclusiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
