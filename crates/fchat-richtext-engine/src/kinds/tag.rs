use crate::node::{Attributes, Color, ExclusiveKind};

/// What a bracket tag name means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    /// A formatting span that combines with others.
    Combining(CombiningTag),
    /// An atomic element whose content is taken verbatim.
    Exclusive(ExclusiveKind),
    /// Verbatim text, no formatting recognized inside.
    Noparse,
    /// Any other lowercase name. Opens an inert span.
    Unknown,
}

impl Tag {
    pub fn from_name(name: &str) -> Self {
        if name == Noparse::NAME {
            return Tag::Noparse;
        }
        if let Some(tag) = CombiningTag::from_name(name) {
            return Tag::Combining(tag);
        }
        match ExclusiveKind::from_tag_name(name) {
            Some(kind) => Tag::Exclusive(kind),
            None => Tag::Unknown,
        }
    }
}

/// Bracket tags that open a combining span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombiningTag {
    Bold,
    Italic,
    Underline,
    Strike,
    Superscript,
    Subscript,
    Spoiler,
    Url,
    Color,
}

impl CombiningTag {
    pub const ALL: [CombiningTag; 9] = [
        CombiningTag::Bold,
        CombiningTag::Italic,
        CombiningTag::Underline,
        CombiningTag::Strike,
        CombiningTag::Superscript,
        CombiningTag::Subscript,
        CombiningTag::Spoiler,
        CombiningTag::Url,
        CombiningTag::Color,
    ];

    /// Closing tag names that end a valueless `[url]`'s link target.
    pub const URL_CLOSERS: [&'static str; 1] = ["url"];

    pub fn name(self) -> &'static str {
        match self {
            CombiningTag::Bold => "b",
            CombiningTag::Italic => "i",
            CombiningTag::Underline => "u",
            CombiningTag::Strike => "s",
            CombiningTag::Superscript => "sup",
            CombiningTag::Subscript => "sub",
            CombiningTag::Spoiler => "spoiler",
            CombiningTag::Url => "url",
            CombiningTag::Color => "color",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tag| tag.name() == name)
    }

    /// Adds this tag's formatting on top of the inherited `attrs`.
    ///
    /// Values are ignored on tags that take none. A valueless `[color]`
    /// keeps the inherited color.
    pub fn apply<'a>(self, attrs: &mut Attributes<'a>, value: Option<&'a str>) {
        match self {
            CombiningTag::Bold => attrs.bold = true,
            CombiningTag::Italic => attrs.italic = true,
            CombiningTag::Underline => attrs.underline = true,
            CombiningTag::Strike => attrs.strike = true,
            CombiningTag::Superscript => attrs.superscript = true,
            CombiningTag::Subscript => attrs.subscript = true,
            CombiningTag::Spoiler => attrs.spoiler = true,
            CombiningTag::Url => {
                if value.is_some() {
                    attrs.url = value;
                }
            }
            CombiningTag::Color => {
                if let Some(value) = value {
                    attrs.color = Some(Color::parse(value));
                }
            }
        }
    }
}

/// The `noparse` tag, which closes with `[/noparse]` or the quick-close `[/]`.
pub struct Noparse;

impl Noparse {
    pub const NAME: &'static str = "noparse";
    pub const CLOSERS: [&'static str; 2] = [Self::NAME, ""];
}
