use std::fmt;

use crate::node::RichTextNode;

/// Formats nodes one per line, children indented two spaces.
///
/// ```text
/// Combining [bold]
///   Text "hi "
///   Exclusive emote-icon "wave"
/// ```
pub fn dump(nodes: &[RichTextNode<'_>]) -> String {
    Dump(nodes).to_string()
}

/// [`fmt::Display`] form of [`dump`].
pub struct Dump<'n, 'a>(pub &'n [RichTextNode<'a>]);

impl fmt::Display for Dump<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.0 {
            write_node(f, node, 0)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &RichTextNode<'_>, indent: usize) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    match node {
        RichTextNode::Text(text) => writeln!(f, "{prefix}Text {text:?}"),
        RichTextNode::Exclusive { kind, name } => writeln!(f, "{prefix}Exclusive {kind} {name:?}"),
        RichTextNode::Combining { attrs, children } => {
            writeln!(f, "{prefix}Combining [{attrs}]")?;
            for child in children {
                write_node(f, child, indent + 1)?;
            }
            Ok(())
        }
    }
}
