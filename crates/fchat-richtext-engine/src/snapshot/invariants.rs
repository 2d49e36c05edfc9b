use crate::node::{Attributes, RichTextNode};

/// Asserts the structural guarantees of a parse result for `input`:
///
/// - every text and exclusive name borrows from `input`, in source order
/// - text leaves are never empty
/// - `noparse` spans carry only `noparse` and hold at most one text leaf
/// - nested spans keep every inherited flag and the enclosing url
pub fn check(input: &str, nodes: &[RichTextNode<'_>]) {
    let mut cursor = 0;
    for node in nodes {
        check_node(input, node, None, &mut cursor);
    }
}

fn check_node(
    input: &str,
    node: &RichTextNode<'_>,
    parent: Option<&Attributes<'_>>,
    cursor: &mut usize,
) {
    match node {
        RichTextNode::Text(text) => {
            assert!(!text.is_empty(), "empty text leaf");
            check_slice(input, text, cursor);
        }
        RichTextNode::Exclusive { name, .. } => check_slice(input, name, cursor),
        RichTextNode::Combining { attrs, children } => {
            if attrs.noparse {
                assert_eq!(*attrs, Attributes::noparse(), "noparse span with other formatting");
                assert!(children.len() <= 1, "noparse span with {} children", children.len());
                assert!(children.iter().all(RichTextNode::is_text), "noparse span with nested nodes");
            } else if let Some(parent) = parent {
                check_inherits(parent, attrs);
            }
            for child in children {
                check_node(input, child, Some(attrs), cursor);
            }
        }
    }
}

fn check_inherits(parent: &Attributes<'_>, child: &Attributes<'_>) {
    let flags = [
        (parent.bold, child.bold, "bold"),
        (parent.italic, child.italic, "italic"),
        (parent.underline, child.underline, "underline"),
        (parent.strike, child.strike, "strike"),
        (parent.superscript, child.superscript, "superscript"),
        (parent.subscript, child.subscript, "subscript"),
        (parent.spoiler, child.spoiler, "spoiler"),
    ];
    for (outer, inner, name) in flags {
        assert!(!outer || inner, "nested span lost {name}: [{parent}] > [{child}]");
    }
    if parent.url.is_some() {
        assert_eq!(parent.url, child.url, "url changed inside a url span");
    }
}

fn check_slice(input: &str, slice: &str, cursor: &mut usize) {
    let start = (slice.as_ptr() as usize).checked_sub(input.as_ptr() as usize);
    let start = match start {
        Some(start) if start + slice.len() <= input.len() => start,
        _ => panic!("slice {slice:?} does not borrow from the input"),
    };
    assert!(
        start >= *cursor,
        "slice {slice:?} at {start} overlaps or precedes the previous one (ends at {cursor})"
    );
    *cursor = start + slice.len();
}
