#![forbid(unsafe_code)]

use tracing::trace;

use crate::parser::parse_tag;
use crate::tag::Tag;

/// Find the tag enclosing `caret`.
///
/// Only the nearest `<` at or before the caret is tried. If the tag there is
/// malformed, or ends before the caret, there is no enclosing tag; earlier
/// tags are never considered.
#[must_use]
pub fn locate_tag(text: &str, caret: usize) -> Option<Tag> {
    let bytes = text.as_bytes();
    let from = caret.min(bytes.len().checked_sub(1)?);
    let start = bytes[..=from].iter().rposition(|&b| b == b'<')?;
    let tag = parse_tag(text, start)?;
    if tag.contains(caret) {
        Some(tag)
    } else {
        trace!(caret, start, end = tag.span.end, "caret is past the nearest tag");
        None
    }
}
