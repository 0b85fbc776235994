//! Locates the embedded vector markup block in a model reply.

use serde::Serialize;

pub const MARKUP_OPEN: &str = "<svg";
pub const MARKUP_CLOSE: &str = "</svg>";

/// Result of searching a reply for a markup block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MarkupExtraction {
    pub markup: String,
    pub is_markup_found: bool,
}

/// Byte range of the outermost markup block, from the first opening token to
/// the end of the last closing token.
pub fn find_markup(text: &str) -> Option<std::ops::Range<usize>> {
    let start = text.find(MARKUP_OPEN)?;
    let close = text.rfind(MARKUP_CLOSE)?;
    (start < close).then(|| start..close + MARKUP_CLOSE.len())
}

/// Extracts the markup block, tolerating prose before and after it.
pub fn extract(text: &str) -> MarkupExtraction {
    match find_markup(text) {
        Some(range) => MarkupExtraction {
            markup: text[range].to_string(),
            is_markup_found: true,
        },
        None => MarkupExtraction::default(),
    }
}
