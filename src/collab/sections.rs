//! Section parser for the phase-1 reply.
//!
//! The reply is expected to contain three marker lines, each exactly once and
//! in this order:
//!
//! ```text
//! HEAD_INSTRUCTIONS:
//! ...
//! SVG_BODY:
//! <svg ...>...</svg>
//! LEG_INSTRUCTIONS:
//! ...
//! ```
//!
//! Text before the first marker is ignored. The reply is scanned into marker
//! tokens and fed through a small state machine; any violation yields an
//! unstructured [`GenerationResult`] carrying the raw text.

use super::types::GenerationResult;
use std::fmt;

pub const HEAD_MARKER: &str = "HEAD_INSTRUCTIONS:";
pub const BODY_MARKER: &str = "SVG_BODY:";
pub const LEGS_MARKER: &str = "LEG_INSTRUCTIONS:";

/// One of the three named sections, in reply order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Head,
    Body,
    Legs,
}

impl Section {
    pub const ORDER: [Section; 3] = [Section::Head, Section::Body, Section::Legs];

    pub fn marker(self) -> &'static str {
        match self {
            Section::Head => HEAD_MARKER,
            Section::Body => BODY_MARKER,
            Section::Legs => LEGS_MARKER,
        }
    }
}

/// Why a reply failed the three-section layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureMismatch {
    Missing(Section),
    OutOfOrder { found: Section, expected: Section },
    Repeated(Section),
}

impl fmt::Display for StructureMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureMismatch::Missing(section) => write!(f, "missing {}", section.marker()),
            StructureMismatch::OutOfOrder { found, expected } => write!(
                f,
                "found {} where {} was expected",
                found.marker(),
                expected.marker()
            ),
            StructureMismatch::Repeated(section) => {
                write!(f, "{} appears more than once", section.marker())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerToken {
    section: Section,
    start: usize,
    end: usize,
}

/// Finds every marker occurrence, sorted by position.
fn tokenize(text: &str) -> Vec<MarkerToken> {
    let mut tokens: Vec<MarkerToken> = Section::ORDER
        .iter()
        .flat_map(|&section| {
            text.match_indices(section.marker())
                .map(move |(start, marker)| MarkerToken {
                    section,
                    start,
                    end: start + marker.len(),
                })
        })
        .collect();
    tokens.sort_by_key(|token| token.start);
    tokens
}

#[derive(Clone, Copy)]
enum ParseState {
    /// Before the head marker
    Preamble,
    /// Inside `section`, whose content begins at byte `content_start`
    Inside {
        section_index: usize,
        content_start: usize,
    },
}

/// Splits `text` into trimmed head, body and legs slices.
pub fn split_sections(text: &str) -> Result<[&str; 3], StructureMismatch> {
    let mut bounds = [(0usize, 0usize); 3];
    let mut state = ParseState::Preamble;

    for token in tokenize(text) {
        let next_index = match state {
            ParseState::Preamble => 0,
            ParseState::Inside { section_index, .. } => section_index + 1,
        };

        match Section::ORDER.get(next_index) {
            Some(&expected) if expected == token.section => {}
            Some(&expected) => {
                return Err(if Section::ORDER[..next_index].contains(&token.section) {
                    StructureMismatch::Repeated(token.section)
                } else {
                    StructureMismatch::OutOfOrder {
                        found: token.section,
                        expected,
                    }
                });
            }
            None => return Err(StructureMismatch::Repeated(token.section)),
        }

        if let ParseState::Inside {
            section_index,
            content_start,
        } = state
        {
            bounds[section_index] = (content_start, token.start);
        }
        state = ParseState::Inside {
            section_index: next_index,
            content_start: token.end,
        };
    }

    match state {
        ParseState::Inside {
            section_index: 2,
            content_start,
        } => bounds[2] = (content_start, text.len()),
        ParseState::Inside { section_index, .. } => {
            return Err(StructureMismatch::Missing(Section::ORDER[section_index + 1]));
        }
        ParseState::Preamble => return Err(StructureMismatch::Missing(Section::Head)),
    }

    Ok(bounds.map(|(start, end)| text[start..end].trim()))
}

/// Parses a phase-1 reply. Never fails; a layout violation degrades to raw text.
pub fn parse(raw_text: &str) -> GenerationResult {
    match split_sections(raw_text) {
        Ok([head, body, legs]) => {
            log::debug!(
                "Parsed sections: head {} bytes, body {} bytes, legs {} bytes",
                head.len(),
                body.len(),
                legs.len()
            );
            GenerationResult::structured(head, body, legs, raw_text)
        }
        Err(mismatch) => {
            log::warn!("Reply is not in the expected section layout: {mismatch}");
            GenerationResult::unstructured(raw_text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_reply() {
        let result =
            parse("HEAD_INSTRUCTIONS:\nfoo\nSVG_BODY:\n<svg>bar</svg>\nLEG_INSTRUCTIONS:\nbaz");
        assert!(result.is_structured);
        assert_eq!(result.head_text, "foo");
        assert_eq!(result.body_markup, "<svg>bar</svg>");
        assert_eq!(result.legs_text, "baz");
    }

    #[test]
    fn ignores_preamble_and_trims_sections() {
        let raw = "Sure! Here you go.\n\nHEAD_INSTRUCTIONS:\n  Draw a peach circle (#FFDBAC).  \n\n\
                   SVG_BODY:\n\n<svg width=\"300\"></svg>\n\nLEG_INSTRUCTIONS:\n Two black rectangles.\n\n";
        let result = parse(raw);
        assert!(result.is_structured);
        assert_eq!(result.head_text, "Draw a peach circle (#FFDBAC).");
        assert_eq!(result.body_markup, "<svg width=\"300\"></svg>");
        assert_eq!(result.legs_text, "Two black rectangles.");
        assert_eq!(result.raw_text, raw);
    }

    #[test]
    fn markers_without_content_yield_empty_sections() {
        let result = parse("HEAD_INSTRUCTIONS:SVG_BODY:LEG_INSTRUCTIONS:");
        assert!(result.is_structured);
        assert!(result.head_text.is_empty());
        assert!(!result.is_usable_for_vision());
    }

    #[test]
    fn no_markers_falls_back_to_raw_text() {
        let result = parse("no markers here");
        assert!(!result.is_structured);
        assert_eq!(result.raw_text, "no markers here");
        assert!(result.head_text.is_empty());
        assert!(result.body_markup.is_empty());
        assert!(result.legs_text.is_empty());
    }

    #[test]
    fn reports_missing_marker() {
        assert_eq!(
            split_sections("HEAD_INSTRUCTIONS: a SVG_BODY: b"),
            Err(StructureMismatch::Missing(Section::Legs))
        );
        assert_eq!(
            split_sections(""),
            Err(StructureMismatch::Missing(Section::Head))
        );
    }

    #[test]
    fn rejects_out_of_order_markers() {
        let raw = "SVG_BODY:\n<svg/>\nHEAD_INSTRUCTIONS:\nfoo\nLEG_INSTRUCTIONS:\nbaz";
        assert_eq!(
            split_sections(raw),
            Err(StructureMismatch::OutOfOrder {
                found: Section::Body,
                expected: Section::Head,
            })
        );
        let result = parse(raw);
        assert!(!result.is_structured);
        assert_eq!(result.raw_text, raw);
    }

    #[test]
    fn rejects_repeated_markers() {
        assert_eq!(
            split_sections("HEAD_INSTRUCTIONS: a SVG_BODY: b LEG_INSTRUCTIONS: c LEG_INSTRUCTIONS: d"),
            Err(StructureMismatch::Repeated(Section::Legs))
        );
        assert_eq!(
            split_sections("HEAD_INSTRUCTIONS: a HEAD_INSTRUCTIONS: b SVG_BODY: c LEG_INSTRUCTIONS: d"),
            Err(StructureMismatch::Repeated(Section::Head))
        );
        assert!(!parse("HEAD_INSTRUCTIONS: a SVG_BODY: b HEAD_INSTRUCTIONS: x LEG_INSTRUCTIONS: c").is_structured);
    }

    #[test]
    fn handles_multibyte_text_around_markers() {
        let result = parse("HEAD_INSTRUCTIONS: 🎨 cabeza\nSVG_BODY: <svg>ü</svg>\nLEG_INSTRUCTIONS: piernas ✓");
        assert!(result.is_structured);
        assert_eq!(result.head_text, "🎨 cabeza");
        assert_eq!(result.body_markup, "<svg>ü</svg>");
        assert_eq!(result.legs_text, "piernas ✓");
    }
}
