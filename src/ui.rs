//! Panel content for the three regions.
//!
//! Everything here is a pure function of the current state; nothing mutates.

use serde::Serialize;

use crate::collab::{OrchestrationState, PhaseStatus};
use crate::input::{ToolKind, ToolState};

pub const INSTRUCTIONS_PLACEHOLDER: &str = "Generate an artwork to start collaborating!";
pub const INSTRUCTIONS_LOADING: &str =
    "Analyzing artwork and generating character instructions...";
pub const VISION_PLACEHOLDER: &str = "Something special awaits...";
pub const VISION_LOADING: &str = "Following my own instructions...";
pub const BODY_MISSING: &str = "SVG not found";
pub const VISION_RETRY_NOTE: &str = "The reply was a description instead of markup. \
     Request the complete vision again; a second attempt often produces it.";

/// What one panel shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    /// Nothing requested yet
    Placeholder { text: &'static str },
    /// A request is in flight
    Loading { text: &'static str },
    /// Structured phase-1 instructions
    Instructions { head: String, legs: String },
    /// Vector markup to render
    Markup { markup: String },
    /// Unparsed reply text, optionally with a note on what went wrong
    RawText {
        text: String,
        note: Option<&'static str>,
    },
    /// Inline guidance after a refused request
    Guidance { text: String },
    /// Transport or image failure
    Error { text: String },
    /// Intentionally empty
    Empty,
}

/// Content of the left (instructions), right (body) and vision panels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Panels {
    pub title: Option<String>,
    pub instructions: Panel,
    pub body: Panel,
    pub vision: Panel,
}

pub fn panels(state: &OrchestrationState) -> Panels {
    Panels {
        title: state.selected_artwork.as_ref().map(|artwork| artwork.title()),
        instructions: instructions_panel(state),
        body: body_panel(state),
        vision: vision_panel(state),
    }
}

pub fn instructions_panel(state: &OrchestrationState) -> Panel {
    match (&state.phase1, &state.generation) {
        (PhaseStatus::Idle, _) => Panel::Placeholder {
            text: INSTRUCTIONS_PLACEHOLDER,
        },
        (PhaseStatus::Pending, _) => Panel::Loading {
            text: INSTRUCTIONS_LOADING,
        },
        (PhaseStatus::Failed(message), _) => Panel::Error {
            text: format!("Error: {message}"),
        },
        (PhaseStatus::Ready, Some(generation)) if generation.is_structured => {
            Panel::Instructions {
                head: generation.head_text.clone(),
                legs: generation.legs_text.clone(),
            }
        }
        (PhaseStatus::Ready, Some(generation)) => Panel::RawText {
            text: generation.raw_text.clone(),
            note: None,
        },
        (PhaseStatus::Ready, None) => Panel::Empty,
    }
}

pub fn body_panel(state: &OrchestrationState) -> Panel {
    match (&state.phase1, &state.generation) {
        (PhaseStatus::Ready, Some(generation)) if generation.is_structured => {
            if generation.body_markup.is_empty() {
                Panel::Error {
                    text: BODY_MISSING.to_string(),
                }
            } else {
                Panel::Markup {
                    markup: generation.body_markup.clone(),
                }
            }
        }
        _ => Panel::Empty,
    }
}

pub fn vision_panel(state: &OrchestrationState) -> Panel {
    if let Some(notice) = state.phase2_notice {
        return Panel::Guidance {
            text: notice.to_string(),
        };
    }

    match (&state.phase2, &state.vision) {
        (PhaseStatus::Idle, _) => Panel::Placeholder {
            text: VISION_PLACEHOLDER,
        },
        (PhaseStatus::Pending, _) => Panel::Loading {
            text: VISION_LOADING,
        },
        (PhaseStatus::Failed(message), _) => Panel::Error {
            text: format!("Error: {message}"),
        },
        (PhaseStatus::Ready, Some(vision)) if vision.is_markup_found => Panel::Markup {
            markup: vision.markup.clone(),
        },
        (PhaseStatus::Ready, Some(vision)) => Panel::RawText {
            text: vision.raw_text.clone(),
            note: Some(VISION_RETRY_NOTE),
        },
        (PhaseStatus::Ready, None) => Panel::Empty,
    }
}

/// One-line summary of the active tool, e.g. `Brush | Thickness: 3px | #000000`.
pub fn tool_status(tools: &ToolState) -> String {
    let snapshot = tools.active_snapshot();
    let label = capitalized(snapshot.kind.label());
    let measure = if snapshot.kind.is_continuous() {
        "Thickness"
    } else {
        "Size"
    };
    if snapshot.kind == ToolKind::Eraser {
        format!("{label} | {measure}: {}px", snapshot.value)
    } else {
        format!(
            "{label} | {measure}: {}px | {}",
            snapshot.value,
            snapshot.color.to_hex()
        )
    }
}

fn capitalized(word: &str) -> String {
    let mut chars = word.chars();
    chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default()
}

/// Plain-text rendering used by the command line front end.
pub fn render_text(panel: &Panel) -> String {
    match panel {
        Panel::Placeholder { text } | Panel::Loading { text } => (*text).to_string(),
        Panel::Instructions { head, legs } => {
            format!("Head Instructions:\n{head}\n\nLeg Instructions:\n{legs}")
        }
        Panel::Markup { markup } => markup.clone(),
        Panel::RawText { text, note: None } => text.clone(),
        Panel::RawText {
            text,
            note: Some(note),
        } => format!("{text}\n\n{note}"),
        Panel::Guidance { text } | Panel::Error { text } => text.clone(),
        Panel::Empty => String::new(),
    }
}
