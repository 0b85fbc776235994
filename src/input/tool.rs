//! Drawing tool selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Drawing tool selection.
///
/// Exactly one tool is active at a time. Brush and eraser draw continuous
/// strokes while dragging; the three shapes stamp once at the click point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Freehand stroke in the shared color (default)
    #[default]
    Brush,
    /// Freehand stroke in the canvas background color
    Eraser,
    /// Filled circle, size is the diameter
    Circle,
    /// Filled square, size is the side length
    Square,
    /// Filled apex-up triangle, size is base and height
    Triangle,
}

impl ToolKind {
    /// Whether dragging with this tool extends a continuous stroke.
    pub fn is_continuous(self) -> bool {
        matches!(self, ToolKind::Brush | ToolKind::Eraser)
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Eraser => "eraser",
            ToolKind::Circle => "circle",
            ToolKind::Square => "square",
            ToolKind::Triangle => "triangle",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
