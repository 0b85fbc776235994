//! Per-tool parameters and the active tool selection.

use super::tool::ToolKind;
use crate::draw::{Color, color::BLACK};
use serde::Serialize;

/// Inclusive bounds and starting value of one slider-backed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl ParameterRange {
    /// Clamps an arbitrary input into the range, rounding to whole pixels.
    ///
    /// NaN maps to the lower bound.
    pub fn clamp(&self, value: f64) -> u32 {
        if value.is_nan() {
            return self.min;
        }
        value.round().clamp(self.min as f64, self.max as f64) as u32
    }
}

pub const BRUSH_THICKNESS: ParameterRange = ParameterRange {
    min: 1,
    max: 15,
    default: 3,
};

pub const ERASER_THICKNESS: ParameterRange = ParameterRange {
    min: 5,
    max: 30,
    default: 10,
};

/// Shared by circle, square and triangle.
pub const SHAPE_SIZE: ParameterRange = ParameterRange {
    min: 20,
    max: 100,
    default: 50,
};

/// Stored parameter values, one numeric value per tool family plus one color.
///
/// Each value is only ever written through its own tool kind, so editing one
/// never disturbs another.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToolParameters {
    pub brush_thickness: u32,
    pub eraser_thickness: u32,
    pub shape_size: u32,
    /// Color used by the brush and the shapes (not the eraser)
    pub color: Color,
}

impl Default for ToolParameters {
    fn default() -> Self {
        Self {
            brush_thickness: BRUSH_THICKNESS.default,
            eraser_thickness: ERASER_THICKNESS.default,
            shape_size: SHAPE_SIZE.default,
            color: BLACK,
        }
    }
}

impl ToolParameters {
    /// Range governing the numeric parameter of `kind`.
    pub fn range(kind: ToolKind) -> ParameterRange {
        match kind {
            ToolKind::Brush => BRUSH_THICKNESS,
            ToolKind::Eraser => ERASER_THICKNESS,
            ToolKind::Circle | ToolKind::Square | ToolKind::Triangle => SHAPE_SIZE,
        }
    }

    /// Thickness for brush/eraser, size for the shapes.
    pub fn value(&self, kind: ToolKind) -> u32 {
        match kind {
            ToolKind::Brush => self.brush_thickness,
            ToolKind::Eraser => self.eraser_thickness,
            ToolKind::Circle | ToolKind::Square | ToolKind::Triangle => self.shape_size,
        }
    }

    fn slot_mut(&mut self, kind: ToolKind) -> &mut u32 {
        match kind {
            ToolKind::Brush => &mut self.brush_thickness,
            ToolKind::Eraser => &mut self.eraser_thickness,
            ToolKind::Circle | ToolKind::Square | ToolKind::Triangle => &mut self.shape_size,
        }
    }
}

/// Values the stroke renderer uses for the next draw action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToolSnapshot {
    pub kind: ToolKind,
    /// Thickness (brush, eraser) or size (shapes) in pixels
    pub value: u32,
    /// Shared picker color; the eraser ignores it
    pub color: Color,
}

/// Active tool plus the session-long parameter store.
#[derive(Debug, Clone)]
pub struct ToolState {
    active: ToolKind,
    params: ToolParameters,
}

impl Default for ToolState {
    fn default() -> Self {
        Self::new(ToolParameters::default())
    }
}

impl ToolState {
    /// Starts with the brush selected and the given parameters.
    pub fn new(params: ToolParameters) -> Self {
        Self {
            active: ToolKind::Brush,
            params,
        }
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn parameters(&self) -> &ToolParameters {
        &self.params
    }

    /// Makes `kind` the active tool.
    ///
    /// Returns `false` when it was already active; parameters are never touched.
    pub fn select_tool(&mut self, kind: ToolKind) -> bool {
        if self.active == kind {
            return false;
        }
        log::debug!("Selected tool: {} (was {})", kind, self.active);
        self.active = kind;
        true
    }

    /// Stores a new numeric value for `kind`, clamped into its range.
    ///
    /// The parameter name is implied by the kind: thickness for brush and
    /// eraser, the shared size for the three shapes. Returns the committed value.
    pub fn set_parameter(&mut self, kind: ToolKind, value: f64) -> u32 {
        let range = ToolParameters::range(kind);
        let committed = range.clamp(value);
        if (committed as f64) != value {
            log::debug!(
                "{} value {} clamped to {} ({}-{})",
                kind,
                value,
                committed,
                range.min,
                range.max
            );
        }
        *self.params.slot_mut(kind) = committed;
        committed
    }

    /// Sets the color shared by the brush and the shapes.
    pub fn set_color(&mut self, color: Color) {
        self.params.color = color;
        log::debug!("Color set to {}", color.to_hex());
    }

    /// Returns the latest committed values for the active tool.
    pub fn active_snapshot(&self) -> ToolSnapshot {
        ToolSnapshot {
            kind: self.active,
            value: self.params.value(self.active),
            color: self.params.color,
        }
    }
}
