//! Pointer-derived draw intents.

use super::params::ToolSnapshot;

/// An instantaneous drawing intent that passed region gating.
///
/// Built from a pointer event inside the middle region together with the tool
/// values current at that moment. It is consumed by the stroke renderer and
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawEvent {
    pub x: f64,
    pub y: f64,
    /// True for the press that begins an interaction, false for drag motion
    pub is_drag_start: bool,
    pub tool: ToolSnapshot,
}
