//! Input handling and tool state machine.
//!
//! This module turns pointer events into marks on the canvas. It classifies
//! each pointer position into a window region, keeps the active tool and its
//! per-tool parameters, and runs the stroke state machine (idle, stroking)
//! that commits segments and stamped shapes.

pub mod events;
pub mod params;
pub mod region;
pub mod state;
pub mod tool;

pub use events::DrawEvent;
pub use params::{ToolParameters, ToolSnapshot, ToolState};
pub use region::{Region, classify, gate};
pub use state::{DrawingState, InputState};
pub use tool::ToolKind;
