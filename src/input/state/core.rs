//! Drawing state machine and input state management.

use crate::draw::{Color, Frame, color::CANVAS_GRAY};
use crate::input::params::ToolState;

/// Outline width of stamped shapes, in pixels.
pub const DEFAULT_SHAPE_OUTLINE: f64 = 2.0;

/// Current pointer interaction state.
///
/// Shapes never enter `Stroking`: they stamp on press and the interaction ends
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawingState {
    /// Not drawing - waiting for a press inside the drawing region
    Idle,
    /// Brush or eraser held down
    Stroking {
        /// Last position recorded inside the drawing region
        last_x: f64,
        last_y: f64,
        /// Set while the pointer is outside the drawing region; the next
        /// in-region event re-anchors instead of drawing across the gap
        suspended: bool,
    },
}

/// Input state for one drawing session.
///
/// Holds the committed canvas, the tool selection and parameters, and the
/// pointer state machine. It never touches collaboration state.
pub struct InputState {
    /// Tool selection and per-tool parameters
    pub tools: ToolState,
    /// All marks committed so far
    pub canvas: Frame,
    /// Current pointer interaction state
    pub state: DrawingState,
    /// Full window width in pixels; regions are thirds of it
    pub surface_width: f64,
    /// Full window height in pixels
    pub surface_height: f64,
    /// Canvas background; the eraser paints with this
    pub background: Color,
    /// Outline width used for stamped shapes
    pub shape_outline: f64,
}

impl InputState {
    /// Creates input state for a window of the given size.
    pub fn new(tools: ToolState, surface_width: f64, surface_height: f64) -> Self {
        Self {
            tools,
            canvas: Frame::new(),
            state: DrawingState::Idle,
            surface_width,
            surface_height,
            background: CANVAS_GRAY,
            shape_outline: DEFAULT_SHAPE_OUTLINE,
        }
    }

    /// Overrides the background the canvas is cleared to and erased with.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_shape_outline(mut self, outline: f64) -> Self {
        self.shape_outline = outline;
        self
    }

    /// Updates the window size after a resize.
    ///
    /// Any stroke in progress ends, since its anchor may now sit in another region.
    pub fn update_surface_size(&mut self, width: f64, height: f64) {
        self.surface_width = width;
        self.surface_height = height;
        self.state = DrawingState::Idle;
    }

    /// Wipes every mark and ends any stroke in progress.
    pub fn clear_canvas(&mut self) {
        self.canvas.clear();
        self.state = DrawingState::Idle;
        log::info!("Canvas cleared");
    }

    pub fn is_stroking(&self) -> bool {
        matches!(self.state, DrawingState::Stroking { .. })
    }
}
