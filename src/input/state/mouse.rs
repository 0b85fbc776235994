use crate::draw::Shape;
use crate::input::events::DrawEvent;
use crate::input::region::{self, Region};
use crate::input::tool::ToolKind;

use super::{DrawingState, InputState};

impl InputState {
    /// Region of the window containing horizontal coordinate `x`.
    pub fn region_at(&self, x: f64) -> Region {
        region::classify(x, self.surface_width)
    }

    /// Builds a draw event for a pointer position, or `None` when the
    /// position is outside the drawing region.
    pub fn route(&self, x: f64, y: f64, is_drag_start: bool) -> Option<DrawEvent> {
        if !region::gate(self.region_at(x)) {
            return None;
        }
        Some(DrawEvent {
            x,
            y,
            is_drag_start,
            tool: self.tools.active_snapshot(),
        })
    }

    /// Processes a pointer press.
    ///
    /// Presses outside the drawing region are ignored so the side panels keep
    /// their own controls.
    pub fn on_pointer_press(&mut self, x: f64, y: f64) {
        if let Some(event) = self.route(x, y, true) {
            self.apply_draw_event(&event);
        }
    }

    /// Processes pointer motion while a button is held.
    ///
    /// Leaving the drawing region suspends the stroke without ending it.
    pub fn on_pointer_motion(&mut self, x: f64, y: f64) {
        if !self.is_stroking() {
            return;
        }

        match self.route(x, y, false) {
            Some(event) => self.apply_draw_event(&event),
            None => {
                if let DrawingState::Stroking { suspended, .. } = &mut self.state {
                    if !*suspended {
                        log::debug!("Stroke left the drawing region at x={x:.1}");
                    }
                    *suspended = true;
                }
            }
        }
    }

    /// Processes a pointer release anywhere on the window.
    pub fn on_pointer_release(&mut self) {
        self.state = DrawingState::Idle;
    }

    /// Applies one gated draw event to the canvas.
    ///
    /// Callers are expected to have routed the event through [`Self::route`].
    pub fn apply_draw_event(&mut self, event: &DrawEvent) {
        if event.is_drag_start {
            if event.tool.kind.is_continuous() {
                self.state = DrawingState::Stroking {
                    last_x: event.x,
                    last_y: event.y,
                    suspended: false,
                };
            } else {
                self.stamp_shape(event);
                self.state = DrawingState::Idle;
            }
            return;
        }

        // A shape tool selected mid-stroke ends the stroke; shapes only stamp on press.
        if !event.tool.kind.is_continuous() {
            self.state = DrawingState::Idle;
            return;
        }

        let DrawingState::Stroking {
            last_x,
            last_y,
            suspended,
        } = &mut self.state
        else {
            return;
        };

        if *suspended {
            *suspended = false;
        } else {
            let color = match event.tool.kind {
                ToolKind::Eraser => self.background,
                _ => event.tool.color,
            };
            self.canvas.add_shape(Shape::Segment {
                x1: *last_x,
                y1: *last_y,
                x2: event.x,
                y2: event.y,
                color,
                thick: event.tool.value as f64,
            });
        }
        *last_x = event.x;
        *last_y = event.y;
    }

    fn stamp_shape(&mut self, event: &DrawEvent) {
        let size = event.tool.value as f64;
        let color = event.tool.color;
        let outline = self.shape_outline;
        let shape = match event.tool.kind {
            ToolKind::Circle => Shape::Circle {
                cx: event.x,
                cy: event.y,
                diameter: size,
                color,
                outline,
            },
            ToolKind::Square => Shape::Square {
                cx: event.x,
                cy: event.y,
                side: size,
                color,
                outline,
            },
            ToolKind::Triangle => Shape::Triangle {
                cx: event.x,
                cy: event.y,
                size,
                color,
                outline,
            },
            ToolKind::Brush | ToolKind::Eraser => return,
        };
        log::debug!(
            "Stamped {} at ({:.1}, {:.1}) size {}",
            event.tool.kind,
            event.x,
            event.y,
            event.tool.value
        );
        self.canvas.add_shape(shape);
    }
}
