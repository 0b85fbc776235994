//! Frame container for the marks on the drawing canvas.

use super::shape::Shape;
use serde::{Deserialize, Serialize};

/// Container for every mark committed to the canvas during the session.
///
/// Marks are kept in draw order (first = bottom layer, last = top layer). The
/// eraser does not remove marks; it paints background-colored segments on top.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    pub shapes: Vec<Shape>,
}

impl Frame {
    /// Creates a new empty frame with no shapes.
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Removes all shapes from the frame, clearing the canvas.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Adds a new shape on top of the existing ones.
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Returns the most recently committed shape, if any.
    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }
}
