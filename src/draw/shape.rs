//! Shape definitions for marks committed to the drawing canvas.

use super::color::Color;
use serde::{Deserialize, Serialize};

/// Represents one committed mark on the drawing canvas.
///
/// Continuous strokes are stored as individual straight segments so the
/// canvas can be replayed exactly as it was drawn. Each variant stores its own
/// color and size information for independent rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Straight stroke segment produced by the brush or eraser while dragging
    Segment {
        /// Starting X coordinate (previous pointer position)
        x1: f64,
        /// Starting Y coordinate (previous pointer position)
        y1: f64,
        /// Ending X coordinate (current pointer position)
        x2: f64,
        /// Ending Y coordinate (current pointer position)
        y2: f64,
        /// Stroke color (canvas background for the eraser)
        color: Color,
        /// Stroke thickness in pixels
        thick: f64,
    },
    /// Filled circle stamped at a click point
    Circle {
        /// Center X coordinate
        cx: f64,
        /// Center Y coordinate
        cy: f64,
        /// Diameter in pixels
        diameter: f64,
        /// Fill and outline color
        color: Color,
        /// Outline thickness in pixels
        outline: f64,
    },
    /// Filled axis-aligned square stamped at a click point
    Square {
        /// Center X coordinate
        cx: f64,
        /// Center Y coordinate
        cy: f64,
        /// Side length in pixels
        side: f64,
        /// Fill and outline color
        color: Color,
        /// Outline thickness in pixels
        outline: f64,
    },
    /// Filled isosceles triangle with its apex pointing up
    Triangle {
        /// Center X coordinate
        cx: f64,
        /// Center Y coordinate
        cy: f64,
        /// Base width and height in pixels
        size: f64,
        /// Fill and outline color
        color: Color,
        /// Outline thickness in pixels
        outline: f64,
    },
}

impl Shape {
    /// Returns the color the shape is painted with.
    pub fn color(&self) -> Color {
        match self {
            Shape::Segment { color, .. }
            | Shape::Circle { color, .. }
            | Shape::Square { color, .. }
            | Shape::Triangle { color, .. } => *color,
        }
    }
}

/// Vertices of an apex-up isosceles triangle centered on `(cx, cy)`.
///
/// Height and base both equal `size`; the order is apex, bottom-left, bottom-right.
pub fn triangle_vertices(cx: f64, cy: f64, size: f64) -> [(f64, f64); 3] {
    let half = size / 2.0;
    [
        (cx, cy - half),
        (cx - half, cy + half),
        (cx + half, cy + half),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_points_up_with_equal_base_and_height() {
        let [apex, left, right] = triangle_vertices(100.0, 100.0, 50.0);
        assert_eq!(apex, (100.0, 75.0));
        assert_eq!(left, (75.0, 125.0));
        assert_eq!(right, (125.0, 125.0));
        assert_eq!(right.0 - left.0, 50.0);
        assert_eq!(left.1 - apex.1, 50.0);
    }
}
