//! Rendering primitives and shape definitions (Cairo-based).
//!
//! This module defines the core drawing types used on the collaborative canvas:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]: stroke segments and stamped shapes
//! - [`Frame`]: container for all marks on the canvas
//! - Rendering functions for Cairo-based output

pub mod color;
pub mod frame;
pub mod render;
pub mod shape;

pub use color::Color;
pub use frame::Frame;
pub use render::{RenderError, render_frame, render_shape, render_shapes, write_png};
pub use shape::Shape;
