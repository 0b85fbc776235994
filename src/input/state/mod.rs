mod core;
mod mouse;
#[cfg(test)]
mod tests;

pub use core::{DEFAULT_SHAPE_OUTLINE, DrawingState, InputState};
