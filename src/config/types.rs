//! Configuration type definitions.

use super::enums::ColorSpec;
use crate::input::params::{BRUSH_THICKNESS, ERASER_THICKNESS, SHAPE_SIZE};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Drawing tool defaults.
///
/// These seed the tool parameters when a session starts. Users change them
/// at runtime through the tool panel; edits are not written back.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial color - a named color, a `#rrggbb` hex string or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Brush thickness in pixels (valid range: 1 - 15)
    #[serde(default = "default_brush_thickness")]
    pub brush_thickness: u32,

    /// Eraser thickness in pixels (valid range: 5 - 30)
    #[serde(default = "default_eraser_thickness")]
    pub eraser_thickness: u32,

    /// Size shared by circle, square and triangle in pixels (valid range: 20 - 100)
    #[serde(default = "default_shape_size")]
    pub shape_size: u32,

    /// Outline width of stamped shapes in pixels (valid range: 0.0 - 10.0)
    #[serde(default = "default_shape_outline")]
    pub shape_outline: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            brush_thickness: default_brush_thickness(),
            eraser_thickness: default_eraser_thickness(),
            shape_size: default_shape_size(),
            shape_outline: default_shape_outline(),
        }
    }
}

/// Window layout. The width is split into three equal regions; only the
/// middle one accepts drawing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Total window width in pixels (valid range: 300 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Window height in pixels (valid range: 200 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Background fill, also used by the eraser, as `[r, g, b]` (0-255)
    #[serde(default = "default_background")]
    pub background: [u8; 3],
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Model relay settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RelayConfig {
    /// Relay endpoint accepting the messages request
    #[serde(default = "default_relay_url")]
    pub url: String,

    /// Model name forwarded with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Token limit for the instructions request (valid range: 1 - 8192)
    #[serde(default = "default_generation_max_tokens")]
    pub generation_max_tokens: u32,

    /// Token limit for the complete vision request (valid range: 1 - 8192)
    #[serde(default = "default_vision_max_tokens")]
    pub vision_max_tokens: u32,

    /// Request timeout in seconds (valid range: 1 - 600)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            url: default_relay_url(),
            model: default_model(),
            generation_max_tokens: default_generation_max_tokens(),
            vision_max_tokens: default_vision_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Reference artwork supply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArtworkConfig {
    /// Directory holding the reference artworks (jpg, jpeg, png)
    #[serde(default = "default_artwork_directory")]
    pub directory: PathBuf,

    /// Longest side of the uploaded image in pixels (valid range: 64 - 4096)
    #[serde(default = "default_max_dimension")]
    pub max_dimension: u32,

    /// JPEG quality of the uploaded image (valid range: 1 - 100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        Self {
            directory: default_artwork_directory(),
            max_dimension: default_max_dimension(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_thickness() -> u32 {
    BRUSH_THICKNESS.default
}

fn default_eraser_thickness() -> u32 {
    ERASER_THICKNESS.default
}

fn default_shape_size() -> u32 {
    SHAPE_SIZE.default
}

fn default_shape_outline() -> f64 {
    2.0
}

fn default_canvas_width() -> u32 {
    1200
}

fn default_canvas_height() -> u32 {
    800
}

fn default_background() -> [u8; 3] {
    [220, 220, 220]
}

pub(super) fn default_relay_url() -> String {
    "http://localhost:3000/api/claude".to_string()
}

pub(super) fn default_model() -> String {
    "claude-3-5-sonnet-20241022".to_string()
}

fn default_generation_max_tokens() -> u32 {
    1000
}

fn default_vision_max_tokens() -> u32 {
    1500
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_artwork_directory() -> PathBuf {
    PathBuf::from("images")
}

fn default_max_dimension() -> u32 {
    600
}

fn default_jpeg_quality() -> u8 {
    50
}
