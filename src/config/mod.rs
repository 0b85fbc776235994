//! Configuration file support for cosketch.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/cosketch/config.toml`. Settings include drawing tool defaults,
//! the window layout, the model relay and the artwork supply.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{ArtworkConfig, CanvasConfig, DrawingConfig, RelayConfig};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::draw::Color;
use crate::input::ToolParameters;
use crate::input::params::{BRUSH_THICKNESS, ERASER_THICKNESS, ParameterRange, SHAPE_SIZE};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#ffdbac"
/// brush_thickness = 3
/// shape_size = 50
///
/// [canvas]
/// width = 1200
/// height = 800
///
/// [relay]
/// url = "http://localhost:3000/api/claude"
///
/// [artwork]
/// directory = "images"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults (color, thickness, shape size)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Window size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Model relay endpoint and request limits
    #[serde(default)]
    pub relay: RelayConfig,

    /// Reference artwork directory and upload compression
    #[serde(default)]
    pub artwork: ArtworkConfig,
}

fn clamp_in<T>(name: &str, value: &mut T, range: RangeInclusive<T>)
where
    T: PartialOrd + Copy + Display,
{
    if !range.contains(value) {
        let clamped = if *value < *range.start() {
            *range.start()
        } else {
            *range.end()
        };
        warn!(
            "Invalid {} {}, clamping to {}-{} range",
            name,
            value,
            range.start(),
            range.end()
        );
        *value = clamped;
    }
}

fn tool_range(range: ParameterRange) -> RangeInclusive<u32> {
    range.min..=range.max
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// the default for strings) and a warning is logged.
    fn validate_and_clamp(&mut self) {
        let drawing = &mut self.drawing;
        clamp_in(
            "brush_thickness",
            &mut drawing.brush_thickness,
            tool_range(BRUSH_THICKNESS),
        );
        clamp_in(
            "eraser_thickness",
            &mut drawing.eraser_thickness,
            tool_range(ERASER_THICKNESS),
        );
        clamp_in("shape_size", &mut drawing.shape_size, tool_range(SHAPE_SIZE));
        if drawing.shape_outline.is_nan() {
            warn!("Invalid shape_outline NaN, using 2.0");
            drawing.shape_outline = 2.0;
        }
        clamp_in("shape_outline", &mut drawing.shape_outline, 0.0..=10.0);

        clamp_in("canvas width", &mut self.canvas.width, 300..=8192);
        clamp_in("canvas height", &mut self.canvas.height, 200..=8192);

        let relay = &mut self.relay;
        if let Err(e) = url::Url::parse(&relay.url) {
            warn!(
                "Invalid relay url '{}' ({}), falling back to '{}'",
                relay.url,
                e,
                types::default_relay_url()
            );
            relay.url = types::default_relay_url();
        }
        if relay.model.trim().is_empty() {
            warn!(
                "Empty relay model, falling back to '{}'",
                types::default_model()
            );
            relay.model = types::default_model();
        }
        clamp_in(
            "generation_max_tokens",
            &mut relay.generation_max_tokens,
            1..=8192,
        );
        clamp_in("vision_max_tokens", &mut relay.vision_max_tokens, 1..=8192);
        clamp_in("timeout_secs", &mut relay.timeout_secs, 1..=600);

        clamp_in(
            "max_dimension",
            &mut self.artwork.max_dimension,
            64..=4096,
        );
        clamp_in("jpeg_quality", &mut self.artwork.jpeg_quality, 1..=100);
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/cosketch/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("cosketch");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields defaults; an explicitly
    /// requested file must exist. All loaded values are validated and clamped.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file cannot be read
    /// - The file contains invalid TOML syntax
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let config_path = Self::get_config_path()?;
                if !config_path.exists() {
                    info!("Config file not found, using defaults");
                    debug!("Expected config at: {}", config_path.display());
                    return Ok(Self::default());
                }
                config_path
            }
        };

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Tool parameters a new session starts with.
    pub fn tool_parameters(&self) -> ToolParameters {
        ToolParameters {
            brush_thickness: self.drawing.brush_thickness,
            eraser_thickness: self.drawing.eraser_thickness,
            shape_size: self.drawing.shape_size,
            color: self.drawing.default_color.to_color(),
        }
    }

    /// Canvas background, which is also the eraser's paint.
    pub fn background(&self) -> Color {
        let [r, g, b] = self.canvas.background;
        Color::from_rgb8(r, g, b)
    }
}
