//! Reference artwork supply.
//!
//! Artworks are identified by a path relative to the artwork directory. The
//! collaboration core only ever sees the base64 payload produced by an
//! [`ImageSource`]; decoding, downsizing and compression stay behind that trait.

mod catalog;
mod source;

pub use catalog::{Catalog, title_for};
pub use source::{EncodedImage, FileImageSource, ImageError, ImageSource};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one reference artwork (its path relative to the artwork directory).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtworkId(String);

impl ArtworkId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human readable title derived from the file name.
    pub fn title(&self) -> String {
        title_for(&self.0)
    }
}

impl fmt::Display for ArtworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtworkId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
