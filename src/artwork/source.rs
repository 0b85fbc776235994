use std::io::Cursor;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;
use tokio::task;

use super::ArtworkId;

/// Base64 image payload ready to be attached to a relay request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: String,
    pub data: String,
}

/// Errors that can occur while preparing an artwork for upload.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Unknown artwork '{0}'")]
    UnknownArtwork(String),

    #[error("Failed to read artwork: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image task failed: {0}")]
    Task(String),
}

/// Abstraction over how an artwork becomes an uploadable payload.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn load_base64(&self, artwork: &ArtworkId) -> Result<EncodedImage, ImageError>;
}

/// Loads artworks from a directory, downsizes and re-encodes them as JPEG.
#[derive(Debug, Clone)]
pub struct FileImageSource {
    root: PathBuf,
    max_dimension: u32,
    jpeg_quality: u8,
}

impl FileImageSource {
    pub fn new(root: impl Into<PathBuf>, max_dimension: u32, jpeg_quality: u8) -> Self {
        Self {
            root: root.into(),
            max_dimension: max_dimension.max(1),
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Resolves an artwork id to a file below the root directory.
    ///
    /// Absolute ids and ids escaping the root through `..` are rejected.
    pub fn resolve(&self, artwork: &ArtworkId) -> Result<PathBuf, ImageError> {
        let relative = Path::new(artwork.as_str());
        let escapes = relative
            .components()
            .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if escapes || artwork.as_str().is_empty() {
            return Err(ImageError::UnknownArtwork(artwork.to_string()));
        }
        Ok(self.root.join(relative))
    }

    /// Decodes, downsizes and re-encodes raw image bytes.
    pub fn encode_bytes(
        bytes: &[u8],
        max_dimension: u32,
        jpeg_quality: u8,
    ) -> Result<EncodedImage, ImageError> {
        let img = image::load_from_memory(bytes)?;
        let (width, height) = (img.width(), img.height());
        let img = if width.max(height) > max_dimension {
            img.resize(max_dimension, max_dimension, FilterType::Triangle)
        } else {
            img
        };

        let rgb = img.to_rgb8();
        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut Cursor::new(&mut jpeg), jpeg_quality).encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ColorType::Rgb8,
        )?;

        log::debug!(
            "Compressed image: {}x{} -> {}x{}, ~{:.1}KB",
            width,
            height,
            rgb.width(),
            rgb.height(),
            jpeg.len() as f64 / 1024.0
        );

        Ok(EncodedImage {
            media_type: "image/jpeg".to_string(),
            data: general_purpose::STANDARD.encode(&jpeg),
        })
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn load_base64(&self, artwork: &ArtworkId) -> Result<EncodedImage, ImageError> {
        let path = self.resolve(artwork)?;
        let max_dimension = self.max_dimension;
        let jpeg_quality = self.jpeg_quality;
        log::info!("Loading artwork {}", path.display());

        task::spawn_blocking(move || {
            let bytes = std::fs::read(&path)?;
            Self::encode_bytes(&bytes, max_dimension, jpeg_quality)
        })
        .await
        .map_err(|e| ImageError::Task(e.to_string()))?
    }
}
