use crate::domain::model::{EncodedImage, ImageRef};
use crate::domain::ports::ImageSource;
use crate::utils::error::{CropCareError, Result};
use crate::utils::validation::{validate_file_extension, validate_path};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::{Path, PathBuf};

pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "gif"];

/// Reads images from the local filesystem. Relative paths resolve against
/// `base_path`.
#[derive(Debug, Clone)]
pub struct LocalImageSource {
    base_path: PathBuf,
}

impl LocalImageSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve_path(&self, uri: &str) -> PathBuf {
        let uri = uri.strip_prefix("file://").unwrap_or(uri);
        self.base_path.join(Path::new(uri))
    }
}

impl Default for LocalImageSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ImageSource for LocalImageSource {
    async fn load(&self, image: &ImageRef) -> Result<EncodedImage> {
        // 已經有 base64 就不用再讀檔
        if let Some(inline) = &image.inline_base64 {
            let trimmed = inline.trim();
            let decoded = STANDARD.decode(trimmed)?;
            if decoded.is_empty() {
                return Err(CropCareError::InvalidImage {
                    path: image.uri.clone(),
                    reason: "inline image data is empty".to_string(),
                });
            }
            tracing::debug!("Using inline image data for {} ({} bytes)", image.uri, decoded.len());
            return Ok(EncodedImage {
                source: image.clone(),
                base64: trimmed.to_string(),
                byte_len: decoded.len(),
            });
        }

        validate_path("image", &image.uri)?;
        validate_file_extension("image", &image.uri, SUPPORTED_EXTENSIONS).map_err(|e| {
            CropCareError::InvalidImage {
                path: image.uri.clone(),
                reason: match e {
                    CropCareError::InvalidConfigValueError { reason, .. } => reason,
                    other => other.to_string(),
                },
            }
        })?;

        let full_path = self.resolve_path(&image.uri);
        tracing::debug!("Reading image from {}", full_path.display());
        let bytes = tokio::fs::read(&full_path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CropCareError::InvalidImage {
                path: image.uri.clone(),
                reason: "file not found".to_string(),
            },
            _ => CropCareError::IoError(e),
        })?;

        if bytes.is_empty() {
            return Err(CropCareError::InvalidImage {
                path: image.uri.clone(),
                reason: "file is empty".to_string(),
            });
        }

        Ok(EncodedImage {
            source: image.clone(),
            base64: STANDARD.encode(&bytes),
            byte_len: bytes.len(),
        })
    }
}
