use std::path::{Path, PathBuf};

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to read photo {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("photo {0} is empty")]
    Empty(PathBuf),
    #[error("photo {path} is {size} bytes, above the {limit} byte limit")]
    TooLarge {
        path: PathBuf,
        size: usize,
        limit: usize,
    },
    #[error("photo {path} has unsupported type {mime_type} (expected JPEG, PNG, WebP or HEIC)")]
    UnsupportedType { path: PathBuf, mime_type: String },
    #[error("failed to write image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn detect_mime_type(data: &[u8]) -> Option<String> {
    if data.len() > 12 {
        let ftyp = &data[4..12];
        if ftyp.starts_with(b"ftyp") {
            let brand = &ftyp[4..8];
            if brand == b"heic" || brand == b"heif" || brand == b"hevc" {
                return Some("image/heic".to_string());
            }
        }
    }

    infer::get(data).map(|kind| kind.mime_type().to_string())
}

fn normalize_image_mime_type(mime_type: &str) -> String {
    let lowered = mime_type.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "image/jpg" => "image/jpeg".to_string(),
        _ => lowered,
    }
}

fn is_supported_photo_mime(mime_type: &str) -> bool {
    matches!(
        mime_type,
        "image/png" | "image/jpeg" | "image/webp" | "image/heic" | "image/heif"
    )
}

fn mime_from_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        _ => None,
    }
}

/// Encoded photo forwarded to the generation service. Pixel data is never inspected.
#[derive(Debug, Clone)]
pub struct PhotoPayload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl PhotoPayload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Reads the photo at `path`. Files over `max_bytes` are rejected from their
    /// metadata without being read.
    pub async fn load(path: &Path, max_bytes: usize) -> Result<Self, MediaError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| MediaError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max_bytes {
            return Err(MediaError::TooLarge {
                path: path.to_path_buf(),
                size,
                limit: max_bytes,
            });
        }

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| MediaError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        Self::from_bytes(path, bytes, max_bytes)
    }

    fn from_bytes(path: &Path, bytes: Vec<u8>, max_bytes: usize) -> Result<Self, MediaError> {
        if bytes.is_empty() {
            return Err(MediaError::Empty(path.to_path_buf()));
        }
        if bytes.len() > max_bytes {
            return Err(MediaError::TooLarge {
                path: path.to_path_buf(),
                size: bytes.len(),
                limit: max_bytes,
            });
        }

        let mime_type = match detect_mime_type(&bytes) {
            Some(detected) => normalize_image_mime_type(&detected),
            None => match mime_from_extension(path) {
                Some(fallback) => fallback.to_string(),
                None => "application/octet-stream".to_string(),
            },
        };
        if !is_supported_photo_mime(&mime_type) {
            return Err(MediaError::UnsupportedType {
                path: path.to_path_buf(),
                mime_type,
            });
        }

        debug!(
            "Loaded photo {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            mime_type
        );
        Ok(Self::new(bytes, mime_type))
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.bytes)
    }
}

#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl GeneratedImage {
    pub fn extension(&self) -> &'static str {
        match normalize_image_mime_type(&self.mime_type).as_str() {
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/heic" | "image/heif" => "heic",
            _ => "png",
        }
    }

    pub async fn write_to(&self, path: &Path) -> Result<(), MediaError> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| MediaError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(path, &self.bytes)
            .await
            .map_err(|source| MediaError::Write {
                path: path.to_path_buf(),
                source,
            })
    }
}
