//! File-backed image encoder.
//!
//! Reads the selected file and produces the same `data:<mime>;base64,...`
//! string a browser file reader yields for `readAsDataURL`.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use skillq_core::image::{ADVISORY_MAX_IMAGE_BYTES, EncodedImage, ImageEncoder, ImageFile};
use skillq_core::{Result, SkillqError};

const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Encodes raw bytes as a data-URI.
pub fn encode_bytes(mime_type: &str, bytes: &[u8]) -> EncodedImage {
    EncodedImage {
        mime_type: mime_type.to_string(),
        data_url: format!("data:{};base64,{}", mime_type, BASE64_STANDARD.encode(bytes)),
    }
}

/// Resolves the MIME type for a file: explicit override, then extension, then fallback.
pub fn resolve_mime_type(file: &ImageFile) -> String {
    if let Some(explicit) = file.mime_type() {
        return explicit.to_string();
    }
    mime_guess::from_path(file.path())
        .first()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string())
}

/// Image encoder reading from the local file system.
#[derive(Debug, Clone, Default)]
pub struct FileImageEncoder;

impl FileImageEncoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ImageEncoder for FileImageEncoder {
    async fn encode(&self, file: &ImageFile) -> Result<EncodedImage> {
        let path = file.path();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| SkillqError::encode_failed(path.display().to_string(), e.to_string()))?;

        let mime_type = resolve_mime_type(file);

        // The upload hint is advisory; oversize or non-PNG files are still encoded.
        if mime_type != "image/png" || bytes.len() as u64 > ADVISORY_MAX_IMAGE_BYTES {
            tracing::warn!(
                path = %path.display(),
                mime_type = %mime_type,
                size = bytes.len(),
                "Image is outside the recommended PNG < 500 KB"
            );
        }

        let encoded = encode_bytes(&mime_type, &bytes);
        tracing::debug!(
            path = %path.display(),
            encoded_len = encoded.data_url.len(),
            "Encoded image"
        );
        Ok(encoded)
    }
}
