//! Image selection and encoding contract.

use crate::error::Result;
use crate::programmer::ImagePayload;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Hint shown next to the image picker. Advisory only; nothing enforces it.
pub const IMAGE_UPLOAD_HINT: &str = "Please upload a PNG image of size less than 500kb.";

/// Size above which encoders log an advisory warning.
pub const ADVISORY_MAX_IMAGE_BYTES: u64 = 500 * 1024;

/// A single image file chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    path: PathBuf,
    mime_type: Option<String>,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mime_type: None,
        }
    }

    /// Overrides the MIME type that would otherwise be guessed from the extension.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }
}

/// The transmissible form of an image file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// `data:<mime>;base64,<payload>`
    pub data_url: String,
}

impl EncodedImage {
    pub fn into_payload(self) -> ImagePayload {
        ImagePayload {
            mime_type: self.mime_type,
            image: self.data_url,
        }
    }
}

/// Turns a selected image file into a data-URI string.
///
/// Implementations perform local I/O only. A file that cannot be read must
/// produce `SkillqError::EncodeFailed`, never a partial payload.
#[async_trait]
pub trait ImageEncoder: Send + Sync {
    async fn encode(&self, file: &ImageFile) -> Result<EncodedImage>;
}
