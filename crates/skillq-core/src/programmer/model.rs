//! Programmer domain models.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier assigned to a programmer by the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgrammerId(String);

impl ProgrammerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProgrammerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProgrammerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProgrammerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A programmer record as owned by the remote directory.
///
/// `skills` keeps the order in which they were added and may contain
/// duplicates; the client never reorders or deduplicates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programmer {
    pub id: ProgrammerId,
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub image_url: String,
    pub skills: Vec<String>,
}

/// The portrait part of a creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// MIME type of the selected file (e.g. `image/png`).
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Data-URI produced by the image encoder.
    pub image: String,
}

/// Body of a create call: `{name, email, jobTitle, image: {type, image}, skills}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProgrammerRequest {
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub image: ImagePayload,
    pub skills: Vec<String>,
}
