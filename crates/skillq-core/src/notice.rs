//! User-visible notices emitted by the controllers.

use serde::Serialize;

/// A message the host shell shows to the user, typically as a dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum UserNotice {
    ProgrammerAdded,
    ProgrammerDeleted,
    /// Only emitted under `WritePolicy::Confirmed`.
    WriteFailed { operation: String, message: String },
}

impl UserNotice {
    pub fn message(&self) -> String {
        match self {
            Self::ProgrammerAdded => "Programmer added successfully!".to_string(),
            Self::ProgrammerDeleted => "Programmer deleted successfully!".to_string(),
            Self::WriteFailed { operation, message } => {
                format!("Could not {} programmer: {}", operation, message)
            }
        }
    }
}
