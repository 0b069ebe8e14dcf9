//! Client-local creation draft.

use crate::config::SkillAppendPolicy;
use crate::image::{EncodedImage, ImageFile};
use crate::programmer::CreateProgrammerRequest;

/// Input collected by the creation form before submission.
///
/// Never persisted. Cleared back to `CreationDraft::default()` after a
/// successful submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreationDraft {
    pub name: String,
    pub email: String,
    pub job_title: String,
    pub image: Option<ImageFile>,
    pub skills: Vec<String>,
    pub pending_skill: String,
}

impl CreationDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Moves `pending_skill` onto the end of `skills`.
    ///
    /// The pending field is cleared in every case. Returns whether a skill
    /// was appended.
    pub fn append_pending_skill(&mut self, policy: SkillAppendPolicy) -> bool {
        let pending = std::mem::take(&mut self.pending_skill);
        match policy {
            SkillAppendPolicy::AppendAsTyped => {
                self.skills.push(pending);
                true
            }
            SkillAppendPolicy::Validated => {
                let trimmed = pending.trim();
                if trimmed.is_empty() || self.skills.iter().any(|s| s == trimmed) {
                    return false;
                }
                self.skills.push(trimmed.to_string());
                true
            }
        }
    }

    /// Whether every field the form marks as required has a value.
    ///
    /// Advisory: submission does not consult this.
    pub fn is_ready(&self) -> bool {
        !self.name.is_empty()
            && !self.email.is_empty()
            && !self.job_title.is_empty()
            && self.image.is_some()
            && !self.skills.is_empty()
    }

    /// Builds the request body from the draft's fields and an encoded image.
    pub fn to_request(&self, image: EncodedImage) -> CreateProgrammerRequest {
        CreateProgrammerRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            job_title: self.job_title.clone(),
            image: image.into_payload(),
            skills: self.skills.clone(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
