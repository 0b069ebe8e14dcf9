//! Creation form controller.
//!
//! Collects a `CreationDraft` field by field and submits it as a create call.
//!
//! Submitting without a selected image is a silent no-op. Under
//! `WritePolicy::FireAndForget` a dispatched submission always resets the
//! form and emits `UserNotice::ProgrammerAdded`, whatever the service later
//! answers.

use crate::write_dispatcher::WriteDispatcher;
use skillq_core::Result;
use skillq_core::config::{SkillAppendPolicy, WritePolicy};
use skillq_core::draft::CreationDraft;
use skillq_core::image::{ImageEncoder, ImageFile};
use skillq_core::notice::UserNotice;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;

/// Lifecycle of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Empty,
    Editing,
    Submitting,
    /// Last submission failed; the draft is kept as typed.
    EditingWithError,
}

/// What a `submit` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No image selected; nothing was encoded or sent.
    MissingImage,
    /// The create call was dispatched and the form reset.
    Submitted,
}

pub struct CreationFormController {
    draft: CreationDraft,
    phase: FormPhase,
    encoder: Arc<dyn ImageEncoder>,
    writes: WriteDispatcher,
    skill_policy: SkillAppendPolicy,
    notices: UnboundedSender<UserNotice>,
}

impl CreationFormController {
    pub fn new(
        encoder: Arc<dyn ImageEncoder>,
        writes: WriteDispatcher,
        skill_policy: SkillAppendPolicy,
        notices: UnboundedSender<UserNotice>,
    ) -> Self {
        Self {
            draft: CreationDraft::new(),
            phase: FormPhase::Empty,
            encoder,
            writes,
            skill_policy,
            notices,
        }
    }

    pub fn draft(&self) -> &CreationDraft {
        &self.draft
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.draft.name = name.into();
        self.touch();
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        self.draft.email = email.into();
        self.touch();
    }

    pub fn set_job_title(&mut self, job_title: impl Into<String>) {
        self.draft.job_title = job_title.into();
        self.touch();
    }

    pub fn set_pending_skill(&mut self, skill: impl Into<String>) {
        self.draft.pending_skill = skill.into();
        self.touch();
    }

    pub fn select_image(&mut self, file: ImageFile) {
        self.draft.image = Some(file);
        self.touch();
    }

    pub fn clear_image(&mut self) {
        self.draft.image = None;
        self.touch();
    }

    /// Appends the pending skill and clears the pending field.
    ///
    /// Returns whether the skill was appended; only
    /// `SkillAppendPolicy::Validated` ever rejects one.
    pub fn add_skill(&mut self) -> bool {
        let appended = self.draft.append_pending_skill(self.skill_policy);
        if !appended {
            tracing::debug!("[CreationForm] Rejected pending skill");
        }
        self.touch();
        appended
    }

    /// Whether the draft has every field the form marks as required.
    pub fn is_ready(&self) -> bool {
        self.draft.is_ready()
    }

    /// Encodes the selected image and dispatches the create call.
    ///
    /// # Errors
    ///
    /// - `EncodeFailed`: the image could not be read; nothing was sent.
    /// - `WriteFailed`: only under `WritePolicy::Confirmed`.
    ///
    /// In both cases the draft is kept and the phase becomes `EditingWithError`.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let Some(image) = self.draft.image.clone() else {
            tracing::debug!("[CreationForm] Submit ignored: no image selected");
            return Ok(SubmitOutcome::MissingImage);
        };

        self.phase = FormPhase::Submitting;

        let encoded = match self.encoder.encode(&image).await {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::error!("[CreationForm] Image encoding failed: {}", e);
                self.phase = FormPhase::EditingWithError;
                return Err(e);
            }
        };

        let request = self.draft.to_request(encoded);
        if let Err(e) = self.writes.create(request).await {
            // Only reachable under WritePolicy::Confirmed
            self.phase = FormPhase::EditingWithError;
            self.notify(UserNotice::WriteFailed {
                operation: "create".to_string(),
                message: e.to_string(),
            });
            return Err(e);
        }

        self.draft.clear();
        self.phase = FormPhase::Empty;
        self.notify(UserNotice::ProgrammerAdded);

        if self.writes.policy() == WritePolicy::FireAndForget {
            tracing::info!("[CreationForm] Programmer submitted (outcome not awaited)");
        } else {
            tracing::info!("[CreationForm] Programmer created");
        }

        Ok(SubmitOutcome::Submitted)
    }

    fn touch(&mut self) {
        if self.phase != FormPhase::Submitting {
            self.phase = if self.draft.is_empty() {
                FormPhase::Empty
            } else {
                FormPhase::Editing
            };
        }
    }

    fn notify(&self, notice: UserNotice) {
        if self.notices.send(notice).is_err() {
            tracing::debug!("[CreationForm] Notice receiver dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryDirectory, StubEncoder};
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    struct Harness {
        form: CreationFormController,
        directory: Arc<InMemoryDirectory>,
        encoder: Arc<StubEncoder>,
        writes: WriteDispatcher,
        notices: UnboundedReceiver<UserNotice>,
    }

    fn harness(encoder: StubEncoder, policy: WritePolicy, skills: SkillAppendPolicy) -> Harness {
        let directory = Arc::new(InMemoryDirectory::new());
        let encoder = Arc::new(encoder);
        let writes = WriteDispatcher::new(directory.clone(), policy);
        let (tx, rx) = mpsc::unbounded_channel();
        let form = CreationFormController::new(encoder.clone(), writes.clone(), skills, tx);
        Harness {
            form,
            directory,
            encoder,
            writes,
            notices: rx,
        }
    }

    fn fill_ada(form: &mut CreationFormController) -> ImageFile {
        form.set_name("Ada");
        form.set_email("a@x.com");
        form.set_job_title("Engineer");
        let image = ImageFile::new("/photos/ada.png");
        form.select_image(image.clone());
        form.set_pending_skill("Rust");
        form.add_skill();
        form.set_pending_skill("Go");
        form.add_skill();
        image
    }

    #[tokio::test]
    async fn test_submit_creates_exactly_once_and_resets() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::FireAndForget,
            SkillAppendPolicy::AppendAsTyped,
        );
        let image = fill_ada(&mut h.form);
        assert_eq!(h.form.phase(), FormPhase::Editing);

        let outcome = h.form.submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::Submitted);
        assert_eq!(h.form.phase(), FormPhase::Empty);
        assert!(h.form.draft().is_empty());
        assert_eq!(h.notices.try_recv().unwrap(), UserNotice::ProgrammerAdded);

        h.writes.settle().await;
        let calls = h.directory.create_calls();
        assert_eq!(calls.len(), 1);
        let request = &calls[0];
        assert_eq!(request.name, "Ada");
        assert_eq!(request.email, "a@x.com");
        assert_eq!(request.job_title, "Engineer");
        assert_eq!(request.skills, vec!["Rust", "Go"]);
        assert_eq!(request.image, StubEncoder::expected(&image).into_payload());
        assert_eq!(h.encoder.calls(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_image_is_noop() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::FireAndForget,
            SkillAppendPolicy::AppendAsTyped,
        );
        h.form.set_name("Ada");

        let outcome = h.form.submit().await.unwrap();
        assert_eq!(outcome, SubmitOutcome::MissingImage);
        assert_eq!(h.form.draft().name, "Ada");
        assert_eq!(h.form.phase(), FormPhase::Editing);

        h.writes.settle().await;
        assert!(h.directory.create_calls().is_empty());
        assert_eq!(h.encoder.calls(), 0);
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_encode_failure_aborts_submission() {
        let mut h = harness(
            StubEncoder::failing(),
            WritePolicy::FireAndForget,
            SkillAppendPolicy::AppendAsTyped,
        );
        fill_ada(&mut h.form);

        let err = h.form.submit().await.unwrap_err();
        assert!(err.is_encode_failed());
        assert_eq!(h.form.phase(), FormPhase::EditingWithError);
        assert_eq!(h.form.draft().skills, vec!["Rust", "Go"]);

        h.writes.settle().await;
        assert!(h.directory.create_calls().is_empty());
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_fire_and_forget_confirms_even_when_service_fails() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::FireAndForget,
            SkillAppendPolicy::AppendAsTyped,
        );
        h.directory.fail_writes(true);
        fill_ada(&mut h.form);

        assert_eq!(h.form.submit().await.unwrap(), SubmitOutcome::Submitted);
        assert_eq!(h.notices.try_recv().unwrap(), UserNotice::ProgrammerAdded);
        assert!(h.form.draft().is_empty());

        h.writes.settle().await;
        assert_eq!(h.directory.create_calls().len(), 1);
        assert!(h.directory.ids().is_empty());
    }

    #[tokio::test]
    async fn test_confirmed_failure_keeps_draft() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::Confirmed,
            SkillAppendPolicy::AppendAsTyped,
        );
        h.directory.fail_writes(true);
        fill_ada(&mut h.form);

        let err = h.form.submit().await.unwrap_err();
        assert!(err.is_write_failed());
        assert_eq!(h.form.phase(), FormPhase::EditingWithError);
        assert_eq!(h.form.draft().name, "Ada");
        assert!(matches!(
            h.notices.try_recv().unwrap(),
            UserNotice::WriteFailed { ref operation, .. } if operation == "create"
        ));
    }

    #[tokio::test]
    async fn test_confirmed_success_creates_before_returning() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::Confirmed,
            SkillAppendPolicy::AppendAsTyped,
        );
        fill_ada(&mut h.form);

        h.form.submit().await.unwrap();
        assert_eq!(h.directory.ids(), vec!["created-1"]);
        assert_eq!(h.notices.try_recv().unwrap(), UserNotice::ProgrammerAdded);
    }

    #[tokio::test]
    async fn test_add_skill_append_as_typed() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::FireAndForget,
            SkillAppendPolicy::AppendAsTyped,
        );
        h.form.set_pending_skill("Go");
        assert!(h.form.add_skill());
        h.form.set_pending_skill("Rust");
        assert!(h.form.add_skill());
        assert!(h.form.add_skill());

        assert_eq!(h.form.draft().skills, vec!["Go", "Rust", ""]);
        assert!(h.form.draft().pending_skill.is_empty());
    }

    #[tokio::test]
    async fn test_add_skill_validated() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::FireAndForget,
            SkillAppendPolicy::Validated,
        );
        h.form.set_pending_skill(" Go ");
        assert!(h.form.add_skill());
        h.form.set_pending_skill("Go");
        assert!(!h.form.add_skill());
        assert!(!h.form.add_skill());

        assert_eq!(h.form.draft().skills, vec!["Go"]);
    }

    #[tokio::test]
    async fn test_is_ready_tracks_required_fields() {
        let mut h = harness(
            StubEncoder::new(),
            WritePolicy::FireAndForget,
            SkillAppendPolicy::AppendAsTyped,
        );
        assert!(!h.form.is_ready());
        fill_ada(&mut h.form);
        assert!(h.form.is_ready());
        h.form.clear_image();
        assert!(!h.form.is_ready());
    }
}
