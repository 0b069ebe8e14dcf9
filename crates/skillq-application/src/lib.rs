//! Application layer for the SkillQ directory client.
//!
//! Controllers coordinate the domain types with the directory client and the
//! image encoder: `CreationFormController` for the creation form and
//! `DirectoryViewController` for the listing. `DirectoryApp` wires them up.

pub mod bootstrap;
pub mod creation_form;
pub mod directory_view;
pub mod list_presenter;
pub mod write_dispatcher;

#[cfg(test)]
mod test_support;

pub use bootstrap::DirectoryApp;
pub use creation_form::{CreationFormController, FormPhase, SubmitOutcome};
pub use directory_view::{DirectoryViewController, DirectoryViewState, ViewPhase};
pub use list_presenter::{ListIntent, ListPresenter, ListView, NO_DATA_MESSAGE, ProgrammerCard};
pub use write_dispatcher::{WriteCompletion, WriteDispatcher};
