//! Directory client trait.
//!
//! Defines the interface between view state and the remote directory store.

use super::model::{CreateProgrammerRequest, Programmer, ProgrammerId};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the remote programmer directory.
///
/// Every operation reports its real outcome. Whether a caller waits for that
/// outcome (queries) or only logs it (fire-and-forget writes) is decided by
/// the application layer, not by implementations of this trait.
///
/// # Implementation Notes
///
/// Implementations should return:
/// - `SkillqError::ReadFailed` for failed queries
/// - `SkillqError::WriteFailed` for failed mutations
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Lists every programmer in the directory, in service order.
    async fn list_all(&self) -> Result<Vec<Programmer>>;

    /// Lists programmers whose skills match `skill`.
    ///
    /// Match semantics belong to the service. An empty keyword is passed
    /// through as-is.
    async fn filter_by_skill(&self, skill: &str) -> Result<Vec<Programmer>>;

    /// Creates a programmer. The response body is not consumed.
    async fn create(&self, request: &CreateProgrammerRequest) -> Result<()>;

    /// Deletes the programmer with the given ID. The response body is not consumed.
    async fn delete(&self, id: &ProgrammerId) -> Result<()>;
}
