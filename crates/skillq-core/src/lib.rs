//! Domain layer for the SkillQ directory client.
//!
//! Holds the programmer model, the client-local creation draft, and the
//! traits the infrastructure and interaction crates implement.

pub mod config;
pub mod draft;
pub mod error;
pub mod image;
pub mod notice;
pub mod programmer;

pub use error::{Result, SkillqError};
