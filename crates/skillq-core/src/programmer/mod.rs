//! Programmer domain module.
//!
//! # Module Structure
//!
//! - `model`: `Programmer`, `ProgrammerId` and the creation request body
//! - `client`: `DirectoryClient` trait implemented by remote transports

pub mod client;
mod model;

pub use client::DirectoryClient;
pub use model::{CreateProgrammerRequest, ImagePayload, Programmer, ProgrammerId};
