//! Path management for skillq configuration and log files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/skillq/            # Config directory
//! ├── config.toml              # Client configuration
//! └── logs/                    # Application logs
//!     └── skillq.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for skillq_core::SkillqError {
    fn from(err: PathError) -> Self {
        skillq_core::SkillqError::config(err.to_string())
    }
}

/// Resolves skillq paths, optionally rooted at an override directory.
#[derive(Debug, Clone, Default)]
pub struct SkillqPaths {
    base_override: Option<PathBuf>,
}

impl SkillqPaths {
    /// Creates a resolver. `None` uses the platform config directory.
    pub fn new(base_override: Option<PathBuf>) -> Self {
        Self { base_override }
    }

    /// Returns the skillq configuration directory (e.g. `~/.config/skillq/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_override {
            return Ok(base.clone());
        }
        dirs::config_dir()
            .map(|dir| dir.join("skillq"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }
}
