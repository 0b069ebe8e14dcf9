//! Client configuration.
//!
//! Every key is optional; a missing file or section yields the defaults below.

use crate::error::{Result, SkillqError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVICE_BASE_URL: &str = "http://localhost:5001/api/v1";
pub const DEFAULT_SERVICE_ORIGIN: &str = "http://localhost:5001";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClientConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Base URL with any trailing slash removed.
    ///
    /// A relative base (e.g. `/api/v1`) is joined onto `service.origin`.
    pub fn resolved_base_url(&self) -> Result<String> {
        let base = self.service.base_url.trim();
        if base.is_empty() {
            return Err(SkillqError::config("service.base_url must not be empty"));
        }

        let absolute = if base.starts_with("http://") || base.starts_with("https://") {
            base.to_string()
        } else {
            let origin = self.service.origin.trim().trim_end_matches('/');
            if origin.is_empty() {
                return Err(SkillqError::config(format!(
                    "relative service.base_url '{}' requires service.origin",
                    base
                )));
            }
            format!("{}/{}", origin, base.trim_start_matches('/'))
        };

        Ok(absolute.trim_end_matches('/').to_string())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default)]
    pub create_endpoint: CreateEndpoint,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_SERVICE_BASE_URL.to_string()
}

fn default_origin() -> String {
    DEFAULT_SERVICE_ORIGIN.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            origin: default_origin(),
            create_endpoint: CreateEndpoint::default(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Which path the create call is posted to.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreateEndpoint {
    /// `POST /users/`
    #[default]
    Users,
    /// `POST /users/create`
    UsersCreate,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub write_policy: WritePolicy,
    #[serde(default)]
    pub skill_append_policy: SkillAppendPolicy,
    #[serde(default)]
    pub query_ordering: QueryOrdering,
}

/// How create/delete outcomes relate to the user-facing confirmation.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// Dispatch the write as a detached task, log its outcome, confirm immediately.
    #[default]
    FireAndForget,
    /// Await the write; confirm only on success and surface failures.
    Confirmed,
}

impl std::str::FromStr for WritePolicy {
    type Err = SkillqError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire_and_forget" | "fire-and-forget" => Ok(Self::FireAndForget),
            "confirmed" => Ok(Self::Confirmed),
            other => Err(SkillqError::config(format!("unknown write policy '{}'", other))),
        }
    }
}

/// Rule applied when the pending skill is appended to a draft.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkillAppendPolicy {
    /// Append exactly what was typed, including empty strings and duplicates.
    #[default]
    AppendAsTyped,
    /// Trim, then reject empty values and values already present.
    Validated,
}

/// What happens when overlapping queries complete out of order.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryOrdering {
    /// Whichever query completes last overwrites the list, even if it was issued first.
    #[default]
    LastCompletedWins,
    /// Completions older than the newest applied query are discarded.
    LatestIssuedWins,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_to_file")]
    pub file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_to_file(),
        }
    }
}
