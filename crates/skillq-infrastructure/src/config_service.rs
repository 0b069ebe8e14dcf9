//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/skillq/config.toml` and
//! applies environment overrides on top of it.

use crate::paths::SkillqPaths;
use skillq_core::config::{ClientConfig, WritePolicy};
use skillq_core::{Result, SkillqError};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Overrides `service.base_url`.
pub const ENV_SERVICE_BASE_URL: &str = "SKILLQ_SERVICE_BASE_URL";
/// Overrides `behavior.write_policy` (`fire_and_forget` or `confirmed`).
pub const ENV_WRITE_POLICY: &str = "SKILLQ_WRITE_POLICY";

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: SkillqPaths,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    /// Creates a service reading from the platform config directory.
    pub fn new() -> Self {
        Self::with_paths(SkillqPaths::default())
    }

    pub fn with_paths(paths: SkillqPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// A file that cannot be parsed falls back to defaults (environment
    /// overrides still apply).
    pub fn get_config(&self) -> ClientConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!("[ConfigService] Falling back to default config: {}", e);
            apply_env_overrides(ClientConfig::default(), |key| std::env::var(key).ok())
        });

        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Reads the config file (if any) and applies environment overrides.
    pub fn load(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        let from_file = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            ClientConfig::from_toml_str(&content).map_err(|e| {
                SkillqError::config(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            tracing::debug!(
                "[ConfigService] No config file at {}, using defaults",
                path.display()
            );
            ClientConfig::default()
        };

        Ok(apply_env_overrides(from_file, |key| std::env::var(key).ok()))
    }

    /// Writes `config` to the config file, creating the directory if needed.
    pub fn save(&self, config: &ClientConfig) -> Result<()> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, config.to_toml_string()?)?;
        self.invalidate_cache();
        Ok(())
    }

    pub fn paths(&self) -> &SkillqPaths {
        &self.paths
    }

    fn config_path(&self) -> Result<PathBuf> {
        Ok(self.paths.config_file()?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies environment overrides; `lookup` returns the value of a variable.
///
/// Unparseable values are ignored with a warning.
pub fn apply_env_overrides<F>(mut config: ClientConfig, lookup: F) -> ClientConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(ENV_SERVICE_BASE_URL)
        && !base_url.trim().is_empty()
    {
        config.service.base_url = base_url;
    }

    if let Some(raw) = lookup(ENV_WRITE_POLICY) {
        match raw.parse::<WritePolicy>() {
            Ok(policy) => config.behavior.write_policy = policy,
            Err(e) => tracing::warn!("[ConfigService] Ignoring {}: {}", ENV_WRITE_POLICY, e),
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use skillq_core::config::QueryOrdering;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_paths(SkillqPaths::new(Some(temp_dir.path().into())));

        let config = apply_env_overrides(service.load().unwrap(), no_env);
        assert_eq!(config.service, ClientConfig::default().service);
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SkillqPaths::new(Some(temp_dir.path().join("nested")));
        let service = ConfigService::with_paths(paths);

        let mut config = ClientConfig::default();
        config.behavior.query_ordering = QueryOrdering::LatestIssuedWins;
        service.save(&config).unwrap();

        let path = temp_dir.path().join("nested").join("config.toml");
        let loaded = ClientConfig::from_toml_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(loaded.behavior.query_ordering, QueryOrdering::LatestIssuedWins);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("config.toml"), "[service\nbase_url = 1").unwrap();
        let service = ConfigService::with_paths(SkillqPaths::new(Some(temp_dir.path().into())));

        let err = service.load().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_get_config_is_cached_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_paths(SkillqPaths::new(Some(temp_dir.path().into())));

        let first = service.get_config();
        std::fs::write(
            temp_dir.path().join("config.toml"),
            "[logging]\nlevel = \"trace\"\n",
        )
        .unwrap();
        assert_eq!(service.get_config(), first);

        service.invalidate_cache();
        assert_eq!(service.get_config().logging.level, "trace");
    }

    #[test]
    fn test_env_overrides_win() {
        let config = apply_env_overrides(ClientConfig::default(), |key| match key {
            ENV_SERVICE_BASE_URL => Some("https://override.example/api".to_string()),
            ENV_WRITE_POLICY => Some("confirmed".to_string()),
            _ => None,
        });

        assert_eq!(config.service.base_url, "https://override.example/api");
        assert_eq!(config.behavior.write_policy, WritePolicy::Confirmed);
    }

    #[test]
    fn test_bad_env_value_is_ignored() {
        let config = apply_env_overrides(ClientConfig::default(), |key| {
            (key == ENV_WRITE_POLICY).then(|| "sometimes".to_string())
        });
        assert_eq!(config.behavior.write_policy, WritePolicy::FireAndForget);
    }
}
