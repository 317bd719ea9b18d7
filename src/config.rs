//! Playground Configuration
//!
//! Settings for the execution endpoint, run timeout and startup language.
//! Config is read from `~/.config/runpad/config.toml`.
//!
//! ## Priority Order (highest to lowest)
//!
//! 1. CLI flags (`--endpoint`, `--timeout`, `--executor`)
//! 2. Environment variables (`RUNPAD_ENDPOINT`, `RUNPAD_TIMEOUT_SECS`, `RUNPAD_DEFAULT_LANGUAGE`)
//! 3. Config file
//! 4. Defaults

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{PlaygroundError, Result};
use crate::language::DEFAULT_LANGUAGE;
use crate::piston::{parse_endpoint, EXECUTOR_NAMES, PISTON_API_URL};

/// Seconds a run may take before it is reported as timed out
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_ENDPOINT: &str = "RUNPAD_ENDPOINT";
pub const ENV_TIMEOUT: &str = "RUNPAD_TIMEOUT_SECS";
pub const ENV_LANGUAGE: &str = "RUNPAD_DEFAULT_LANGUAGE";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlaygroundConfig {
    /// Full URL of the Piston execute route
    pub endpoint: String,

    /// Upper bound for one run, in seconds
    pub timeout_secs: u64,

    /// Language selected when the playground opens
    pub default_language: String,

    /// Executor backend (piston, mock)
    pub executor: String,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            endpoint: PISTON_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            default_language: DEFAULT_LANGUAGE.to_string(),
            executor: "piston".to_string(),
        }
    }
}

impl PlaygroundConfig {
    /// `~/.config/runpad/` on Unix, `%APPDATA%/runpad/` on Windows
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("runpad")
    }

    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Load from the default path.
    ///
    /// Returns defaults if the file doesn't exist, an error if it is malformed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| PlaygroundError::Config {
            reason: format!("Failed to read {}: {}", path.display(), e),
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| PlaygroundError::Config {
            reason: format!("Failed to parse config: {}", e),
        })
    }

    /// Merge with process environment variables
    pub fn with_env(self) -> Result<Self> {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Merge with variables provided by `lookup`.
    ///
    /// Empty values are ignored.
    pub fn with_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.endpoint = endpoint;
        }

        if let Some(raw) = get(ENV_TIMEOUT) {
            self.timeout_secs = raw.trim().parse().map_err(|_| PlaygroundError::Config {
                reason: format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT, raw),
            })?;
        }

        if let Some(language) = get(ENV_LANGUAGE) {
            self.default_language = language;
        }

        Ok(self)
    }

    /// Check values that would only fail later at run time
    pub fn validate(&self) -> Result<()> {
        parse_endpoint(&self.endpoint)?;

        if !EXECUTOR_NAMES.contains(&self.executor.to_lowercase().as_str()) {
            return Err(PlaygroundError::UnknownExecutor {
                name: self.executor.clone(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(PlaygroundError::Config {
                reason: "timeout_secs must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_path_contains_runpad() {
        let path = PlaygroundConfig::config_path();
        assert!(path.to_string_lossy().contains("runpad"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_defaults() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.endpoint, "https://emkc.org/api/v2/piston/execute");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.default_language, "javascript");
        assert_eq!(config.executor, "piston");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = PlaygroundConfig::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, PlaygroundConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "timeout_secs = 5\ndefault_language = \"python\"\n").unwrap();

        let config = PlaygroundConfig::load_from(&path).unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.default_language, "python");
        assert_eq!(config.endpoint, PISTON_API_URL);
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = PlaygroundConfig::from_toml("timeout_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, PlaygroundError::Config { .. }));
    }

    #[test]
    fn test_env_overrides_file() {
        let config = PlaygroundConfig::from_toml("endpoint = \"http://file:2000/execute\"")
            .unwrap()
            .with_env_from(env(&[
                (ENV_ENDPOINT, "http://env:2000/execute"),
                (ENV_TIMEOUT, "12"),
                (ENV_LANGUAGE, "rust"),
            ]))
            .unwrap();

        assert_eq!(config.endpoint, "http://env:2000/execute");
        assert_eq!(config.timeout_secs, 12);
        assert_eq!(config.default_language, "rust");
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let config = PlaygroundConfig::default()
            .with_env_from(env(&[(ENV_ENDPOINT, "  ")]))
            .unwrap();
        assert_eq!(config.endpoint, PISTON_API_URL);
    }

    #[test]
    fn test_bad_env_timeout() {
        let err = PlaygroundConfig::default()
            .with_env_from(env(&[(ENV_TIMEOUT, "ten")]))
            .unwrap_err();
        assert!(err.to_string().contains("RUNPAD_TIMEOUT_SECS"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = PlaygroundConfig {
            endpoint: "not a url".to_string(),
            ..PlaygroundConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PlaygroundError::InvalidEndpoint { .. })
        ));

        let config = PlaygroundConfig {
            timeout_secs: 0,
            ..PlaygroundConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlaygroundError::Config { .. })));
    }

    #[test]
    fn test_validate_checks_executor_name() {
        let config = PlaygroundConfig {
            executor: "docker".to_string(),
            ..PlaygroundConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, PlaygroundError::UnknownExecutor { .. }));

        let config = PlaygroundConfig {
            executor: "Mock".to_string(),
            ..PlaygroundConfig::default()
        };
        assert!(config.validate().is_ok());
    }
}
