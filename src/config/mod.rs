//! Persistent user configuration.
//!
//! The configuration is loaded once when the shell starts, handed to the
//! components that need it, and written back only when the user changes a
//! setting or a farm profile is saved.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiSettings;
use crate::errors::AdvisorError;
use crate::utils::{paths, persistence};
use crate::wizard::SaveFailurePolicy;

pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "hi", "mr"];
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_API_URL: &str = "CROP_ADVISOR_API_URL";
const ENV_TOKEN: &str = "CROP_ADVISOR_TOKEN";

/// Keys accepted by `config set`.
pub const CONFIG_KEYS: &[&str] = &["language", "api-url", "token", "timeout", "policy", "location"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub language: String,
    pub api_base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    pub request_timeout_secs: u64,
    pub save_failure_policy: SaveFailurePolicy,
    /// Free-text region, typically geocoder output, used to prefill the state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_farm_save: Option<DateTime<Utc>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "en".into(),
            api_base_url: DEFAULT_API_BASE_URL.into(),
            auth_token: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            save_failure_policy: SaveFailurePolicy::default(),
            location_hint: None,
            last_farm_save: None,
        }
    }
}

impl Config {
    /// Updates a single setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), AdvisorError> {
        let value = value.trim();
        match key {
            "language" => {
                let code = value.to_ascii_lowercase();
                if !SUPPORTED_LANGUAGES.contains(&code.as_str()) {
                    return Err(AdvisorError::InvalidInput(format!(
                        "unsupported language `{}` (expected one of: {})",
                        value,
                        SUPPORTED_LANGUAGES.join(", ")
                    )));
                }
                self.language = code;
            }
            "api-url" => {
                if !(value.starts_with("http://") || value.starts_with("https://")) {
                    return Err(AdvisorError::InvalidInput(format!(
                        "API URL must start with http:// or https:// (got `{}`)",
                        value
                    )));
                }
                self.api_base_url = value.trim_end_matches('/').to_string();
            }
            "token" => self.auth_token = non_empty(value),
            "timeout" => {
                let secs = value.parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
                    AdvisorError::InvalidInput(format!(
                        "timeout must be a whole number of seconds greater than zero (got `{}`)",
                        value
                    ))
                })?;
                self.request_timeout_secs = secs;
            }
            "policy" => {
                self.save_failure_policy = value
                    .parse()
                    .map_err(|err: String| AdvisorError::InvalidInput(err))?;
            }
            "location" => self.location_hint = non_empty(value),
            other => {
                return Err(AdvisorError::InvalidInput(format!(
                    "unknown configuration key `{}` (expected one of: {})",
                    other,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Applies overrides from a variable lookup such as `std::env::var`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).and_then(|url| non_empty(&url)) {
            tracing::debug!(url = %url, "API base URL overridden from environment");
            self.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(token) = lookup(ENV_TOKEN).and_then(|token| non_empty(&token)) {
            self.auth_token = Some(token);
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.api_base_url.clone(),
            auth_token: self.auth_token.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    /// Human-readable `key = value` lines for `config show`.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("language = {}", self.language),
            format!("api-url  = {}", self.api_base_url),
            format!(
                "token    = {}",
                if self.auth_token.is_some() { "[set]" } else { "[unset]" }
            ),
            format!("timeout  = {}s", self.request_timeout_secs),
            format!("policy   = {}", self.save_failure_policy),
            format!(
                "location = {}",
                self.location_hint.as_deref().unwrap_or("[unset]")
            ),
            format!(
                "last save = {}",
                self.last_farm_save
                    .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| "never".into())
            ),
        ]
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Handles persistence of [`Config`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, AdvisorError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, AdvisorError> {
        persistence::ensure_dir(&base)?;
        persistence::ensure_dir(&paths::config_dir_in(&base))?;
        Ok(Self {
            path: paths::config_file_in(&base),
        })
    }

    /// Reads the stored configuration, falling back to defaults.
    pub fn load(&self) -> Result<Config, AdvisorError> {
        Ok(persistence::load_json(&self.path)?.unwrap_or_default())
    }

    /// Reads the stored configuration and applies environment overrides.
    pub fn load_effective(&self) -> Result<Config, AdvisorError> {
        let mut config = self.load()?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), AdvisorError> {
        persistence::save_json_atomic(config, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn manager() -> (TempDir, ConfigManager) {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(temp.path().to_path_buf()).unwrap();
        (temp, manager)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let (_temp, manager) = manager();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.save_failure_policy, SaveFailurePolicy::Proceed);
    }

    #[test]
    fn save_then_load_round_trips() {
        let (_temp, manager) = manager();
        let mut config = Config::default();
        config.set("language", "MR").unwrap();
        config.set("policy", "retry:4").unwrap();
        config.set("location", "महाराष्ट्र").unwrap();
        config.last_farm_save = Some(Utc::now());
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.language, "mr");
        assert_eq!(
            loaded.save_failure_policy,
            SaveFailurePolicy::Retry { attempts: 4 }
        );
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let (_temp, manager) = manager();
        std::fs::write(manager.path(), r#"{ "language": "hi" }"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.language, "hi");
        assert_eq!(config.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("language", "fr").is_err());
        assert!(config.set("api-url", "ftp://example").is_err());
        assert!(config.set("timeout", "0").is_err());
        assert!(config.set("policy", "sometimes").is_err());
        assert!(config.set("colour", "green").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn set_clears_optional_values_with_blank_input() {
        let mut config = Config::default();
        config.set("token", "abc").unwrap();
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        config.set("token", "  ").unwrap();
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn api_url_is_normalized() {
        let mut config = Config::default();
        config.set("api-url", "https://advisor.example/").unwrap();
        assert_eq!(config.api_base_url, "https://advisor.example");
    }

    #[test]
    fn env_overrides_replace_stored_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CROP_ADVISOR_API_URL", "http://10.0.0.5:8000/"),
            ("CROP_ADVISOR_TOKEN", "secret"),
        ]);
        let mut config = Config::default();
        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "http://10.0.0.5:8000");
        assert_eq!(config.auth_token.as_deref(), Some("secret"));

        let settings = config.api_settings();
        assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn describe_masks_token() {
        let mut config = Config::default();
        config.set("token", "hunter2").unwrap();
        let lines = config.describe().join("\n");
        assert!(lines.contains("token    = [set]"));
        assert!(!lines.contains("hunter2"));
    }
}
