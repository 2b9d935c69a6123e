//! Sorcerer configuration.
//!
//! Config file: ~/.config/subject-sorcerer/config.toml (or `--config`).
//! A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const ENDPOINT_ENV: &str = "SORCERER_LLM_ENDPOINT";
pub const MODEL_ENV: &str = "SORCERER_LLM_MODEL";

/// Generation service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Unset means no timeout; the exchange runs to completion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Local credential override. Takes precedence over OPENAI_API_KEY.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

fn default_endpoint() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.8
}

fn default_max_tokens() -> u32 {
    1100
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: None,
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SorcererConfig {
    #[serde(default)]
    pub llm: LlmConfig,
}

impl SorcererConfig {
    /// Default user config path: <config dir>/subject-sorcerer/config.toml
    pub fn user_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("Cannot determine config directory")?;
        Ok(base.join("subject-sorcerer").join("config.toml"))
    }

    /// Load from `path`, or from the user config path when `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::user_config_path() {
                Ok(p) => p,
                Err(e) => {
                    debug!("No config directory ({}), using defaults", e);
                    return Ok(Self::default());
                }
            },
        };

        if !path.exists() {
            debug!("Config {} not found, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: SorcererConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Apply SORCERER_LLM_* overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|v| !v.trim().is_empty()) {
            self.llm.endpoint = endpoint.trim().to_string();
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.llm.model = model.trim().to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SorcererConfig::default();
        assert_eq!(config.llm.endpoint, "https://api.openai.com");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, 1100);
        assert!((config.llm.temperature - 0.8).abs() < f32::EPSILON);
        assert!(config.llm.timeout_secs.is_none());
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: SorcererConfig = toml::from_str(
            r#"
            [llm]
            model = "gpt-4o-mini"
            timeout_secs = 45
            "#,
        )
        .unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.timeout_secs, Some(45));
        assert_eq!(config.llm.endpoint, "https://api.openai.com");
        assert_eq!(config.llm.max_tokens, 1100);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SorcererConfig::load(Some(&dir.path().join("nope.toml"))).unwrap();
        assert_eq!(config, SorcererConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = SorcererConfig::default();
        config.llm.api_key = Some("sk-file".into());
        config.save_to(&path).unwrap();

        let loaded = SorcererConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.llm.api_key.as_deref(), Some("sk-file"));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[llm\nmodel = ").unwrap();
        assert!(SorcererConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = SorcererConfig::default();
        config.apply_overrides(|key| match key {
            ENDPOINT_ENV => Some("http://localhost:8080".to_string()),
            MODEL_ENV => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(config.llm.endpoint, "http://localhost:8080");
        assert_eq!(config.llm.model, "gpt-4o");
    }
}
