//! Credential resolution for the generation service.
//!
//! Precedence: local override (flag or config file), then the process
//! environment. Resolution is a plain function over explicit inputs; the
//! pipeline only ever receives the resolved key.

use std::fmt;

/// Environment variable consulted after the local override
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Bearer credential. Never printed in full; short keys are not printed at all.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Returns `None` for blank input.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

/// Keys at or below this length are fully masked in `Debug` output
const MIN_LEN_FOR_TAIL: usize = 8;

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.chars().count() <= MIN_LEN_FOR_TAIL {
            return write!(f, "ApiKey(***)");
        }
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        write!(f, "ApiKey(***{})", tail)
    }
}

/// The two places a key may come from.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    pub local_override: Option<String>,
    pub environment: Option<String>,
}

impl CredentialSources {
    /// Capture the environment value alongside a caller-provided override.
    pub fn from_env(local_override: Option<String>) -> Self {
        Self {
            local_override,
            environment: std::env::var(OPENAI_API_KEY_ENV).ok(),
        }
    }

    pub fn resolve(&self) -> Option<ApiKey> {
        self.local_override
            .clone()
            .and_then(ApiKey::new)
            .or_else(|| self.environment.clone().and_then(ApiKey::new))
    }
}
