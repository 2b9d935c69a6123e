//! Error types for the generation pipeline.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SorcererError {
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Generation service unavailable{}: {detail}", status_suffix(.status))]
    ServiceUnavailable { status: Option<u16>, detail: String },

    #[error("Malformed response from generation service: {reason}")]
    MalformedResponse { reason: String, raw: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {})", s)).unwrap_or_default()
}

impl SorcererError {
    /// Stable discriminant for callers that branch on the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            SorcererError::ConfigurationMissing(_) => "configuration_missing",
            SorcererError::ServiceUnavailable { .. } => "service_unavailable",
            SorcererError::MalformedResponse { .. } => "malformed_response",
        }
    }

    /// Numeric code shown next to CLI error messages.
    pub fn code(&self) -> i32 {
        match self {
            SorcererError::ConfigurationMissing(_) => -32010,
            SorcererError::ServiceUnavailable { .. } => -32011,
            SorcererError::MalformedResponse { .. } => -32700,
        }
    }

    /// None of the failures are retried by the pipeline itself.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Raw service output attached to the error, if any.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            SorcererError::MalformedResponse { raw, .. } => Some(raw),
            SorcererError::ServiceUnavailable { detail, .. } => Some(detail),
            SorcererError::ConfigurationMissing(_) => None,
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        SorcererError::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}
