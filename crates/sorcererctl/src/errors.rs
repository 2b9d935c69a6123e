//! Exit codes for sorcererctl

use sorcerer_common::SorcererError;

/// Exit code for general errors (bad config file, I/O, timeout)
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code when no credential is configured
pub const EXIT_CONFIGURATION_MISSING: i32 = 64;

/// Exit code when the service output could not be parsed
pub const EXIT_MALFORMED_RESPONSE: i32 = 65;

/// Exit code when the generation service is unreachable or refused
pub const EXIT_SERVICE_UNAVAILABLE: i32 = 70;

pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<SorcererError>() {
        Some(SorcererError::ConfigurationMissing(_)) => EXIT_CONFIGURATION_MISSING,
        Some(SorcererError::MalformedResponse { .. }) => EXIT_MALFORMED_RESPONSE,
        Some(SorcererError::ServiceUnavailable { .. }) => EXIT_SERVICE_UNAVAILABLE,
        None => EXIT_GENERAL_ERROR,
    }
}
