//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ApiError, StorageError};

/// Map domain errors to a one-line message plus a hint where the user can act on it.
pub fn map_error(e: &ApiError) -> String {
    let hint = match e {
        ApiError::ConfigError(_) => {
            Some("check config/config.toml and CAMPAIGN_FORGE__* environment overrides")
        }
        ApiError::ReadFailed { .. } => Some("check that the input path exists and is readable"),
        ApiError::InvalidRecords(_) => {
            Some("the input must be a JSON array written by `generate --save`")
        }
        ApiError::StorageError(StorageError::WriteFailed { .. }) => {
            Some("check that the output directory exists and is writable")
        }
        _ => None,
    };
    match hint {
        Some(hint) => format!("{}\n  hint: {}", e, hint),
        None => e.to_string(),
    }
}
