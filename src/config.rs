//! Configuration System
//!
//! Layered configuration for the campaign engine: built-in defaults, the global config
//! file, workspace config files, then `CAMPAIGN_FORGE__*` environment overrides.

use crate::error::ApiError;
use crate::fetch::HttpConfig;
use crate::gateway::RetryConfig;
use crate::library::LibraryConfig;
use crate::logging::LoggingConfig;
use crate::prompt::ImageConfig;
use crate::provider::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod environment;
    pub mod global_file;
    pub mod workspace_file;
}

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Model provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Image rendering endpoint
    #[serde(default)]
    pub image: ImageConfig,

    /// Asset library location and thresholds
    #[serde(default)]
    pub library: LibraryConfig,

    /// Model call retry policy
    #[serde(default)]
    pub retry: RetryConfig,

    /// Image download settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Provider(String),
    Image(String),
    Library(String),
    Retry(String),
    Http(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Provider(msg) => write!(f, "Provider: {}", msg),
            ValidationError::Image(msg) => write!(f, "Image: {}", msg),
            ValidationError::Library(msg) => write!(f, "Library: {}", msg),
            ValidationError::Retry(msg) => write!(f, "Retry: {}", msg),
            ValidationError::Http(msg) => write!(f, "Http: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl ForgeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.provider.validate() {
            errors.push(ValidationError::Provider(e));
        }
        if let Err(e) = self.image.validate() {
            errors.push(ValidationError::Image(e));
        }
        if let Err(e) = self.library.validate() {
            errors.push(ValidationError::Library(e));
        }
        if let Err(e) = self.retry.validate() {
            errors.push(ValidationError::Retry(e));
        }
        if self.http.download_timeout_secs == 0 {
            errors.push(ValidationError::Http(
                "Download timeout must be greater than zero".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold all errors into one `ApiError`.
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

/// Loads `ForgeConfig` from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    pub fn load(workspace_root: &Path) -> Result<ForgeConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::environment::add_to_builder(builder);
        let config: ForgeConfig = builder.build()?.try_deserialize()?;
        config.validated()
    }

    /// Load configuration from one explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<ForgeConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path.to_path_buf()));
        let builder = sources::environment::add_to_builder(builder);
        let config: ForgeConfig = builder.build()?.try_deserialize()?;
        config.validated()
    }
}
