//! Model gateway
//!
//! Owns the model handle and the mock-mode flag for one engine instance. Mock mode is
//! monotonic: once set (missing credential, failed client construction, or an exhausted
//! retry budget) it stays set and the handle is never consulted again.

use crate::error::ApiError;
use crate::provider::{ModelProviderClient, ModelRequest, ProviderConfig, ProviderFactory};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Fixed-delay retry settings for model calls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Sleep between failed attempts (milliseconds)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    2000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl RetryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.attempts == 0 {
            return Err("Retry attempts must be at least 1".to_string());
        }
        Ok(())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Why the gateway is serving mock data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockReason {
    MissingCredential,
    AuthFailed,
    RetriesExhausted,
}

/// Model handle plus sticky mock-mode state
pub struct ModelGateway {
    client: Option<Box<dyn ModelProviderClient>>,
    retry: RetryConfig,
    mock_reason: Option<MockReason>,
}

impl ModelGateway {
    /// Build a gateway from an optional credential. Any failure to construct the client
    /// puts the gateway into mock mode for its whole life.
    pub fn connect(
        provider: &ProviderConfig,
        credential: Option<String>,
        retry: RetryConfig,
    ) -> Self {
        let Some(key) = credential else {
            info!("No model credential configured; running in mock mode");
            return Self::mock(MockReason::MissingCredential, retry);
        };

        match ProviderFactory::create_client(provider, &key) {
            Ok(client) => {
                info!(
                    provider = client.provider_name(),
                    model = client.model_name(),
                    "Model client initialized"
                );
                Self {
                    client: Some(client),
                    retry,
                    mock_reason: None,
                }
            }
            Err(e) => {
                warn!(error = %e, "Auth Error: model client unavailable; running in mock mode");
                Self {
                    client: None,
                    retry,
                    mock_reason: Some(MockReason::AuthFailed),
                }
            }
        }
    }

    /// Gateway around an existing client.
    pub fn with_client(client: Box<dyn ModelProviderClient>, retry: RetryConfig) -> Self {
        Self {
            client: Some(client),
            retry,
            mock_reason: None,
        }
    }

    /// Gateway that is in mock mode from the start.
    pub fn mock(reason: MockReason, retry: RetryConfig) -> Self {
        Self {
            client: None,
            retry,
            mock_reason: Some(reason),
        }
    }

    pub fn is_mock(&self) -> bool {
        self.mock_reason.is_some()
    }

    pub fn mock_reason(&self) -> Option<MockReason> {
        self.mock_reason
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Call the model with bounded fixed-delay retry.
    ///
    /// Returns `None` in mock mode, or after the retry budget is spent (which also switches
    /// the gateway into mock mode). All failure kinds are retried the same way.
    pub async fn generate(&mut self, request: &ModelRequest) -> Option<String> {
        if self.is_mock() {
            return None;
        }
        let client = self.client.as_ref()?;

        let attempts = self.retry.attempts.max(1);
        let mut last_error: Option<ApiError> = None;
        for attempt in 1..=attempts {
            match client.generate(request).await {
                Ok(text) => return Some(text),
                Err(e) => {
                    warn!(attempt, attempts, error = %e, "API Error");
                    last_error = Some(e);
                    tokio::time::sleep(self.retry.delay()).await;
                }
            }
        }

        warn!(
            error = last_error.map(|e| e.to_string()).unwrap_or_default(),
            "Model retries exhausted; switching to mock mode"
        );
        self.mock_reason = Some(MockReason::RetriesExhausted);
        None
    }
}
