//! Model Provider Abstraction
//!
//! Interface to the remote multimodal model. The pipeline only needs two shapes of call:
//! a single text instruction, and an instruction paired with a product image. Both return
//! free text. `GeminiClient` speaks the Generative Language `generateContent` API.

use crate::error::ApiError;
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use std::time::Duration;

/// Environment variables consulted for the credential when the config has none.
pub const CREDENTIAL_ENV_VARS: [&str; 2] = ["GOOGLE_API_KEY", "GEMINI_API_KEY"];

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL (default: Generative Language v1beta)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// API key; falls back to GOOGLE_API_KEY / GEMINI_API_KEY
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            endpoint: None,
            api_key: None,
        }
    }
}

impl ProviderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name cannot be empty".to_string());
        }
        if let Some(endpoint) = &self.endpoint {
            if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
                return Err(format!("Endpoint is not an http(s) URL: {}", endpoint));
            }
        }
        Ok(())
    }

    pub fn endpoint_or_default(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Credential from config, then the environment. Blank values count as absent.
    pub fn resolve_credential(&self) -> Option<String> {
        let from_config = self
            .api_key
            .as_ref()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        from_config.or_else(|| {
            CREDENTIAL_ENV_VARS.iter().find_map(|var| {
                std::env::var(var)
                    .ok()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
            })
        })
    }
}

/// Product image handed to the vision call
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub mime_type: String,
    pub data: Bytes,
}

impl ProductImage {
    pub fn new(mime_type: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Load an image file; the MIME type comes from the extension.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let data = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(mime_type_for(path), data))
    }
}

/// MIME type guessed from a file extension (defaults to JPEG).
pub fn mime_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

/// One part of a model request
#[derive(Debug, Clone)]
pub enum ModelInput {
    Text(String),
    Image(ProductImage),
}

/// Ordered request parts
#[derive(Debug, Clone)]
pub struct ModelRequest {
    pub parts: Vec<ModelInput>,
}

impl ModelRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            parts: vec![ModelInput::Text(prompt.into())],
        }
    }

    pub fn vision(prompt: impl Into<String>, image: ProductImage) -> Self {
        Self {
            parts: vec![ModelInput::Text(prompt.into()), ModelInput::Image(image)],
        }
    }
}

/// Model provider client trait
#[async_trait]
pub trait ModelProviderClient: Send + Sync {
    /// Run a request and return the model's text
    async fn generate(&self, request: &ModelRequest) -> Result<String, ApiError>;

    /// Get the provider name
    fn provider_name(&self) -> &str;

    /// Get the model name
    fn model_name(&self) -> &str;
}

// Helper function to map HTTP errors to ApiError
fn map_http_error(error: reqwest::Error) -> ApiError {
    if let Some(status) = error.status() {
        map_status(status.as_u16(), error.to_string())
    } else if error.is_timeout() {
        ApiError::ProviderRequestFailed(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::ProviderRequestFailed(format!("Connection error: {}", error))
    } else {
        ApiError::ProviderError(format!("HTTP error: {}", error))
    }
}

fn map_status(status: u16, detail: String) -> ApiError {
    match status {
        401 | 403 => ApiError::ProviderAuthFailed(format!("Authentication failed: {}", detail)),
        429 => ApiError::ProviderRateLimit(format!("Rate limit exceeded: {}", detail)),
        404 => ApiError::ProviderModelNotFound(format!("Model not found: {}", detail)),
        _ => ApiError::ProviderRequestFailed(format!(
            "Request failed with status {}: {}",
            status, detail
        )),
    }
}

const PROVIDER_HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const PROVIDER_HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn build_provider_http_client() -> Result<Client, ApiError> {
    Client::builder()
        .connect_timeout(PROVIDER_HTTP_CONNECT_TIMEOUT)
        .timeout(PROVIDER_HTTP_REQUEST_TIMEOUT)
        .build()
        .map_err(|e| ApiError::ProviderError(format!("Failed to create HTTP client: {}", e)))
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Gemini provider client
pub struct GeminiClient {
    client: Client,
    model: String,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(model: String, api_key: String, base_url: Option<String>) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::ProviderAuthFailed(
                "API key is empty".to_string(),
            ));
        }
        let client = build_provider_http_client()?;
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client,
            model,
            api_key,
            base_url,
        })
    }

    fn request_body(request: &ModelRequest) -> Value {
        let parts: Vec<Value> = request
            .parts
            .iter()
            .map(|part| match part {
                ModelInput::Text(text) => json!({ "text": text }),
                ModelInput::Image(image) => json!({
                    "inlineData": {
                        "mimeType": image.mime_type,
                        "data": general_purpose::STANDARD.encode(&image.data),
                    }
                }),
            })
            .collect();

        json!({ "contents": [{ "role": "user", "parts": parts }] })
    }
}

#[async_trait]
impl ModelProviderClient for GeminiClient {
    async fn generate(&self, request: &ModelRequest) -> Result<String, ApiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&Self::request_body(request))
            .send()
            .await
            .map_err(map_http_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(map_status(status.as_u16(), error_text));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ApiError::ProviderError(format!("Failed to parse response: {}", e)))?;

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(ApiError::ProviderError(
                "No text candidates in response".to_string(),
            ));
        }
        Ok(text)
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Provider factory for creating provider clients
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_client(
        config: &ProviderConfig,
        credential: &str,
    ) -> Result<Box<dyn ModelProviderClient>, ApiError> {
        config.validate().map_err(ApiError::ConfigError)?;
        Ok(Box::new(GeminiClient::new(
            config.model.clone(),
            credential.to_string(),
            config.endpoint.clone(),
        )?))
    }
}

// Mock provider for testing
#[cfg(test)]
pub struct MockProvider {
    responses: std::sync::Mutex<std::collections::VecDeque<Result<String, ApiError>>>,
    calls: std::sync::Arc<std::sync::atomic::AtomicUsize>,
}

#[cfg(test)]
impl MockProvider {
    pub fn new(responses: Vec<Result<String, ApiError>>) -> Self {
        Self {
            responses: std::sync::Mutex::new(responses.into()),
            calls: std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0)),
        }
    }

    pub fn call_counter(&self) -> std::sync::Arc<std::sync::atomic::AtomicUsize> {
        std::sync::Arc::clone(&self.calls)
    }
}

#[cfg(test)]
#[async_trait]
impl ModelProviderClient for MockProvider {
    async fn generate(&self, _request: &ModelRequest) -> Result<String, ApiError> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::ProviderError("No scripted response".to_string())))
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}
