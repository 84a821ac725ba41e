//! Mock-mode fallback: every way the model can be unavailable ends in the same records

use campaign_forge::campaign::mock_campaigns;
use campaign_forge::gateway::{MockReason, ModelGateway, RetryConfig};
use campaign_forge::library::AssetLibrary;
use campaign_forge::orchestrator::{CampaignOrchestrator, MOCK_VISUAL_CONTEXT};
use campaign_forge::prompt::{ImageConfig, ImagePromptBuilder};
use campaign_forge::provider::{ProductImage, ProviderConfig};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::test_utils::StubImages;

const GENERATE_PATH: &str = "/models/gemini-1.5-flash:generateContent";

fn no_delay() -> RetryConfig {
    RetryConfig {
        attempts: 3,
        delay_ms: 0,
    }
}

fn live_gateway(server: &MockServer) -> ModelGateway {
    let provider = ProviderConfig {
        endpoint: Some(server.uri()),
        api_key: Some("test-key".to_string()),
        ..ProviderConfig::default()
    };
    ModelGateway::connect(&provider, Some("test-key".to_string()), no_delay())
}

fn engine(gateway: ModelGateway, temp: &TempDir, images: Arc<StubImages>) -> CampaignOrchestrator {
    let library = AssetLibrary::open(temp.path().join("asset_library"), 1024).unwrap();
    CampaignOrchestrator::new(
        gateway,
        ImagePromptBuilder::new(ImageConfig::default()),
        library,
        images,
    )
}

fn gemini_reply(text: &str) -> serde_json::Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

#[tokio::test]
async fn test_missing_credential_serves_mock_without_network() {
    let temp = TempDir::new().unwrap();
    let images = Arc::new(StubImages::sized(4096));
    let gateway = ModelGateway::connect(&ProviderConfig::default(), None, no_delay());
    let mut engine = engine(gateway, &temp, Arc::clone(&images));

    assert!(engine.is_mock());
    let records = engine.generate_campaigns("Lumina", "a bottle", false).await;

    assert_eq!(records, mock_campaigns());
    assert_eq!(images.calls(), 0, "mock records are not persisted");
    assert!(engine.library().list_assets().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_reply_matches_missing_credential_output() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(gemini_reply("Sure! Here are some ideas...")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let images = Arc::new(StubImages::sized(4096));
    let mut live = engine(live_gateway(&server), &temp, Arc::clone(&images));
    let from_bad_reply = live.generate_campaigns("Lumina", "a bottle", false).await;

    let offline_temp = TempDir::new().unwrap();
    let mut offline = engine(
        ModelGateway::mock(MockReason::MissingCredential, no_delay()),
        &offline_temp,
        Arc::new(StubImages::sized(4096)),
    );
    let from_no_key = offline.generate_campaigns("Lumina", "a bottle", false).await;

    assert_eq!(from_bad_reply, from_no_key);
    // A bad reply is not a transport failure; the gateway stays live.
    assert!(!live.is_mock());
    assert_eq!(images.calls(), 0);
}

#[tokio::test]
async fn test_empty_array_reply_falls_back_to_mock() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("```json\n[]\n```")))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let mut live = engine(live_gateway(&server), &temp, Arc::new(StubImages::sized(4096)));
    let records = live.generate_campaigns("Lumina", "a bottle", true).await;
    assert_eq!(records, mock_campaigns());
}

#[tokio::test]
async fn test_exhausted_retries_switch_engine_to_mock_for_good() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .expect(3)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let mut live = engine(live_gateway(&server), &temp, Arc::new(StubImages::sized(4096)));

    let records = live.generate_campaigns("Lumina", "a bottle", false).await;
    assert_eq!(records, mock_campaigns());
    assert!(live.is_mock());
    assert_eq!(
        live.gateway().mock_reason(),
        Some(MockReason::RetriesExhausted)
    );

    // No further calls reach the server once mock mode is set.
    let context = live
        .analyze_visuals(ProductImage::new("image/png", vec![1u8, 2, 3]))
        .await;
    assert_eq!(context, MOCK_VISUAL_CONTEXT);
    let again = live.generate_campaigns("Lumina", "a bottle", false).await;
    assert_eq!(again, mock_campaigns());
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_auth_failure_is_retried_like_any_other_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .expect(3)
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let mut live = engine(live_gateway(&server), &temp, Arc::new(StubImages::sized(4096)));
    let records = live.generate_campaigns("Lumina", "a bottle", false).await;

    assert_eq!(records, mock_campaigns());
    assert!(live.is_mock());
}
