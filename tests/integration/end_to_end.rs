//! Full run against a local stand-in for the model and image services

use campaign_forge::campaign::is_hex_accent;
use campaign_forge::orchestrator::{CampaignOrchestrator, GENERIC_VISUAL_CONTEXT};
use campaign_forge::package::MANIFEST_NAME;
use serde_json::json;
use std::io::{Cursor, Read};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::integration::test_utils::offline_config;

const CAMPAIGNS: &str = r##"```json
[
  {"theme": "Minimalist Calm", "headline": "Less, Better.", "caption": "Quiet design.", "image_prompt": "white studio", "hex_accent": "#EEEEEE"},
  {"theme": "Lifestyle Morning", "headline": "Start Bright.", "caption": "Every day.", "image_prompt": "sunlit kitchen", "hex_accent": "#FFAA33"},
  {"theme": "Luxury Night", "headline": "Pure Gold.", "caption": "Indulge.", "image_prompt": "velvet backdrop", "hex_accent": "#FFD700"},
  {"theme": "High Energy", "headline": "Go Faster.", "caption": "No limits.", "image_prompt": "stadium lights", "hex_accent": "#FF0000"}
]
```"##;

async fn start_services() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "content": { "parts": [{ "text": CAMPAIGNS }] } }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex("^/p/.+"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFFu8; 2048]))
        .mount(&server)
        .await;
    server
}

fn live_engine(server: &MockServer, temp: &TempDir) -> CampaignOrchestrator {
    let mut config = offline_config(temp);
    config.provider.api_key = Some("test-key".to_string());
    config.provider.endpoint = Some(server.uri());
    config.image.base_url = format!("{}/p/", server.uri());
    CampaignOrchestrator::from_config(&config, temp.path()).unwrap()
}

fn image_requests(requests: &[wiremock::Request]) -> usize {
    requests
        .iter()
        .filter(|r| r.url.path().starts_with("/p/"))
        .count()
}

#[tokio::test]
async fn test_generate_persist_and_package() {
    let server = start_services().await;
    let temp = TempDir::new().unwrap();
    let mut engine = live_engine(&server, &temp);
    assert!(!engine.is_mock());

    let context = engine.resolve_visual_context(None, None).await;
    assert_eq!(context, GENERIC_VISUAL_CONTEXT);

    let records = engine.generate_campaigns("Lumina", &context, false).await;
    assert_eq!(records.len(), 4);
    assert_eq!(records[0].theme, "Minimalist Calm");
    assert_eq!(records[3].headline, "Go Faster.");
    for record in &records {
        assert!(is_hex_accent(&record.hex_accent));
        assert!(record.image_url.starts_with(&format!("{}/p/", server.uri())));
        assert!(record.image_url.contains("&width=1080&height=1080&nologo=true"));
    }

    let mut saved: Vec<String> = engine
        .library()
        .list_assets()
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    saved.sort();
    assert_eq!(
        saved,
        vec![
            "Lumina_HighEnergy.jpg",
            "Lumina_LifestyleMorning.jpg",
            "Lumina_LuxuryNight.jpg",
            "Lumina_MinimalistCalm.jpg",
        ]
    );

    let bundle = engine.package(&records).await.unwrap();
    assert_eq!(bundle.images.len(), 4);
    assert!(bundle.skipped.is_empty());

    // Packaging reuses this run's downloads.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(image_requests(&requests), 4);

    let mut archive = zip::ZipArchive::new(Cursor::new(bundle.bytes)).unwrap();
    assert_eq!(archive.len(), 5);
    let last = archive.by_index(4).unwrap().name().to_string();
    assert_eq!(last, MANIFEST_NAME);

    let mut manifest = String::new();
    archive
        .by_name(MANIFEST_NAME)
        .unwrap()
        .read_to_string(&mut manifest)
        .unwrap();
    assert!(manifest.starts_with("CAMPAIGN ASSETS\n===============\n\n"));
    assert!(manifest.contains("[Luxury Night]\nHEADLINE: Pure Gold.\nFILE: Var_3_Luxury.jpg\n\n"));

    let mut image = Vec::new();
    archive
        .by_name("Var_1_Minimalist.jpg")
        .unwrap()
        .read_to_end(&mut image)
        .unwrap();
    assert_eq!(image.len(), 2048);
}

#[tokio::test]
async fn test_logo_and_context_reach_image_prompt() {
    let server = start_services().await;
    let temp = TempDir::new().unwrap();
    let mut engine = live_engine(&server, &temp);

    let context = engine
        .resolve_visual_context(None, Some("  matte black bottle "))
        .await;
    assert_eq!(context, "matte black bottle");

    let records = engine.generate_campaigns("Lumina", &context, true).await;
    let url = &records[0].image_url;
    assert!(url.contains("matte%20black%20bottle"), "{}", url);
    assert!(url.contains("Lumina"), "{}", url);

    let body: serde_json::Value = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .unwrap();
    let instruction = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(instruction.contains("Lumina"));
    assert!(instruction.contains("matte black bottle"));
}
