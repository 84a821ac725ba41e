//! Campaign orchestration
//!
//! One `CampaignOrchestrator` per request. It sequences vision analysis, campaign text
//! generation, image URL derivation and library persistence, and decides when to fall
//! back to the built-in campaign set. Nothing in here returns an error to the caller for
//! model or download problems; `is_mock()` is the only degradation signal.

use crate::campaign::{mock_campaigns, CampaignRecord};
use crate::config::ForgeConfig;
use crate::error::ApiError;
use crate::fetch::{CachedImageSource, HttpImageSource, ImageSource};
use crate::gateway::ModelGateway;
use crate::library::{AssetLibrary, PersistOutcome};
use crate::package::{PackagedBundle, Packager};
use crate::parser::parse_campaigns;
use crate::prompt::ImagePromptBuilder;
use crate::provider::{ModelRequest, ProductImage};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const VISION_INSTRUCTION: &str =
    "Analyze this image. Describe colors, materials, and vibe in 1 sentence.";

/// Returned by `analyze_visuals` when no model is available
pub const MOCK_VISUAL_CONTEXT: &str = "Modern high-quality product";

/// Returned by `analyze_visuals` when the vision call fails
pub const FALLBACK_VISUAL_CONTEXT: &str = "Premium product";

/// Visual context used when there is neither a product image nor user context
pub const GENERIC_VISUAL_CONTEXT: &str = "Generic product";

/// Themes suggested to the model; not enforced on the reply
pub const SUGGESTED_THEMES: [&str; 4] = ["Minimalist", "Lifestyle", "Luxury", "High Energy"];

/// Build the campaign instruction sent to the model.
pub fn campaign_instruction(brand: &str, visual_context: &str, logo_present: bool) -> String {
    let logo_hint = if logo_present {
        format!("Include '{} logo' in the image prompt.", brand)
    } else {
        "Do not mention any logo in the image prompt.".to_string()
    };
    format!(
        "Role: Creative Director for {brand}. Product Visuals: \"{visual_context}\".\n\
         Task: Create exactly 4 ad variations (Themes: {themes}).\n\
         Return RAW JSON Array:\n\
         [\n\
         \x20 {{\n\
         \x20   \"theme\": \"Theme Name\",\n\
         \x20   \"headline\": \"Headline (Max 7 words)\",\n\
         \x20   \"caption\": \"Social copy\",\n\
         \x20   \"image_prompt\": \"Stable Diffusion prompt. {logo_hint}\",\n\
         \x20   \"hex_accent\": \"#00CC96\"\n\
         \x20 }}\n\
         ]",
        brand = brand,
        visual_context = visual_context,
        themes = SUGGESTED_THEMES.join(", "),
        logo_hint = logo_hint,
    )
}

/// Coordinates the generation pipeline for a single request
pub struct CampaignOrchestrator {
    gateway: ModelGateway,
    prompts: ImagePromptBuilder,
    library: AssetLibrary,
    images: Arc<dyn ImageSource>,
}

impl CampaignOrchestrator {
    pub fn new(
        gateway: ModelGateway,
        prompts: ImagePromptBuilder,
        library: AssetLibrary,
        images: Arc<dyn ImageSource>,
    ) -> Self {
        Self {
            gateway,
            prompts,
            library,
            images,
        }
    }

    /// Build an engine from configuration. The credential is resolved exactly once, here.
    pub fn from_config(config: &ForgeConfig, workspace_root: &Path) -> Result<Self, ApiError> {
        let credential = config.provider.resolve_credential();
        let gateway = ModelGateway::connect(&config.provider, credential, config.retry.clone());
        let library = AssetLibrary::open(
            config.library.resolve_path(workspace_root),
            config.library.min_bytes,
        )?;
        let http = HttpImageSource::from_config(&config.http)?;
        Ok(Self::with_http_images(
            gateway,
            ImagePromptBuilder::new(config.image.clone()),
            library,
            http,
        ))
    }

    /// Orchestrator whose downloads go through a per-run cache over plain HTTP.
    pub fn with_http_images(
        gateway: ModelGateway,
        prompts: ImagePromptBuilder,
        library: AssetLibrary,
        http: HttpImageSource,
    ) -> Self {
        Self::new(
            gateway,
            prompts,
            library,
            Arc::new(CachedImageSource::new(http)),
        )
    }

    pub fn is_mock(&self) -> bool {
        self.gateway.is_mock()
    }

    pub fn gateway(&self) -> &ModelGateway {
        &self.gateway
    }

    pub fn library(&self) -> &AssetLibrary {
        &self.library
    }

    /// One-sentence description of the product image.
    pub async fn analyze_visuals(&mut self, image: ProductImage) -> String {
        if self.gateway.is_mock() || !self.gateway.has_client() {
            return MOCK_VISUAL_CONTEXT.to_string();
        }

        info!("Analyzing product visuals");
        match self
            .gateway
            .generate(&ModelRequest::vision(VISION_INSTRUCTION, image))
            .await
        {
            Some(text) => text.trim().to_string(),
            None => FALLBACK_VISUAL_CONTEXT.to_string(),
        }
    }

    /// Visual context for a run: image analysis when a product image is given, otherwise
    /// the user's own context, otherwise a generic description.
    pub async fn resolve_visual_context(
        &mut self,
        product: Option<ProductImage>,
        user_context: Option<&str>,
    ) -> String {
        match product {
            Some(image) => self.analyze_visuals(image).await,
            None => user_context
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(GENERIC_VISUAL_CONTEXT)
                .to_string(),
        }
    }

    /// Generate the campaign set. Always returns records: live ones on success, the
    /// built-in set otherwise.
    pub async fn generate_campaigns(
        &mut self,
        brand: &str,
        visual_context: &str,
        logo_present: bool,
    ) -> Vec<CampaignRecord> {
        if self.gateway.is_mock() || !self.gateway.has_client() {
            return mock_campaigns();
        }

        let instruction = campaign_instruction(brand, visual_context, logo_present);
        let Some(raw) = self.gateway.generate(&ModelRequest::text(instruction)).await else {
            return mock_campaigns();
        };

        let mut records = match parse_campaigns(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(error = %e, "Model response unusable; serving backup campaigns");
                return mock_campaigns();
            }
        };
        info!(count = records.len(), "Parsed campaign variations");

        for record in records.iter_mut() {
            record.image_url =
                self.prompts
                    .build_image_url(record, brand, visual_context, logo_present);
            debug!(theme = %record.theme, url = %record.image_url, "Resolved image URL");

            let hint = format!("{}_{}", brand, record.theme);
            if let Some(PersistOutcome::Discarded { bytes }) = self
                .library
                .persist(self.images.as_ref(), &record.image_url, &hint)
                .await
            {
                debug!(theme = %record.theme, bytes, "Image not saved to library");
            }
        }

        records
    }

    /// Package records using this run's image source (shares cached downloads).
    pub async fn package(&self, records: &[CampaignRecord]) -> Result<PackagedBundle, ApiError> {
        Ok(Packager::new(self.images.as_ref()).package(records).await?)
    }
}
