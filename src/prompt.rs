//! Image prompt construction
//!
//! Derives the final image-generation prompt for a campaign record and the request URL
//! for the rendering endpoint. Everything except the seed is deterministic.

use crate::campaign::CampaignRecord;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Characters escaped inside the prompt path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'[')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Range seeds are drawn from.
pub const SEED_RANGE: RangeInclusive<u32> = 100..=99_999;

/// Image endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Rendering endpoint; the encoded prompt is appended as a path segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_dimension")]
    pub width: u32,

    #[serde(default = "default_dimension")]
    pub height: u32,

    #[serde(default = "default_true")]
    pub nologo: bool,
}

fn default_base_url() -> String {
    "https://pollinations.ai/p/".to_string()
}

fn default_dimension() -> u32 {
    1080
}

fn default_true() -> bool {
    true
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            width: default_dimension(),
            height: default_dimension(),
            nologo: default_true(),
        }
    }
}

impl ImageConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("Image base_url is not an http(s) URL: {}", self.base_url));
        }
        if self.width == 0 || self.height == 0 {
            return Err("Image width and height must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Builds image prompts and rendering URLs
#[derive(Debug, Clone)]
pub struct ImagePromptBuilder {
    config: ImageConfig,
}

impl ImagePromptBuilder {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    /// Compose the final prompt. The branding slot stays empty (but delimited) when no
    /// logo was supplied.
    pub fn final_prompt(
        &self,
        record: &CampaignRecord,
        brand: &str,
        visual_context: &str,
        logo_present: bool,
    ) -> String {
        let branding = if logo_present {
            format!("branded with {} logo", brand)
        } else {
            String::new()
        };
        format!(
            "{}, {}, {}, 8k photography",
            record.image_prompt, branding, visual_context
        )
    }

    /// Build the request URL with a freshly drawn seed.
    pub fn build_image_url(
        &self,
        record: &CampaignRecord,
        brand: &str,
        visual_context: &str,
        logo_present: bool,
    ) -> String {
        let seed = rand::thread_rng().gen_range(SEED_RANGE);
        self.build_image_url_with_seed(record, brand, visual_context, logo_present, seed)
    }

    /// Build the request URL for a fixed seed.
    pub fn build_image_url_with_seed(
        &self,
        record: &CampaignRecord,
        brand: &str,
        visual_context: &str,
        logo_present: bool,
        seed: u32,
    ) -> String {
        let prompt = self.final_prompt(record, brand, visual_context, logo_present);
        let encoded = utf8_percent_encode(&prompt, PATH_SEGMENT);
        format!(
            "{}/{}?seed={}&width={}&height={}&nologo={}",
            self.config.base_url.trim_end_matches('/'),
            encoded,
            seed,
            self.config.width,
            self.config.height,
            self.config.nologo
        )
    }
}

impl Default for ImagePromptBuilder {
    fn default() -> Self {
        Self::new(ImageConfig::default())
    }
}
