//! Response parsing
//!
//! Turns free-form model text into campaign records. The model is asked for a raw JSON
//! array but frequently wraps it in a fenced code block, so fence markers are removed by
//! plain substring replacement before parsing.

use crate::campaign::{normalize_hex_accent, CampaignRecord, DEFAULT_ACCENT};
use crate::error::ParseError;
use serde::Deserialize;
use tracing::warn;

/// Schema each array element must satisfy. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct CampaignSchema {
    theme: String,
    headline: String,
    caption: String,
    image_prompt: String,
    hex_accent: String,
}

/// Remove code fence markers and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse model output into campaign records, preserving model order.
///
/// Records come back with an empty `image_url`; the orchestrator fills it in.
pub fn parse_campaigns(raw: &str) -> Result<Vec<CampaignRecord>, ParseError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ParseError::EmptyResponse);
    }

    let entries: Vec<CampaignSchema> = serde_json::from_str(&cleaned)?;
    if entries.is_empty() {
        return Err(ParseError::NoCampaigns);
    }

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            if entry.theme.trim().is_empty() {
                return Err(ParseError::InvalidField {
                    index,
                    field: "theme",
                    value: entry.theme,
                });
            }
            let hex_accent = normalize_hex_accent(&entry.hex_accent).unwrap_or_else(|| {
                warn!(
                    index,
                    value = %entry.hex_accent,
                    "Unreadable accent colour; using default"
                );
                DEFAULT_ACCENT.to_string()
            });
            Ok(CampaignRecord {
                theme: entry.theme,
                headline: entry.headline,
                caption: entry.caption,
                image_prompt: entry.image_prompt,
                hex_accent,
                image_url: String::new(),
            })
        })
        .collect()
}
