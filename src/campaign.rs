//! Campaign records
//!
//! One record per themed ad variation. Text fields come from the model (or the built-in
//! backup set); `image_url` is filled in once the image prompt has been resolved.

use serde::{Deserialize, Serialize};

/// A single themed ad variation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub theme: String,
    pub headline: String,
    pub caption: String,
    pub image_prompt: String,
    pub hex_accent: String,
    #[serde(default)]
    pub image_url: String,
}

impl CampaignRecord {
    /// First whitespace-delimited token of the theme, used in archive entry names.
    pub fn theme_word(&self) -> &str {
        self.theme.split_whitespace().next().unwrap_or("Untitled")
    }
}

/// Returns true for `#RRGGBB` color strings.
pub fn is_hex_accent(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Accent used when the model's colour cannot be read.
pub const DEFAULT_ACCENT: &str = "#00CC96";

/// Normalise a model-supplied accent to `#RRGGBB`: trims, adds a missing `#`, expands
/// `#RGB`. Returns `None` for anything that is still not a hex colour.
pub fn normalize_hex_accent(value: &str) -> Option<String> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        6 => Some(format!("#{}", digits)),
        3 => Some(digits.chars().fold(String::from("#"), |mut acc, c| {
            acc.push(c);
            acc.push(c);
            acc
        })),
        _ => None,
    }
}

/// Built-in backup dataset served whenever the engine is in mock mode
/// or the model output cannot be used.
pub fn mock_campaigns() -> Vec<CampaignRecord> {
    const MOCK: [(&str, &str, &str, &str, &str, &str); 4] = [
        (
            "Neon Future",
            "Light Up The Night.",
            "Next gen tech.",
            "neon cyberpunk product",
            "https://pollinations.ai/p/neon?seed=1",
            "#00CC96",
        ),
        (
            "Pure Zen",
            "Simplicity Redefined.",
            "Find your balance.",
            "minimalist white product",
            "https://pollinations.ai/p/white?seed=2",
            "#AAAAAA",
        ),
        (
            "Urban Flow",
            "Move With The City.",
            "Never stop.",
            "urban street style product",
            "https://pollinations.ai/p/urban?seed=3",
            "#FF4B4B",
        ),
        (
            "Luxury Gold",
            "Standard of Excellence.",
            "Pure luxury.",
            "gold luxury product",
            "https://pollinations.ai/p/gold?seed=4",
            "#FFD700",
        ),
    ];

    MOCK.iter()
        .map(
            |(theme, headline, caption, image_prompt, image_url, hex_accent)| CampaignRecord {
                theme: theme.to_string(),
                headline: headline.to_string(),
                caption: caption.to_string(),
                image_prompt: image_prompt.to_string(),
                hex_accent: hex_accent.to_string(),
                image_url: image_url.to_string(),
            },
        )
        .collect()
}
