//! CLI presentation: formatters for generation results and library listings.

use crate::campaign::CampaignRecord;
use crate::error::ApiError;
use crate::package::PackagedBundle;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const MOCK_NOTICE: &str = "API quota exceeded or error. Displaying backup/demo data.";
pub const LIVE_NOTICE: &str = "Generation complete & assets saved!";

/// Styled section heading
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Generation output for JSON.
#[derive(Debug, Serialize)]
pub struct GenerateOutput<'a> {
    pub mock_mode: bool,
    pub visual_context: &'a str,
    pub campaigns: &'a [CampaignRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<&'a Path>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::InvalidRecords(format!("Failed to serialize output: {}", e)))
}

pub fn format_generate_json(output: &GenerateOutput<'_>) -> Result<String, ApiError> {
    to_json(output)
}

pub fn format_generate_text(output: &GenerateOutput<'_>) -> String {
    let mut out = String::new();
    if output.mock_mode {
        out.push_str(&format!("{}\n\n", MOCK_NOTICE.yellow()));
    } else {
        out.push_str(&format!("{}\n\n", LIVE_NOTICE.green()));
    }
    out.push_str(&format!("Visual context: {}\n\n", output.visual_context));
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading(&format!("Generated Assets ({})", output.campaigns.len()))
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["#", "Theme", "Headline", "Caption", "Accent"]);
    for (i, record) in output.campaigns.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            record.theme.clone(),
            record.headline.clone(),
            record.caption.clone(),
            record.hex_accent.clone(),
        ]);
    }
    out.push_str(&format!("{}\n", table));

    for (i, record) in output.campaigns.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, record.image_url));
    }
    if let Some(bundle) = output.bundle {
        out.push_str(&format!("\n\nBundle written to {}", bundle.display()));
    }
    out
}

/// Library listing row
#[derive(Debug, Serialize)]
pub struct LibraryEntry {
    pub name: String,
    pub path: PathBuf,
    pub modified: Option<String>,
}

impl LibraryEntry {
    pub fn from_path(path: &Path) -> Self {
        let modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).to_rfc3339());
        Self {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            modified,
        }
    }
}

pub fn format_library(entries: &[LibraryEntry], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_json(&entries);
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading("Digital Asset Management")
    ));
    if entries.is_empty() {
        out.push_str("No assets generated yet. Run `campaign-forge generate` to create some!");
        return Ok(out);
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Asset", "Modified"]);
    for entry in entries {
        table.add_row(vec![
            entry.name.clone(),
            entry.modified.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    out.push_str(&format!("{}", table));
    Ok(out)
}

pub fn format_package_summary(bundle: &PackagedBundle, output: &Path) -> String {
    let mut out = format!(
        "Wrote {} ({} images, {} bytes)",
        output.display(),
        bundle.images.len(),
        bundle.bytes.len()
    );
    if !bundle.skipped.is_empty() {
        out.push_str(&format!(
            "\n{} {}",
            "Skipped (download failed):".yellow(),
            bundle.skipped.join(", ")
        ));
    }
    out
}
