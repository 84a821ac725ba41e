//! Campaign packaging
//!
//! Builds the downloadable zip: one image entry per record whose image could be fetched,
//! plus `campaign_manifest.txt` listing every record. The manifest is always the last entry.

use crate::campaign::CampaignRecord;
use crate::error::PackageError;
use crate::fetch::ImageSource;
use std::io::{Cursor, Write};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const MANIFEST_NAME: &str = "campaign_manifest.txt";

const MANIFEST_HEADER: &str = "CAMPAIGN ASSETS\n===============\n\n";

/// Archive entry name for the record at 0-based `index`. Path separators are dropped so
/// every entry stays at the archive root.
pub fn archive_filename(index: usize, record: &CampaignRecord) -> String {
    let word: String = record
        .theme_word()
        .chars()
        .filter(|c| *c != '/' && *c != '\\')
        .collect();
    let word = if word.is_empty() { "Untitled" } else { word.as_str() };
    format!("Var_{}_{}.jpg", index + 1, word)
}

/// Default download name for a brand's bundle.
pub fn bundle_filename(brand: &str) -> String {
    format!("{}_Assets.zip", brand)
}

/// Manifest text for `records`, in order.
pub fn render_manifest(records: &[CampaignRecord]) -> String {
    let mut manifest = String::from(MANIFEST_HEADER);
    for (index, record) in records.iter().enumerate() {
        manifest.push_str(&format!(
            "[{}]\nHEADLINE: {}\nFILE: {}\n\n",
            record.theme,
            record.headline,
            archive_filename(index, record)
        ));
    }
    manifest
}

/// Result of a packaging run
#[derive(Debug, Clone)]
pub struct PackagedBundle {
    pub bytes: Vec<u8>,
    /// Image entries actually written
    pub images: Vec<String>,
    /// Records whose image could not be fetched
    pub skipped: Vec<String>,
}

/// Bundles records and their images into an in-memory archive
pub struct Packager<'a> {
    source: &'a dyn ImageSource,
}

impl<'a> Packager<'a> {
    pub fn new(source: &'a dyn ImageSource) -> Self {
        Self { source }
    }

    /// Fetch each record's image and write the archive. Fetch failures skip the image only.
    pub async fn package(&self, records: &[CampaignRecord]) -> Result<PackagedBundle, PackageError> {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut images = Vec::new();
        let mut skipped = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let filename = archive_filename(index, record);
            match self.source.fetch(&record.image_url).await {
                Ok(bytes) => {
                    zip.start_file(filename.as_str(), options)?;
                    zip.write_all(&bytes)?;
                    debug!(entry = %filename, bytes = bytes.len(), "Added image to archive");
                    images.push(filename);
                }
                Err(e) => {
                    warn!(entry = %filename, error = %e, "Skipping image in archive");
                    skipped.push(filename);
                }
            }
        }

        zip.start_file(MANIFEST_NAME, options)?;
        zip.write_all(render_manifest(records).as_bytes())?;
        let bytes = zip.finish()?.into_inner();

        Ok(PackagedBundle {
            bytes,
            images,
            skipped,
        })
    }
}
