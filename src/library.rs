//! Asset library
//!
//! A flat directory of generated `.jpg` images. The directory itself is the index: there is
//! no sidecar metadata, and listings are ordered by file modification time.

use crate::error::StorageError;
use crate::fetch::ImageSource;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};

/// Library configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryConfig {
    /// Library directory (relative paths resolve against the workspace root)
    #[serde(default = "default_library_path")]
    pub path: PathBuf,

    /// Payloads of this many bytes or fewer are treated as placeholder/error bodies
    #[serde(default = "default_min_bytes")]
    pub min_bytes: usize,
}

fn default_library_path() -> PathBuf {
    PathBuf::from("asset_library")
}

fn default_min_bytes() -> usize {
    1024
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            path: default_library_path(),
            min_bytes: default_min_bytes(),
        }
    }
}

impl LibraryConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.path.as_os_str().is_empty() {
            return Err("Library path cannot be empty".to_string());
        }
        Ok(())
    }

    /// Resolve the library directory against a workspace root.
    pub fn resolve_path(&self, workspace_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            workspace_root.join(&self.path)
        }
    }
}

/// What happened to a single persistence attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved(PathBuf),
    /// Payload too small to be a real image
    Discarded { bytes: usize },
}

/// Keep ASCII/Unicode alphanumerics and underscores; drop everything else.
pub fn sanitize_filename(hint: &str) -> String {
    hint.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Library of persisted campaign images
pub struct AssetLibrary {
    root: PathBuf,
    min_bytes: usize,
}

impl AssetLibrary {
    /// Open the library, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(root: P, min_bytes: usize) -> Result<Self, StorageError> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self { root, min_bytes })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn min_bytes(&self) -> usize {
        self.min_bytes
    }

    /// Path an image with this filename hint would be written to.
    pub fn asset_path(&self, filename_hint: &str) -> Result<PathBuf, StorageError> {
        let safe_name = sanitize_filename(filename_hint);
        if safe_name.is_empty() {
            return Err(StorageError::InvalidName(filename_hint.to_string()));
        }
        Ok(self.root.join(format!("{}.jpg", safe_name)))
    }

    /// Write already-downloaded bytes. Existing files with the same name are overwritten.
    pub fn store_bytes(
        &self,
        filename_hint: &str,
        bytes: &[u8],
    ) -> Result<PersistOutcome, StorageError> {
        if bytes.len() <= self.min_bytes {
            debug!(
                filename_hint,
                bytes = bytes.len(),
                "Discarding undersized image payload"
            );
            return Ok(PersistOutcome::Discarded { bytes: bytes.len() });
        }

        let path = self.asset_path(filename_hint)?;
        fs::write(&path, bytes).map_err(|source| StorageError::WriteFailed {
            path: path.clone(),
            source,
        })?;
        Ok(PersistOutcome::Saved(path))
    }

    /// Download `url` and store it under `filename_hint`.
    pub async fn try_persist(
        &self,
        source: &dyn ImageSource,
        url: &str,
        filename_hint: &str,
    ) -> Result<PersistOutcome, StorageError> {
        let bytes = source.fetch(url).await?;
        self.store_bytes(filename_hint, &bytes)
    }

    /// Best-effort persistence: failures are logged and reported as `None`.
    pub async fn persist(
        &self,
        source: &dyn ImageSource,
        url: &str,
        filename_hint: &str,
    ) -> Option<PersistOutcome> {
        match self.try_persist(source, url, filename_hint).await {
            Ok(outcome) => {
                if let PersistOutcome::Saved(ref path) = outcome {
                    info!(path = %path.display(), "Saved asset to library");
                }
                Some(outcome)
            }
            Err(e) => {
                warn!(filename_hint, error = %e, "Save failed");
                None
            }
        }
    }

    /// All `.jpg` assets, newest first.
    pub fn list_assets(&self) -> Result<Vec<PathBuf>, StorageError> {
        list_assets_in(&self.root)
    }
}

/// List `.jpg` files in `dir` by modification time, newest first. A missing directory
/// is an empty library.
pub fn list_assets_in(dir: &Path) -> Result<Vec<PathBuf>, StorageError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut assets: Vec<(SystemTime, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_jpg = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(".jpg"))
            .unwrap_or(false);
        if !is_jpg || !path.is_file() {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        assets.push((modified, path));
    }

    assets.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    Ok(assets.into_iter().map(|(_, path)| path).collect())
}
