//! CLI route: single route table and run context. Dispatches to the engine and presentation.

use crate::campaign::CampaignRecord;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_generate_json, format_generate_text, format_library, format_package_summary,
    GenerateOutput, LibraryEntry,
};
use crate::config::{ConfigLoader, ForgeConfig};
use crate::error::ApiError;
use crate::library::list_assets_in;
use crate::orchestrator::CampaignOrchestrator;
use crate::package::bundle_filename;
use crate::provider::ProductImage;
use std::path::{Path, PathBuf};
use tracing::info;

/// Runtime context for CLI execution: workspace and loaded configuration.
pub struct RunContext {
    workspace_root: PathBuf,
    config: ForgeConfig,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace_root)?,
        };
        Ok(Self::with_config(workspace_root, config))
    }

    pub fn with_config(workspace_root: PathBuf, config: ForgeConfig) -> Self {
        Self {
            workspace_root,
            config,
        }
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    /// Fresh engine for one request.
    fn engine(&self) -> Result<CampaignOrchestrator, ApiError> {
        CampaignOrchestrator::from_config(&self.config, &self.workspace_root)
    }

    /// Execute a command and return its printable output.
    pub async fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Generate {
                brand,
                product,
                logo,
                context,
                bundle,
                save,
                format,
            } => {
                self.handle_generate(GenerateArgs {
                    brand,
                    product: product.as_deref(),
                    logo_present: logo.is_some(),
                    context: context.as_deref(),
                    bundle: bundle.as_ref().map(|b| b.as_deref()),
                    save: save.as_deref(),
                    format,
                })
                .await
            }
            Commands::Analyze { product } => {
                let mut engine = self.engine()?;
                let image = ProductImage::from_path(product).await?;
                Ok(engine.analyze_visuals(image).await)
            }
            Commands::Library { format } => {
                let root = self.config.library.resolve_path(&self.workspace_root);
                let entries: Vec<LibraryEntry> = list_assets_in(&root)?
                    .iter()
                    .map(|p| LibraryEntry::from_path(p))
                    .collect();
                format_library(&entries, format)
            }
            Commands::Package { input, output } => {
                let records = read_records(input)?;
                let engine = self.engine()?;
                let bundle = engine.package(&records).await?;
                write_file(output, &bundle.bytes)?;
                Ok(format_package_summary(&bundle, output))
            }
        }
    }

    async fn handle_generate(&self, args: GenerateArgs<'_>) -> Result<String, ApiError> {
        let mut engine = self.engine()?;

        let product = match args.product {
            Some(path) => Some(ProductImage::from_path(path).await?),
            None => None,
        };
        let visual_context = engine.resolve_visual_context(product, args.context).await;
        info!(brand = args.brand, visual_context = %visual_context, "Generating campaigns");

        let campaigns = engine
            .generate_campaigns(args.brand, &visual_context, args.logo_present)
            .await;

        if let Some(path) = args.save {
            let json = serde_json::to_string_pretty(&campaigns)
                .map_err(|e| ApiError::InvalidRecords(e.to_string()))?;
            write_file(path, json.as_bytes())?;
        }

        let bundle_path = match args.bundle {
            Some(Some(path)) => Some(path.to_path_buf()),
            Some(None) => Some(self.workspace_root.join(bundle_filename(args.brand))),
            None => None,
        };
        if let Some(ref path) = bundle_path {
            let bundle = engine.package(&campaigns).await?;
            write_file(path, &bundle.bytes)?;
        }

        let output = GenerateOutput {
            mock_mode: engine.is_mock(),
            visual_context: &visual_context,
            campaigns: &campaigns,
            bundle: bundle_path.as_deref(),
        };
        if args.format == "json" {
            format_generate_json(&output)
        } else {
            Ok(format_generate_text(&output))
        }
    }
}

struct GenerateArgs<'a> {
    brand: &'a str,
    product: Option<&'a Path>,
    logo_present: bool,
    context: Option<&'a str>,
    bundle: Option<Option<&'a Path>>,
    save: Option<&'a Path>,
    format: &'a str,
}

/// Read records previously written by `generate --save`.
pub fn read_records(path: &Path) -> Result<Vec<CampaignRecord>, ApiError> {
    let text = std::fs::read_to_string(path).map_err(|source| ApiError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text)
        .map_err(|e| ApiError::InvalidRecords(format!("{}: {}", path.display(), e)))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ApiError> {
    std::fs::write(path, bytes).map_err(|source| {
        ApiError::StorageError(crate::error::StorageError::WriteFailed {
            path: path.to_path_buf(),
            source,
        })
    })
}
