//! CLI parse: clap types for campaign-forge. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// campaign-forge - themed ad variations from a product shot and a brand name
#[derive(Parser)]
#[command(name = "campaign-forge")]
#[command(about = "Generate themed marketing campaign variations and package their assets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory (library and config/ are resolved against it)
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate campaign variations and save their images to the library
    Generate {
        /// Brand name
        #[arg(long)]
        brand: String,
        /// Product shot to analyze for visual context
        #[arg(long)]
        product: Option<PathBuf>,
        /// Brand logo; its presence adds branding to image prompts
        #[arg(long)]
        logo: Option<PathBuf>,
        /// Visual context used when no product shot is given
        #[arg(long)]
        context: Option<String>,
        /// Also write the zip bundle (defaults to {brand}_Assets.zip when given without a value)
        #[arg(long, num_args = 0..=1)]
        bundle: Option<Option<PathBuf>>,
        /// Save generated records as JSON for later packaging
        #[arg(long)]
        save: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Describe a product shot in one sentence
    Analyze {
        /// Product shot
        #[arg(long)]
        product: PathBuf,
    },
    /// List library assets, newest first
    Library {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Package saved campaign records into a zip bundle
    Package {
        /// Campaign records JSON written by `generate --save`
        #[arg(long)]
        input: PathBuf,
        /// Output zip path
        #[arg(long, default_value = "campaign_assets.zip")]
        output: PathBuf,
    },
}
