//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("provider.model", "gemini-1.5-flash")?
        .set_default("image.base_url", "https://pollinations.ai/p/")?
        .set_default("image.width", 1080)?
        .set_default("image.height", 1080)?
        .set_default("image.nologo", true)?
        .set_default("library.path", "asset_library")?
        .set_default("library.min_bytes", 1024)?
        .set_default("retry.attempts", 3)?
        .set_default("retry.delay_ms", 2000)?
        .set_default("http.download_timeout_secs", 30)
}
