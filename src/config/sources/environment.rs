//! Environment source: CAMPAIGN_FORGE__SECTION__KEY overrides

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

pub const ENV_PREFIX: &str = "CAMPAIGN_FORGE";

/// Add environment overrides (highest precedence).
/// `CAMPAIGN_FORGE__RETRY__ATTEMPTS=5` sets `retry.attempts`.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    )
}
