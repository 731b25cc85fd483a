//! Merge rules for client settings: defaults first, then files, then environment.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Default API endpoint when neither a settings file nor the environment names one.
pub const DEFAULT_API_URL: &str = "https://hypothes.is/api/";

/// Create a Config builder with the settings defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder().set_default("api_url", DEFAULT_API_URL)
}
