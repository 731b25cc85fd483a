//! Client Settings
//!
//! Settings for running the resolver outside a browser: the API endpoint, where
//! the embedded host configuration and app defaults live, and logging. Loaded
//! hierarchically with the `config` crate: defaults, global file, local file,
//! then `FRAMECONF_*` environment variables.
//!
//! Host and app configuration are JSON documents read with `serde_json`, so
//! their camelCase keys reach the resolver untouched.

use crate::directive::FrameDirective;
use crate::error::ClientError;
use crate::host::{FixedApiUrl, StaticHostConfig};
use crate::logging::LoggingConfig;
use crate::merge::ConfigMap;
use config::Environment;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
    pub mod local_file;
}

pub use merge::merge_policy::DEFAULT_API_URL;
pub use sources::global_file::global_config_path;
pub use sources::local_file::LOCAL_CONFIG_FILE;

/// Root settings structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// API endpoint stamped onto every merged configuration
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// JSON file holding the settings embedded in the client's frame
    #[serde(default)]
    pub host_config: Option<PathBuf>,

    /// JSON file holding the embedding app's defaults
    #[serde(default)]
    pub app_config: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            host_config: None,
            app_config: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl ClientSettings {
    /// Validate settings that do not require touching the filesystem
    pub fn validate(&self) -> Result<(), ClientError> {
        if self.api_url.trim().is_empty() {
            return Err(ClientError::Config("api_url cannot be empty".to_string()));
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(ClientError::Config(format!(
                "api_url must be an http(s) URL, got '{}'",
                self.api_url
            )));
        }
        Ok(())
    }

    /// Read the embedded host configuration. No file configured means `{}`.
    ///
    /// A `requestConfigFromFrame` directive that cannot be parsed is reported
    /// here, before any resolution is attempted.
    pub fn load_host_config(&self) -> Result<ConfigMap, ClientError> {
        let host = read_config_map(self.host_config.as_deref())?;
        FrameDirective::from_host_config(&host)?;
        Ok(host)
    }

    /// Read the app defaults. No file configured means `{}`.
    pub fn load_app_config(&self) -> Result<ConfigMap, ClientError> {
        read_config_map(self.app_config.as_deref())
    }

    pub fn host_source(&self) -> Result<StaticHostConfig, ClientError> {
        Ok(StaticHostConfig(self.load_host_config()?))
    }

    pub fn api_url_source(&self) -> FixedApiUrl {
        FixedApiUrl(self.api_url.clone())
    }
}

/// Parse a JSON object from `path`.
pub fn read_config_map(path: Option<&Path>) -> Result<ConfigMap, ClientError> {
    let Some(path) = path else {
        return Ok(ConfigMap::new());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config_map(&contents)
        .map_err(|e| ClientError::Config(format!("{}: {}", path.display(), e)))
}

/// Parse a JSON object from a string.
pub fn parse_config_map(json: &str) -> Result<ConfigMap, ClientError> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ClientError::Config(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(ClientError::Config(format!("invalid JSON: {}", e))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Loads `ClientSettings` from layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings for `dir`: defaults, global file, `<dir>/frameconf.toml`, environment.
    pub fn load(dir: &Path) -> Result<ClientSettings, ClientError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::local_file::add_to_builder(builder, dir)?;
        let settings: ClientSettings = builder
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        let settings = relative_to(settings, dir);
        settings.validate()?;
        debug!(api_url = %settings.api_url, "Loaded client settings");
        Ok(settings)
    }

    /// Load settings from an explicit file (plus defaults and environment).
    pub fn load_from_file(path: &Path) -> Result<ClientSettings, ClientError> {
        let settings: ClientSettings = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path).required(true))
            .add_source(environment())
            .build()?
            .try_deserialize()?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let settings = relative_to(settings, base);
        settings.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FRAMECONF").separator("__")
}

/// Resolve relative JSON paths against the directory the settings came from.
fn relative_to(mut settings: ClientSettings, base: &Path) -> ClientSettings {
    let rebase = |path: PathBuf| {
        if path.is_relative() {
            base.join(path)
        } else {
            path
        }
    };
    settings.host_config = settings.host_config.map(rebase);
    settings.app_config = settings.app_config.map(rebase);
    settings
}
