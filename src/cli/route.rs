//! CLI route: single route table and run context.

use crate::cli::output::{format_lineage, format_merged_config};
use crate::cli::parse::Commands;
use crate::config::{parse_config_map, ClientSettings, ConfigLoader};
use crate::directive::FrameDirective;
use crate::error::ClientError;
use crate::frame::lineage;
use crate::host::StaticHostConfig;
use crate::merge::ConfigMap;
use crate::resolver::ConfigResolver;
use crate::topology::TopologySpec;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Runtime context for CLI execution: loaded settings.
pub struct RunContext {
    settings: ClientSettings,
}

impl RunContext {
    /// Load settings from `config_path` if given, otherwise from `dir`.
    pub fn new(dir: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ClientError> {
        let settings = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&dir)?,
        };
        Ok(Self { settings })
    }

    pub fn from_settings(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ClientError> {
        match command {
            Commands::Resolve {
                topology,
                app_config,
                host_config,
            } => self.handle_resolve(topology, app_config.as_deref(), host_config.as_deref()),
            Commands::Ancestry { topology } => self.handle_ancestry(topology),
        }
    }

    fn handle_resolve(
        &self,
        topology_path: &Path,
        app_json: Option<&str>,
        host_json: Option<&str>,
    ) -> Result<String, ClientError> {
        let topology = TopologySpec::load(topology_path)?.build()?;

        let host = match host_json {
            Some(json) => {
                let host = parse_config_map(json)?;
                FrameDirective::from_host_config(&host)?;
                host
            }
            None => self.settings.load_host_config()?,
        };
        let app: ConfigMap = match app_json {
            Some(json) => parse_config_map(json)?,
            None => self.settings.load_app_config()?,
        };

        info!(
            client = %topology.client,
            topology = %topology_path.display(),
            "Resolving client configuration"
        );

        let resolver = ConfigResolver::new(
            topology.client.clone(),
            StaticHostConfig(host),
            self.settings.api_url_source(),
            Arc::clone(&topology.transport),
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()?;
        let merged = runtime.block_on(resolver.resolve(&app))?;

        format_merged_config(&merged)
    }

    fn handle_ancestry(&self, topology_path: &Path) -> Result<String, ClientError> {
        let topology = TopologySpec::load(topology_path)?.build()?;
        Ok(format_lineage(&lineage(&topology.client)))
    }
}
