//! CLI parse: clap types for frameconf. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// frameconf CLI - resolve an embedded client's configuration across frames
#[derive(Parser)]
#[command(name = "frameconf")]
#[command(about = "Resolve an embedded client's configuration across nested frames")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory searched for frameconf.toml
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Settings file path (overrides default settings loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

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
    /// Resolve the merged configuration for the topology's client frame
    Resolve {
        /// Topology file describing the frames around the client
        #[arg(long)]
        topology: PathBuf,

        /// App defaults as inline JSON (overrides the settings' app_config file)
        #[arg(long)]
        app_config: Option<String>,

        /// Host configuration as inline JSON (overrides the settings' host_config file)
        #[arg(long)]
        host_config: Option<String>,
    },
    /// Show the client frame's lineage with root-relative ancestor levels
    Ancestry {
        /// Topology file describing the frames around the client
        #[arg(long)]
        topology: PathBuf,
    },
}
