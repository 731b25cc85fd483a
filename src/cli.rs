//! CLI domain: parse, route, and output only.
//! Resolution itself lives in the resolver; the route table wires settings,
//! topology and transport together.

mod output;
mod parse;
mod route;

pub use output::{format_lineage, format_merged_config, map_error};
pub use parse::{Cli, Commands};
pub use route::RunContext;
