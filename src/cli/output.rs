//! CLI output: formatting of results and errors.

use crate::error::ClientError;
use crate::frame::StaticFrame;
use crate::merge::ConfigMap;
use serde_json::Value;

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ClientError) -> String {
    format!("Error: {}", e)
}

pub fn format_merged_config(config: &ConfigMap) -> Result<String, ClientError> {
    serde_json::to_string_pretty(&Value::Object(config.clone()))
        .map_err(|e| ClientError::Config(format!("Failed to render configuration: {}", e)))
}

/// One line per frame, top first: `<level>  <name>  <origin>`.
pub fn format_lineage(frames: &[StaticFrame]) -> String {
    let width = frames.iter().map(|f| f.name().len()).max().unwrap_or(0);
    let last = frames.len().saturating_sub(1);
    frames
        .iter()
        .enumerate()
        .map(|(level, frame)| {
            let marker = if level == last { "  (client)" } else { "" };
            format!(
                "{:>3}  {:<width$}  {}{}",
                level,
                frame.name(),
                frame.origin(),
                marker,
                width = width
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
