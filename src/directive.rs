//! The `requestConfigFromFrame` directive found in host configuration.

use crate::error::ResolveError;
use crate::merge::ConfigMap;
use serde_json::Value;

/// Host configuration key carrying the directive.
pub const DIRECTIVE_KEY: &str = "requestConfigFromFrame";

/// How remote configuration should be obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameDirective {
    /// Use local configuration only.
    None,
    /// Deprecated origin-only form: ask every ancestor, accept the one served from `origin`.
    Legacy { origin: String },
    /// Ask the frame at root-relative `level` (0 = top), which must be served from `origin`.
    Ancestor { origin: String, level: usize },
}

impl FrameDirective {
    /// Read the directive out of host configuration.
    pub fn from_host_config(host: &ConfigMap) -> Result<Self, ResolveError> {
        match host.get(DIRECTIVE_KEY) {
            None | Some(Value::Null) => Ok(FrameDirective::None),
            Some(value) => Self::parse(value),
        }
    }

    pub fn parse(value: &Value) -> Result<Self, ResolveError> {
        match value {
            Value::Null => Ok(FrameDirective::None),
            Value::String(origin) if origin.is_empty() => Ok(FrameDirective::None),
            Value::String(origin) => Ok(FrameDirective::Legacy {
                origin: origin.clone(),
            }),
            Value::Object(fields) => {
                let origin = fields
                    .get("origin")
                    .and_then(Value::as_str)
                    .filter(|origin| !origin.is_empty());
                let level = fields
                    .get("ancestorLevel")
                    .and_then(Value::as_u64)
                    .and_then(|level| usize::try_from(level).ok());
                match (origin, level) {
                    (Some(origin), Some(level)) => Ok(FrameDirective::Ancestor {
                        origin: origin.to_string(),
                        level,
                    }),
                    _ => Err(ResolveError::MalformedDirective),
                }
            }
            _ => Err(ResolveError::MalformedDirective),
        }
    }

    /// Origin the responding frame must be served from, if any request is made.
    pub fn origin(&self) -> Option<&str> {
        match self {
            FrameDirective::None => None,
            FrameDirective::Legacy { origin } | FrameDirective::Ancestor { origin, .. } => {
                Some(origin.as_str())
            }
        }
    }
}
