//! Error types for cross-frame configuration resolution.

use thiserror::Error;

/// Failures of a single cross-frame request.
///
/// Display output is what the caller of `resolve` ultimately sees, so the
/// remote-signalled variants carry their message verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("Request `{method}` timed out after {timeout_ms}ms")]
    Timeout { method: String, timeout_ms: u64 },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Remote(String),

    #[error("{0}")]
    InvalidResponse(String),
}

/// Resolution errors surfaced by `ConfigResolver`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Client is top frame")]
    TopFrame,

    #[error("Improper `requestConfigFromFrame` object. Both `ancestorLevel` and `origin` need to be specified")]
    MalformedDirective,

    #[error("The target parent frame has exceeded the ancestor tree. Try reducing the `requestConfigFromFrame.ancestorLevel` value in the `hypothesisConfig`")]
    AncestorOutOfRange { level: usize, depth: usize },

    #[error(transparent)]
    Remote(#[from] RpcError),
}

/// Errors from the surfaces around the resolver: settings, logging, topology files, CLI.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Topology error: {0}")]
    Topology(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Config(err.to_string())
    }
}
