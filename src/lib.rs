//! frameconf: Cross-Frame Configuration Resolution
//!
//! Determines the effective configuration of a client embedded in nested frames
//! owned by third parties. Configuration is merged from the embedding app's
//! defaults, the settings embedded in the client's frame, and optionally a
//! response from a verified ancestor frame.

pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod frame;
pub mod host;
pub mod logging;
pub mod merge;
pub mod resolver;
pub mod rpc;
pub mod topology;

pub use directive::FrameDirective;
pub use error::{ClientError, ResolveError, RpcError};
pub use frame::{FrameRef, FrameTree, StaticFrame};
pub use host::{ApiUrlSource, FixedApiUrl, HostConfigSource, StaticHostConfig};
pub use merge::ConfigMap;
pub use resolver::{ConfigResolver, REQUEST_CONFIG_METHOD, REQUEST_CONFIG_TIMEOUT};
pub use rpc::{FrameRpc, MemoryTransport};
