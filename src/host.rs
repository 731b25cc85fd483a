//! Local collaborators of the resolver: embedded host settings and the API endpoint.

use crate::merge::ConfigMap;

/// Synchronous read of the settings embedded in the current frame.
///
/// Must not fail; an embedder that supplies nothing yields an empty map.
pub trait HostConfigSource: Send + Sync {
    fn host_config(&self) -> ConfigMap;
}

/// Synchronous derivation of the API endpoint the client talks to.
pub trait ApiUrlSource: Send + Sync {
    fn api_url(&self) -> String;
}

impl<F> HostConfigSource for F
where
    F: Fn() -> ConfigMap + Send + Sync,
{
    fn host_config(&self) -> ConfigMap {
        self()
    }
}

impl<F> ApiUrlSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn api_url(&self) -> String {
        self()
    }
}

/// Host settings fixed at construction time.
#[derive(Debug, Clone, Default)]
pub struct StaticHostConfig(pub ConfigMap);

impl HostConfigSource for StaticHostConfig {
    fn host_config(&self) -> ConfigMap {
        self.0.clone()
    }
}

/// API endpoint fixed at construction time.
#[derive(Debug, Clone)]
pub struct FixedApiUrl(pub String);

impl ApiUrlSource for FixedApiUrl {
    fn api_url(&self) -> String {
        self.0.clone()
    }
}
