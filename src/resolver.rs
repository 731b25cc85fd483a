//! Config Resolver
//!
//! Computes the client's effective configuration from three layers: the
//! embedding app's defaults, the settings embedded in the client's own frame,
//! and optionally configuration requested from an ancestor frame. The host
//! settings decide, through the `requestConfigFromFrame` directive, whether and
//! from which ancestor remote configuration is requested.

use crate::directive::FrameDirective;
use crate::error::{ResolveError, RpcError};
use crate::frame::{ancestors, lineage, FrameRef};
use crate::host::{ApiUrlSource, HostConfigSource};
use crate::merge::{merge_layers, ConfigMap};
use crate::rpc::FrameRpc;
use futures::future::poll_fn;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::task::Poll;
use std::time::Duration;
use tracing::{debug, warn};

/// RPC method ancestor frames answer with their configuration.
pub const REQUEST_CONFIG_METHOD: &str = "requestConfig";

/// Time budget for each `requestConfig` exchange.
pub const REQUEST_CONFIG_TIMEOUT: Duration = Duration::from_millis(3000);

/// Resolves the merged configuration for a client frame.
///
/// Holds no per-call state; concurrent `resolve` calls do not interact.
pub struct ConfigResolver<F, H, A, R> {
    own_frame: F,
    host: H,
    api_url: A,
    rpc: R,
}

impl<F, H, A, R> ConfigResolver<F, H, A, R>
where
    F: FrameRef,
    H: HostConfigSource,
    A: ApiUrlSource,
    R: FrameRpc<F>,
{
    /// Create a resolver for a client living in `own_frame`.
    pub fn new(own_frame: F, host: H, api_url: A, rpc: R) -> Self {
        Self {
            own_frame,
            host,
            api_url,
            rpc,
        }
    }

    pub fn own_frame(&self) -> &F {
        &self.own_frame
    }

    /// Resolve configuration for the resolver's own frame.
    pub async fn resolve(&self, app_config: &ConfigMap) -> Result<ConfigMap, ResolveError> {
        self.resolve_from(app_config, &self.own_frame).await
    }

    /// Resolve configuration as seen from `current_frame`.
    ///
    /// Precedence, lowest to highest: `app_config`, host settings, remote
    /// configuration. `apiUrl` is always the locally derived value.
    pub async fn resolve_from(
        &self,
        app_config: &ConfigMap,
        current_frame: &F,
    ) -> Result<ConfigMap, ResolveError> {
        let host = self.host.host_config();
        let directive = FrameDirective::from_host_config(&host)?;

        let remote = match directive {
            FrameDirective::None => {
                debug!("No requestConfigFromFrame directive; using local configuration");
                ConfigMap::new()
            }
            FrameDirective::Legacy { origin } => {
                warn!(
                    origin = %origin,
                    "`requestConfigFromFrame` as an origin string is deprecated; \
                     specify `{{origin, ancestorLevel}}` instead"
                );
                self.request_from_any_ancestor(current_frame, &origin).await?
            }
            FrameDirective::Ancestor { origin, level } => {
                self.request_from_ancestor(current_frame, &origin, level)
                    .await?
            }
        };

        Ok(merge_layers(
            app_config,
            &host,
            &remote,
            self.api_url.api_url(),
        ))
    }

    /// Ask every ancestor at once; the first fulfilled response wins.
    ///
    /// Only a frame actually served from `origin` can answer, so the others
    /// normally time out. Every request is sent before a winner is taken, and
    /// within one pass the nearest answering ancestor wins. If every request
    /// fails, the first failure is reported.
    async fn request_from_any_ancestor(
        &self,
        current_frame: &F,
        origin: &str,
    ) -> Result<ConfigMap, ResolveError> {
        let frames = ancestors(current_frame);
        if frames.is_empty() {
            return Err(ResolveError::TopFrame);
        }
        debug!(
            origin,
            ancestor_count = frames.len(),
            "Requesting config from all ancestor frames"
        );

        let mut pending: Vec<Option<Pin<Box<_>>>> = frames
            .iter()
            .enumerate()
            .map(|(distance, frame)| {
                Some(Box::pin(async move {
                    (distance + 1, self.request_config(frame, origin).await)
                }))
            })
            .collect();

        let mut first_failure: Option<RpcError> = None;
        poll_fn(|cx| {
            let mut answer: Option<ConfigMap> = None;
            for slot in pending.iter_mut() {
                let Some(request) = slot.as_mut() else {
                    continue;
                };
                let polled = request.as_mut().poll(cx);
                if let Poll::Ready((distance, outcome)) = polled {
                    *slot = None;
                    match outcome {
                        Ok(config) => {
                            debug!(distance, "Ancestor frame answered config request");
                            answer.get_or_insert(config);
                        }
                        Err(err) => {
                            debug!(distance, error = %err, "Ancestor frame config request failed");
                            first_failure.get_or_insert(err);
                        }
                    }
                }
            }

            if let Some(config) = answer {
                Poll::Ready(Ok(config))
            } else if pending.iter().any(Option::is_some) {
                Poll::Pending
            } else {
                Poll::Ready(Err(first_failure
                    .take()
                    .map(ResolveError::Remote)
                    .unwrap_or(ResolveError::TopFrame)))
            }
        })
        .await
    }

    /// Ask the single frame at root-relative `level` of the lineage.
    async fn request_from_ancestor(
        &self,
        current_frame: &F,
        origin: &str,
        level: usize,
    ) -> Result<ConfigMap, ResolveError> {
        let chain = lineage(current_frame);
        let depth = chain.len() - 1;
        let target = chain
            .into_iter()
            .nth(level)
            .ok_or(ResolveError::AncestorOutOfRange { level, depth })?;
        debug!(origin, level, depth, "Requesting config from ancestor frame");

        Ok(self.request_config(&target, origin).await?)
    }

    async fn request_config(&self, target: &F, origin: &str) -> Result<ConfigMap, RpcError> {
        let response = self
            .rpc
            .call(
                target,
                origin,
                REQUEST_CONFIG_METHOD,
                Vec::new(),
                REQUEST_CONFIG_TIMEOUT,
            )
            .await?;
        match response {
            Value::Object(config) => Ok(config),
            Value::Null => Ok(ConfigMap::new()),
            other => Err(RpcError::InvalidResponse(format!(
                "Expected an object in response to `{}`, got {}",
                REQUEST_CONFIG_METHOD, other
            ))),
        }
    }
}
