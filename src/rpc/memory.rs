//! In-process transport over a `FrameTree`.
//!
//! Frames answer requests through registered handlers. Delivery follows the
//! browser's rules for targeted messages: a request whose expected origin does
//! not match the target frame's origin is dropped, as is a request to a frame
//! nobody is listening in. Either way the caller sees the request time out.

use super::FrameRpc;
use crate::error::RpcError;
use crate::frame::StaticFrame;
use crate::merge::ConfigMap;
use crate::resolver::REQUEST_CONFIG_METHOD;
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Handles one request: `(method, params) -> result`.
pub type RequestHandler = Arc<dyn Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync>;

#[derive(Clone)]
struct Responder {
    handler: RequestHandler,
    delay: Duration,
}

/// `FrameRpc` implementation for frames of an in-memory `FrameTree`.
#[derive(Default)]
pub struct MemoryTransport {
    responders: RwLock<HashMap<StaticFrame, Responder>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `frame` answer requests with `handler`.
    pub fn serve<H>(&self, frame: &StaticFrame, handler: H)
    where
        H: Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        self.serve_delayed(frame, Duration::ZERO, handler);
    }

    /// Like `serve`, answering only after `delay`.
    pub fn serve_delayed<H>(&self, frame: &StaticFrame, delay: Duration, handler: H)
    where
        H: Fn(&str, &[Value]) -> Result<Value, RpcError> + Send + Sync + 'static,
    {
        self.responders.write().insert(
            frame.clone(),
            Responder {
                handler: Arc::new(handler),
                delay,
            },
        );
    }

    /// Make `frame` answer `requestConfig` with `config`, after `delay`.
    pub fn serve_config(&self, frame: &StaticFrame, config: ConfigMap, delay: Duration) {
        self.serve_delayed(frame, delay, move |method, _params| {
            if method == REQUEST_CONFIG_METHOD {
                Ok(Value::Object(config.clone()))
            } else {
                Err(RpcError::Remote(format!("Method not found: {method}")))
            }
        });
    }

    /// Stop answering on behalf of `frame`.
    pub fn unserve(&self, frame: &StaticFrame) {
        self.responders.write().remove(frame);
    }

    fn responder_for(&self, target: &StaticFrame, expected_origin: &str) -> Option<Responder> {
        if target.origin() != expected_origin {
            debug!(
                target_frame = %target,
                expected_origin,
                "Dropping request: target origin does not match"
            );
            return None;
        }
        let responder = self.responders.read().get(target).cloned();
        if responder.is_none() {
            debug!(target_frame = %target, "Dropping request: frame has no listener");
        }
        responder
    }
}

#[async_trait]
impl FrameRpc<StaticFrame> for MemoryTransport {
    async fn call(
        &self,
        target: &StaticFrame,
        expected_origin: &str,
        method: &str,
        params: Vec<Value>,
        timeout: Duration,
    ) -> Result<Value, RpcError> {
        let responder = self.responder_for(target, expected_origin);

        let exchange = async move {
            match responder {
                Some(responder) => {
                    if !responder.delay.is_zero() {
                        tokio::time::sleep(responder.delay).await;
                    }
                    (responder.handler)(method, &params)
                }
                None => std::future::pending().await,
            }
        };

        tokio::time::timeout(timeout, exchange)
            .await
            .map_err(|_| RpcError::Timeout {
                method: method.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            })?
    }
}
