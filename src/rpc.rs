//! Cross-frame RPC
//!
//! The resolver talks to other frames through `FrameRpc`, a request/response
//! primitive that is responsible for origin verification and for bounding each
//! exchange in time. The wire format belongs to the implementation.

use crate::error::RpcError;
use crate::frame::FrameRef;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

pub mod memory;

pub use memory::MemoryTransport;

/// Request/response exchange with another frame.
///
/// Implementations must only resolve with a response that provably came from a
/// frame served from `expected_origin`, must fail with `RpcError::Timeout` once
/// `timeout` elapses without such a response, and must fail with
/// `RpcError::Remote` when the other side reports an error.
#[async_trait]
pub trait FrameRpc<F: FrameRef>: Send + Sync {
    async fn call(
        &self,
        target: &F,
        expected_origin: &str,
        method: &str,
        params: Vec<Value>,
        timeout: Duration,
    ) -> Result<Value, RpcError>;
}

#[async_trait]
impl<F, T> FrameRpc<F> for std::sync::Arc<T>
where
    F: FrameRef + 'static,
    T: FrameRpc<F> + ?Sized,
{
    async fn call(
        &self,
        target: &F,
        expected_origin: &str,
        method: &str,
        params: Vec<Value>,
        timeout: Duration,
    ) -> Result<Value, RpcError> {
        (**self)
            .call(target, expected_origin, method, params, timeout)
            .await
    }
}
