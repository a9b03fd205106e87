//! # Futures implementation using Tokio runtime
//!
//! This module contains [`RuntimeTokio`] type.
//!
//! It requires the [`tokio` feature] to be enabled.
//!
//! [`tokio` feature]: ../index.html#features

use std::future::Future;

use crate::core::Runtime;

/// Tokio-based `async` tasks runtime.
///
/// Must be used from within a Tokio runtime context.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuntimeTokio;

#[async_trait::async_trait]
impl Runtime for RuntimeTokio {
    fn spawn<R>(&self, future: impl Future<Output = R> + Send + 'static)
    where
        R: Send + 'static,
    {
        tokio::spawn(future);
    }

    async fn sleep(self, delay: u64) {
        tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await
    }
}
