//! # Async runtime module
//!
//! This module contains the [`Runtime`] trait, which abstracts away task
//! spawning and delays used by transition timers.

use std::future::Future;

/// Transition runtime trait.
///
/// This trait is used to spawn timer tasks and to wait for a given amount of
/// time. Timers don't need real-time guarantees: a delay of `N` milliseconds
/// means "no earlier than", and a delay of `0` should resolve on the next
/// scheduling tick rather than synchronously.
///
/// # Examples
/// ```
/// use mount_transition::core::Runtime;
/// use std::future::Future;
///
/// #[derive(Clone)]
/// struct MyRuntime;
///
/// #[async_trait::async_trait]
/// impl Runtime for MyRuntime {
///     fn spawn<R>(&self, future: impl Future<Output = R> + Send + 'static)
///     where
///         R: Send + 'static,
///     {
///         // spawn the Future
///         // e.g. tokio::spawn(future);
///     }
///
///     async fn sleep(self, _delay: u64) {
///         // e.g. tokio::time::sleep(Duration::from_millis(delay)).await
///     }
/// }
/// ```
#[async_trait::async_trait]
pub trait Runtime: Clone + Send + Sync + 'static {
    /// Spawn a task.
    ///
    /// This method is used to spawn a task.
    fn spawn<R>(&self, future: impl Future<Output = R> + Send + 'static)
    where
        R: Send + 'static;

    /// Put current task to "sleep".
    ///
    /// Sleep current task for specified amount of time (in milliseconds).
    async fn sleep(self, delay: u64);
}
