//! Managed effects cancellation module.
//!
//! This module provides [`CancellationTask`] which can be used to cancel
//! managed effects.
use async_channel::Receiver;

use crate::core::TransitionError;

#[derive(Debug)]
pub(crate) struct CancellationTask {
    cancel_rx: Receiver<String>,
    id: String,
}

impl CancellationTask {
    pub fn new(cancel_rx: Receiver<String>, id: String) -> Self {
        Self { cancel_rx, id }
    }

    /// Wait until cancellation for the effect with task `id` arrives.
    ///
    /// Resolves with an error if the pipe has been closed without
    /// cancellation (the effect owner is gone).
    pub async fn wait_for_cancel(&self) -> Result<(), TransitionError> {
        loop {
            if self
                .cancel_rx
                .recv()
                .await
                .map_err(|err| TransitionError::CancellationPipe {
                    details: format!("Cancellation pipe failed: {err}"),
                })?
                .eq(&self.id)
            {
                break;
            }
        }

        Ok(())
    }
}
