//! Module with lifecycle callbacks effects implementation.

use log::debug;
use std::sync::Arc;

use crate::{
    core::TransitionError,
    dx::transition::{event_engine::TransitionEvent, LifecycleCallback, LifecycleHook},
};

pub(super) fn execute(
    hook: LifecycleHook,
    callback: &Arc<LifecycleCallback>,
) -> Result<Vec<TransitionEvent>, TransitionError> {
    debug!("Calling {hook}");
    callback();

    Ok(vec![])
}

/// Signal that the exited element can be removed.
///
/// The element is treated as removed right away, so showing it again waits
/// for presence confirmation.
pub(super) fn signal_removal(
    callback: Option<&Arc<LifecycleCallback>>,
) -> Result<Vec<TransitionEvent>, TransitionError> {
    debug!("Element can be removed");
    if let Some(callback) = callback {
        callback();
    }

    Ok(vec![TransitionEvent::Removed])
}
