//! # Transition event engine effects handler.
//!
//! The module contains the [`TransitionEffectHandler`] type, which is used by
//! event engine to create effects for dispatched invocations.

use log::trace;
use spin::RwLock;
use std::{
    fmt::{Debug, Formatter, Result},
    sync::Arc,
};
use uuid::Uuid;

use crate::{
    core::{event_engine::EffectHandler, DataStream},
    dx::transition::{
        event_engine::{
            effects::WaitEffectExecutor, TransitionEffect, TransitionEffectInvocation,
        },
        AttachmentSlot, TransitionOptions, TransitionSnapshot,
    },
};

/// Transition effect handler.
///
/// Handler responsible for effects implementation and creation in response on
/// effect invocation.
pub(crate) struct TransitionEffectHandler {
    /// Current transition options.
    ///
    /// Read on each invocation, so replaced options apply to phases started
    /// afterwards.
    options: Arc<RwLock<TransitionOptions>>,

    /// Slot with bound element.
    attachment: AttachmentSlot,

    /// Consumer's snapshots stream (if requested).
    stream: Arc<RwLock<Option<DataStream<TransitionSnapshot>>>>,

    /// Phase timer wait function pointer.
    wait_call: Arc<WaitEffectExecutor>,
}

impl TransitionEffectHandler {
    /// Create transition effect handler.
    pub fn new(
        options: Arc<RwLock<TransitionOptions>>,
        attachment: AttachmentSlot,
        stream: Arc<RwLock<Option<DataStream<TransitionSnapshot>>>>,
        wait_call: Arc<WaitEffectExecutor>,
    ) -> Self {
        Self {
            options,
            attachment,
            stream,
            wait_call,
        }
    }
}

impl EffectHandler<TransitionEffectInvocation, TransitionEffect> for TransitionEffectHandler {
    fn create(&self, invocation: &TransitionEffectInvocation) -> Option<TransitionEffect> {
        let options = self.options.read().clone();

        match invocation {
            TransitionEffectInvocation::EmitSnapshot { state } => {
                let stream = self.stream.read().clone()?;

                Some(TransitionEffect::EmitSnapshot {
                    id: Uuid::new_v4().to_string(),
                    snapshot: state.snapshot(options.unmount),
                    stream,
                })
            }
            TransitionEffectInvocation::EmitLifecycle { hook } => {
                let Some(callback) = options.hooks.callback(*hook) else {
                    trace!("No {hook} callback registered");
                    return None;
                };

                Some(TransitionEffect::EmitLifecycle {
                    id: Uuid::new_v4().to_string(),
                    hook: *hook,
                    callback,
                })
            }
            TransitionEffectInvocation::Reflow => Some(TransitionEffect::Reflow {
                id: Uuid::new_v4().to_string(),
                attachment: self.attachment.clone(),
            }),
            TransitionEffectInvocation::Wait { phase, epoch } => {
                let (cancellation_channel, cancellation_rx) = async_channel::bounded(1);

                Some(TransitionEffect::Wait {
                    id: Uuid::new_v4().to_string(),
                    phase: *phase,
                    epoch: *epoch,
                    delay: options.timeout.for_phase(*phase),
                    cancelled: Arc::new(RwLock::new(false)),
                    cancellation_channel,
                    cancellation_rx,
                    executor: self.wait_call.clone(),
                })
            }
            TransitionEffectInvocation::SignalRemovalSafe { forced } => {
                if !forced && !options.unmount {
                    return None;
                }

                Some(TransitionEffect::SignalRemovalSafe {
                    id: Uuid::new_v4().to_string(),
                    callback: options.hooks.on_removal_safe,
                })
            }
            _ => None,
        }
    }
}

impl Debug for TransitionEffectHandler {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "TransitionEffectHandler {{ {:?} }}", self.attachment)
    }
}
