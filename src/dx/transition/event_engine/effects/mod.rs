//! # Transition event engine effect module.

use async_channel::{Receiver, Sender};
use futures::{future::BoxFuture, FutureExt};
use log::trace;
use spin::RwLock;
use std::{
    fmt::{Debug, Formatter},
    sync::Arc,
};

use crate::{
    core::{
        event_engine::{Effect, EffectExecution, EffectInvocation},
        DataStream,
    },
    dx::transition::{
        event_engine::TransitionEffectInvocation, AttachmentSlot, LifecycleCallback,
        LifecycleHook, Phase, TransitionSnapshot,
    },
};

mod emit_lifecycle;
mod emit_snapshot;
mod reflow;
mod wait;

/// Wait effect executor.
///
/// The provided closure should resolve after specified amount of
/// milliseconds.
pub(in crate::dx::transition) type WaitEffectExecutor =
    dyn Fn(u64) -> BoxFuture<'static, ()> + Send + Sync;

/// Transition state machine effects.
pub(crate) enum TransitionEffect {
    /// Snapshot delivery effect.
    EmitSnapshot {
        /// Unique effect identifier.
        id: String,

        /// Snapshot of committed state.
        snapshot: TransitionSnapshot,

        /// Consumer's snapshots stream.
        stream: DataStream<TransitionSnapshot>,
    },

    /// Lifecycle callback effect.
    EmitLifecycle {
        /// Unique effect identifier.
        id: String,

        /// Which callback is called.
        hook: LifecycleHook,

        /// User-provided callback.
        callback: Arc<LifecycleCallback>,
    },

    /// Layout flush effect.
    Reflow {
        /// Unique effect identifier.
        id: String,

        /// Slot with bound element.
        attachment: AttachmentSlot,
    },

    /// Phase timer effect.
    Wait {
        /// Unique effect identifier.
        id: String,

        /// Timed phase.
        phase: Phase,

        /// Epoch of the timed phase.
        epoch: u64,

        /// Phase duration in milliseconds.
        delay: u64,

        /// Whether effect has been cancelled or not.
        cancelled: Arc<RwLock<bool>>,

        /// Cancellation channel.
        ///
        /// Channel which will be used to cancel effect execution.
        cancellation_channel: Sender<String>,

        /// Receiving end of the cancellation channel.
        cancellation_rx: Receiver<String>,

        /// Executor function.
        ///
        /// Function which will be used to execute wait.
        executor: Arc<WaitEffectExecutor>,
    },

    /// Removal notification effect.
    SignalRemovalSafe {
        /// Unique effect identifier.
        id: String,

        /// User-provided callback (if registered).
        callback: Option<Arc<LifecycleCallback>>,
    },
}

impl Debug for TransitionEffect {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmitSnapshot { snapshot, .. } => write!(
                f,
                "TransitionEffect::EmitSnapshot {{ status: {}, visible: {}, mounted: {} }}",
                snapshot.status, snapshot.visible, snapshot.mounted
            ),
            Self::EmitLifecycle { hook, .. } => {
                write!(f, "TransitionEffect::EmitLifecycle {{ hook: {hook} }}")
            }
            Self::Reflow { attachment, .. } => {
                write!(f, "TransitionEffect::Reflow {{ {attachment:?} }}")
            }
            Self::Wait {
                phase,
                epoch,
                delay,
                ..
            } => write!(
                f,
                "TransitionEffect::Wait {{ phase: {phase}, epoch: {epoch}, delay: {delay}ms }}"
            ),
            Self::SignalRemovalSafe { .. } => write!(f, "TransitionEffect::SignalRemovalSafe"),
        }
    }
}

impl Effect for TransitionEffect {
    type Invocation = TransitionEffectInvocation;

    fn id(&self) -> String {
        match self {
            Self::EmitSnapshot { id, .. }
            | Self::EmitLifecycle { id, .. }
            | Self::Reflow { id, .. }
            | Self::Wait { id, .. }
            | Self::SignalRemovalSafe { id, .. } => id.to_string(),
        }
    }

    fn run(&self) -> EffectExecution<<Self::Invocation as EffectInvocation>::Event> {
        match self {
            Self::EmitSnapshot {
                snapshot, stream, ..
            } => {
                let (snapshot, stream) = (*snapshot, stream.clone());
                EffectExecution::Sync(Box::new(move || emit_snapshot::execute(snapshot, &stream)))
            }
            Self::EmitLifecycle { hook, callback, .. } => {
                let (hook, callback) = (*hook, callback.clone());
                EffectExecution::Sync(Box::new(move || emit_lifecycle::execute(hook, &callback)))
            }
            Self::Reflow { attachment, .. } => {
                let attachment = attachment.clone();
                EffectExecution::Sync(Box::new(move || reflow::execute(&attachment)))
            }
            Self::Wait {
                id,
                phase,
                epoch,
                delay,
                cancelled,
                cancellation_rx,
                executor,
                ..
            } => {
                let effect_id = id.clone();
                EffectExecution::Async {
                    future: wait::execute(
                        id.clone(),
                        *phase,
                        *epoch,
                        *delay,
                        cancelled.clone(),
                        cancellation_rx.clone(),
                        executor.clone(),
                    )
                    .boxed(),
                    then: Box::new(move || trace!("Wait effect {effect_id} finished")),
                }
            }
            Self::SignalRemovalSafe { callback, .. } => {
                let callback = callback.clone();
                EffectExecution::Sync(Box::new(move || {
                    emit_lifecycle::signal_removal(callback.as_ref())
                }))
            }
        }
    }

    fn cancel(&self) {
        if let Self::Wait {
            cancelled,
            cancellation_channel,
            ..
        } = self
        {
            *cancelled.write() = true;

            if let Err(error) = cancellation_channel.try_send(self.id()) {
                trace!("Wait effect {} already stopped: {error}", self.id());
            }
        }
    }
}
