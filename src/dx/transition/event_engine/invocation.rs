//! # Transition event engine effect invocation module.
//!
//! The module contains the [`TransitionEffectInvocation`] type, which
//! describes available event engine effect invocations.

use std::fmt::{Display, Formatter, Result};

use crate::{
    core::event_engine::EffectInvocation,
    dx::transition::{
        event_engine::{TransitionEffect, TransitionEvent, TransitionState},
        LifecycleHook, Phase,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TransitionEffectInvocation {
    /// Notify consumer about committed state.
    EmitSnapshot {
        /// State which has been committed.
        state: TransitionState,
    },

    /// Call lifecycle callback.
    EmitLifecycle {
        /// Which callback should be called.
        hook: LifecycleHook,
    },

    /// Force layout of the bound element before phase starts.
    Reflow,

    /// Phase timer effect invocation.
    Wait {
        /// Phase which should be timed.
        phase: Phase,

        /// Epoch of the phase.
        epoch: u64,
    },

    /// Cancel phase timer effect invocation.
    CancelWait,

    /// Signal that exited element can be removed from the render tree.
    SignalRemovalSafe {
        /// Whether removal should be signalled regardless of `unmount`
        /// option (element presence has been lost).
        forced: bool,
    },

    /// Terminate Transition Event Engine processing loop.
    TerminateEventEngine,
}

impl EffectInvocation for TransitionEffectInvocation {
    type Effect = TransitionEffect;
    type Event = TransitionEvent;

    fn id(&self) -> &str {
        match self {
            Self::EmitSnapshot { .. } => "EMIT_SNAPSHOT",
            Self::EmitLifecycle { .. } => "EMIT_LIFECYCLE",
            Self::Reflow => "REFLOW",
            Self::Wait { .. } => "WAIT",
            Self::CancelWait => "CANCEL_WAIT",
            Self::SignalRemovalSafe { .. } => "SIGNAL_REMOVAL_SAFE",
            Self::TerminateEventEngine => "TERMINATE_EVENT_ENGINE",
        }
    }

    fn is_managed(&self) -> bool {
        matches!(self, Self::Wait { .. })
    }

    fn is_cancelling(&self) -> bool {
        matches!(self, Self::CancelWait)
    }

    fn cancelling_effect(&self, effect: &Self::Effect) -> bool {
        matches!(effect, TransitionEffect::Wait { .. }) && matches!(self, Self::CancelWait)
    }

    fn is_terminating(&self) -> bool {
        matches!(self, Self::TerminateEventEngine)
    }
}

impl Display for TransitionEffectInvocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmitSnapshot { state } => write!(f, "EMIT_SNAPSHOT({})", state.status()),
            Self::EmitLifecycle { hook } => write!(f, "EMIT_LIFECYCLE({hook})"),
            Self::Reflow => write!(f, "REFLOW"),
            Self::Wait { phase, epoch } => write!(f, "WAIT({phase}, {epoch})"),
            Self::CancelWait => write!(f, "CANCEL_WAIT"),
            Self::SignalRemovalSafe { .. } => write!(f, "SIGNAL_REMOVAL_SAFE"),
            Self::TerminateEventEngine => write!(f, "TERMINATE_EVENT_ENGINE"),
        }
    }
}
