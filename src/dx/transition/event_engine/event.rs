//! # Transition event engine event module.
//!
//! The module contains the [`TransitionEvent`] type, which describes available
//! event engine transition events.

use crate::{core::event_engine::Event, dx::transition::Phase};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TransitionEvent {
    /// Desired visibility changed.
    ///
    /// Emitted each time the consumer observes a "shown" intent.
    DesiredChanged {
        /// Whether element should be shown or hidden.
        visible: bool,
    },

    /// Phase timer elapsed.
    ///
    /// Emitted by the `Wait` effect when phase duration passed.
    TimesUp {
        /// Phase which has been timed.
        phase: Phase,

        /// Epoch of the phase which scheduled the timer.
        ///
        /// Timers from an interrupted phase carry stale epoch and are ignored.
        epoch: u64,
    },

    /// Element has been committed to the render tree.
    PresenceConfirmed,

    /// Element has been taken out of the render tree by someone else.
    PresenceLost,

    /// Exited element has been removed from the render tree.
    ///
    /// Emitted by the consumer, or by the removal signal effect once the
    /// element is allowed to be removed.
    Removed,

    /// Consumer stopped observing the transition.
    Unobserved,
}

impl Event for TransitionEvent {
    fn id(&self) -> &str {
        match self {
            Self::DesiredChanged { .. } => "DESIRED_CHANGED",
            Self::TimesUp { .. } => "TIMES_UP",
            Self::PresenceConfirmed => "PRESENCE_CONFIRMED",
            Self::PresenceLost => "PRESENCE_LOST",
            Self::Removed => "REMOVED",
            Self::Unobserved => "UNOBSERVED",
        }
    }
}
