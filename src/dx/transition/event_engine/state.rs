//! # Transition event engine state module.
//!
//! The module contains the [`TransitionState`] type, which describes available
//! event engine states. The module also contains an implementation of
//! `transition` between states in response to certain events.

use std::mem::discriminant;

use crate::{
    core::event_engine::{State, Transition},
    dx::transition::{
        event_engine::{
            TransitionEffectInvocation::{self, *},
            TransitionEvent,
        },
        LifecycleHook, Phase, TransitionSnapshot, TransitionStatus,
    },
};

/// Available `Transition` event engine states.
///
/// Every phase start bumps `epoch`, which is used to recognise timers of
/// interrupted phases.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TransitionState {
    /// Element is hidden.
    Exited {
        /// Epoch of the last started phase.
        epoch: u64,

        /// Whether element is part of the render tree.
        present: bool,

        /// Whether element has been requested to show and waits for presence
        /// confirmation before the `enter` phase starts.
        awaiting_presence: bool,
    },

    /// `enter` phase in progress.
    Entering {
        /// Epoch of the `enter` phase.
        epoch: u64,
    },

    /// Element is shown.
    Entered {
        /// Epoch of the completed `enter` phase.
        epoch: u64,
    },

    /// `exit` phase in progress.
    Exiting {
        /// Epoch of the `exit` phase.
        epoch: u64,

        /// Whether element is still part of the render tree.
        present: bool,

        /// Whether element is still logically requested to be shown (exit
        /// has been caused by lost presence).
        desired: bool,
    },
}

impl TransitionState {
    /// Compute state for the first observation.
    ///
    /// Without `initial` animation the element starts `entered` (a hidden one
    /// should then be exited with [`TransitionEvent::DesiredChanged`]). A
    /// shown element with `initial` animation waits for presence confirmation
    /// before its `enter` phase starts. A hidden element is considered present
    /// if it is rendered while hidden.
    pub(crate) fn initial(shown: bool, initial: bool, unmount: bool) -> Self {
        match (shown, initial) {
            (_, false) => Self::Entered { epoch: 0 },
            (true, true) => Self::Exited {
                epoch: 0,
                present: false,
                awaiting_presence: true,
            },
            (false, true) => Self::Exited {
                epoch: 0,
                present: !unmount,
                awaiting_presence: false,
            },
        }
    }

    /// Public status of the state.
    pub(crate) fn status(&self) -> TransitionStatus {
        match self {
            Self::Exited { .. } => TransitionStatus::Exited,
            Self::Entering { .. } => TransitionStatus::Entering,
            Self::Entered { .. } => TransitionStatus::Entered,
            Self::Exiting { .. } => TransitionStatus::Exiting,
        }
    }

    /// Epoch of the last started phase.
    pub(crate) fn epoch(&self) -> u64 {
        match self {
            Self::Exited { epoch, .. }
            | Self::Entering { epoch }
            | Self::Entered { epoch }
            | Self::Exiting { epoch, .. } => *epoch,
        }
    }

    /// Consumer-facing projection of the state.
    pub(crate) fn snapshot(&self, unmount: bool) -> TransitionSnapshot {
        let status = self.status();
        let mounted = match self {
            Self::Exited {
                present,
                awaiting_presence,
                ..
            } => *awaiting_presence || (*present && !unmount),
            _ => true,
        };

        TransitionSnapshot {
            status,
            visible: matches!(
                status,
                TransitionStatus::Entering | TransitionStatus::Entered
            ),
            mounted,
        }
    }

    /// Start `enter` phase.
    fn start_entering(&self) -> Transition<Self, TransitionEffectInvocation> {
        self.transition_to(
            Some(Self::Entering {
                epoch: self.epoch() + 1,
            }),
            Some(vec![
                EmitLifecycle {
                    hook: LifecycleHook::Enter,
                },
                Reflow,
            ]),
        )
    }

    /// Start `exit` phase.
    fn start_exiting(&self, present: bool) -> Transition<Self, TransitionEffectInvocation> {
        self.transition_to(
            Some(Self::Exiting {
                epoch: self.epoch() + 1,
                present,
                desired: !present,
            }),
            Some(vec![
                EmitLifecycle {
                    hook: LifecycleHook::Exit,
                },
                Reflow,
            ]),
        )
    }

    /// Handle `desired changed` event.
    fn desired_changed_transition(
        &self,
        visible: bool,
    ) -> Option<Transition<Self, TransitionEffectInvocation>> {
        match self {
            Self::Exited { present: true, .. } if visible => Some(self.start_entering()),
            Self::Exited {
                epoch,
                present: false,
                awaiting_presence,
            } if *awaiting_presence != visible => Some(self.transition_to(
                Some(Self::Exited {
                    epoch: *epoch,
                    present: false,
                    awaiting_presence: visible,
                }),
                None,
            )),
            Self::Entering { .. } | Self::Entered { .. } if !visible => {
                Some(self.start_exiting(true))
            }
            Self::Exiting { present: true, .. } if visible => Some(self.start_entering()),
            Self::Exiting {
                epoch,
                present: false,
                desired,
            } if *desired != visible => Some(self.transition_to(
                Some(Self::Exiting {
                    epoch: *epoch,
                    present: false,
                    desired: visible,
                }),
                None,
            )),
            _ => None,
        }
    }

    /// Handle phase `times up` event.
    fn times_up_transition(
        &self,
        phase: Phase,
        timer_epoch: u64,
    ) -> Option<Transition<Self, TransitionEffectInvocation>> {
        match (self, phase) {
            (Self::Entering { epoch }, Phase::Enter) if *epoch == timer_epoch => {
                Some(self.transition_to(
                    Some(Self::Entered { epoch: *epoch }),
                    Some(vec![EmitLifecycle {
                        hook: LifecycleHook::Entered,
                    }]),
                ))
            }
            (
                Self::Exiting {
                    epoch,
                    present,
                    desired,
                },
                Phase::Exit,
            ) if *epoch == timer_epoch => Some(self.transition_to(
                Some(Self::Exited {
                    epoch: *epoch,
                    present: *present,
                    awaiting_presence: *desired && !*present,
                }),
                Some(vec![
                    SignalRemovalSafe { forced: !*present },
                    EmitLifecycle {
                        hook: LifecycleHook::Exited,
                    },
                ]),
            )),
            _ => None,
        }
    }

    /// Handle `presence confirmed` event.
    fn presence_confirmed_transition(&self) -> Option<Transition<Self, TransitionEffectInvocation>> {
        match self {
            Self::Exited {
                present: false,
                awaiting_presence: true,
                ..
            } => Some(self.start_entering()),
            Self::Exited {
                epoch,
                present: false,
                awaiting_presence: false,
            } => Some(self.transition_to(
                Some(Self::Exited {
                    epoch: *epoch,
                    present: true,
                    awaiting_presence: false,
                }),
                None,
            )),
            _ => None,
        }
    }

    /// Handle `presence lost` event.
    fn presence_lost_transition(&self) -> Option<Transition<Self, TransitionEffectInvocation>> {
        match self {
            Self::Entering { .. } | Self::Entered { .. } => Some(self.start_exiting(false)),
            Self::Exiting {
                epoch,
                present: true,
                desired,
            } => Some(self.transition_to(
                Some(Self::Exiting {
                    epoch: *epoch,
                    present: false,
                    desired: *desired,
                }),
                None,
            )),
            Self::Exited {
                epoch,
                present: true,
                ..
            } => Some(self.transition_to(
                Some(Self::Exited {
                    epoch: *epoch,
                    present: false,
                    awaiting_presence: false,
                }),
                None,
            )),
            _ => None,
        }
    }

    /// Handle `removed` event.
    fn removed_transition(&self) -> Option<Transition<Self, TransitionEffectInvocation>> {
        match self {
            Self::Exited {
                epoch,
                present: true,
                ..
            } => Some(self.transition_to(
                Some(Self::Exited {
                    epoch: *epoch,
                    present: false,
                    awaiting_presence: false,
                }),
                None,
            )),
            _ => None,
        }
    }
}

impl State for TransitionState {
    type State = Self;
    type Invocation = TransitionEffectInvocation;
    type Event = TransitionEvent;

    fn enter(&self) -> Option<Vec<Self::Invocation>> {
        match self {
            Self::Entering { epoch } => Some(vec![Wait {
                phase: Phase::Enter,
                epoch: *epoch,
            }]),
            Self::Exiting { epoch, .. } => Some(vec![Wait {
                phase: Phase::Exit,
                epoch: *epoch,
            }]),
            _ => None,
        }
    }

    fn exit(&self) -> Option<Vec<Self::Invocation>> {
        match self {
            Self::Entering { .. } | Self::Exiting { .. } => Some(vec![CancelWait]),
            _ => None,
        }
    }

    fn transition(&self, event: &Self::Event) -> Option<Transition<Self::State, Self::Invocation>> {
        match event {
            TransitionEvent::DesiredChanged { visible } => self.desired_changed_transition(*visible),
            TransitionEvent::TimesUp { phase, epoch } => self.times_up_transition(*phase, *epoch),
            TransitionEvent::PresenceConfirmed => self.presence_confirmed_transition(),
            TransitionEvent::PresenceLost => self.presence_lost_transition(),
            TransitionEvent::Removed => self.removed_transition(),
            TransitionEvent::Unobserved => {
                Some(self.transition_to(None, Some(vec![TerminateEventEngine])))
            }
        }
    }

    fn transition_to(
        &self,
        state: Option<Self::State>,
        invocations: Option<Vec<Self::Invocation>>,
    ) -> Transition<Self::State, Self::Invocation> {
        // Refining data of the same state keeps its effects running.
        let state_changed = state
            .as_ref()
            .map_or(false, |state| discriminant(self) != discriminant(state));

        let on_exit_invocations = state_changed
            .then(|| self.exit())
            .flatten()
            .unwrap_or_default();
        let on_enter_invocations = state
            .as_ref()
            .filter(|_| state_changed)
            .and_then(|state| state.enter())
            .unwrap_or_default();
        let snapshot_invocation = state
            .clone()
            .map(|state| EmitSnapshot { state })
            .into_iter();

        Transition {
            invocations: on_exit_invocations
                .into_iter()
                .chain(snapshot_invocation)
                .chain(invocations.unwrap_or_default())
                .chain(on_enter_invocations)
                .collect(),
            state,
        }
    }
}

#[cfg(test)]
mod it_should {
    use super::*;
    use test_case::test_case;

    fn exited(present: bool) -> TransitionState {
        TransitionState::Exited {
            epoch: 0,
            present,
            awaiting_presence: false,
        }
    }

    fn transit(state: &TransitionState, event: TransitionEvent) -> Option<TransitionState> {
        state.transition(&event).and_then(|t| t.state)
    }

    #[test_case(true, true, false, TransitionStatus::Exited; "to exited when shown and animated")]
    #[test_case(true, false, false, TransitionStatus::Entered; "to entered when shown without animation")]
    #[test_case(false, true, true, TransitionStatus::Exited; "to exited when hidden")]
    #[test_case(false, false, true, TransitionStatus::Entered; "to entered when hidden without animation")]
    fn compute_initial_state(
        shown: bool,
        initial: bool,
        unmount: bool,
        expected: TransitionStatus,
    ) {
        assert_eq!(TransitionState::initial(shown, initial, unmount).status(), expected);
    }

    #[test]
    fn assume_presence_of_rendered_element() {
        assert_eq!(TransitionState::initial(false, true, false), exited(true));
        assert_eq!(TransitionState::initial(false, true, true), exited(false));
    }

    #[test_case(true; "when unmounting")]
    #[test_case(false; "when keeping element")]
    fn await_presence_of_first_mounted_element(unmount: bool) {
        let state = TransitionState::initial(true, true, unmount);

        assert_eq!(
            state,
            TransitionState::Exited {
                epoch: 0,
                present: false,
                awaiting_presence: true
            }
        );
        assert!(state.snapshot(unmount).mounted);
        assert!(!state.snapshot(unmount).visible);
    }

    #[test]
    fn exit_hidden_element_without_initial_animation() {
        let state = TransitionState::initial(false, false, true);

        assert_eq!(
            transit(&state, TransitionEvent::DesiredChanged { visible: false }),
            Some(TransitionState::Exiting {
                epoch: 1,
                present: true,
                desired: false
            })
        );
    }

    #[test]
    fn start_enter_phase_in_order() {
        let transition = exited(true)
            .transition(&TransitionEvent::DesiredChanged { visible: true })
            .unwrap();
        let target = TransitionState::Entering { epoch: 1 };

        assert_eq!(transition.state, Some(target.clone()));
        assert_eq!(
            transition.invocations,
            vec![
                EmitSnapshot { state: target },
                EmitLifecycle {
                    hook: LifecycleHook::Enter
                },
                Reflow,
                Wait {
                    phase: Phase::Enter,
                    epoch: 1
                },
            ]
        );
    }

    #[test]
    fn cancel_enter_timer_before_exit_timer() {
        let transition = TransitionState::Entering { epoch: 3 }
            .transition(&TransitionEvent::DesiredChanged { visible: false })
            .unwrap();
        let target = TransitionState::Exiting {
            epoch: 4,
            present: true,
            desired: false,
        };

        assert_eq!(
            transition.invocations,
            vec![
                CancelWait,
                EmitSnapshot {
                    state: target.clone()
                },
                EmitLifecycle {
                    hook: LifecycleHook::Exit
                },
                Reflow,
                Wait {
                    phase: Phase::Exit,
                    epoch: 4
                },
            ]
        );
        assert_eq!(transition.state, Some(target));
    }

    #[test]
    fn signal_removal_before_exit_completion_callback() {
        let transition = TransitionState::Exiting {
            epoch: 2,
            present: true,
            desired: false,
        }
        .transition(&TransitionEvent::TimesUp {
            phase: Phase::Exit,
            epoch: 2,
        })
        .unwrap();

        assert_eq!(
            transition.invocations,
            vec![
                CancelWait,
                EmitSnapshot {
                    state: TransitionState::Exited {
                        epoch: 2,
                        present: true,
                        awaiting_presence: false
                    }
                },
                SignalRemovalSafe { forced: false },
                EmitLifecycle {
                    hook: LifecycleHook::Exited
                },
            ]
        );
    }

    #[test_case(
        TransitionState::Entered { epoch: 1 },
        TransitionEvent::DesiredChanged { visible: true };
        "entered on repeated show"
    )]
    #[test_case(
        TransitionState::Entering { epoch: 1 },
        TransitionEvent::DesiredChanged { visible: true };
        "entering on repeated show"
    )]
    #[test_case(
        TransitionState::Exited { epoch: 2, present: true, awaiting_presence: false },
        TransitionEvent::DesiredChanged { visible: false };
        "exited on repeated hide"
    )]
    #[test_case(
        TransitionState::Exiting { epoch: 2, present: true, desired: false },
        TransitionEvent::DesiredChanged { visible: false };
        "exiting on repeated hide"
    )]
    #[test_case(
        TransitionState::Entering { epoch: 3 },
        TransitionEvent::TimesUp { phase: Phase::Enter, epoch: 1 };
        "entering on stale enter timer"
    )]
    #[test_case(
        TransitionState::Entering { epoch: 3 },
        TransitionEvent::TimesUp { phase: Phase::Exit, epoch: 3 };
        "entering on exit timer"
    )]
    #[test_case(
        TransitionState::Exiting { epoch: 4, present: true, desired: false },
        TransitionEvent::TimesUp { phase: Phase::Exit, epoch: 2 };
        "exiting on stale exit timer"
    )]
    #[test_case(
        TransitionState::Entered { epoch: 1 },
        TransitionEvent::PresenceConfirmed;
        "entered on presence confirmation"
    )]
    #[test_case(
        TransitionState::Entered { epoch: 1 },
        TransitionEvent::Removed;
        "entered on removal"
    )]
    fn not_change_state(state: TransitionState, event: TransitionEvent) {
        assert!(state.transition(&event).is_none());
    }

    #[test_case(
        TransitionState::Entering { epoch: 1 },
        TransitionEvent::TimesUp { phase: Phase::Enter, epoch: 1 },
        TransitionState::Entered { epoch: 1 };
        "to entered when enter timer elapses"
    )]
    #[test_case(
        TransitionState::Entering { epoch: 1 },
        TransitionEvent::DesiredChanged { visible: false },
        TransitionState::Exiting { epoch: 2, present: true, desired: false };
        "to exiting when hidden mid-enter"
    )]
    #[test_case(
        TransitionState::Exiting { epoch: 2, present: true, desired: false },
        TransitionEvent::DesiredChanged { visible: true },
        TransitionState::Entering { epoch: 3 };
        "to entering when shown mid-exit"
    )]
    #[test_case(
        TransitionState::Entered { epoch: 1 },
        TransitionEvent::PresenceLost,
        TransitionState::Exiting { epoch: 2, present: false, desired: true };
        "to exiting when presence lost"
    )]
    #[test_case(
        TransitionState::Exiting { epoch: 2, present: false, desired: true },
        TransitionEvent::TimesUp { phase: Phase::Exit, epoch: 2 },
        TransitionState::Exited { epoch: 2, present: false, awaiting_presence: true };
        "to exited awaiting presence after lost presence"
    )]
    #[test_case(
        TransitionState::Exited { epoch: 2, present: false, awaiting_presence: false },
        TransitionEvent::DesiredChanged { visible: true },
        TransitionState::Exited { epoch: 2, present: false, awaiting_presence: true };
        "to awaiting presence when shown while unmounted"
    )]
    #[test_case(
        TransitionState::Exited { epoch: 2, present: false, awaiting_presence: true },
        TransitionEvent::PresenceConfirmed,
        TransitionState::Entering { epoch: 3 };
        "to entering when presence confirmed"
    )]
    #[test_case(
        TransitionState::Exited { epoch: 2, present: false, awaiting_presence: true },
        TransitionEvent::DesiredChanged { visible: false },
        TransitionState::Exited { epoch: 2, present: false, awaiting_presence: false };
        "to exited when hidden before presence confirmed"
    )]
    #[test_case(
        TransitionState::Exited { epoch: 2, present: true, awaiting_presence: false },
        TransitionEvent::Removed,
        TransitionState::Exited { epoch: 2, present: false, awaiting_presence: false };
        "to unmounted when removed"
    )]
    fn change_state(state: TransitionState, event: TransitionEvent, target: TransitionState) {
        assert_eq!(transit(&state, event), Some(target));
    }

    #[test]
    fn keep_timer_when_presence_lost_mid_exit() {
        let transition = TransitionState::Exiting {
            epoch: 2,
            present: true,
            desired: false,
        }
        .transition(&TransitionEvent::PresenceLost)
        .unwrap();

        assert!(!transition
            .invocations
            .iter()
            .any(|invocation| matches!(invocation, CancelWait | Wait { .. })));
    }

    #[test]
    fn terminate_without_state_change() {
        let transition = TransitionState::Entering { epoch: 1 }
            .transition(&TransitionEvent::Unobserved)
            .unwrap();

        assert!(transition.state.is_none());
        assert_eq!(transition.invocations, vec![TerminateEventEngine]);
    }

    #[test_case(exited(true), false, false, true; "rendered while hidden")]
    #[test_case(exited(true), true, false, false; "removable when unmount requested")]
    #[test_case(exited(false), false, false, false; "not rendered once removed")]
    #[test_case(
        TransitionState::Exited { epoch: 1, present: false, awaiting_presence: true },
        true, false, true;
        "rendered while awaiting presence"
    )]
    #[test_case(TransitionState::Entering { epoch: 1 }, true, true, true; "visible while entering")]
    #[test_case(TransitionState::Entered { epoch: 1 }, true, true, true; "visible while entered")]
    #[test_case(
        TransitionState::Exiting { epoch: 1, present: true, desired: false },
        true, false, true;
        "rendered while exiting"
    )]
    fn project_snapshot(state: TransitionState, unmount: bool, visible: bool, mounted: bool) {
        let snapshot = state.snapshot(unmount);

        assert_eq!(snapshot.status, state.status());
        assert_eq!(snapshot.visible, visible);
        assert_eq!(snapshot.mounted, mounted);
    }
}
