use crate::core::event_engine::{EffectInvocation, State};

/// State machine transition type.
///
/// State transition with information about target state and list of effect
/// invocations.
pub(crate) struct Transition<S, I>
where
    S: State,
    I: EffectInvocation,
{
    /// Target state machine state.
    ///
    /// `None` means that the current state stays as is and only `invocations`
    /// should be dispatched.
    pub state: Option<S>,

    /// List of effect invocation which should be scheduled during transition.
    pub invocations: Vec<I>,
}
