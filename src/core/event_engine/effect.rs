use crate::core::event_engine::{EffectExecution, EffectInvocation};

pub(crate) trait Effect: Send + Sync {
    type Invocation: EffectInvocation;

    /// Unique effect identifier.
    fn id(&self) -> String;

    /// Prepare effect execution.
    ///
    /// Synchronous executions are run in place by the event engine, while
    /// asynchronous ones are spawned on the runtime and their events fed back
    /// into the engine on completion.
    fn run(&self) -> EffectExecution<<Self::Invocation as EffectInvocation>::Event>;

    /// Cancel any ongoing effect's work.
    fn cancel(&self);
}
