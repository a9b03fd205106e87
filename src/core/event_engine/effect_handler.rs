use crate::core::event_engine::{Effect, EffectInvocation};

pub(crate) trait EffectHandler<I, EF>
where
    I: EffectInvocation,
    EF: Effect,
{
    /// Create effect using information of effect `invocation`.
    ///
    /// `None` is returned when there is nothing to run for the invocation
    /// (for example, the lifecycle callback hasn't been provided).
    fn create(&self, invocation: &I) -> Option<EF>;
}
