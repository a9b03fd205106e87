use futures::future::BoxFuture;

use crate::core::TransitionError;

use super::Event;

/// Prepared effect execution.
pub(crate) enum EffectExecution<E>
where
    E: Event,
{
    /// Async effect execution.
    ///
    /// `then` is called once `future` completes (successfully or not).
    Async {
        future: BoxFuture<'static, Result<Vec<E>, TransitionError>>,
        then: Box<dyn FnOnce() + Send>,
    },

    /// Sync effect execution.
    Sync(Box<dyn FnOnce() -> Result<Vec<E>, TransitionError> + Send>),
}

impl<E> EffectExecution<E>
where
    E: Event,
{
    pub(crate) async fn execute_async(self) -> Result<Vec<E>, TransitionError> {
        match self {
            EffectExecution::Async { future, then } => {
                let result = future.await;

                then();

                result
            }
            EffectExecution::Sync(f) => f(),
        }
    }
}
