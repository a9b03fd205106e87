//! Module with `Wait` effect implementation.

use async_channel::Receiver;
use futures::{select_biased, FutureExt};
use log::debug;
use spin::RwLock;
use std::sync::Arc;

use crate::{
    core::{event_engine::cancel::CancellationTask, TransitionError},
    dx::transition::{
        event_engine::{effects::WaitEffectExecutor, TransitionEvent},
        Phase,
    },
};

pub(super) async fn execute(
    effect_id: String,
    phase: Phase,
    epoch: u64,
    delay: u64,
    cancelled: Arc<RwLock<bool>>,
    cancellation_rx: Receiver<String>,
    executor: Arc<WaitEffectExecutor>,
) -> Result<Vec<TransitionEvent>, TransitionError> {
    debug!("Waiting {delay}ms for {phase} phase #{epoch}");

    let cancel_task = CancellationTask::new(cancellation_rx, effect_id);

    select_biased! {
        _ = cancel_task.wait_for_cancel().fuse() => Err(TransitionError::EffectCanceled),
        _ = executor(delay).fuse() => {
            if *cancelled.read() {
                Err(TransitionError::EffectCanceled)
            } else {
                Ok(vec![TransitionEvent::TimesUp { phase, epoch }])
            }
        }
    }
}
