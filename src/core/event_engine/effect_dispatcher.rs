use log::debug;
use spin::rwlock::RwLock;
use std::{marker::PhantomData, sync::Arc};

use crate::core::event_engine::{Effect, EffectHandler, EffectInvocation};

/// State machine effects dispatcher.
#[derive(Debug)]
pub(crate) struct EffectDispatcher<EH, EF, EI>
where
    EI: EffectInvocation<Effect = EF>,
    EH: EffectHandler<EI, EF>,
    EF: Effect<Invocation = EI>,
{
    /// Effect invocation handler.
    ///
    /// Handler responsible for providing actual implementation of effects.
    handler: EH,

    /// Dispatched effects managed by dispatcher.
    ///
    /// There are effects whose lifetime should be managed by the dispatcher.
    /// State machines may have some effects that are exclusive and can only run
    /// one type of them at once. The dispatcher handles such effects
    /// and cancels them when required.
    managed: Arc<RwLock<Vec<Arc<EF>>>>,

    _invocation: PhantomData<fn(&EI)>,
}

impl<EH, EF, EI> EffectDispatcher<EH, EF, EI>
where
    EI: EffectInvocation<Effect = EF>,
    EH: EffectHandler<EI, EF>,
    EF: Effect<Invocation = EI>,
{
    /// Create new effects dispatcher.
    pub fn new(handler: EH) -> Self {
        EffectDispatcher {
            handler,
            managed: Arc::new(RwLock::new(vec![])),
            _invocation: PhantomData,
        }
    }

    /// Dispatch effect associated with `invocation`.
    ///
    /// Returns the effect which should be run by the caller, or `None` if the
    /// invocation only cancelled managed effects or had nothing to run.
    pub fn dispatch(&self, invocation: &EI) -> Option<Arc<EF>> {
        if invocation.is_cancelling() {
            self.cancel_effect(invocation);
            return None;
        }

        let Some(effect) = self.handler.create(invocation) else {
            debug!("Nothing to run for {} invocation", invocation.id());
            return None;
        };
        let effect = Arc::new(effect);

        if invocation.is_managed() {
            self.managed.write().push(effect.clone());
        }

        Some(effect)
    }

    /// Handle effect cancellation.
    ///
    /// Effects with managed lifecycle can be cancelled by corresponding effect
    /// invocations.
    fn cancel_effect(&self, invocation: &EI) {
        let mut managed = self.managed.write();
        if let Some(position) = managed.iter().position(|e| invocation.cancelling_effect(e)) {
            let effect = managed.remove(position);
            debug!("Cancelling managed effect {}", effect.id());
            effect.cancel();
        }
    }

    /// Cancel all managed effects.
    ///
    /// Used when the event engine stops and no further effect completions
    /// should be observed.
    pub fn cancel_all(&self) {
        let mut managed = self.managed.write();
        managed.drain(..).for_each(|effect| effect.cancel());
    }

    /// Remove managed effect.
    ///
    /// Called when managed effect completes its work.
    pub fn remove_managed_effect(&self, effect_id: &str) {
        let mut managed = self.managed.write();
        if let Some(position) = managed.iter().position(|ef| ef.id() == effect_id) {
            managed.remove(position);
        }
    }

    /// Number of managed effects which are still running.
    pub fn managed_count(&self) -> usize {
        self.managed.read().len()
    }
}
