//! Event Engine module

use log::{debug, trace, warn};
use spin::rwlock::RwLock;
use std::{
    any::Any,
    collections::VecDeque,
    panic::{catch_unwind, resume_unwind, AssertUnwindSafe},
    sync::{Arc, Weak},
    thread::{self, ThreadId},
};

use crate::core::runtime::Runtime;

#[doc(inline)]
pub(crate) use effect::Effect;
pub(crate) mod effect;

#[doc(inline)]
pub(crate) use effect_dispatcher::EffectDispatcher;
pub(crate) mod effect_dispatcher;

#[doc(inline)]
pub(crate) use effect_execution::EffectExecution;
pub(crate) mod effect_execution;

#[doc(inline)]
pub(crate) use effect_handler::EffectHandler;
pub(crate) mod effect_handler;

#[doc(inline)]
pub(crate) use effect_invocation::EffectInvocation;
pub(crate) mod effect_invocation;

#[doc(inline)]
pub(crate) use event::Event;
pub(crate) mod event;

#[doc(inline)]
pub(crate) use state::State;
pub(crate) mod state;

#[doc(inline)]
pub(crate) use transition::Transition;
pub(crate) mod transition;

pub(crate) mod cancel;

/// State machine's event engine.
///
/// [`EventEngine`] is the core of state machines used by transitions and
/// manages current system state and handles external events.
///
/// New state is always committed before any effect invocation from the
/// transition is dispatched. Synchronous effects run in place (in the same
/// `process` call), asynchronous effects are spawned on the `runtime` and
/// events produced by them are processed when they complete.
///
/// Events are processed one at a time: the next event is taken from the queue
/// only after all invocations of the previous transition have been dispatched.
pub(crate) struct EventEngine<S, EH, EF, EI, R>
where
    EI: EffectInvocation<Effect = EF>,
    EH: EffectHandler<EI, EF>,
    EF: Effect<Invocation = EI>,
    S: State<State = S, Invocation = EI, Event = EI::Event>,
    R: Runtime,
{
    /// Effects dispatcher.
    ///
    /// Dispatcher responsible for effects invocation processing.
    effect_dispatcher: EffectDispatcher<EH, EF, EI>,

    /// Current event engine state.
    current_state: RwLock<S>,

    /// Runtime used to spawn asynchronous effects.
    runtime: R,

    /// Whether event engine still processes events or not.
    active: RwLock<bool>,

    /// Events waiting to be processed.
    pending: RwLock<VecDeque<EI::Event>>,

    /// Thread which is draining `pending` events queue.
    processor: RwLock<Option<ThreadId>>,

    /// Weak reference to the engine itself.
    ///
    /// Spawned effects hold weak reference to feed their events back without
    /// keeping engine alive.
    this: Weak<Self>,
}

impl<S, EH, EF, EI, R> EventEngine<S, EH, EF, EI, R>
where
    EI: EffectInvocation<Effect = EF> + 'static,
    EH: EffectHandler<EI, EF> + Send + Sync + 'static,
    EF: Effect<Invocation = EI> + 'static,
    S: State<State = S, Invocation = EI, Event = EI::Event> + Send + Sync + 'static,
    R: Runtime,
{
    /// Create [`EventEngine`] with initial state for state machine.
    pub fn new(handler: EH, state: S, runtime: R) -> Arc<Self> {
        Arc::new_cyclic(|this| EventEngine {
            effect_dispatcher: EffectDispatcher::new(handler),
            current_state: RwLock::new(state),
            runtime,
            active: RwLock::new(true),
            pending: RwLock::new(VecDeque::new()),
            processor: RwLock::new(None),
            this: this.clone(),
        })
    }

    /// Retrieve current engine state.
    pub fn current_state(&self) -> S {
        (*self.current_state.read()).clone()
    }

    /// Whether event engine still processes events or not.
    pub fn is_active(&self) -> bool {
        *self.active.read()
    }

    /// Number of managed effects which are still in flight.
    pub fn managed_effects_count(&self) -> usize {
        self.effect_dispatcher.managed_count()
    }

    /// Process external event.
    ///
    /// Process event passed to the system and perform required transitions to
    /// new state if required.
    ///
    /// Events raised while the calling thread is already processing (by
    /// synchronous effects or lifecycle callbacks) are queued and handled by
    /// the outer call once the current transition is dispatched. Calls from
    /// other threads wait until the processing thread releases the queue.
    pub fn process(&self, event: EI::Event) {
        if !self.is_active() {
            trace!("Engine stopped. Ignoring {} event", event.id());
            return;
        }

        self.pending.write().push_back(event);

        let current = thread::current().id();
        loop {
            {
                let mut processor = self.processor.write();
                match *processor {
                    Some(owner) if owner == current => return,
                    Some(_) => {}
                    None => {
                        *processor = Some(current);
                        break;
                    }
                }
            }

            thread::yield_now();
        }

        let outcome = catch_unwind(AssertUnwindSafe(|| self.drain()));
        *self.processor.write() = None;

        match outcome {
            Ok(None) => {}
            Ok(Some(payload)) | Err(payload) => resume_unwind(payload),
        }
    }

    /// Process queued events until the queue is empty.
    ///
    /// Returns payload of the first panic raised by effects.
    fn drain(&self) -> Option<Box<dyn Any + Send>> {
        let mut panic_payload = None;

        loop {
            let Some(event) = self.pending.write().pop_front() else {
                break;
            };

            if !self.is_active() {
                trace!("Engine stopped. Ignoring {} event", event.id());
                continue;
            }

            debug!("Processing event: {}", event.id());

            let transition = {
                let mut state = self.current_state.write();
                let Some(transition) = state.transition(&event) else {
                    trace!("No transition for {} event", event.id());
                    continue;
                };

                if let Some(target) = &transition.state {
                    *state = target.clone();
                }

                transition
            };

            if let Some(payload) = self.dispatch_invocations(transition.invocations) {
                panic_payload.get_or_insert(payload);
            }
        }

        panic_payload
    }

    /// Stop event engine.
    ///
    /// Engine stops processing new events and cancels all managed effects.
    pub fn stop(&self) {
        {
            let mut active = self.active.write();
            if !*active {
                return;
            }
            *active = false;
        }

        debug!("Stopping event engine");
        self.effect_dispatcher.cancel_all();
    }

    /// Dispatch effect invocations in order.
    ///
    /// A panic raised by an effect is returned only after the rest of the
    /// invocations have been dispatched, so the committed state always gets
    /// its timers.
    fn dispatch_invocations(&self, invocations: Vec<EI>) -> Option<Box<dyn Any + Send>> {
        let mut panic_payload = None;

        for invocation in invocations {
            if invocation.is_terminating() {
                self.stop();
                break;
            }

            let Some(effect) = self.effect_dispatcher.dispatch(&invocation) else {
                continue;
            };

            if let Err(payload) = catch_unwind(AssertUnwindSafe(|| self.run_effect(effect))) {
                warn!("Effect for {} invocation panicked", invocation.id());
                panic_payload.get_or_insert(payload);
            }
        }

        panic_payload
    }

    /// Run effect created by dispatcher.
    fn run_effect(&self, effect: Arc<EF>) {
        match effect.run() {
            EffectExecution::Sync(f) => match f() {
                Ok(events) => events.into_iter().for_each(|event| self.process(event)),
                Err(error) => warn!("Effect {} failed: {error}", effect.id()),
            },
            execution => {
                let engine = self.this.clone();
                let effect_id = effect.id();

                self.runtime.spawn(async move {
                    let result = execution.execute_async().await;
                    let Some(engine) = engine.upgrade() else {
                        return;
                    };
                    engine.effect_dispatcher.remove_managed_effect(&effect_id);

                    match result {
                        Ok(events) => events.into_iter().for_each(|event| engine.process(event)),
                        Err(error) => debug!("Effect {effect_id} completed without events: {error}"),
                    }
                });
            }
        }
    }
}
