//! # Transition Event Engine module

use crate::core::event_engine::EventEngine;

#[doc(inline)]
pub(crate) use effects::TransitionEffect;
pub(crate) mod effects;

#[doc(inline)]
pub(crate) use effect_handler::TransitionEffectHandler;
pub(crate) mod effect_handler;

#[doc(inline)]
pub(crate) use invocation::TransitionEffectInvocation;
pub(crate) mod invocation;

#[doc(inline)]
pub(crate) use event::TransitionEvent;
pub(crate) mod event;

#[doc(inline)]
pub(crate) use state::TransitionState;
pub(crate) mod state;

pub(crate) type TransitionEventEngine<R> = EventEngine<
    TransitionState,
    TransitionEffectHandler,
    TransitionEffect,
    TransitionEffectInvocation,
    R,
>;
