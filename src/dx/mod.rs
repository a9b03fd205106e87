//! # Transition Developer Experience
//!
//! This module provides the structures and methods used to drive mount /
//! unmount transitions of visual elements.

#[doc(inline)]
pub use transition::{
    AttachmentPoint, AttachmentSlot, DurationToken, LifecycleHooks, MotionTokens, Phase,
    Transition, TransitionOptions, TransitionOptionsBuilder, TransitionSnapshot,
    TransitionStatus, TransitionTimeout,
};
pub mod transition;
