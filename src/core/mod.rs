//! # Transition Core
//!
//! Core functionality of the transition engine.
//!
//! The `core` module contains the generic event engine, runtime abstraction,
//! error types and data stream used by [`Transition`].
//!
//! [`Transition`]: crate::Transition

#[doc(inline)]
pub use error::TransitionError;
pub mod error;

#[doc(inline)]
pub use runtime::Runtime;
pub mod runtime;

#[doc(inline)]
pub use data_stream::DataStream;
pub mod data_stream;

pub(crate) mod event_engine;
