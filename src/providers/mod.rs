//! # Providers module
//!
//! This module contains the Providers that can be used by [`Transition`].
//!
//! [`Transition`]: crate::Transition

#[cfg(feature = "tokio")]
pub mod futures_tokio;
