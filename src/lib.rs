//! # Mount Transition
//!
//! Presence / lifecycle state machine which drives `enter` and `exit`
//! animation timing of a visual element, and decouples "is this element
//! logically visible" from "is this element currently in the render tree".
//!
//! - Four-state lifecycle: `exited`, `entering`, `entered`, `exiting`.
//! - Cancellable phase timers: a visibility change always wins over an
//!   in-flight timer.
//! - Presence handshake for elements which are removed once exited.
//! - Bring your own [`Runtime`](core::Runtime), or use [`RuntimeTokio`].
//!
//! ## Features
//!
//! * `tokio` (default) - [`RuntimeTokio`] runtime provider.
//! * `serde` (default) - [`MotionTokens`] loading from JSON.
//! * `full` - all of the above.
//!
//! ## Example
//!
//! ```no_run
//! use mount_transition::{RuntimeTokio, Transition, TransitionOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), mount_transition::core::TransitionError> {
//! let options = TransitionOptions::builder()
//!     .split_timeout(100, 400)
//!     .on_exited(|| println!("menu closed"))
//!     .build()?;
//! let menu = Transition::new(false, options, RuntimeTokio);
//!
//! let snapshot = menu.observe(true);
//! println!("menu is {} (visible: {})", snapshot.status, snapshot.visible);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![forbid(unsafe_code)]

#[doc(inline)]
pub use dx::{
    AttachmentPoint, AttachmentSlot, DurationToken, LifecycleHooks, MotionTokens, Phase,
    Transition, TransitionOptions, TransitionOptionsBuilder, TransitionSnapshot,
    TransitionStatus, TransitionTimeout,
};
pub mod dx;

pub mod core;

#[cfg(feature = "tokio")]
#[doc(inline)]
pub use providers::futures_tokio::RuntimeTokio;
pub mod providers;
