//! # Error types
//!
//! This module contains the error types for the [`mount_transition`] crate.
//!
//! The transition engine itself never fails: errors only come from the
//! surrounding plumbing (options validation, token parsing, timer
//! cancellation pipes).
//!
//! [`mount_transition`]: ../index.html

use snafu::Snafu;

/// Transition error type.
///
/// This type is used to represent errors that can occur while configuring or
/// driving a transition.
///
/// # Examples
/// ```
/// use mount_transition::core::TransitionError;
///
/// fn foo() -> Result<(), TransitionError> {
///     Ok(())
/// }
///
/// foo().map_err(|e| match e {
///     TransitionError::InvalidDuration { .. } => println!("Bad duration"),
///     _ => println!("Other error"),
/// });
/// ```
#[derive(Snafu, Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// this error is returned when a managed effect has been cancelled
    #[snafu(display("Effect has been cancelled"))]
    EffectCanceled,

    /// this error is returned when the timer cancellation pipe is broken
    #[snafu(display("Cancellation pipe error: {details}"))]
    CancellationPipe {
        /// Reason why the cancellation pipe failed.
        details: String,
    },

    /// this error is returned when a duration value can't be parsed
    #[snafu(display("Invalid duration: {details}"))]
    InvalidDuration {
        /// Value which couldn't be parsed.
        details: String,
    },

    /// this error is returned when transition options fail validation
    #[snafu(display("Configuration error: {details}"))]
    Configuration {
        /// Validation failure message.
        details: String,
    },

    /// this error is returned when motion tokens can't be deserialized
    #[snafu(display("Deserialization error: {details}"))]
    Deserialization {
        /// Deserializer failure message.
        details: String,
    },
}
