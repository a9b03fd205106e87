//! # Transition options module.
//!
//! The [`TransitionOptionsBuilder`] lets you configure phase durations,
//! first-mount behaviour, unmounting and lifecycle callbacks of a
//! [`Transition`].
//!
//! [`Transition`]: crate::Transition

use derive_builder::Builder;
use std::sync::Arc;

use crate::{
    core::TransitionError,
    dx::transition::{LifecycleHooks, TransitionTimeout, MAX_TIMEOUT},
};

/// Transition configuration.
///
/// Options can be replaced at any time with [`Transition::configure`]; the new
/// values apply to phases started afterwards.
///
/// # Example
/// ```
/// use mount_transition::TransitionOptionsBuilder;
///
/// let options = TransitionOptionsBuilder::default()
///     .split_timeout(100, 400)
///     .unmount(true)
///     .on_exited(|| println!("menu closed"))
///     .build()
///     .unwrap();
///
/// assert_eq!(options.timeout.exit(), 400);
/// ```
///
/// [`Transition::configure`]: crate::Transition::configure
#[derive(Builder, Clone, Debug)]
#[builder(
    pattern = "owned",
    derive(Debug),
    build_fn(private, name = "build_internal", validate = "Self::validate")
)]
pub struct TransitionOptions {
    /// Phase durations in milliseconds.
    ///
    /// By default it is set to **0** which completes phases on the next
    /// scheduling tick.
    #[builder(setter(custom), default)]
    pub timeout: TransitionTimeout,

    /// Whether first observation of a shown element should animate.
    ///
    /// When `false`, an element shown on first observation starts directly in
    /// `entered` without running the `enter` phase.
    ///
    /// By default it is set to **true**.
    #[builder(default = "true")]
    pub initial: bool,

    /// Whether element should be removed from the render tree once exited.
    ///
    /// By default it is set to **false**, and the element is expected to stay
    /// structurally present while only its visual state changes.
    #[builder(default)]
    pub unmount: bool,

    /// Lifecycle callbacks.
    #[builder(setter(custom), default)]
    pub hooks: LifecycleHooks,
}

impl TransitionOptions {
    /// Create options builder.
    pub fn builder() -> TransitionOptionsBuilder {
        TransitionOptionsBuilder::default()
    }
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            timeout: TransitionTimeout::default(),
            initial: true,
            unmount: false,
            hooks: LifecycleHooks::default(),
        }
    }
}

impl TransitionOptionsBuilder {
    /// Validate user-provided data for options builder.
    fn validate(&self) -> Result<(), String> {
        match self.timeout {
            Some(timeout) if timeout.enter() > MAX_TIMEOUT || timeout.exit() > MAX_TIMEOUT => {
                Err(format!("Timeout can't exceed {MAX_TIMEOUT}ms"))
            }
            _ => Ok(()),
        }
    }

    /// Build [`TransitionOptions`] from builder.
    pub fn build(self) -> Result<TransitionOptions, TransitionError> {
        self.build_internal()
            .map_err(|err| TransitionError::Configuration {
                details: err.to_string(),
            })
    }

    /// Same duration (in milliseconds) for `enter` and `exit` phases.
    pub fn timeout(mut self, timeout: u64) -> Self {
        self.timeout = Some(TransitionTimeout::Symmetric(timeout));
        self
    }

    /// Independent `enter` and `exit` phase durations (in milliseconds).
    pub fn split_timeout(mut self, enter: u64, exit: u64) -> Self {
        self.timeout = Some(TransitionTimeout::Split { enter, exit });
        self
    }

    /// Phase durations from already prepared [`TransitionTimeout`].
    pub fn with_timeout(mut self, timeout: TransitionTimeout) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replace all lifecycle callbacks.
    pub fn hooks(mut self, hooks: LifecycleHooks) -> Self {
        self.hooks = Some(hooks);
        self
    }

    /// Callback called when `enter` phase starts.
    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks_mut().on_enter = Some(Arc::new(callback));
        self
    }

    /// Callback called when `enter` phase completes.
    pub fn on_entered<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks_mut().on_entered = Some(Arc::new(callback));
        self
    }

    /// Callback called when `exit` phase starts.
    pub fn on_exit<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks_mut().on_exit = Some(Arc::new(callback));
        self
    }

    /// Callback called when `exit` phase completes.
    pub fn on_exited<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks_mut().on_exited = Some(Arc::new(callback));
        self
    }

    /// Callback called when exited element can be removed from the render
    /// tree.
    pub fn on_removal_safe<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.hooks_mut().on_removal_safe = Some(Arc::new(callback));
        self
    }

    fn hooks_mut(&mut self) -> &mut LifecycleHooks {
        self.hooks.get_or_insert_with(LifecycleHooks::default)
    }
}
