//! # Transition module.
//!
//! This module contains the [`Transition`] type, which drives the
//! `exited -> entering -> entered -> exiting -> exited` lifecycle of a single
//! visual element.
//!
//! The consumer feeds desired visibility with [`Transition::observe`], reports
//! render tree presence with [`Transition::confirm_presence`],
//! [`Transition::presence_lost`] and [`Transition::confirm_removed`], and maps
//! returned [`TransitionSnapshot`] onto presentational attributes.

use futures::FutureExt;
use log::debug;
use spin::RwLock;
use std::{
    fmt::{Debug, Formatter, Result},
    sync::Arc,
};

use crate::core::{DataStream, Runtime};

#[doc(inline)]
pub use builders::{TransitionOptions, TransitionOptionsBuilder};
pub mod builders;

#[doc(inline)]
pub use tokens::{DurationToken, MotionTokens};
pub mod tokens;

#[doc(inline)]
pub use types::{
    parse_duration, AttachmentPoint, AttachmentSlot, LifecycleCallback, LifecycleHook,
    LifecycleHooks, Phase, TransitionSnapshot, TransitionStatus, TransitionTimeout, MAX_TIMEOUT,
};
pub mod types;

use event_engine::{
    effects::WaitEffectExecutor, TransitionEffectHandler, TransitionEvent, TransitionEventEngine,
    TransitionState,
};
pub(crate) mod event_engine;

/// Mount / unmount transition of a single element.
///
/// State changes are committed before any lifecycle callback is called, so a
/// panicking callback propagates to the caller of the tick which triggered it
/// without corrupting transition state.
///
/// Dropping the transition cancels pending phase timers: no lifecycle
/// callbacks are called afterwards.
///
/// # Example
/// ```no_run
/// use mount_transition::{RuntimeTokio, Transition, TransitionOptions, TransitionStatus};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), mount_transition::core::TransitionError> {
/// let options = TransitionOptions::builder()
///     .timeout(200)
///     .unmount(true)
///     .on_entered(|| println!("spinner shown"))
///     .build()?;
/// let transition = Transition::new(false, options, RuntimeTokio);
///
/// transition.observe(true);
/// transition.confirm_presence();
/// assert_eq!(transition.status(), TransitionStatus::Entering);
/// # Ok(())
/// # }
/// ```
pub struct Transition<R>
where
    R: Runtime,
{
    /// Transition state machine.
    engine: Arc<TransitionEventEngine<R>>,

    /// Options used by phases started from now on.
    options: Arc<RwLock<TransitionOptions>>,

    /// Slot for the bound element.
    attachment: AttachmentSlot,

    /// Snapshots stream (created on first request).
    stream: Arc<RwLock<Option<DataStream<TransitionSnapshot>>>>,
}

impl<R> Transition<R>
where
    R: Runtime,
{
    /// Create transition and perform the first observation.
    ///
    /// With `initial` option set, an element shown on first observation is
    /// reported as mounted and starts its `enter` phase once
    /// [`Transition::confirm_presence`] is called, so the element can be bound
    /// to the [`Transition::attachment`] slot before the first reflow.
    ///
    /// Without `initial` option the transition starts `entered`. A hidden
    /// element then starts its `exit` phase right away.
    pub fn new(shown: bool, options: TransitionOptions, runtime: R) -> Self {
        let state = TransitionState::initial(shown, options.initial, options.unmount);
        let exit_first_mount = !shown && !options.initial;
        let options = Arc::new(RwLock::new(options));
        let attachment = AttachmentSlot::default();
        let stream = Arc::new(RwLock::new(None));

        let wait_runtime = runtime.clone();
        let wait_call: Arc<WaitEffectExecutor> = Arc::new(move |delay| {
            let runtime = wait_runtime.clone();
            async move { runtime.sleep(delay).await }.boxed()
        });

        let handler = TransitionEffectHandler::new(
            options.clone(),
            attachment.clone(),
            stream.clone(),
            wait_call,
        );

        debug!("Creating transition in {} state", state.status());
        let engine = TransitionEventEngine::new(handler, state, runtime);

        if exit_first_mount {
            engine.process(TransitionEvent::DesiredChanged { visible: false });
        }

        Self {
            engine,
            options,
            attachment,
            stream,
        }
    }

    /// Feed desired visibility.
    ///
    /// Observing unchanged value is a no-op. Change of visibility in the middle
    /// of a phase cancels its timer and starts the opposite phase at once.
    pub fn observe(&self, shown: bool) -> TransitionSnapshot {
        self.engine
            .process(TransitionEvent::DesiredChanged { visible: shown });

        self.snapshot()
    }

    /// Replace transition options.
    ///
    /// New durations and callbacks apply to phases started afterwards, an
    /// in-flight phase keeps its timer.
    pub fn configure(&self, options: TransitionOptions) {
        *self.options.write() = options;
    }

    /// Current transition options.
    pub fn options(&self) -> TransitionOptions {
        self.options.read().clone()
    }

    /// Report that the element has been committed to the render tree.
    ///
    /// Starts a pending `enter` phase of an element which has been shown while
    /// unmounted (including the first mount of a shown element).
    pub fn confirm_presence(&self) {
        self.engine.process(TransitionEvent::PresenceConfirmed);
    }

    /// Report that the element has been taken out of the render tree by
    /// someone else.
    ///
    /// A shown element starts its `exit` phase, and is signalled removal-safe
    /// once it completes.
    pub fn presence_lost(&self) {
        self.engine.process(TransitionEvent::PresenceLost);
    }

    /// Report that the exited element has been removed from the render tree.
    ///
    /// With `unmount` option the element is treated as removed as soon as it
    /// is signalled removal-safe.
    pub fn confirm_removed(&self) {
        self.engine.process(TransitionEvent::Removed);
    }

    /// Slot which should be bound to the rendered element.
    pub fn attachment(&self) -> AttachmentSlot {
        self.attachment.clone()
    }

    /// Current transition state as seen by the consumer.
    pub fn snapshot(&self) -> TransitionSnapshot {
        self.engine
            .current_state()
            .snapshot(self.options.read().unmount)
    }

    /// Current transition status.
    pub fn status(&self) -> TransitionStatus {
        self.engine.current_state().status()
    }

    /// Whether "visible" presentational state should be applied.
    pub fn is_visible(&self) -> bool {
        self.snapshot().visible
    }

    /// Whether element should be part of the render tree.
    pub fn is_mounted(&self) -> bool {
        self.snapshot().mounted
    }

    /// Whether phase timer is running.
    pub fn has_pending_timer(&self) -> bool {
        self.engine.managed_effects_count() > 0
    }

    /// Stream of committed transition states.
    ///
    /// All calls share the same stream, which ends when the transition is
    /// dropped.
    pub fn stream(&self) -> DataStream<TransitionSnapshot> {
        self.stream
            .write()
            .get_or_insert_with(DataStream::new)
            .clone()
    }
}

impl<R> Debug for Transition<R>
where
    R: Runtime,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "Transition {{ state: {:?}, options: {:?}, attachment: {:?} }}",
            self.engine.current_state(),
            &*self.options.read(),
            self.attachment
        )
    }
}

impl<R> Drop for Transition<R>
where
    R: Runtime,
{
    fn drop(&mut self) {
        debug!("Dropping transition");
        self.engine.process(TransitionEvent::Unobserved);

        if let Some(stream) = self.stream.write().take() {
            stream.invalidate();
        }
    }
}
