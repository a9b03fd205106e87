//! # Transition types module.
//!
//! This module contains the public value types used by [`Transition`]:
//! status, timeouts, snapshots, lifecycle hooks and the attachment point
//! binding.
//!
//! [`Transition`]: crate::Transition

use spin::RwLock;
use std::{
    fmt::{Debug, Display, Formatter, Result as FmtResult},
    str::FromStr,
    sync::Arc,
};

use crate::core::TransitionError;

/// Largest timeout (in milliseconds) accepted for a transition phase.
///
/// Matches the signed 32-bit limit of host timer primitives.
pub const MAX_TIMEOUT: u64 = 2_147_483_647;

/// Transition status.
///
/// Four-valued lifecycle status of the transitioned element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionStatus {
    /// Element enter animation in progress.
    Entering,

    /// Element completely entered.
    Entered,

    /// Element exit animation in progress.
    Exiting,

    /// Element completely exited.
    Exited,
}

impl TransitionStatus {
    /// Status name as used in presentational attributes (for example
    /// `data-status="entering"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entering => "entering",
            Self::Entered => "entered",
            Self::Exiting => "exiting",
            Self::Exited => "exited",
        }
    }
}

impl Display for TransitionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Timed transition phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// `entering` to `entered` segment.
    Enter,

    /// `exiting` to `exited` segment.
    Exit,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Enter => write!(f, "enter"),
            Self::Exit => write!(f, "exit"),
        }
    }
}

/// Phase duration configuration.
///
/// Either a single duration (in milliseconds) applied to both phases, or a
/// pair of independent `enter` and `exit` durations.
///
/// # Example
/// ```
/// use mount_transition::TransitionTimeout;
///
/// let timeout: TransitionTimeout = "100ms/0.4s".parse().unwrap();
///
/// assert_eq!(timeout.enter(), 100);
/// assert_eq!(timeout.exit(), 400);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionTimeout {
    /// Same duration for `enter` and `exit` phases.
    Symmetric(u64),

    /// Independent durations for `enter` and `exit` phases.
    Split {
        /// `enter` phase duration.
        enter: u64,

        /// `exit` phase duration.
        exit: u64,
    },
}

impl TransitionTimeout {
    /// `enter` phase duration in milliseconds.
    pub fn enter(&self) -> u64 {
        match self {
            Self::Symmetric(timeout) => *timeout,
            Self::Split { enter, .. } => *enter,
        }
    }

    /// `exit` phase duration in milliseconds.
    pub fn exit(&self) -> u64 {
        match self {
            Self::Symmetric(timeout) => *timeout,
            Self::Split { exit, .. } => *exit,
        }
    }

    /// Duration of specified `phase` in milliseconds.
    pub fn for_phase(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Enter => self.enter(),
            Phase::Exit => self.exit(),
        }
    }
}

impl Default for TransitionTimeout {
    fn default() -> Self {
        Self::Symmetric(0)
    }
}

impl From<u64> for TransitionTimeout {
    fn from(value: u64) -> Self {
        Self::Symmetric(value)
    }
}

impl From<(u64, u64)> for TransitionTimeout {
    fn from((enter, exit): (u64, u64)) -> Self {
        Self::Split { enter, exit }
    }
}

impl FromStr for TransitionTimeout {
    type Err = TransitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once('/') {
            Some((enter, exit)) => Ok(Self::Split {
                enter: parse_duration(enter)?,
                exit: parse_duration(exit)?,
            }),
            None => parse_duration(value).map(Self::Symmetric),
        }
    }
}

/// Parse CSS-like duration into milliseconds.
///
/// Accepts `"300ms"`, `"0.3s"` and bare millisecond numbers (`"300"`).
/// Fractional milliseconds are rounded to the nearest integer.
pub fn parse_duration(value: &str) -> Result<u64, TransitionError> {
    let trimmed = value.trim();
    let (number, multiplier) = if let Some(number) = trimmed.strip_suffix("ms") {
        (number, 1.0)
    } else if let Some(number) = trimmed.strip_suffix('s') {
        (number, 1000.0)
    } else {
        (trimmed, 1.0)
    };

    let millis = number
        .trim()
        .parse::<f64>()
        .map(|number| (number * multiplier).round())
        .map_err(|_| TransitionError::InvalidDuration {
            details: format!("'{value}' is not a duration"),
        })?;

    if !millis.is_finite() || millis < 0.0 || millis > MAX_TIMEOUT as f64 {
        return Err(TransitionError::InvalidDuration {
            details: format!("'{value}' is out of 0..={MAX_TIMEOUT}ms range"),
        });
    }

    Ok(millis as u64)
}

/// Current transition state as seen by the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionSnapshot {
    /// Current transition status.
    pub status: TransitionStatus,

    /// Whether "visible" presentational state should be applied.
    ///
    /// `true` only while `status` is `entering` or `entered`.
    pub visible: bool,

    /// Whether element should be part of the render tree.
    ///
    /// `false` once the element exited and it is safe to remove it (always
    /// `true` while the element is transitioning).
    pub mounted: bool,
}

/// Zero-argument lifecycle callback.
pub type LifecycleCallback = dyn Fn() + Send + Sync;

/// Lifecycle callback kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleHook {
    /// `enter` phase started.
    Enter,

    /// `enter` phase completed.
    Entered,

    /// `exit` phase started.
    Exit,

    /// `exit` phase completed.
    Exited,
}

impl Display for LifecycleHook {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Enter => write!(f, "on_enter"),
            Self::Entered => write!(f, "on_entered"),
            Self::Exit => write!(f, "on_exit"),
            Self::Exited => write!(f, "on_exited"),
        }
    }
}

/// Optional lifecycle callbacks.
#[derive(Clone, Default)]
pub struct LifecycleHooks {
    /// Called synchronously when `enter` phase starts.
    pub on_enter: Option<Arc<LifecycleCallback>>,

    /// Called when `enter` phase timer elapses.
    pub on_entered: Option<Arc<LifecycleCallback>>,

    /// Called synchronously when `exit` phase starts.
    pub on_exit: Option<Arc<LifecycleCallback>>,

    /// Called when `exit` phase timer elapses.
    pub on_exited: Option<Arc<LifecycleCallback>>,

    /// Called when element exited and can be removed from the render tree.
    pub on_removal_safe: Option<Arc<LifecycleCallback>>,
}

impl LifecycleHooks {
    /// Callback registered for `hook`.
    pub(crate) fn callback(&self, hook: LifecycleHook) -> Option<Arc<LifecycleCallback>> {
        match hook {
            LifecycleHook::Enter => self.on_enter.clone(),
            LifecycleHook::Entered => self.on_entered.clone(),
            LifecycleHook::Exit => self.on_exit.clone(),
            LifecycleHook::Exited => self.on_exited.clone(),
        }
    }
}

impl Debug for LifecycleHooks {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "LifecycleHooks {{ on_enter: {}, on_entered: {}, on_exit: {}, on_exited: {}, \
            on_removal_safe: {} }}",
            self.on_enter.is_some(),
            self.on_entered.is_some(),
            self.on_exit.is_some(),
            self.on_exited.is_some(),
            self.on_removal_safe.is_some()
        )
    }
}

/// Physical element binding.
///
/// Implemented by the consumer for the rendered element. Before each phase
/// starts the engine asks the element to synchronously apply its pending
/// "from" style, so that the "to" style applied afterwards animates instead
/// of being coalesced into a single jump.
pub trait AttachmentPoint: Send + Sync {
    /// Force synchronous layout / style flush.
    fn force_layout(&self);
}

/// Attachment point slot.
///
/// Shared reference cell which the consumer binds to the physical element.
/// Unbound slot makes the layout flush a no-op.
#[derive(Clone, Default)]
pub struct AttachmentSlot {
    target: Arc<RwLock<Option<Arc<dyn AttachmentPoint>>>>,
}

impl AttachmentSlot {
    /// Bind `target` element.
    pub fn bind<T>(&self, target: T)
    where
        T: AttachmentPoint + 'static,
    {
        self.bind_shared(Arc::new(target));
    }

    /// Bind shared `target` element.
    pub fn bind_shared(&self, target: Arc<dyn AttachmentPoint>) {
        *self.target.write() = Some(target);
    }

    /// Unbind currently bound element.
    pub fn unbind(&self) {
        self.target.write().take();
    }

    /// Whether element is bound or not.
    pub fn is_bound(&self) -> bool {
        self.target.read().is_some()
    }

    /// Force layout of the bound element.
    ///
    /// Returns `false` when no element is bound.
    pub(crate) fn force_layout(&self) -> bool {
        let target = self.target.read().clone();

        target.map(|target| target.force_layout()).is_some()
    }
}

impl Debug for AttachmentSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "AttachmentSlot {{ bound: {} }}", self.is_bound())
    }
}
