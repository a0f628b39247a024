// src/pacer.rs

// pacer: keyed debounce, throttle, and delay primitives.

// dependencies
use crate::clock::{Clock, TokioClock};
use crate::config::PacerConfig;
use crate::context::{ExecutionHandle, Operation};
use crate::errors::PacerError;
use crate::registry::{KeyRegistry, ScheduledTask};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{error, warn};

/// The main Pacer model: a constructed scheduler instance holding the
/// key registry, the clock, and the delay slot. No hidden global state —
/// two Pacers never interact, and a fresh instance per test is
/// deterministic.
///
/// C is the clock type, defaulting to [`TokioClock`]. Cloning is cheap
/// and clones share the same registry.
#[derive(Debug)]
pub struct Pacer<C = TokioClock>
where
    C: Clock,
{
    inner: Arc<PacerInner<C>>,
}

impl<C: Clock> Clone for Pacer<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[derive(Debug)]
pub(crate) struct PacerInner<C: Clock> {
    pub(crate) config: PacerConfig,
    pub(crate) registry: KeyRegistry,
    pub(crate) delay_slot: Mutex<Option<ScheduledTask>>,
    pub(crate) clock: C,
}

impl Pacer<TokioClock> {
    /// Create a pacer with default configuration and the tokio clock.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(PacerInner {
                config: PacerConfig::new(),
                registry: KeyRegistry::new(),
                delay_slot: Mutex::new(None),
                clock: TokioClock::new(),
            }),
        }
    }
}

impl Default for Pacer<TokioClock> {
    fn default() -> Self {
        Self::new()
    }
}

// methods for the Pacer type; the engine operations live in the
// debounce, throttle, and delay modules
impl<C: Clock> Pacer<C> {
    /// Create a pacer from a config object and a clock.
    pub fn with_config(config: PacerConfig, clock: C) -> Result<Self, PacerError> {
        config.validate()?;
        Ok(Self {
            inner: Arc::new(PacerInner {
                config,
                registry: KeyRegistry::new(),
                delay_slot: Mutex::new(None),
                clock,
            }),
        })
    }

    pub(crate) fn inner(&self) -> &Arc<PacerInner<C>> {
        &self.inner
    }
}

impl<C: Clock> PacerInner<C> {
    /// Resolve an empty key to the configured deterministic default.
    pub(crate) fn scope_key(&self, key: &str) -> String {
        if key.is_empty() {
            self.config.default_key.clone()
        } else {
            key.to_string()
        }
    }

    /// Hand an operation to the execution context. Never called while a
    /// registry guard is held. A failed hop is reported and, when
    /// configured, falls back to running the operation inline.
    pub(crate) fn dispatch(&self, context: &ExecutionHandle, operation: &Operation) {
        let job_operation = Arc::clone(operation);
        if let Err(err) = context.dispatch(Box::new(move || job_operation())) {
            if self.config.inline_fallback {
                warn!(error = %err, "execution context unavailable, running operation inline");
                operation();
            } else {
                error!(error = %err, "execution context unavailable, operation dropped");
            }
        }
    }
}

/// Lock the delay slot, recovering the guard if a panicking task
/// poisoned it.
pub(crate) fn lock_delay_slot(
    slot: &Mutex<Option<ScheduledTask>>,
) -> MutexGuard<'_, Option<ScheduledTask>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
