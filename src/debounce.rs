// src/debounce.rs

//! Debounce engine: run an operation only after calls stop arriving for
//! a quiet window. Every call supersedes the key's pending fire, so only
//! the last call of an uninterrupted burst ever runs.

// dependencies
use crate::clock::Clock;
use crate::context::{ExecutionHandle, Operation};
use crate::pacer::Pacer;
use crate::registry::ScheduledTask;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Options for debouncing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceOptions {
    /// Fire once after the burst ends (trailing edge only).
    #[default]
    Default,
    /// Additionally run the operation immediately on the first call of a
    /// fresh burst (leading edge). The trailing fire still happens if the
    /// burst stops, so both runs can occur.
    RunFirstImmediately,
}

/// Per-key debounce state. The pending slot doubles as the burst marker:
/// empty means the next call starts a fresh burst.
#[derive(Debug, Default)]
pub(crate) struct DebounceState {
    pub(crate) pending: Option<ScheduledTask>,
}

/// State transition for one debounce call. Cancels the superseded task,
/// installs the replacement, and reports whether the leading edge should
/// fire. Runs inside the registry's exclusive section; the actual
/// dispatch happens outside it.
pub(crate) fn plan_debounce(state: &mut DebounceState, options: DebounceOptions) -> (bool, ScheduledTask) {
    let fresh_burst = state.pending.is_none();
    let immediate = options == DebounceOptions::RunFirstImmediately && fresh_burst;

    if let Some(old) = state.pending.take() {
        old.cancel();
    }
    let task = ScheduledTask::new();
    state.pending = Some(task.clone());

    (immediate, task)
}

impl<C: Clock> Pacer<C> {
    /// Debounce `operation` under `key`: it runs once `duration` elapses
    /// with no further call for the same key. With
    /// [`DebounceOptions::RunFirstImmediately`] the first call of a burst
    /// also runs up front.
    ///
    /// Must be called within a tokio runtime.
    pub fn debounce(
        &self,
        duration: Duration,
        key: &str,
        options: DebounceOptions,
        context: &ExecutionHandle,
        operation: impl Fn() + Send + Sync + 'static,
    ) {
        let operation: Operation = Arc::new(operation);
        let key = self.inner().scope_key(key);
        debug!(key = %key, ?options, "debounce call");

        let (immediate, task) = self
            .inner()
            .registry
            .with_key(&key, |state| plan_debounce(&mut state.debounce, options));

        if immediate {
            self.inner().dispatch(context, &operation);
        }
        self.spawn_trailing_fire(duration, key, task, context.clone(), operation);
    }

    /// Spawn the wait-then-fire task for a pending trailing execution.
    /// Shared with the throttle engine's `LastGuaranteed` path.
    pub(crate) fn spawn_trailing_fire(
        &self,
        duration: Duration,
        key: String,
        task: ScheduledTask,
        context: ExecutionHandle,
        operation: Operation,
    ) {
        let inner = Arc::clone(self.inner());
        tokio::spawn(async move {
            inner.clock.sleep(duration).await;

            // Re-check under the key's exclusive section: a newer call may
            // have superseded this task between waking and locking.
            let fire = inner.registry.with_key(&key, |state| {
                if task.is_cancelled() {
                    return false;
                }
                if state
                    .debounce
                    .pending
                    .as_ref()
                    .is_some_and(|current| current.same_task(&task))
                {
                    state.debounce.pending = None;
                }
                true
            });

            if fire {
                inner.dispatch(&context, &operation);
            } else {
                trace!(key = %key, "debounced fire superseded, skipping");
            }
        });
    }
}
