// src/throttle.rs

//! Throttle engine: run an operation at most once per window, with
//! leading-edge and last-call-guaranteed variants. Window comparisons use
//! monotonic elapsed time, never wall-clock subtraction.

// dependencies
use crate::clock::Clock;
use crate::context::{ExecutionHandle, Operation};
use crate::debounce::{DebounceOptions, plan_debounce};
use crate::pacer::Pacer;
use crate::registry::{KeyState, ScheduledTask};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Options for throttling an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrottleOptions {
    /// Accept at most one call per window; the accepted call fires at the
    /// end of its window. Calls inside an active window are dropped.
    #[default]
    Default,
    /// Additionally run the operation immediately when a window opens,
    /// independent of the windowed fire.
    RunFirstImmediately,
    /// Additionally guarantee the last call of a burst fires once after
    /// the window, via the debounce engine. May cause a second firing.
    LastGuaranteed,
    /// Union of `RunFirstImmediately` and `LastGuaranteed`.
    Combined,
}

impl ThrottleOptions {
    fn leading(self) -> bool {
        matches!(self, Self::RunFirstImmediately | Self::Combined)
    }

    fn trailing(self) -> bool {
        matches!(self, Self::LastGuaranteed | Self::Combined)
    }
}

/// Per-key throttle state: monotonic start of the active window, if any.
/// Cleared when the windowed fire completes.
#[derive(Debug, Default)]
pub(crate) struct ThrottleState {
    pub(crate) window_start: Option<u64>,
}

/// Outcome of one throttle call, decided under the key's exclusive
/// section and acted on outside it.
#[derive(Debug)]
pub(crate) struct ThrottlePlan {
    pub(crate) immediate: bool,
    pub(crate) accepted: bool,
    pub(crate) trailing: Option<ScheduledTask>,
}

/// State transition for one throttle call at monotonic time `now`.
/// A call is accepted when no window is active or the last accepted start
/// is at least `window_nanos` ago; acceptance opens a new window. The
/// trailing variant routes through the debounce state of the same key,
/// superseding any pending trailing fire.
pub(crate) fn plan_throttle(
    state: &mut KeyState,
    now: u64,
    window_nanos: u64,
    options: ThrottleOptions,
) -> ThrottlePlan {
    let immediate = options.leading() && state.throttle.window_start.is_none();

    let accepted = state
        .throttle
        .window_start
        .is_none_or(|start| now.saturating_sub(start) >= window_nanos);
    if accepted {
        state.throttle.window_start = Some(now);
    }

    let trailing = options
        .trailing()
        .then(|| plan_debounce(&mut state.debounce, DebounceOptions::Default).1);

    ThrottlePlan {
        immediate,
        accepted,
        trailing,
    }
}

impl<C: Clock> Pacer<C> {
    /// Throttle `operation` under `key`: at most one accepted execution
    /// per `duration`, firing at the end of its window. See
    /// [`ThrottleOptions`] for the leading-edge and last-guaranteed
    /// variants.
    ///
    /// Must be called within a tokio runtime.
    pub fn throttle(
        &self,
        duration: Duration,
        key: &str,
        options: ThrottleOptions,
        context: &ExecutionHandle,
        operation: impl Fn() + Send + Sync + 'static,
    ) {
        let operation: Operation = Arc::new(operation);
        let key = self.inner().scope_key(key);
        let now = self.inner().clock.now();
        let window_nanos = duration.as_nanos() as u64;

        let plan = self
            .inner()
            .registry
            .with_key(&key, |state| plan_throttle(state, now, window_nanos, options));
        debug!(key = %key, ?options, accepted = plan.accepted, "throttle call");

        if plan.immediate {
            self.inner().dispatch(context, &operation);
        }
        if plan.accepted {
            self.spawn_window_fire(duration, key.clone(), now, context.clone(), operation.clone());
        }
        if let Some(task) = plan.trailing {
            self.spawn_trailing_fire(duration, key, task, context.clone(), operation);
        }
    }

    /// Spawn the wait-then-fire task for an accepted window. Windowed
    /// fires are never superseded, so there is no cancellation check; the
    /// task clears the window marker it opened once the fire is done.
    fn spawn_window_fire(
        &self,
        duration: Duration,
        key: String,
        window_start: u64,
        context: ExecutionHandle,
        operation: Operation,
    ) {
        let inner = Arc::clone(self.inner());
        tokio::spawn(async move {
            inner.clock.sleep(duration).await;
            inner.dispatch(&context, &operation);
            inner.registry.with_key(&key, |state| {
                if state.throttle.window_start == Some(window_start) {
                    state.throttle.window_start = None;
                }
            });
        });
    }
}
