// src/delay.rs

//! Delay engine: run an operation once after a fixed wait. Each `Pacer`
//! owns a single delay slot; a new call cancels and replaces a previous
//! call that has not fired yet.

// dependencies
use crate::clock::Clock;
use crate::context::{ExecutionHandle, Operation};
use crate::pacer::{Pacer, lock_delay_slot};
use crate::registry::ScheduledTask;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

impl<C: Clock> Pacer<C> {
    /// Run `operation` once after `duration`.
    ///
    /// The delay slot is scoped to this `Pacer` instance: a second call
    /// on the same instance before the first fires supersedes it, while
    /// delays on different instances never interact. Callers that need
    /// several independent delayed operations on one instance should use
    /// [`Pacer::debounce`] with distinct keys instead.
    ///
    /// Must be called within a tokio runtime.
    pub fn delay(
        &self,
        duration: Duration,
        context: &ExecutionHandle,
        operation: impl Fn() + Send + Sync + 'static,
    ) {
        let operation: Operation = Arc::new(operation);
        debug!("delay call");

        let task = ScheduledTask::new();
        {
            let mut slot = lock_delay_slot(&self.inner().delay_slot);
            if let Some(old) = slot.take() {
                old.cancel();
            }
            *slot = Some(task.clone());
        }

        let inner = Arc::clone(self.inner());
        let context = context.clone();
        tokio::spawn(async move {
            inner.clock.sleep(duration).await;

            // Re-check under the slot lock: a newer delay may have
            // superseded this one between waking and locking.
            {
                let mut slot = lock_delay_slot(&inner.delay_slot);
                if task.is_cancelled() {
                    trace!("delayed fire superseded, skipping");
                    return;
                }
                if slot.as_ref().is_some_and(|current| current.same_task(&task)) {
                    *slot = None;
                }
            }

            inner.dispatch(&context, &operation);
        });
    }
}
