// src/registry.rs

//! Keyed registry of in-flight scheduling state.
//!
//! All per-key state transitions run inside [`KeyRegistry::with_key`],
//! which holds the key's entry guard for the duration of the closure.
//! That guard is the exclusive section the engines rely on: at most one
//! in-flight mutation per key, no observable partial updates. Closures
//! must stay O(1) and must never invoke the caller's operation or wait
//! on anything while the guard is held.

// dependencies
use crate::debounce::DebounceState;
use crate::throttle::ThrottleState;
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Scheduling state for one key. Created on first use, retained for the
/// life of the registry (the key space is assumed bounded).
#[derive(Debug, Default)]
pub(crate) struct KeyState {
    pub(crate) debounce: DebounceState,
    pub(crate) throttle: ThrottleState,
}

/// Registry mapping keys to their live scheduling state.
#[derive(Debug, Default)]
pub(crate) struct KeyRegistry {
    entries: DashMap<String, KeyState>,
}

impl KeyRegistry {
    pub(crate) fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Run `mutate` against the state for `key`, creating default state on
    /// first use, under mutual exclusion with every other access to the
    /// same key.
    pub(crate) fn with_key<R>(&self, key: &str, mutate: impl FnOnce(&mut KeyState) -> R) -> R {
        let mut entry = self.entries.entry(key.to_string()).or_default();
        mutate(entry.value_mut())
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Cancellable handle to one pending wait-then-fire computation.
///
/// The handle stored in the registry and the clone captured by the
/// spawned task share a single flag. Cancellation is cooperative: the
/// task checks the flag after waking, inside the exclusive section,
/// and returns without firing when it is set.
#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    cancelled: Arc<AtomicBool>,
}

impl ScheduledTask {
    pub(crate) fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// True when `other` is a clone of this handle, i.e. the same pending
    /// computation. Lets a fired task clear only its own slot.
    pub(crate) fn same_task(&self, other: &ScheduledTask) -> bool {
        Arc::ptr_eq(&self.cancelled, &other.cancelled)
    }
}
