// src/clock.rs

// clock module definition and implementations

// dependencies
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// Future returned by [`Clock::sleep`].
pub type SleepFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Clock trait to abstract time retrieval and timed waits.
/// Implementors must be thread-safe (Send + Sync).
/// `now` returns monotonic nanoseconds elapsed since the clock's origin;
/// it is deliberately not wall-clock time, so interval comparisons stay
/// correct across system clock adjustments.
/// `sleep` is the timed wait the engines suspend on. Cancellation is
/// cooperative: the engine checks its cancellation flag after the wait
/// completes, never during it.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> u64;
    fn sleep(&self, duration: Duration) -> SleepFuture;
}

/// TokioClock implementation backed by `tokio::time`.
/// Monotonic, with nanosecond precision. Respects tokio's paused test
/// time, so engines built on it can be tested deterministically.
/// This is the default clock used by the Pacer.
#[derive(Debug, Clone)]
pub struct TokioClock {
    origin: tokio::time::Instant,
}

impl TokioClock {
    pub fn new() -> Self {
        Self {
            origin: tokio::time::Instant::now(),
        }
    }
}

impl Clock for TokioClock {
    fn now(&self) -> u64 {
        self.origin.elapsed().as_nanos() as u64
    }

    fn sleep(&self, duration: Duration) -> SleepFuture {
        Box::pin(tokio::time::sleep(duration))
    }
}

// Make TokioClock the default
impl Default for TokioClock {
    fn default() -> Self {
        Self::new()
    }
}
