// src/lib.rs

//! # Pacer
//!
//! Keyed debounce, throttle, and delay primitives for collapsing bursty
//! calls into the few executions that should actually happen.
//!
//! ## Quick Example
//!
//! ```rust
//! use pacer::{DebounceOptions, ExecutionHandle, InlineContext, Pacer};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let pacer = Pacer::new();
//!     let context: ExecutionHandle = Arc::new(InlineContext);
//!
//!     // Fired on every keystroke; the query runs once, 250ms after the
//!     // last one.
//!     for _ in 0..100 {
//!         pacer.debounce(
//!             Duration::from_millis(250),
//!             "search",
//!             DebounceOptions::Default,
//!             &context,
//!             || println!("query submitted"),
//!         );
//!     }
//!
//!     tokio::time::sleep(Duration::from_millis(300)).await;
//! }
//! ```

// private modules
mod clock;
mod config;
mod context;
mod debounce;
mod delay;
mod errors;
mod pacer;
mod registry;
mod throttle;

// public API exports
pub use clock::{Clock, SleepFuture, TokioClock};
pub use config::PacerConfig;
pub use context::{DedicatedContext, ExecutionContext, ExecutionHandle, InlineContext, Job};
pub use debounce::DebounceOptions;
pub use errors::{DispatchError, PacerError};
pub use pacer::Pacer;
pub use throttle::ThrottleOptions;
