// src/context.rs

//! Execution contexts: where a scheduled operation actually runs.
//!
//! The engines decide *when* an operation runs; an [`ExecutionContext`]
//! decides *where*. The two provided contexts mirror the common cases:
//! run on whatever task fired the timer ([`InlineContext`]), or hop to a
//! single designated worker ([`DedicatedContext`]), e.g. a UI loop.

// dependencies
use crate::errors::DispatchError;
use std::sync::Arc;
use tokio::sync::mpsc;

/// A unit of work handed to an execution context. Runs exactly once.
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// A caller-supplied operation. Engines may run it more than once
/// (leading edge plus trailing edge), so it must be `Fn`, not `FnOnce`.
pub type Operation = Arc<dyn Fn() + Send + Sync + 'static>;

/// Shared handle to an execution context.
pub type ExecutionHandle = Arc<dyn ExecutionContext>;

/// Where operations are executed once an engine decides to fire them.
///
/// `dispatch` returning `Ok` confirms the hop: the job has been accepted
/// by the target context and will run there, in dispatch order relative
/// to every other job sent to the same context.
pub trait ExecutionContext: Send + Sync + 'static {
    fn dispatch(&self, job: Job) -> Result<(), DispatchError>;
}

/// Runs jobs directly on the dispatching task.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineContext;

impl ExecutionContext for InlineContext {
    fn dispatch(&self, job: Job) -> Result<(), DispatchError> {
        job();
        Ok(())
    }
}

/// Hops jobs to one designated worker over an unbounded channel.
/// A successful send is the hop confirmation; the worker drains jobs
/// strictly in dispatch order, so cross-context ordering is preserved.
#[derive(Debug, Clone)]
pub struct DedicatedContext {
    jobs: mpsc::UnboundedSender<Job>,
}

impl DedicatedContext {
    /// Create a context whose jobs the host drains from the returned
    /// receiver, e.g. on a UI thread it owns.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Job>) {
        let (jobs, rx) = mpsc::unbounded_channel();
        (Self { jobs }, rx)
    }

    /// Create a context drained by a freshly spawned tokio task.
    /// Must be called within a tokio runtime.
    pub fn spawn() -> Self {
        let (context, mut rx) = Self::new();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job();
            }
        });
        context
    }
}

impl ExecutionContext for DedicatedContext {
    fn dispatch(&self, job: Job) -> Result<(), DispatchError> {
        self.jobs.send(job).map_err(|_| DispatchError::ContextClosed)
    }
}
