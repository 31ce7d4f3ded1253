use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender};
use futures::channel::oneshot;
use tracing::{debug, error};

use crate::adapter::{execute, Payload};
use crate::args::CallArgs;
use crate::catalog::OperationSpec;
use crate::error::{BridgeError, BridgeResult};
use crate::native::NativeModule;

/// A queued call. Owns its argument memory until the call completes.
pub(crate) struct Job {
    module: Arc<dyn NativeModule>,
    spec: &'static OperationSpec,
    args: CallArgs,
}

impl Job {
    pub(crate) fn new(
        module: Arc<dyn NativeModule>,
        spec: &'static OperationSpec,
        args: CallArgs,
    ) -> Self {
        Self { module, spec, args }
    }
}

type Envelope = (Job, oneshot::Sender<BridgeResult<Payload>>);

/// Fixed set of threads draining a shared job queue.
pub(crate) struct WorkerPool {
    jobs: Option<Sender<Envelope>>,
    workers: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    pub(crate) fn spawn(count: usize) -> BridgeResult<Self> {
        let count = count.max(1);
        let (jobs, queue) = crossbeam_channel::unbounded();
        let mut pool = Self {
            jobs: Some(jobs),
            workers: Vec::with_capacity(count),
        };
        for index in 0..count {
            let queue = queue.clone();
            let handle = thread::Builder::new()
                .name(format!("bridge-worker-{index}"))
                .spawn(move || run_worker(queue))
                .map_err(|err| BridgeError::Spawn(err.to_string()))?;
            pool.workers.push(handle);
        }
        Ok(pool)
    }

    pub(crate) fn size(&self) -> usize {
        self.workers.len()
    }

    pub(crate) fn submit(&self, job: Job) -> BridgeResult<PendingCall> {
        let operation = job.spec.name;
        let (done, signal) = oneshot::channel();
        let jobs = self.jobs.as_ref().ok_or(BridgeError::Disconnected)?;
        jobs.send((job, done))
            .map_err(|_| BridgeError::Disconnected)?;
        Ok(PendingCall { operation, signal })
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // Closing the queue lets workers finish what is queued and exit.
        self.jobs.take();
        for handle in self.workers.drain(..) {
            if handle.join().is_err() {
                error!("bridge worker panicked");
            }
        }
    }
}

fn run_worker(queue: Receiver<Envelope>) {
    for (job, done) in queue.iter() {
        let Job { module, spec, args } = job;
        let outcome = execute(module.as_ref(), spec, &args);
        drop(args);
        if done.send(outcome).is_err() {
            debug!(
                operation = spec.name,
                "pending call dropped before completion; buffers already released"
            );
        }
    }
}

/// Completion signal of a queued call.
///
/// Resolves once the worker has settled the call and released both buffers.
/// Dropping it does not cancel the call.
#[must_use = "dropping a pending call discards its result"]
pub struct PendingCall {
    operation: &'static str,
    signal: oneshot::Receiver<BridgeResult<Payload>>,
}

impl PendingCall {
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Blocks the current thread until the call completes.
    pub fn wait(self) -> BridgeResult<Payload> {
        futures::executor::block_on(self)
    }
}

impl Future for PendingCall {
    type Output = BridgeResult<Payload>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.signal).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(oneshot::Canceled)) => Poll::Ready(Err(BridgeError::Disconnected)),
            Poll::Pending => Poll::Pending,
        }
    }
}
