use std::sync::Arc;

use bridge_abi::{OwnedBuffer, Release, UnmanagedVector};
use tracing::{debug, warn};

use crate::args::CallArgs;
use crate::catalog::{self, NativeLibrary, OperationSpec, ResultShape};
use crate::config::BridgeConfig;
use crate::dispatch::{Job, PendingCall, WorkerPool};
use crate::error::{BridgeError, BridgeResult};
use crate::native::{DynamicModule, NativeModule};

/// Successful result of a bridged call, shaped by its catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn into_text(self) -> BridgeResult<String> {
        match self {
            Payload::Text(text) => Ok(text),
            Payload::Binary(bytes) => Err(BridgeError::protocol(format!(
                "expected a text result, got {} binary bytes",
                bytes.len()
            ))),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text(text) => text.into_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }
}

/// Entry point for every bridged operation.
///
/// Cloning is cheap; clones share the native module and the worker pool.
#[derive(Clone)]
pub struct Bridge {
    module: Arc<dyn NativeModule>,
    pool: Arc<WorkerPool>,
}

impl Bridge {
    /// Loads the platform libraries named by `config`.
    ///
    /// Fails on hosts outside the supported set and when a catalog symbol is missing.
    pub fn load(config: &BridgeConfig) -> BridgeResult<Self> {
        let module = DynamicModule::open(config)?;
        Self::with_module(Arc::new(module), config.workers)
    }

    /// Wraps an already constructed module, e.g. an in-process fake.
    pub fn with_module(module: Arc<dyn NativeModule>, workers: usize) -> BridgeResult<Self> {
        Ok(Self {
            module,
            pool: Arc::new(WorkerPool::spawn(workers)?),
        })
    }

    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Runs `operation` on the calling thread, blocking until it completes.
    pub fn call_blocking(&self, operation: &str, args: CallArgs) -> BridgeResult<Payload> {
        let spec = prepare(operation, &args)?;
        execute(self.module.as_ref(), spec, &args)
    }

    /// Queues `operation` on the worker pool.
    ///
    /// Unknown operations and mismatched arguments fail here, before anything
    /// is queued. Dropping the returned [`PendingCall`] does not cancel the call.
    pub fn call(&self, operation: &str, args: CallArgs) -> BridgeResult<PendingCall> {
        let spec = prepare(operation, &args)?;
        self.pool.submit(Job::new(Arc::clone(&self.module), spec, args))
    }
}

fn prepare(operation: &str, args: &CallArgs) -> BridgeResult<&'static OperationSpec> {
    let spec = catalog::lookup(operation)?;
    spec.check_args(args)?;
    Ok(spec)
}

struct LibraryReleaser<'m> {
    module: &'m dyn NativeModule,
    library: NativeLibrary,
}

impl Release for LibraryReleaser<'_> {
    fn release(&self, vector: UnmanagedVector) {
        self.module.release(self.library, vector);
    }
}

/// One full call lifecycle. Both buffers are released before this returns.
pub(crate) fn execute(
    module: &dyn NativeModule,
    spec: &'static OperationSpec,
    args: &CallArgs,
) -> BridgeResult<Payload> {
    let mut error = UnmanagedVector::none();
    let borrowed = args.borrow();
    debug!(operation = spec.name, args = borrowed.len(), "dispatching native call");

    let outcome = module.invoke(spec, &mut error, &borrowed);

    let releaser = LibraryReleaser {
        module,
        library: spec.library,
    };
    let error = OwnedBuffer::new(error, &releaser);
    let result = OwnedBuffer::new(outcome?, &releaser);
    drop(borrowed);

    let settled = settle(spec.name, spec.result, &error, &result);
    match &settled {
        Ok(payload) => debug!(
            operation = spec.name,
            len = payload.as_bytes().len(),
            "native call completed"
        ),
        Err(err) => debug!(operation = spec.name, %err, "native call failed"),
    }
    settled
}

/// Interprets the error slot and result buffer of a completed call.
///
/// A present error slot wins and the result is never read. Both absent is a
/// protocol anomaly. Otherwise the result is decoded per `shape`.
pub fn settle(
    operation: &str,
    shape: ResultShape,
    error: &OwnedBuffer<'_>,
    result: &OwnedBuffer<'_>,
) -> BridgeResult<Payload> {
    match (error.bytes()?, result.is_absent()) {
        (Some(message), _) => Err(BridgeError::Reported(utf8("error message", message)?)),
        (None, true) => {
            warn!(operation, "native call returned no result and no error");
            Err(BridgeError::NoResult)
        }
        (None, false) => {
            let bytes = result.bytes()?.unwrap_or_default();
            match shape {
                ResultShape::Text => Ok(Payload::Text(utf8("result", bytes)?)),
                ResultShape::Binary => Ok(Payload::Binary(bytes.to_vec())),
            }
        }
    }
}

fn utf8(what: &'static str, bytes: &[u8]) -> BridgeResult<String> {
    String::from_utf8(bytes.to_vec()).map_err(|err| BridgeError::Decode {
        what,
        reason: err.to_string(),
    })
}
