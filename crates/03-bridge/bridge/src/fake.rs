//! In-process native module for tests.
//!
//! Replies are produced by a handler closure. Every vector handed out is
//! counted, as is every release, so tests can assert that each buffer is
//! released exactly once.

use std::sync::atomic::{AtomicUsize, Ordering};

use bridge_abi::UnmanagedVector;
use parking_lot::Mutex;

use crate::args::Arg;
use crate::catalog::{NativeLibrary, OperationSpec};
use crate::error::BridgeResult;
use crate::native::NativeModule;

/// Argument as observed by the fake callee.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FakeArg {
    /// `None` for nil views.
    View(Option<Vec<u8>>),
    Bool(bool),
    U32(u32),
    U64(u64),
}

impl FakeArg {
    pub fn text(&self) -> Option<&str> {
        match self {
            FakeArg::View(Some(bytes)) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FakeCall {
    pub operation: &'static str,
    pub symbol: &'static str,
    pub library: NativeLibrary,
    pub args: Vec<FakeArg>,
}

/// What the fake writes into the error slot and result buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FakeReply {
    pub error: Option<Vec<u8>>,
    pub result: Option<Vec<u8>>,
    /// Report one byte more than the result's capacity.
    pub overstate_len: bool,
    /// Report one byte more than the error slot's capacity.
    pub overstate_error_len: bool,
}

impl FakeReply {
    pub fn ok_text(text: &str) -> Self {
        Self::ok_bytes(text.as_bytes().to_vec())
    }

    pub fn ok_bytes(bytes: Vec<u8>) -> Self {
        Self {
            result: Some(bytes),
            ..Self::default()
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            error: Some(message.as_bytes().to_vec()),
            ..Self::default()
        }
    }

    /// Neither a result nor an error.
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn overstated(bytes: Vec<u8>) -> Self {
        Self {
            result: Some(bytes),
            overstate_len: true,
            ..Self::default()
        }
    }

    pub fn overstated_error(message: &str) -> Self {
        Self {
            error: Some(message.as_bytes().to_vec()),
            overstate_error_len: true,
            ..Self::default()
        }
    }
}

type Handler = dyn Fn(&FakeCall) -> FakeReply + Send + Sync;

pub struct FakeModule {
    handler: Box<Handler>,
    calls: Mutex<Vec<FakeCall>>,
    allocated: AtomicUsize,
    released: AtomicUsize,
}

impl FakeModule {
    pub fn new(handler: impl Fn(&FakeCall) -> FakeReply + Send + Sync + 'static) -> Self {
        Self {
            handler: Box::new(handler),
            calls: Mutex::new(Vec::new()),
            allocated: AtomicUsize::new(0),
            released: AtomicUsize::new(0),
        }
    }

    /// Answers every call with the same reply.
    pub fn replying(reply: FakeReply) -> Self {
        Self::new(move |_| reply.clone())
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Vectors handed to the caller so far.
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::SeqCst)
    }

    pub fn released(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }

    fn allocate(&self, bytes: Vec<u8>) -> UnmanagedVector {
        self.allocated.fetch_add(1, Ordering::SeqCst);
        UnmanagedVector::from_vec(bytes)
    }
}

impl NativeModule for FakeModule {
    fn invoke(
        &self,
        spec: &OperationSpec,
        error: &mut UnmanagedVector,
        args: &[Arg<'_>],
    ) -> BridgeResult<UnmanagedVector> {
        let call = FakeCall {
            operation: spec.name,
            symbol: spec.symbol,
            library: spec.library,
            args: args.iter().map(observe).collect(),
        };
        let reply = (self.handler)(&call);
        self.calls.lock().push(call);

        if let Some(message) = reply.error {
            *error = self.allocate(message);
            if reply.overstate_error_len {
                error.len = error.cap + 1;
            }
        }
        let mut result = match reply.result {
            Some(bytes) => self.allocate(bytes),
            None => UnmanagedVector::none(),
        };
        if reply.overstate_len && !result.is_none() {
            result.len = result.cap + 1;
        }
        Ok(result)
    }

    fn release(&self, _library: NativeLibrary, vector: UnmanagedVector) {
        self.released.fetch_add(1, Ordering::SeqCst);
        // SAFETY: every present vector the fake hands out comes from `allocate`.
        drop(unsafe { vector.into_vec() });
    }
}

fn observe(arg: &Arg<'_>) -> FakeArg {
    match arg {
        Arg::View(view) => FakeArg::View(view.as_slice().map(<[u8]>::to_vec)),
        Arg::Bool(value) => FakeArg::Bool(*value),
        Arg::U32(value) => FakeArg::U32(*value),
        Arg::U64(value) => FakeArg::U64(*value),
    }
}
