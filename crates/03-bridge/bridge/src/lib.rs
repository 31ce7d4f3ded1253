//! Uniform call bridge into the native compiler and VM libraries.
//!
//! Every bridged operation goes through the same lifecycle: the error slot and
//! result buffer are armed as absent, arguments are marshaled into views, the
//! catalog entry's native symbol is invoked, and the two buffers are settled
//! into a [`Payload`] or a [`BridgeError`] before both are released.

#![allow(missing_docs)]

mod adapter;
mod args;
pub mod catalog;
mod config;
mod dispatch;
mod error;
#[cfg(any(test, feature = "fake-native"))]
pub mod fake;
mod native;
pub mod platform;

pub use adapter::{settle, Bridge, Payload};
pub use args::{Arg, ArgValue, CallArgs};
pub use catalog::{ArgKind, NativeLibrary, OperationSpec, ResultShape};
pub use config::BridgeConfig;
pub use dispatch::PendingCall;
pub use error::{BridgeError, BridgeResult, ErrorKind};
pub use native::{DynamicModule, NativeModule};
