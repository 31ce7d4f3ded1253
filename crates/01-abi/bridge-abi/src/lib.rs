//! Flat, `#[repr(C)]` data model shared with the native compiler module.
//!
//! Everything that crosses the call boundary is described here:
//! * [`ByteSliceView`] – borrowed view into caller-owned memory, passed by value.
//! * [`ViewBuffer`] – caller-side memory backing one view for the lifetime of a call.
//! * [`UnmanagedVector`] – callee-allocated result buffer, also used as the error slot.
//! * [`OwnedBuffer`] – transferred buffer that is released exactly once through [`Release`].

mod error;
mod vector;
mod view;

pub use error::{AbiError, AbiResult};
pub use vector::{OwnedBuffer, Release, UnmanagedVector};
pub use view::{ByteSliceView, ViewBuffer};
