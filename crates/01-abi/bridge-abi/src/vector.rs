//! Callee-allocated buffers returned from native calls.
//!
//! The same layout serves two roles: the primary result of every call and the
//! error slot the caller arms before dispatch. Memory behind a present vector
//! belongs to the callee and is handed back through [`Release`], never through
//! the caller's allocator.

use std::mem::ManuallyDrop;
use std::ptr;
use std::slice;

use crate::{AbiError, AbiResult};

/// Result buffer laid out as `{ is_none, ptr, len, cap }`.
///
/// `len` counts valid bytes and `cap` the size of the allocation. The two are
/// independent; only `cap` matters when the allocation is released.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmanagedVector {
    pub is_none: bool,
    pub ptr: *mut u8,
    pub len: usize,
    pub cap: usize,
}

impl UnmanagedVector {
    /// The armed state of both the error slot and the result buffer.
    pub const fn none() -> Self {
        Self {
            is_none: true,
            ptr: ptr::null_mut(),
            len: 0,
            cap: 0,
        }
    }

    /// Returns true when the vector carries no value.
    pub fn is_none(&self) -> bool {
        self.is_none
    }

    /// Hands a Rust allocation across the boundary in callee layout.
    ///
    /// Used by in-process callees; the allocation must come back through
    /// [`UnmanagedVector::into_vec`].
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        let mut bytes = ManuallyDrop::new(bytes);
        Self {
            is_none: false,
            ptr: bytes.as_mut_ptr(),
            len: bytes.len(),
            cap: bytes.capacity(),
        }
    }

    /// Reclaims an allocation produced by [`UnmanagedVector::from_vec`].
    ///
    /// The returned vector is empty but keeps the original capacity, so a
    /// `len` that disagrees with `cap` cannot corrupt the deallocation.
    ///
    /// # Safety
    /// `self` must come from `from_vec` in this process and must not have been
    /// reclaimed before.
    pub unsafe fn into_vec(self) -> Option<Vec<u8>> {
        if self.is_none {
            return None;
        }
        // SAFETY: guaranteed by the caller; `u8` needs no drop so a zero length is sound.
        Some(unsafe { Vec::from_raw_parts(self.ptr, 0, self.cap) })
    }
}

impl Default for UnmanagedVector {
    fn default() -> Self {
        Self::none()
    }
}

/// Release operation supplied by the side that allocated a vector.
pub trait Release {
    /// Returns `vector` to its allocator. Called at most once per present vector.
    fn release(&self, vector: UnmanagedVector);
}

/// Callee-allocated buffer owned by the caller until it is dropped.
///
/// Dropping a present buffer invokes the releaser exactly once, on every exit
/// path. Absent buffers are never passed to the releaser.
pub struct OwnedBuffer<'r> {
    vector: UnmanagedVector,
    releaser: &'r dyn Release,
}

impl<'r> OwnedBuffer<'r> {
    /// Takes ownership of a vector returned by a completed call.
    pub fn new(vector: UnmanagedVector, releaser: &'r dyn Release) -> Self {
        Self { vector, releaser }
    }

    /// Returns true when the buffer carries no value.
    pub fn is_absent(&self) -> bool {
        self.vector.is_none
    }

    /// Number of valid bytes reported by the callee.
    pub fn len(&self) -> usize {
        self.vector.len
    }

    /// Returns true when the buffer holds zero valid bytes.
    pub fn is_empty(&self) -> bool {
        self.vector.len == 0
    }

    /// Allocation size reported by the callee.
    pub fn capacity(&self) -> usize {
        self.vector.cap
    }

    /// Valid bytes of a present buffer, or `None` when absent.
    pub fn bytes(&self) -> AbiResult<Option<&[u8]>> {
        let UnmanagedVector {
            is_none,
            ptr,
            len,
            cap,
        } = self.vector;
        if is_none {
            return Ok(None);
        }
        if len > cap {
            return Err(AbiError::LengthExceedsCapacity { len, cap });
        }
        if len == 0 {
            return Ok(Some(&[]));
        }
        if ptr.is_null() {
            return Err(AbiError::NullData { len });
        }
        // SAFETY: the callee guarantees `ptr` addresses `cap` bytes of which the first
        // `len` are initialised; the memory stays valid until `self` releases it.
        Ok(Some(unsafe { slice::from_raw_parts(ptr, len) }))
    }
}

impl Drop for OwnedBuffer<'_> {
    fn drop(&mut self) {
        if !self.vector.is_none {
            let vector = std::mem::replace(&mut self.vector, UnmanagedVector::none());
            self.releaser.release(vector);
        }
    }
}
