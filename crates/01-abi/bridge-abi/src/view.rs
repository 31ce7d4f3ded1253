//! Borrowed views handed to the native module by value.
//!
//! A view never owns memory. The lifetime parameter ties it to the buffer it
//! points into, so a view cannot outlive the caller-owned bytes it describes.

use std::marker::PhantomData;
use std::ptr;
use std::slice;

use crate::{AbiError, AbiResult};

/// Non-owning view descriptor laid out as `{ is_nil, ptr, len }`.
///
/// When `is_nil` is set the pointer is null and the length is zero; neither
/// side dereferences them.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct ByteSliceView<'a> {
    is_nil: bool,
    ptr: *const u8,
    len: usize,
    _borrow: PhantomData<&'a [u8]>,
}

impl<'a> ByteSliceView<'a> {
    /// Creates a view that carries no data.
    pub const fn nil() -> Self {
        Self {
            is_nil: true,
            ptr: ptr::null(),
            len: 0,
            _borrow: PhantomData,
        }
    }

    /// Borrows `bytes` for the duration of a call. Empty input yields a nil view.
    pub fn from_slice(bytes: &'a [u8]) -> Self {
        if bytes.is_empty() {
            return Self::nil();
        }
        Self {
            is_nil: false,
            ptr: bytes.as_ptr(),
            len: bytes.len(),
            _borrow: PhantomData,
        }
    }

    /// Returns true when the view carries no data.
    pub fn is_nil(&self) -> bool {
        self.is_nil
    }

    /// Number of bytes the view covers.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when the view covers zero bytes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw data pointer; null for nil views.
    pub fn as_ptr(&self) -> *const u8 {
        self.ptr
    }

    /// Reads the viewed bytes back. Returns `None` for nil views.
    pub fn as_slice(&self) -> Option<&'a [u8]> {
        if self.is_nil {
            return None;
        }
        // SAFETY: non-nil views are only built from a live `&'a [u8]` of exactly `len` bytes.
        Some(unsafe { slice::from_raw_parts(self.ptr, self.len) })
    }
}

impl Default for ByteSliceView<'_> {
    fn default() -> Self {
        Self::nil()
    }
}

/// Caller-owned memory backing a single view.
///
/// The invocation adapter keeps the buffer alive until the call that borrows it
/// has completed, then drops it. Empty input never allocates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewBuffer {
    bytes: Vec<u8>,
    len: usize,
}

impl ViewBuffer {
    /// Buffer whose view is nil.
    pub fn nil() -> Self {
        Self::default()
    }

    /// Copies UTF-8 text into caller-owned memory.
    pub fn from_text(text: &str) -> Self {
        Self::from_bytes(text.as_bytes())
    }

    /// Copies raw bytes into caller-owned memory.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            return Self::nil();
        }
        Self::from_vec(bytes.to_vec())
    }

    /// Takes ownership of already encoded bytes.
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        if bytes.is_empty() {
            return Self::nil();
        }
        let len = bytes.len();
        Self { bytes, len }
    }

    /// Builds a buffer whose descriptor declares `declared` valid bytes.
    ///
    /// A declared length beyond the end of `bytes` is rejected here, before any
    /// native call could observe it.
    pub fn with_declared_len(bytes: Vec<u8>, declared: usize) -> AbiResult<Self> {
        if declared > bytes.len() {
            return Err(AbiError::DeclaredLengthOverflow {
                declared,
                available: bytes.len(),
            });
        }
        if declared == 0 {
            return Ok(Self::nil());
        }
        Ok(Self {
            bytes,
            len: declared,
        })
    }

    /// Returns true when the buffer produces a nil view.
    pub fn is_nil(&self) -> bool {
        self.len == 0
    }

    /// Number of bytes exposed through the view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true when no bytes are exposed.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Heap bytes reserved by the buffer; zero for nil buffers.
    pub fn allocated(&self) -> usize {
        self.bytes.capacity()
    }

    /// Valid bytes exposed through the view.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Borrows the buffer as a view descriptor.
    pub fn view(&self) -> ByteSliceView<'_> {
        ByteSliceView::from_slice(self.as_bytes())
    }
}
