use thiserror::Error;

/// Convenience result alias for ABI-level checks.
pub type AbiResult<T, E = AbiError> = Result<T, E>;

/// Layout violations detected while building views or reading result buffers.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    /// A view declared more bytes than its backing buffer holds.
    #[error("declared view length {declared} exceeds buffer length {available}")]
    DeclaredLengthOverflow { declared: usize, available: usize },

    /// A result buffer reported more valid bytes than it has allocated.
    #[error("result length {len} exceeds allocated capacity {cap}")]
    LengthExceedsCapacity { len: usize, cap: usize },

    /// A present result buffer carried data behind a null pointer.
    #[error("result buffer reports {len} bytes behind a null pointer")]
    NullData { len: usize },
}
