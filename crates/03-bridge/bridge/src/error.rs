use std::path::PathBuf;

use bridge_abi::AbiError;
use thiserror::Error;

pub type BridgeResult<T> = Result<T, BridgeError>;

#[derive(Debug, Error)]
pub enum BridgeError {
    /// Failure text written by the callee into the error slot, verbatim.
    #[error("{0}")]
    Reported(String),

    /// The call completed with neither a result nor an error.
    #[error("unknown error: native call returned no result and no error")]
    NoResult,

    #[error("failed to decode {what} as utf-8: {reason}")]
    Decode { what: &'static str, reason: String },

    #[error("protocol violation: {0}")]
    Protocol(String),

    #[error("argument shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("unknown operation `{0}`")]
    UnknownOperation(String),

    #[error("{os}/{arch} not supported")]
    UnsupportedPlatform { os: String, arch: String },

    #[error("failed to load native library {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// The completion signal was dropped before a result was delivered.
    #[error("bridge worker disconnected before completing the call")]
    Disconnected,

    #[error("failed to start bridge worker: {0}")]
    Spawn(String),
}

/// Coarse failure taxonomy used by callers deciding how to react.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The callee reported a reason.
    Reported,
    /// The native side broke the call contract. Not retryable.
    ProtocolAnomaly,
    Decoding,
    /// Rejected locally; the native call was never attempted.
    ShapeMismatch,
    /// Programmer error; the native call was never attempted.
    UnknownOperation,
    /// The bridge cannot be used on this host at all.
    UnsupportedEnvironment,
}

impl BridgeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::Reported(_) => ErrorKind::Reported,
            BridgeError::NoResult | BridgeError::Protocol(_) | BridgeError::Disconnected => {
                ErrorKind::ProtocolAnomaly
            }
            BridgeError::Decode { .. } => ErrorKind::Decoding,
            BridgeError::ShapeMismatch(_) => ErrorKind::ShapeMismatch,
            BridgeError::UnknownOperation(_) => ErrorKind::UnknownOperation,
            BridgeError::UnsupportedPlatform { .. }
            | BridgeError::Load { .. }
            | BridgeError::Spawn(_) => ErrorKind::UnsupportedEnvironment,
        }
    }

    pub fn protocol(msg: impl Into<String>) -> Self {
        BridgeError::Protocol(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        BridgeError::ShapeMismatch(msg.into())
    }
}

impl From<AbiError> for BridgeError {
    fn from(err: AbiError) -> Self {
        match err {
            AbiError::DeclaredLengthOverflow { .. } => BridgeError::ShapeMismatch(err.to_string()),
            AbiError::LengthExceedsCapacity { .. } | AbiError::NullData { .. } => {
                BridgeError::Protocol(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reported_message_is_verbatim() {
        let err = BridgeError::Reported("package not found".into());
        assert_eq!(err.to_string(), "package not found");
        assert_eq!(err.kind(), ErrorKind::Reported);
    }

    #[test]
    fn abi_errors_split_into_local_and_protocol() {
        let local: BridgeError = AbiError::DeclaredLengthOverflow {
            declared: 8,
            available: 4,
        }
        .into();
        assert_eq!(local.kind(), ErrorKind::ShapeMismatch);

        let remote: BridgeError = AbiError::LengthExceedsCapacity { len: 9, cap: 8 }.into();
        assert_eq!(remote.kind(), ErrorKind::ProtocolAnomaly);
    }
}
