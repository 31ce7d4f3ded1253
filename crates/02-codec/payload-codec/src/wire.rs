use serde::Serialize;

use crate::error::{CodecError, CodecResult};
use crate::schema::{CompilerArgumentsV1, CompilerTestOptionsV1};

/// Serializes a schema record with BCS.
pub fn encode<T: Serialize>(what: &'static str, value: &T) -> CodecResult<Vec<u8>> {
    bcs::to_bytes(value).map_err(|err| CodecError::Serialize {
        what,
        reason: err.to_string(),
    })
}

/// Reference decoder for compiler arguments. Trailing bytes are rejected.
pub fn decode_compiler_arguments(bytes: &[u8]) -> CodecResult<CompilerArgumentsV1> {
    bcs::from_bytes(bytes).map_err(|err| CodecError::Deserialize {
        what: "compiler arguments",
        reason: err.to_string(),
    })
}

/// Reference decoder for test options. Trailing bytes are rejected.
pub fn decode_test_options(bytes: &[u8]) -> CodecResult<CompilerTestOptionsV1> {
    bcs::from_bytes(bytes).map_err(|err| CodecError::Deserialize {
        what: "test options",
        reason: err.to_string(),
    })
}
