use thiserror::Error;

pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("failed to encode {what}: {reason}")]
    Serialize { what: &'static str, reason: String },

    #[error("failed to decode {what}: {reason}")]
    Deserialize { what: &'static str, reason: String },

    /// A named address does not fit the fixed 32-byte width.
    #[error("invalid address `{input}`: {reason}")]
    Address { input: String, reason: &'static str },
}

impl CodecError {
    pub fn address(input: &str, reason: &'static str) -> Self {
        CodecError::Address {
            input: input.to_owned(),
            reason,
        }
    }
}
