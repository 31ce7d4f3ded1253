use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Width of an account address on the wire.
pub const ADDRESS_LENGTH: usize = 32;

/// Fixed-width account address, encoded as 32 raw bytes with no length prefix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    pub const ZERO: Address = Address([0; ADDRESS_LENGTH]);

    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parses a hex literal such as `0x4` or a full 64-digit form.
    ///
    /// The `0x` prefix is optional. Short literals are left-padded with zeros
    /// to the full width; more than 64 digits cannot fit and are rejected.
    pub fn parse(input: &str) -> CodecResult<Self> {
        let digits = input
            .strip_prefix("0x")
            .or_else(|| input.strip_prefix("0X"))
            .unwrap_or(input);
        if digits.is_empty() {
            return Err(CodecError::address(input, "no hex digits"));
        }
        if digits.len() > ADDRESS_LENGTH * 2 {
            return Err(CodecError::address(input, "wider than 32 bytes"));
        }
        let padded = format!("{digits:0>width$}", width = ADDRESS_LENGTH * 2);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        hex::decode_to_slice(&padded, &mut bytes)
            .map_err(|_| CodecError::address(input, "not a hex literal"))?;
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Full 64-digit form with `0x` prefix.
    pub fn to_long_string(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

/// Short form: leading zeros trimmed, so `0x4` prints as `0x4`.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = hex::encode(self.0);
        let trimmed = encoded.trim_start_matches('0');
        if trimmed.is_empty() {
            f.write_str("0x0")
        } else {
            write!(f, "0x{trimmed}")
        }
    }
}
