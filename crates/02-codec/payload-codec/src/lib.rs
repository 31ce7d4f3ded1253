//! Request payloads for the native package compiler.
//!
//! Configuration is encoded with BCS, the canonical binary encoding the native
//! side decodes: fixed-width little-endian integers, one-byte booleans, ULEB128
//! length prefixes and an explicit tag byte for optional values. Callers
//! describe a request with the option value objects in [`options`]; the
//! [`PayloadBuilder`] merges documented defaults and produces the frozen
//! [`schema`] records once per package.

#![allow(missing_docs)]

mod address;
mod builder;
mod error;
pub mod options;
pub mod schema;
mod wire;

pub use address::{Address, ADDRESS_LENGTH};
pub use builder::PayloadBuilder;
pub use error::{CodecError, CodecResult};
pub use options::{
    BuildOptions, BytecodeVersion, CleanOptions, CompilerVersion, LanguageVersion, TestOptions,
};
pub use schema::{CompilerArgumentsV1, CompilerBuildConfigV1, CompilerTestOptionsV1};
pub use wire::{decode_compiler_arguments, decode_test_options, encode};
