//! Typed wrappers over the bridged compiler and VM operations.
//!
//! [`PackageBuilder`] drives package-level operations (create, clean, build,
//! test) with one set of build options; the free functions in [`module`] work
//! on compiled bytes directly. [`PackageArtifacts`] reads what a build leaves
//! on disk.

#![allow(missing_docs)]

mod artifacts;
mod builder;
mod error;
pub mod module;
pub mod records;

pub use artifacts::PackageArtifacts;
pub use builder::{PackageBuilder, DEFAULT_MOVE_VERSION};
pub use error::{BuilderError, BuilderResult};
pub use records::{DecodedField, DecodedFunction, DecodedModule, DecodedScript, DecodedStruct, ModuleInfo};

pub use bridge::{Bridge, BridgeConfig};
pub use payload_codec::{
    BuildOptions, BytecodeVersion, CleanOptions, CompilerVersion, LanguageVersion, TestOptions,
};
