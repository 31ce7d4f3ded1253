//! Wire records frozen for BCS serialization.
//!
//! Field order is the wire order. Any incompatible change must bump the
//! schema version and regenerate the golden vectors in `tests/golden.rs`.

use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Schema version of the records in this module.
pub const SCHEMA_VERSION_V1: u8 = 1;

/// Arguments shared by every compiler operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerArgumentsV1 {
    pub package_path: Option<String>,
    pub verbose: bool,
    pub build_config: CompilerBuildConfigV1,
}

/// Build-mode record nested in [`CompilerArgumentsV1`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerBuildConfigV1 {
    pub dev_mode: bool,
    pub test_mode: bool,
    pub generate_docs: bool,
    pub generate_abis: bool,
    /// `None` lets the native side pick its own default location.
    pub install_dir: Option<String>,
    pub force_recompilation: bool,
    pub fetch_deps_only: bool,
    pub skip_fetch_latest_git_deps: bool,
    /// `0` selects the native default.
    pub bytecode_version: u32,
    /// `"0"` selects the native default.
    pub compiler_version: String,
    /// `"0"` selects the native default.
    pub language_version: String,
    /// Named-address substitutions, in caller order.
    pub additional_named_addresses: Vec<(String, Address)>,
}

/// Unit-test run options.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerTestOptionsV1 {
    pub filter: Option<String>,
    pub report_statistics: bool,
    pub report_storage_on_error: bool,
    pub ignore_compile_warnings: bool,
    pub compute_coverage: bool,
}
