//! Caller-facing option value objects.
//!
//! Every field is optional or defaults to `false`; the documented defaults
//! are merged only when a payload is built, so callers never restate them.

use crate::address::Address;
use crate::error::CodecResult;

/// Bytecode versions the native compiler can target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BytecodeVersion {
    V6,
    V7,
}

impl BytecodeVersion {
    pub const fn as_u32(self) -> u32 {
        match self {
            BytecodeVersion::V6 => 6,
            BytecodeVersion::V7 => 7,
        }
    }
}

impl From<BytecodeVersion> for u32 {
    fn from(version: BytecodeVersion) -> Self {
        version.as_u32()
    }
}

/// Known compiler version tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompilerVersion {
    V1,
    V2_0,
    V2_1,
}

impl CompilerVersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            CompilerVersion::V1 => "1",
            CompilerVersion::V2_0 => "2.0",
            CompilerVersion::V2_1 => "2.1",
        }
    }
}

impl From<CompilerVersion> for String {
    fn from(version: CompilerVersion) -> Self {
        version.as_str().to_owned()
    }
}

/// Known language version tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LanguageVersion {
    V1,
    V2_0,
    V2_1,
}

impl LanguageVersion {
    pub const fn as_str(self) -> &'static str {
        match self {
            LanguageVersion::V1 => "1",
            LanguageVersion::V2_0 => "2.0",
            LanguageVersion::V2_1 => "2.1",
        }
    }
}

impl From<LanguageVersion> for String {
    fn from(version: LanguageVersion) -> Self {
        version.as_str().to_owned()
    }
}

/// Package build options.
///
/// Version tags accept either the enums above or free-form strings, since the
/// native compiler may know tags this crate does not.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Use `dev-addresses` and `dev-dependencies` from the manifest.
    pub dev_mode: bool,
    /// Compile the `tests` directory along with dev settings.
    pub test_mode: bool,
    pub generate_docs: bool,
    pub generate_abis: bool,
    /// Output directory for compiled artifacts; unset keeps the native default.
    pub install_dir: Option<String>,
    pub force_recompilation: bool,
    /// Only fetch dependency repositories.
    pub fetch_deps_only: bool,
    pub skip_fetch_latest_git_deps: bool,
    pub bytecode_version: Option<u32>,
    pub compiler_version: Option<String>,
    pub language_version: Option<String>,
    /// `(name, hex literal)` pairs, applied in order.
    pub additional_named_addresses: Vec<(String, String)>,
}

impl BuildOptions {
    pub fn with_bytecode_version(mut self, version: impl Into<u32>) -> Self {
        self.bytecode_version = Some(version.into());
        self
    }

    pub fn with_compiler_version(mut self, version: impl Into<String>) -> Self {
        self.compiler_version = Some(version.into());
        self
    }

    pub fn with_language_version(mut self, version: impl Into<String>) -> Self {
        self.language_version = Some(version.into());
        self
    }

    pub fn with_named_address(mut self, name: impl Into<String>, address: impl Into<String>) -> Self {
        self.additional_named_addresses
            .push((name.into(), address.into()));
        self
    }

    /// Parses every named address, failing on the first one that does not fit.
    pub fn named_addresses(&self) -> CodecResult<Vec<(String, Address)>> {
        self.additional_named_addresses
            .iter()
            .map(|(name, literal)| Ok((name.clone(), Address::parse(literal)?)))
            .collect()
    }
}

/// Unit-test options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestOptions {
    /// Runs only tests whose `<addr>::<module>::<fn>` name contains this string.
    pub filter: Option<String>,
    pub report_statistics: bool,
    /// Show storage state at the end of a failing test.
    pub report_storage_on_error: bool,
    pub ignore_compile_warnings: bool,
    pub compute_coverage: bool,
}

/// Options for cleaning a package.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CleanOptions {
    /// Flush the cache directory.
    pub clean_cache: bool,
    /// Remove compiler byproducts that use default names.
    pub clean_by_product: bool,
    pub force: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            clean_cache: false,
            clean_by_product: false,
            force: true,
        }
    }
}
