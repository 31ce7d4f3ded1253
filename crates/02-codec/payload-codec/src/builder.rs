use bridge_abi::ViewBuffer;

use crate::error::CodecResult;
use crate::options::{BuildOptions, TestOptions};
use crate::schema::{CompilerArgumentsV1, CompilerBuildConfigV1, CompilerTestOptionsV1};
use crate::wire::encode;

const DEFAULT_BYTECODE_VERSION: u32 = 0;
const DEFAULT_VERSION_TAG: &str = "0";

/// Produces the serialized compiler arguments for one package.
///
/// Defaults are merged here and nowhere else. The same builder serves every
/// operation on the package, so the arguments are identical across calls.
#[derive(Clone, Debug)]
pub struct PayloadBuilder {
    package_path: Option<String>,
    verbose: bool,
    options: BuildOptions,
}

impl PayloadBuilder {
    pub fn new(package_path: impl Into<String>, options: BuildOptions) -> Self {
        Self {
            package_path: Some(package_path.into()),
            verbose: false,
            options,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn package_path(&self) -> Option<&str> {
        self.package_path.as_deref()
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Builds the wire record with defaults applied.
    pub fn compiler_arguments(&self) -> CodecResult<CompilerArgumentsV1> {
        let options = &self.options;
        Ok(CompilerArgumentsV1 {
            package_path: self.package_path.clone(),
            verbose: self.verbose,
            build_config: CompilerBuildConfigV1 {
                dev_mode: options.dev_mode,
                test_mode: options.test_mode,
                generate_docs: options.generate_docs,
                generate_abis: options.generate_abis,
                install_dir: options.install_dir.clone(),
                force_recompilation: options.force_recompilation,
                fetch_deps_only: options.fetch_deps_only,
                skip_fetch_latest_git_deps: options.skip_fetch_latest_git_deps,
                bytecode_version: options
                    .bytecode_version
                    .unwrap_or(DEFAULT_BYTECODE_VERSION),
                compiler_version: version_tag(&options.compiler_version),
                language_version: version_tag(&options.language_version),
                additional_named_addresses: options.named_addresses()?,
            },
        })
    }

    pub fn compiler_payload(&self) -> CodecResult<Vec<u8>> {
        encode("compiler arguments", &self.compiler_arguments()?)
    }

    /// Caller-owned view memory holding the compiler arguments.
    pub fn compiler_view(&self) -> CodecResult<ViewBuffer> {
        Ok(ViewBuffer::from_vec(self.compiler_payload()?))
    }

    pub fn test_options(options: &TestOptions) -> CompilerTestOptionsV1 {
        CompilerTestOptionsV1 {
            filter: options.filter.clone(),
            report_statistics: options.report_statistics,
            report_storage_on_error: options.report_storage_on_error,
            ignore_compile_warnings: options.ignore_compile_warnings,
            compute_coverage: options.compute_coverage,
        }
    }

    pub fn test_payload(options: &TestOptions) -> CodecResult<Vec<u8>> {
        encode("test options", &Self::test_options(options))
    }

    pub fn test_view(options: &TestOptions) -> CodecResult<ViewBuffer> {
        Ok(ViewBuffer::from_vec(Self::test_payload(options)?))
    }
}

fn version_tag(tag: &Option<String>) -> String {
    tag.clone()
        .unwrap_or_else(|| DEFAULT_VERSION_TAG.to_owned())
}
