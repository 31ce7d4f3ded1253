use std::path::{Path, PathBuf};

use bridge::catalog::{BUILD_PACKAGE, CLEAN_PACKAGE, CREATE_PACKAGE, TEST_PACKAGE};
use bridge::{Bridge, CallArgs, Payload};
use bridge_abi::ViewBuffer;
use payload_codec::{BuildOptions, CleanOptions, PayloadBuilder, TestOptions};
use tracing::debug;

use crate::artifacts::PackageArtifacts;
use crate::error::{BuilderError, BuilderResult};

/// Version tag used when creating a package without one.
pub const DEFAULT_MOVE_VERSION: &str = "main";

/// Package-level operations sharing one set of build options.
///
/// The compiler arguments are serialized once, in [`PackageBuilder::new`], and
/// reused by every call.
#[derive(Clone)]
pub struct PackageBuilder {
    bridge: Bridge,
    package_path: PathBuf,
    compiler_args: ViewBuffer,
}

impl PackageBuilder {
    pub fn new(
        bridge: Bridge,
        package_path: impl Into<PathBuf>,
        options: BuildOptions,
    ) -> BuilderResult<Self> {
        let package_path = package_path.into();
        let path = package_path
            .to_str()
            .ok_or_else(|| BuilderError::PackagePath(package_path.clone()))?;
        let compiler_args = PayloadBuilder::new(path, options).compiler_view()?;
        debug!(
            package = %package_path.display(),
            len = compiler_args.len(),
            "compiler arguments ready"
        );
        Ok(Self {
            bridge,
            package_path,
            compiler_args,
        })
    }

    pub fn package_path(&self) -> &Path {
        &self.package_path
    }

    /// Build outputs on disk for this package.
    pub fn artifacts(&self) -> PackageArtifacts {
        PackageArtifacts::new(&self.package_path)
    }

    /// Creates a package named `name` at the package path, tracking the `main` framework.
    pub async fn new_package(&self, name: &str) -> BuilderResult<String> {
        self.new_package_with(name, DEFAULT_MOVE_VERSION, false).await
    }

    /// Creates a package. An empty `version` is passed as a nil view.
    pub async fn new_package_with(
        &self,
        name: &str,
        version: &str,
        minitia: bool,
    ) -> BuilderResult<String> {
        let args = self.args().text(name).text(version).flag(minitia);
        self.call_text(CREATE_PACKAGE, args).await
    }

    pub async fn clean(&self, options: CleanOptions) -> BuilderResult<String> {
        self.call_text(CLEAN_PACKAGE, self.clean_args(options)).await
    }

    pub async fn build(&self) -> BuilderResult<String> {
        self.call_text(BUILD_PACKAGE, self.args()).await
    }

    pub async fn test(&self, options: &TestOptions) -> BuilderResult<String> {
        let args = self.test_args(options)?;
        self.call_text(TEST_PACKAGE, args).await
    }

    pub fn new_package_blocking(&self, name: &str) -> BuilderResult<String> {
        self.new_package_with_blocking(name, DEFAULT_MOVE_VERSION, false)
    }

    pub fn new_package_with_blocking(
        &self,
        name: &str,
        version: &str,
        minitia: bool,
    ) -> BuilderResult<String> {
        let args = self.args().text(name).text(version).flag(minitia);
        self.call_text_blocking(CREATE_PACKAGE, args)
    }

    pub fn clean_blocking(&self, options: CleanOptions) -> BuilderResult<String> {
        self.call_text_blocking(CLEAN_PACKAGE, self.clean_args(options))
    }

    pub fn build_blocking(&self) -> BuilderResult<String> {
        self.call_text_blocking(BUILD_PACKAGE, self.args())
    }

    pub fn test_blocking(&self, options: &TestOptions) -> BuilderResult<String> {
        let args = self.test_args(options)?;
        self.call_text_blocking(TEST_PACKAGE, args)
    }

    fn args(&self) -> CallArgs {
        CallArgs::new().view(self.compiler_args.clone())
    }

    fn clean_args(&self, options: CleanOptions) -> CallArgs {
        self.args()
            .flag(options.clean_cache)
            .flag(options.clean_by_product)
            .flag(options.force)
    }

    fn test_args(&self, options: &TestOptions) -> BuilderResult<CallArgs> {
        Ok(self.args().view(PayloadBuilder::test_view(options)?))
    }

    async fn call_text(&self, operation: &str, args: CallArgs) -> BuilderResult<String> {
        let payload = self.bridge.call(operation, args)?.await?;
        Ok(payload.into_text()?)
    }

    fn call_text_blocking(&self, operation: &str, args: CallArgs) -> BuilderResult<String> {
        let payload: Payload = self.bridge.call_blocking(operation, args)?;
        Ok(payload.into_text()?)
    }
}
