use std::path::{Path, PathBuf};

use bridge_abi::{ByteSliceView, UnmanagedVector};
use libloading::{Library, Symbol};
use tracing::debug;

use crate::args::Arg;
use crate::catalog::{self, NativeLibrary, OperationSpec, RELEASE_SYMBOL};
use crate::config::BridgeConfig;
use crate::error::{BridgeError, BridgeResult};
use crate::platform::library_file;

/// Seam between the adapter and whatever implements the native operations.
pub trait NativeModule: Send + Sync {
    /// Invokes `spec` with the error slot as the first out-parameter.
    ///
    /// On return the callee owns neither buffer any more; the caller releases
    /// both through [`NativeModule::release`].
    fn invoke(
        &self,
        spec: &OperationSpec,
        error: &mut UnmanagedVector,
        args: &[Arg<'_>],
    ) -> BridgeResult<UnmanagedVector>;

    /// Returns a callee-allocated vector to the library that produced it.
    fn release(&self, library: NativeLibrary, vector: UnmanagedVector);
}

type DestroyFn = unsafe extern "C" fn(UnmanagedVector);
type ViewFn =
    for<'a> unsafe extern "C" fn(*mut UnmanagedVector, ByteSliceView<'a>) -> UnmanagedVector;
type ViewViewFn = for<'a, 'b> unsafe extern "C" fn(
    *mut UnmanagedVector,
    ByteSliceView<'a>,
    ByteSliceView<'b>,
) -> UnmanagedVector;
type ViewFlagsFn = for<'a> unsafe extern "C" fn(
    *mut UnmanagedVector,
    ByteSliceView<'a>,
    bool,
    bool,
    bool,
) -> UnmanagedVector;
type ViewsFlagFn = for<'a, 'b, 'c> unsafe extern "C" fn(
    *mut UnmanagedVector,
    ByteSliceView<'a>,
    ByteSliceView<'b>,
    ByteSliceView<'c>,
    bool,
) -> UnmanagedVector;

struct LoadedLibrary {
    path: PathBuf,
    destroy: DestroyFn,
    library: Library,
}

impl LoadedLibrary {
    fn open(library: NativeLibrary, path: PathBuf) -> BridgeResult<Self> {
        let load_error = |reason: String| BridgeError::Load {
            path: path.clone(),
            reason,
        };
        // SAFETY: the libraries run no initialisers with preconditions on load.
        let handle = unsafe { Library::new(&path) }.map_err(|err| load_error(err.to_string()))?;
        // SAFETY: the release symbol has the `DestroyFn` signature in every library.
        let destroy = unsafe { handle.get::<DestroyFn>(RELEASE_SYMBOL.as_bytes()) }
            .map(|symbol| *symbol)
            .map_err(|err| load_error(err.to_string()))?;
        for spec in catalog::entries(library) {
            // SAFETY: only checks that the symbol exists; it is not called through this type.
            unsafe { handle.get::<unsafe extern "C" fn()>(spec.symbol.as_bytes()) }
                .map_err(|err| load_error(format!("missing symbol `{}`: {err}", spec.symbol)))?;
        }
        debug!(library = library.stem(), path = %path.display(), "loaded native library");
        Ok(Self {
            path,
            destroy,
            library: handle,
        })
    }

    /// # Safety
    /// `T` must be the C signature `symbol` was compiled with.
    unsafe fn symbol<T>(&self, symbol: &str) -> BridgeResult<Symbol<'_, T>> {
        // SAFETY: forwarded to the caller.
        unsafe { self.library.get::<T>(symbol.as_bytes()) }.map_err(|err| BridgeError::Load {
            path: self.path.clone(),
            reason: err.to_string(),
        })
    }
}

/// Native module backed by the platform shared libraries.
pub struct DynamicModule {
    compiler: LoadedLibrary,
    movevm: LoadedLibrary,
}

impl DynamicModule {
    /// Loads both libraries and checks every catalog symbol up front.
    ///
    /// An unsupported host fails before any library is opened, overrides or not.
    pub fn open(config: &BridgeConfig) -> BridgeResult<Self> {
        Self::open_on(config, std::env::consts::OS, std::env::consts::ARCH)
    }

    fn open_on(config: &BridgeConfig, os: &str, arch: &str) -> BridgeResult<Self> {
        for library in [NativeLibrary::Compiler, NativeLibrary::MoveVm] {
            library_file(library, os, arch)?;
        }
        Ok(Self {
            compiler: LoadedLibrary::open(
                NativeLibrary::Compiler,
                config.library_path(NativeLibrary::Compiler)?,
            )?,
            movevm: LoadedLibrary::open(
                NativeLibrary::MoveVm,
                config.library_path(NativeLibrary::MoveVm)?,
            )?,
        })
    }

    pub fn library_path(&self, library: NativeLibrary) -> &Path {
        &self.loaded(library).path
    }

    fn loaded(&self, library: NativeLibrary) -> &LoadedLibrary {
        match library {
            NativeLibrary::Compiler => &self.compiler,
            NativeLibrary::MoveVm => &self.movevm,
        }
    }
}

impl NativeModule for DynamicModule {
    fn invoke(
        &self,
        spec: &OperationSpec,
        error: &mut UnmanagedVector,
        args: &[Arg<'_>],
    ) -> BridgeResult<UnmanagedVector> {
        let library = self.loaded(spec.library);
        let symbol = spec.symbol;
        let error: *mut UnmanagedVector = error;
        // SAFETY: each arm calls the symbol with the signature the native library
        // exports for that argument shape. Views borrow caller memory that outlives
        // the call, and the error slot is a valid, armed out-parameter.
        unsafe {
            match *args {
                [Arg::View(a)] => {
                    let call = library.symbol::<ViewFn>(symbol)?;
                    Ok(call(error, a))
                }
                [Arg::View(a), Arg::View(b)] => {
                    let call = library.symbol::<ViewViewFn>(symbol)?;
                    Ok(call(error, a, b))
                }
                [Arg::View(a), Arg::Bool(b), Arg::Bool(c), Arg::Bool(d)] => {
                    let call = library.symbol::<ViewFlagsFn>(symbol)?;
                    Ok(call(error, a, b, c, d))
                }
                [Arg::View(a), Arg::View(b), Arg::View(c), Arg::Bool(d)] => {
                    let call = library.symbol::<ViewsFlagFn>(symbol)?;
                    Ok(call(error, a, b, c, d))
                }
                _ => Err(BridgeError::shape(format!(
                    "no native signature for `{}` with {} arguments",
                    spec.name,
                    args.len()
                ))),
            }
        }
    }

    fn release(&self, library: NativeLibrary, vector: UnmanagedVector) {
        // SAFETY: `vector` was produced by this library and is released once.
        unsafe { (self.loaded(library).destroy)(vector) }
    }
}
