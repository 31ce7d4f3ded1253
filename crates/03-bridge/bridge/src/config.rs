use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::catalog::NativeLibrary;
use crate::error::BridgeResult;
use crate::platform::host_library_file;

/// Default size of the worker pool serving asynchronous calls.
pub const DEFAULT_WORKERS: usize = 4;

/// Where the native libraries live and how many calls may run at once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Directory searched for platform-named library files.
    pub library_dir: PathBuf,
    /// Explicit compiler library path; relative paths resolve against `library_dir`.
    pub compiler_library: Option<PathBuf>,
    /// Explicit VM library path; relative paths resolve against `library_dir`.
    pub movevm_library: Option<PathBuf>,
    pub workers: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            library_dir: PathBuf::from("."),
            compiler_library: None,
            movevm_library: None,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl BridgeConfig {
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self {
            library_dir: library_dir.into(),
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Resolves the file to load for `library` on this host.
    pub fn library_path(&self, library: NativeLibrary) -> BridgeResult<PathBuf> {
        let explicit = match library {
            NativeLibrary::Compiler => self.compiler_library.as_ref(),
            NativeLibrary::MoveVm => self.movevm_library.as_ref(),
        };
        match explicit {
            Some(path) => Ok(self.library_dir.join(path)),
            None => Ok(self.library_dir.join(host_library_file(library)?)),
        }
    }
}
