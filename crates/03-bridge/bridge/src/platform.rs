//! Host platform to native library file name.

use crate::catalog::NativeLibrary;
use crate::error::{BridgeError, BridgeResult};

/// File name of `library` for the given `os`/`arch` pair.
///
/// The set of supported hosts is closed; anything else is rejected.
pub fn library_file(library: NativeLibrary, os: &str, arch: &str) -> BridgeResult<String> {
    let stem = library.stem();
    match (os, arch) {
        ("macos", _) => Ok(format!("lib{stem}.dylib")),
        ("linux", "aarch64") => Ok(format!("lib{stem}.aarch64.so")),
        ("linux", "x86_64") => Ok(format!("lib{stem}.x86_64.so")),
        _ => Err(BridgeError::UnsupportedPlatform {
            os: os.to_owned(),
            arch: arch.to_owned(),
        }),
    }
}

/// File name of `library` for the running host.
pub fn host_library_file(library: NativeLibrary) -> BridgeResult<String> {
    library_file(library, std::env::consts::OS, std::env::consts::ARCH)
}
