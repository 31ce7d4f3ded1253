use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{BuilderError, BuilderResult};

const MANIFEST_FILE: &str = "Move.toml";
const BYTECODE_MODULES: (&str, &str) = ("bytecode_modules", "mv");
const BYTECODE_SCRIPTS: (&str, &str) = ("bytecode_scripts", "mv");
const SOURCE_MAPS: (&str, &str) = ("source_maps", "mvsm");

#[derive(Deserialize)]
struct Manifest {
    package: ManifestPackage,
}

#[derive(Deserialize)]
struct ManifestPackage {
    name: String,
}

/// Read access to `build/<package>/` under a package directory.
#[derive(Clone, Debug)]
pub struct PackageArtifacts {
    package_path: PathBuf,
}

impl PackageArtifacts {
    pub fn new(package_path: impl Into<PathBuf>) -> Self {
        Self {
            package_path: package_path.into(),
        }
    }

    /// `[package].name` from `Move.toml`.
    pub fn package_name(&self) -> BuilderResult<String> {
        let path = self.package_path.join(MANIFEST_FILE);
        let text = fs::read_to_string(&path).map_err(|source| BuilderError::io(&path, source))?;
        let manifest: Manifest = toml::from_str(&text).map_err(|err| BuilderError::Manifest {
            path: path.clone(),
            reason: err.message().to_owned(),
        })?;
        let name = manifest.package.name;
        if name.is_empty() {
            return Err(BuilderError::Manifest {
                path,
                reason: "empty package name".to_owned(),
            });
        }
        if !is_package_name(&name) {
            return Err(BuilderError::Manifest {
                path,
                reason: "invalid package name".to_owned(),
            });
        }
        Ok(name)
    }

    /// Compiled modules keyed by module name.
    pub fn modules(&self) -> BuilderResult<BTreeMap<String, Vec<u8>>> {
        self.read_all(BYTECODE_MODULES)
    }

    pub fn module(&self, name: &str) -> BuilderResult<Vec<u8>> {
        take(self.modules()?, "bytecode", name)
    }

    /// Compiled scripts keyed by script name.
    pub fn scripts(&self) -> BuilderResult<BTreeMap<String, Vec<u8>>> {
        self.read_all(BYTECODE_SCRIPTS)
    }

    pub fn script(&self, name: &str) -> BuilderResult<Vec<u8>> {
        take(self.scripts()?, "script bytecode", name)
    }

    pub fn source_maps(&self) -> BuilderResult<BTreeMap<String, Vec<u8>>> {
        self.read_all(SOURCE_MAPS)
    }

    pub fn source_map(&self, name: &str) -> BuilderResult<Vec<u8>> {
        take(self.source_maps()?, "source map", name)
    }

    fn build_dir(&self) -> BuilderResult<PathBuf> {
        Ok(self.package_path.join("build").join(self.package_name()?))
    }

    fn read_all(
        &self,
        (subdir, extension): (&str, &'static str),
    ) -> BuilderResult<BTreeMap<String, Vec<u8>>> {
        let dir = self.build_dir()?.join(subdir);
        let entries = fs::read_dir(&dir).map_err(|source| BuilderError::io(&dir, source))?;
        let mut files = BTreeMap::new();
        for entry in entries {
            let path = entry.map_err(|source| BuilderError::io(&dir, source))?.path();
            let Some(name) = artifact_name(&path, extension) else {
                continue;
            };
            let bytes = fs::read(&path).map_err(|source| BuilderError::io(&path, source))?;
            files.insert(name, bytes);
        }
        if files.is_empty() {
            return Err(BuilderError::NoArtifacts { dir, extension });
        }
        debug!(dir = %dir.display(), count = files.len(), "read build artifacts");
        Ok(files)
    }
}

/// Package names are plain identifiers so they cannot leave `build/`.
fn is_package_name(name: &str) -> bool {
    name.bytes().all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

fn artifact_name(path: &Path, extension: &str) -> Option<String> {
    if !path.is_file() || path.extension()? != extension {
        return None;
    }
    path.file_stem()?.to_str().map(str::to_owned)
}

fn take(
    mut files: BTreeMap<String, Vec<u8>>,
    kind: &'static str,
    name: &str,
) -> BuilderResult<Vec<u8>> {
    files
        .remove(name)
        .ok_or_else(|| BuilderError::MissingArtifact {
            kind,
            name: name.to_owned(),
        })
}
