use std::path::PathBuf;

use bridge::{BridgeError, ErrorKind};
use payload_codec::CodecError;
use thiserror::Error;

pub type BuilderResult<T> = Result<T, BuilderError>;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("payload error: {0}")]
    Codec(#[from] CodecError),

    /// A native response that is not the expected JSON record.
    #[error("malformed {what} record: {source}")]
    Record {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("package path {} is not valid utf-8", .0.display())]
    PackagePath(PathBuf),

    #[error("invalid manifest {}: {reason}", path.display())]
    Manifest { path: PathBuf, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no `.{extension}` files in {}", dir.display())]
    NoArtifacts { dir: PathBuf, extension: &'static str },

    #[error("{kind} for module {name} not found")]
    MissingArtifact { kind: &'static str, name: String },
}

impl BuilderError {
    /// Bridge failure kind, when the error came from a native call or from an
    /// argument that could not be shaped for one.
    pub fn bridge_kind(&self) -> Option<ErrorKind> {
        match self {
            BuilderError::Bridge(err) => Some(err.kind()),
            BuilderError::Codec(CodecError::Address { .. } | CodecError::Serialize { .. }) => {
                Some(ErrorKind::ShapeMismatch)
            }
            _ => None,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuilderError::Io {
            path: path.into(),
            source,
        }
    }
}
