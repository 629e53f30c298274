use std::{error::Error, fmt, io, path::PathBuf};

use crate::error::BoxError;

/// The coordinator module's result type.
pub type Result<T> = std::result::Result<T, CoordinatorError>;

/// Failures reported by a `SwarmCoordinator`.
#[derive(Debug)]
pub enum CoordinatorError {
    /// The registry could not be reached.
    Unavailable(String),
    /// The registry refused to record a peer.
    Rejected { peer_id: String, reason: String },
    /// A file-backed registry failed.
    Registry(RegistryError),
    /// Any other client specific failure.
    Other(BoxError),
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "registry unavailable: {msg}"),
            Self::Rejected { peer_id, reason } => {
                write!(f, "registry rejected peer {peer_id}: {reason}")
            }
            Self::Registry(e) => write!(f, "{e}"),
            Self::Other(e) => write!(f, "{e}"),
        }
    }
}

impl Error for CoordinatorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<RegistryError> for CoordinatorError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

/// Failures of the JSON registry file.
#[derive(Debug)]
pub enum RegistryError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    ContractMismatch {
        expected: String,
        found: String,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "registry file {}: {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "invalid registry file {}: {source}", path.display())
            }
            Self::ContractMismatch { expected, found } => write!(
                f,
                "registry belongs to contract {found}, expected {expected}"
            ),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::ContractMismatch { .. } => None,
        }
    }
}
