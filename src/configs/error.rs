use std::{error::Error, fmt, io, path::PathBuf};

/// The configs module's result type.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Invalid or unreadable configuration, caught before any coordinator is built.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Both a wallet key and an organization id were given.
    ConflictingIdentity,
    /// Neither a wallet key nor an organization id was given.
    MissingIdentity,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read '{}': {source}", path.display()),
            Self::Json { path, source } => write!(f, "invalid JSON in '{}': {source}", path.display()),
            Self::ConflictingIdentity => {
                f.write_str("wallet private key and organization id are mutually exclusive")
            }
            Self::MissingIdentity => {
                f.write_str("either a wallet private key or an organization id is required")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
