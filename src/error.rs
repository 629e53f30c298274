use std::{error::Error, fmt};

use crate::coordinator::CoordinatorError;

/// The runner module's result type.
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Boxed error produced by collaborators this crate does not own.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Coordinator-backed runner failures.
#[derive(Debug)]
pub enum RunnerError {
    /// The coordinator rejected or failed a query. Carried as-is.
    Coordinator(CoordinatorError),
    /// The base runner could not bring up the DHT.
    Dht(BoxError),
    /// The base runner failed while training.
    Training(BoxError),
    /// The coordinator was already released by a previous `run`.
    CoordinatorReleased,
}

impl RunnerError {
    /// Wraps a DHT construction failure coming from a base runner.
    pub fn dht<E: Into<BoxError>>(err: E) -> Self {
        Self::Dht(err.into())
    }

    /// Wraps a training failure coming from a base runner.
    pub fn training<E: Into<BoxError>>(err: E) -> Self {
        Self::Training(err.into())
    }
}

impl fmt::Display for RunnerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coordinator(e) => write!(f, "coordinator error: {e}"),
            Self::Dht(e) => write!(f, "dht setup failed: {e}"),
            Self::Training(e) => write!(f, "training failed: {e}"),
            Self::CoordinatorReleased => f.write_str("coordinator has already been released"),
        }
    }
}

impl Error for RunnerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Coordinator(e) => Some(e),
            Self::Dht(e) | Self::Training(e) => Some(e.as_ref()),
            Self::CoordinatorReleased => None,
        }
    }
}

impl From<CoordinatorError> for RunnerError {
    fn from(value: CoordinatorError) -> Self {
        Self::Coordinator(value)
    }
}
