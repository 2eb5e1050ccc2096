//! Run-level error taxonomy for the baseline job

use std::fmt;

#[derive(Debug)]
pub enum BaselineError {
    /// Malformed or contradictory invocation input. Raised before any store
    /// access.
    Validation(String),
    /// A required environment value is absent. Raised before any store
    /// access.
    Configuration(String),
    /// The store is unreachable or rejected a statement. Aborts the run.
    DataAccess(sqlx::Error),
    /// An artifact could not be written.
    Io(std::io::Error),
}

impl fmt::Display for BaselineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineError::Validation(msg) => write!(f, "invalid input: {}", msg),
            BaselineError::Configuration(msg) => write!(f, "configuration error: {}", msg),
            BaselineError::DataAccess(e) => write!(f, "event store error: {}", e),
            BaselineError::Io(e) => write!(f, "report write error: {}", e),
        }
    }
}

impl std::error::Error for BaselineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BaselineError::DataAccess(e) => Some(e),
            BaselineError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for BaselineError {
    fn from(err: sqlx::Error) -> Self {
        BaselineError::DataAccess(err)
    }
}

impl From<std::io::Error> for BaselineError {
    fn from(err: std::io::Error) -> Self {
        BaselineError::Io(err)
    }
}
