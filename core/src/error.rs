// core/src/error.rs
use std::fmt;
use thiserror::Error;

/// Failure raised by a persistence gateway.
///
/// "Not found" is never an error at this layer; lookups return `Option`.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored data is inconsistent: {0}")]
    Inconsistent(String),

    #[error("No identifiers left for {0}")]
    IdsExhausted(&'static str),
}

pub type RepositoryResult<T, E = RepositoryError> = std::result::Result<T, E>;

/// A single broken field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Path of the offending field, e.g. `name` or `orders[1].status`.
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every violation found on one payload, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Arguments not valid")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn has_violation_on(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}
