//! Error types for grid queries

/// Errors raised before a query starts producing results
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("Invalid coordinate '{0}', expected \"q,r\"")]
    InvalidCoordinate(String),
}

pub type Result<T> = std::result::Result<T, GridError>;
