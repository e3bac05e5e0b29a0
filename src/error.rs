use thiserror::Error;

/// Top-level error type for the planekit geometry kernel.
#[derive(Debug, Error)]
pub enum PlanekitError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised while constructing geometric primitives.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by classification and assembly operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("segments do not close into a loop within {max_iterations} iterations")]
    NonClosableLoop { max_iterations: usize },

    #[error("invalid precondition: {0}")]
    InvalidPrecondition(String),

    #[error("ambiguous geometry: {0}")]
    AmbiguousGeometry(String),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),
}

/// Convenience type alias for results using [`PlanekitError`].
pub type Result<T> = std::result::Result<T, PlanekitError>;
