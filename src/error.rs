use thiserror::Error;

/// Top-level error type for the Vastulis layout kernel.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Placement(#[from] PlacementError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Errors raised when boundary input fails validation.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("dimension {dimension} = {value} must be positive and finite")]
    NonPositiveDimension { dimension: &'static str, value: f64 },

    #[error("room request list is empty")]
    EmptyRequestList,

    #[error("room {label}: target area {area} must be positive and finite")]
    InvalidTargetArea { label: String, area: f64 },

    #[error("non-finite coordinate in {context}")]
    NonFiniteCoordinate { context: String },
}

/// Errors related to wall topology operations.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to placement and template operations.
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("resize rejected: {0}")]
    ResizeRejected(String),
}

/// Errors raised when restoring snapshots or ingesting external candidates.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(String),

    #[error("malformed candidate layout: {0}")]
    MalformedCandidate(String),

    #[error(transparent)]
    Encoding(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`LayoutError`].
pub type Result<T> = std::result::Result<T, LayoutError>;
