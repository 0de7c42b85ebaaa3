//! Error types shared across the U-Flight crates.

use thiserror::Error;

/// Errors produced by survey planning, tour optimization and trajectory I/O.
#[derive(Debug, Error)]
pub enum Error {
    /// A planner or optimizer parameter is out of its valid range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An ordering is not a permutation of the waypoint indices.
    #[error("invalid permutation: {0}")]
    InvalidPermutation(String),

    /// A waypoint position contains NaN or infinite coordinates.
    #[error("position {0} has non-finite coordinates")]
    NonFinitePosition(usize),

    /// A trajectory file does not follow the record layout.
    #[error("malformed trajectory data: {0}")]
    Format(String),

    /// The proxy mesh could not be read or has no usable vertices.
    #[error("could not load mesh: {0}")]
    MeshLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
