//! Common utilities shared by the polynav data model and query engine

mod geometry;

pub use geometry::*;

/// Represents a position in the plane
pub type Point = glam::DVec2;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid polygon map: {0}")]
    InvalidMesh(String),

    #[error("broken triangle adjacency: {0}")]
    BrokenAdjacency(String),
}

/// Result type for polynav operations
pub type Result<T> = std::result::Result<T, Error>;
