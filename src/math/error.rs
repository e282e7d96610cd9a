// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient points for operation: expected at least {expected}, got {actual}")]
    InsufficientPoints { expected: usize, actual: usize },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("Triangulation failed: {reason}")]
    TriangulationFailed { reason: String },

    #[error("Geometric calculation failed: {operation}")]
    GeometricFailure { operation: String },

    #[error("Duplicate site #{index} at ({x}, {y}) collides with site #{existing}")]
    DuplicateSite {
        index: usize,
        existing: usize,
        x: f64,
        y: f64,
    },

    #[error("Inconsistent Voronoi diagram: {reason}")]
    InconsistentDiagram { reason: String },

    #[error("Region of site #{site} cannot be closed: only {vertex_count} vertices available")]
    UnclosableRegion { site: usize, vertex_count: usize },

    #[error("Projection error: {message}")]
    Projection { message: String },
}

pub type MathResult<T> = Result<T, MathError>;
