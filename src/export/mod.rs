// src/export/mod.rs

pub mod geojson;

use crate::math::error::MathError;
use thiserror::Error;

pub use self::geojson::{Feature, FeatureCollection, FeatureProperties, Geometry, to_feature_collection};

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error while writing '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Nothing to export: the map has no cells")]
    EmptyMap,

    #[error("Coordinate conversion failed: {0}")]
    Math(#[from] MathError),
}

pub type ExportResult<T> = Result<T, ExportError>;
