//src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SintaxError {
    /// A reference annotation that does not yield exactly seven tax fields.
    #[error("Malformed lineage for ASV '{asv}': {reason} (annotation: '{annotation}')")]
    MalformedLineage {
        asv: String,
        annotation: String,
        reason: String,
    },

    /// A hit table row that cannot be parsed into a `HitRecord`.
    #[error("Malformed hit table row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Threshold {0} must be within [0, 1]")]
    InvalidThreshold(f64),

    #[error("Input table does not exist or is not a file: {}", .0.display())]
    MissingInput(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SintaxError>;
