//! Error types for block record conversion
//!
//! Every error is fatal to the run: the pipeline has no local recovery,
//! so callers should treat any `Err` as "no usable output was produced".

use std::io;
use thiserror::Error;

/// Errors that can occur while building or persisting block records
#[derive(Debug, Error)]
pub enum CorpusError {
    /// IO error (destination unwritable, disk full, ...)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Image decode or PNG encode failure
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Bounding box is empty or extends past the page image bounds
    #[error("invalid bounding box: {reason}")]
    InvalidBBox {
        /// What is wrong with the box, including the offending coordinates
        reason: String,
    },

    /// `category_id` does not index the fixed category table
    #[error("category id {category_id} is outside the category table (0..={max})")]
    UnknownCategory {
        /// The out-of-range id found on the object record
        category_id: i64,
        /// Largest valid id
        max: usize,
    },

    /// JSON serialization of `extended_fields` or OCR cells failed
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow record batch construction failed
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet write failure
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}

/// Result type for corpus conversion operations
pub type Result<T> = std::result::Result<T, CorpusError>;
