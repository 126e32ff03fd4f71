//! Error types shared by the chart pipeline.

use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while validating input, building or exporting charts
#[derive(Debug, Error)]
pub enum ChartError {
    /// A risk level tag outside low/medium/high
    #[error("Unknown risk level: {tag:?}")]
    UnknownRiskLevel { tag: String },

    /// A required field was absent from an input record
    #[error("Record {index}: missing required field '{field}'")]
    MissingField { index: usize, field: &'static str },

    /// A date or timestamp that could not be parsed
    #[error("Record {index}: invalid date {value:?}")]
    InvalidDate { index: usize, value: String },

    /// A numeric field that is NaN or infinite
    #[error("Record {index}: field '{field}' is not a finite number")]
    InvalidValue { index: usize, field: &'static str },

    /// Layout dimensions that leave no drawing area
    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    /// Failed to read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write markup into a buffer
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// Failed to encode a raster image
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),

    /// Failed to build or save a PDF document
    #[error("PDF export failed: {0}")]
    Pdf(String),
}
