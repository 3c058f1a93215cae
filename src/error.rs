//! Error types for Headache Insights
//!
//! The analysis core itself never fails: sparse or missing data degrades to an
//! absent value. These errors only arise at the edges, when decoding host input,
//! loading configuration, or encoding output.

use thiserror::Error;

/// Errors that can occur while decoding input or encoding output
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse episode payload: {0}")]
    ParseError(String),

    #[error("Invalid severity {0}: must be between 1 and 5")]
    InvalidSeverity(u8),

    #[error("Invalid rating for {field}: {value} (expected 1-5)")]
    InvalidRating { field: &'static str, value: u8 },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
