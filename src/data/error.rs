//! Error types for data operations
//!
//! Provides unified error handling for file acquisition and CSV normalization.
//! Every error maps to one [`FailureKind`] and one generic user-facing message;
//! the `Display` text carries the specific detail for logs.

use crate::constants::{
    MSG_EMPTY_CSV, MSG_PROCESSING_FAILED, MSG_READ_FAILED, MSG_TOO_FEW_COLUMNS,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during data operations
#[derive(Error, Debug)]
pub enum DataError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is too large to read
    #[error("File too large: {size_mb}MB (max {max_mb}MB)")]
    TooLarge { size_mb: u64, max_mb: usize },

    /// The read never completed or its worker went away
    #[error("Read interrupted: {0}")]
    ReadInterrupted(String),

    /// No data rows after the header
    #[error("Empty file: no data rows")]
    EmptyInput,

    /// Fewer than two distinct header names
    #[error("Insufficient columns: found {found}, need at least 2")]
    InsufficientColumns { found: usize },

    /// Content is not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// CSV parsing error
    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

/// The classified failure kinds reported by the controller
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    /// The file could not be read at all
    AcquisitionFailure,
    /// Zero data rows
    EmptyInput,
    /// Fewer than two columns
    InsufficientColumns,
    /// Malformed content
    ParseFailure,
}

impl FailureKind {
    /// Generic message shown to the user for this kind
    pub fn user_message(&self) -> &'static str {
        match self {
            FailureKind::AcquisitionFailure => MSG_READ_FAILED,
            FailureKind::EmptyInput => MSG_EMPTY_CSV,
            FailureKind::InsufficientColumns => MSG_TOO_FEW_COLUMNS,
            FailureKind::ParseFailure => MSG_PROCESSING_FAILED,
        }
    }
}

impl DataError {
    pub fn kind(&self) -> FailureKind {
        match self {
            DataError::Io(_) | DataError::TooLarge { .. } | DataError::ReadInterrupted(_) => {
                FailureKind::AcquisitionFailure
            }
            DataError::EmptyInput => FailureKind::EmptyInput,
            DataError::InsufficientColumns { .. } => FailureKind::InsufficientColumns,
            DataError::Encoding(_) | DataError::Csv(_) => FailureKind::ParseFailure,
        }
    }

    pub fn user_message(&self) -> &'static str {
        self.kind().user_message()
    }
}
