//! Data parsing and normalization
//!
//! This module turns uploaded delimited text into the [`ChartSeries`] shape
//! consumed by bar and line renderers.
//!
//! ## Error Handling
//!
//! All data operations return `DataResult<T>` which uses the `DataError` type.
//! Each error classifies into a [`FailureKind`]:
//! - `AcquisitionFailure`: the file could not be read (`Io`, `TooLarge`)
//! - `EmptyInput`: no data rows
//! - `InsufficientColumns`: fewer than two distinct headers
//! - `ParseFailure`: malformed CSV or invalid UTF-8
//!
//! [`ChartSeries`]: crate::types::ChartSeries

mod coerce;
mod csv_parser;
mod error;

pub use coerce::*;
pub use csv_parser::*;
pub use error::*;
