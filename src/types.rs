//! Core types shared by the normalizer and the upload controller.
//!
//! This module defines the chart kind selector, the normalized series handed
//! to chart renderers, and the single tagged output slot that replaces the
//! pair of bar/line channels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Chart Kind
// ============================================================================

/// The output target chosen by the user
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Nothing chosen yet; no file control is offered
    #[default]
    Unset,
    Bar,
    Line,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Unset => "Select a chart type",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Line => "Line Chart",
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, ChartKind::Unset)
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ChartKind::Unset => "unset",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
        };
        f.write_str(s)
    }
}

/// Returned when a chart kind string is not one of `bar`, `line` or `unset`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown chart kind '{0}' (expected bar, line or unset)")]
pub struct ParseChartKindError(pub String);

impl FromStr for ChartKind {
    type Err = ParseChartKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "unset" => Ok(ChartKind::Unset),
            "bar" => Ok(ChartKind::Bar),
            "line" => Ok(ChartKind::Line),
            other => Err(ParseChartKindError(other.to_string())),
        }
    }
}

// ============================================================================
// Chart Series
// ============================================================================

/// A single x/y pair. `y` may be NaN when the source cell was not numeric.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Raw first-column cell
    pub x: String,
    /// Coerced second-column cell
    pub y: f64,
}

impl SeriesPoint {
    pub fn new(x: impl Into<String>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// Normalized data plus axis labels produced from one uploaded file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    /// First column header
    pub x_axis_label: String,
    /// Second column header
    pub y_axis_label: String,
    /// One point per data row, in file order
    pub values: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Minimum and maximum of the finite `y` values, for axis scaling.
    ///
    /// Returns `None` when no point carries a finite value.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .map(|p| p.y)
            .filter(|y| y.is_finite())
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((min, max)) => Some((min.min(y), max.max(y))),
            })
    }

    /// Number of points whose `y` is NaN
    pub fn non_numeric_count(&self) -> usize {
        self.values.iter().filter(|p| p.y.is_nan()).count()
    }
}

// ============================================================================
// Chart Output
// ============================================================================

/// The single output slot. At most one channel can hold a series.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ChartOutput {
    #[default]
    None,
    Bar(ChartSeries),
    Line(ChartSeries),
}

impl ChartOutput {
    /// Route a series to the channel matching `kind`
    pub fn for_kind(kind: ChartKind, series: ChartSeries) -> Self {
        match kind {
            ChartKind::Bar => ChartOutput::Bar(series),
            ChartKind::Line => ChartOutput::Line(series),
            ChartKind::Unset => ChartOutput::None,
        }
    }

    pub fn bar(&self) -> Option<&ChartSeries> {
        match self {
            ChartOutput::Bar(series) => Some(series),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<&ChartSeries> {
        match self {
            ChartOutput::Line(series) => Some(series),
            _ => None,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ChartOutput::None)
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartOutput::None => ChartKind::Unset,
            ChartOutput::Bar(_) => ChartKind::Bar,
            ChartOutput::Line(_) => ChartKind::Line,
        }
    }
}

// ============================================================================
// Delimited Format
// ============================================================================

/// Declared kind of an uploaded file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DelimitedFormat {
    #[default]
    Csv,
    Tsv,
}

impl DelimitedFormat {
    pub fn delimiter(&self) -> u8 {
        match self {
            DelimitedFormat::Csv => b',',
            DelimitedFormat::Tsv => b'\t',
        }
    }

    /// Detect the format from a file name's extension.
    ///
    /// Anything that is not a known tab-delimited extension is read as CSV.
    pub fn from_file_name(name: &str) -> Self {
        let ext = std::path::Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext {
            Some(ext) if crate::constants::TSV_EXTENSIONS.contains(&ext.as_str()) => {
                DelimitedFormat::Tsv
            }
            _ => DelimitedFormat::Csv,
        }
    }
}
