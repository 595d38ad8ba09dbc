//! Application-wide constants.
//!
//! Centralizes user-facing messages and limits so the controller and the
//! command-line host agree on them.

// ============================================================================
// User-Facing Messages
// ============================================================================

/// Shown when the selected file could not be read at all
pub const MSG_READ_FAILED: &str = "Error reading file";

/// Shown when the file has a header but no data rows (or nothing at all)
pub const MSG_EMPTY_CSV: &str = "The CSV file is empty";

/// Shown when fewer than two distinct columns are present
pub const MSG_TOO_FEW_COLUMNS: &str = "CSV must have at least two columns";

/// Shown for any other parse failure
pub const MSG_PROCESSING_FAILED: &str = "Error processing CSV file";

/// Help text offered next to the file control
pub const UPLOAD_HINT: &str = "Upload a CSV file with two columns: first column for labels, second column for numeric values";

// ============================================================================
// Limits
// ============================================================================

/// Default maximum file size accepted for reading, in megabytes
pub const DEFAULT_MAX_FILE_SIZE_MB: usize = 100;

/// Default time to wait for a pending read before giving up, in seconds
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 10;

/// Slow-normalization warning threshold in milliseconds
pub const NORMALIZE_WARN_MS: f64 = 250.0;

// ============================================================================
// File Formats
// ============================================================================

/// Extensions treated as tab-delimited
pub const TSV_EXTENSIONS: &[&str] = &["tsv", "tab"];

/// Name of the settings directory under the platform config dir
pub const SETTINGS_DIR_NAME: &str = "chart-uploader";

/// Environment variable overriding the settings file location
pub const SETTINGS_PATH_ENV: &str = "CHART_UPLOADER_SETTINGS";
