//! Chart uploader: turns an uploaded CSV file into a bar or line chart series.
//!
//! - [`data`] parses delimited text and projects the first two columns into a
//!   [`types::ChartSeries`].
//! - [`uploader`] holds the chosen chart kind and the last file, reads new
//!   files in the background and publishes results to bar/line channels.

pub mod constants;
pub mod data;
pub mod perf;
pub mod settings;
pub mod types;
pub mod uploader;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Calling this twice is harmless.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
