//! Performance timing utilities.
//!
//! Scoped timers that report slow file reads and slow normalization through
//! `tracing`. With the `profiling` feature every timed scope is traced, not
//! just the slow ones.
//!
//! ```ignore
//! use chart_uploader::profile_scope;
//!
//! fn normalize() {
//!     profile_scope!("normalize_csv");
//!     // ... work ...
//! }
//! ```

use crate::constants::NORMALIZE_WARN_MS;
use std::time::Instant;
#[cfg(feature = "profiling")]
use tracing::trace;
use tracing::warn;

/// Time a scope with the given name, warning when it runs past the threshold.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        let _timer = $crate::perf::ScopedTimer::with_default_threshold($name);
    };
    ($name:expr, $threshold_ms:expr) => {
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
    };
}

pub use profile_scope;

/// A scoped timer that logs duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    /// Create a new scoped timer with a warning threshold.
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Create a timer with the normalization threshold.
    pub fn with_default_threshold(name: &'static str) -> Self {
        Self::new(name, NORMALIZE_WARN_MS)
    }

    /// Get elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        #[cfg(feature = "profiling")]
        trace!("[PERF] {}: {:.2}ms", self.name, elapsed_ms);

        if elapsed_ms > self.threshold_ms {
            warn!(
                operation = self.name,
                elapsed_ms = format!("{:.2}", elapsed_ms),
                threshold_ms = format!("{:.2}", self.threshold_ms),
                "Slow operation"
            );
        }
    }
}

/// Measure execution time of a closure and return both the result and elapsed time.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    (result, elapsed_ms)
}
