//! Unit tests for chart-uploader.

mod normalizer_tests;
mod snapshot_tests;
