//! Test helpers for reducing boilerplate in tests.
//!
//! This module provides:
//! - `RecordingSink` - an `OutputSink` that records every callback in order
//! - `CsvFixture` - writes CSV content into a temporary directory
//! - `uploader_with()` - builds an uploader with test settings

use chart_uploader::settings::Settings;
use chart_uploader::types::{ChartKind, ChartSeries};
use chart_uploader::uploader::{OutputSink, Uploader};
use std::path::PathBuf;
use tempfile::TempDir;

/// One observed callback
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Bar(Option<ChartSeries>),
    Line(Option<ChartSeries>),
    Error(Option<String>),
}

/// Records every callback so tests can assert on order and content
#[derive(Default)]
pub struct RecordingSink {
    pub calls: Vec<Call>,
}

impl RecordingSink {
    /// Latest value delivered on the bar channel
    pub fn bar(&self) -> Option<&ChartSeries> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Bar(s) => Some(s.as_ref()),
            _ => None,
        })?
    }

    /// Latest value delivered on the line channel
    pub fn line(&self) -> Option<&ChartSeries> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Line(s) => Some(s.as_ref()),
            _ => None,
        })?
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl OutputSink for RecordingSink {
    fn on_bar_data_load(&mut self, series: Option<&ChartSeries>) {
        self.calls.push(Call::Bar(series.cloned()));
    }

    fn on_line_data_load(&mut self, series: Option<&ChartSeries>) {
        self.calls.push(Call::Line(series.cloned()));
    }

    fn on_error(&mut self, message: Option<&str>) {
        self.calls.push(Call::Error(message.map(str::to_string)));
    }
}

/// Temporary directory holding CSV fixtures
pub struct CsvFixture {
    dir: TempDir,
}

impl CsvFixture {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Write `content` to `name` and return its path
    pub fn write(&self, name: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

/// Settings with a short read timeout so failures surface quickly
pub fn test_settings() -> Settings {
    Settings {
        read_timeout_secs: 5,
        ..Settings::default()
    }
}

/// An uploader recording into a fresh sink, with `kind` already chosen
pub fn uploader_with(kind: ChartKind) -> Uploader<RecordingSink> {
    let mut uploader = Uploader::new(RecordingSink::default(), &test_settings());
    uploader.select_chart_kind(kind);
    uploader.sink_mut().clear();
    uploader
}

pub const FRUIT_CSV: &str = "name,value\nApple,5\nBanana,7";
