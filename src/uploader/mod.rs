//! Upload/selection controller.
//!
//! [`Uploader`] bridges file acquisition to the normalizer and routes results:
//!
//! - `acquisition` - background whole-file reads tagged with request ids
//! - `state` - the state struct and the pure transition function
//! - `sink` - the bar/line output channels
//!
//! All state changes happen on the caller's thread. Reads finish on worker
//! threads and are applied by [`Uploader::poll`] or [`Uploader::wait`]; a
//! result for anything but the latest request is dropped.

mod acquisition;
mod sink;
mod state;

pub use acquisition::*;
pub use sink::*;
pub use state::*;

use crate::settings::Settings;
use crate::types::{ChartKind, ChartOutput};
use std::path::PathBuf;
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors returned to the caller (as opposed to shown to the user)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploaderError {
    /// Files can only be supplied once a chart kind is chosen
    #[error("choose a chart kind before supplying a file")]
    NoChartKind,
}

pub struct Uploader<S: OutputSink> {
    state: UploaderState,
    reader: FileReader,
    sink: S,
    read_timeout: Duration,
}

impl<S: OutputSink> Uploader<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        Self {
            state: UploaderState::default(),
            reader: FileReader::new(settings.max_file_size_mb),
            sink,
            read_timeout: settings.read_timeout(),
        }
    }

    pub fn state(&self) -> &UploaderState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn chart_kind(&self) -> ChartKind {
        self.state.kind
    }

    pub fn output(&self) -> &ChartOutput {
        &self.state.output
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_pending(&self) -> bool {
        self.state.pending.is_some()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Choose the output target. Both channels are cleared first; a held
    /// file is re-normalized for the new kind without re-reading it.
    pub fn select_chart_kind(&mut self, kind: ChartKind) {
        info!(%kind, "chart kind selected");
        self.apply(UploaderEvent::KindSelected(kind));
    }

    /// Start reading a newly selected file in the background
    pub fn select_file(&mut self, path: impl Into<PathBuf>) -> Result<RequestId, UploaderError> {
        if !self.state.accepts_files() {
            return Err(UploaderError::NoChartKind);
        }
        let request = self.reader.start(path.into());
        self.apply(UploaderEvent::ReadStarted(request));
        Ok(request)
    }

    /// Supply file content directly and normalize it immediately
    pub fn load_file(&mut self, file: RawFile) -> Result<(), UploaderError> {
        if !self.state.accepts_files() {
            return Err(UploaderError::NoChartKind);
        }
        self.reader.supersede();
        info!(name = %file.name, bytes = file.len(), "file supplied");
        self.apply(UploaderEvent::FileProvided(file));
        Ok(())
    }

    /// Apply every finished read without blocking. Returns how many were handled.
    pub fn poll(&mut self) -> usize {
        let mut handled = 0;
        while let Some(completion) = self.reader.try_recv() {
            self.handle_completion(completion);
            handled += 1;
        }
        handled
    }

    /// Block until the pending read resolves or the read timeout elapses.
    ///
    /// A timeout is reported like any other read failure; a result that
    /// arrives afterwards is treated as stale.
    pub fn wait(&mut self) -> Phase {
        let deadline = Instant::now() + self.read_timeout;

        while let Some(request) = self.state.pending {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.reader.recv_timeout(remaining) {
                Ok(completion) => self.handle_completion(completion),
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    warn!(%request, timeout = ?self.read_timeout, "read did not complete");
                    self.reader.supersede();
                    self.handle_completion(Completion {
                        request,
                        result: Err(crate::data::DataError::ReadInterrupted(format!(
                            "no result after {:?}",
                            self.read_timeout
                        ))),
                    });
                }
            }
        }

        self.phase()
    }

    /// Feed a read result into the state machine
    pub fn handle_completion(&mut self, completion: Completion) {
        debug!(request = %completion.request, ok = completion.result.is_ok(), "read completed");
        self.apply(UploaderEvent::ReadCompleted(completion));
    }

    fn apply(&mut self, event: UploaderEvent) {
        let previous_error = self.state.error.clone();
        let Transition { state, effects } = transition(&self.state, event);
        self.state = state;

        for effect in effects {
            match effect {
                Effect::Publish(output) => {
                    debug!(channel = %output.kind(), "publishing output");
                    publish(&mut self.sink, &output);
                }
                Effect::ReportFailure { kind, detail } => {
                    warn!(?kind, %detail, "normalization failed");
                }
                Effect::DroppedStale(request) => {
                    warn!(%request, "dropping stale read result");
                }
            }
        }

        if self.state.error != previous_error {
            self.sink.on_error(self.state.error.as_deref());
        }
        if self.state.phase() == Phase::Populated {
            if let Some(series) = self.state.output.bar().or(self.state.output.line()) {
                info!(
                    points = series.len(),
                    non_numeric = series.non_numeric_count(),
                    "series published"
                );
            }
        }
    }
}
