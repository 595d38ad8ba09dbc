//! Uploader state and its transitions.
//!
//! All state lives in one [`UploaderState`]. [`transition`] is a pure function
//! from `(state, event)` to the next state plus the effects the controller must
//! carry out (publishing output, reporting failures). It never touches the
//! filesystem or the sink, so it can be driven directly in tests.

use super::acquisition::{Completion, RawFile, RequestId};
use crate::data::{DataError, FailureKind, normalize_bytes};
use crate::types::{ChartKind, ChartOutput};

/// Observable phases, derived from the state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No chart kind chosen; no file control is offered
    Idle,
    /// Chart kind chosen, nothing normalized yet
    AwaitingFile,
    /// A series is published on the matching channel
    Populated,
    /// The last attempt failed; the error message is set
    Errored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UploaderState {
    pub kind: ChartKind,
    /// The last supplied file, kept so a kind switch can re-normalize it
    pub file: Option<RawFile>,
    pub output: ChartOutput,
    /// User-facing message; `None` means no error
    pub error: Option<String>,
    pub last_failure: Option<FailureKind>,
    /// The read whose result we are waiting for
    pub pending: Option<RequestId>,
}

impl UploaderState {
    pub fn phase(&self) -> Phase {
        if !self.kind.is_set() {
            Phase::Idle
        } else if self.error.is_some() {
            Phase::Errored
        } else if !self.output.is_none() {
            Phase::Populated
        } else {
            Phase::AwaitingFile
        }
    }

    /// Whether a file control should be offered
    pub fn accepts_files(&self) -> bool {
        self.kind.is_set()
    }
}

/// Inputs that drive the state machine
#[derive(Debug)]
pub enum UploaderEvent {
    /// The user picked a chart kind (possibly `Unset`)
    KindSelected(ChartKind),
    /// A background read was started for a new selection
    ReadStarted(RequestId),
    /// A background read finished
    ReadCompleted(Completion),
    /// File content supplied directly, without a background read
    FileProvided(RawFile),
}

/// Work the controller performs after a transition, in order
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Clear both channels, then set the one matching the output (if any)
    Publish(ChartOutput),
    /// Log a failure with its specific detail
    ReportFailure { kind: FailureKind, detail: String },
    /// A completion arrived for a request that is no longer the latest
    DroppedStale(RequestId),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: UploaderState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: UploaderState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Compute the next state for an event
pub fn transition(state: &UploaderState, event: UploaderEvent) -> Transition {
    let mut next = Transition::new(state.clone());

    match event {
        UploaderEvent::KindSelected(kind) => {
            next.state.kind = kind;
            next.state.output = ChartOutput::None;
            next.effects.push(Effect::Publish(ChartOutput::None));
            normalize_held(&mut next);
        }
        UploaderEvent::ReadStarted(request) => {
            // The new selection replaces the held file before its bytes arrive
            next.state.pending = Some(request);
            next.state.file = None;
        }
        UploaderEvent::ReadCompleted(Completion { request, result }) => {
            if next.state.pending != Some(request) {
                next.effects.push(Effect::DroppedStale(request));
                return next;
            }
            next.state.pending = None;
            match result {
                Ok(file) => {
                    next.state.file = Some(file);
                    normalize_held(&mut next);
                }
                Err(err) => {
                    // The unreadable selection still replaces the old file
                    next.state.file = None;
                    fail(&mut next, &err);
                }
            }
        }
        UploaderEvent::FileProvided(file) => {
            next.state.pending = None;
            next.state.file = Some(file);
            normalize_held(&mut next);
        }
    }

    next
}

/// Normalize the held file for the current kind, if both are present
fn normalize_held(next: &mut Transition) {
    let kind = next.state.kind;
    if !kind.is_set() {
        return;
    }
    let Some(file) = next.state.file.as_ref() else {
        return;
    };

    match normalize_bytes(&file.bytes, file.format) {
        Ok(series) => {
            let output = ChartOutput::for_kind(kind, series);
            next.state.output = output.clone();
            next.state.error = None;
            next.state.last_failure = None;
            next.effects.push(Effect::Publish(output));
        }
        Err(err) => fail(next, &err),
    }
}

fn fail(next: &mut Transition, err: &DataError) {
    let kind = err.kind();
    next.state.output = ChartOutput::None;
    next.state.error = Some(kind.user_message().to_string());
    next.state.last_failure = Some(kind);
    next.effects.push(Effect::Publish(ChartOutput::None));
    next.effects.push(Effect::ReportFailure {
        kind,
        detail: err.to_string(),
    });
}
