//! Output channels.
//!
//! Collaborators receive results through an [`OutputSink`]: one callback per
//! chart channel plus an optional error-message callback.

use crate::types::{ChartOutput, ChartSeries};

/// Receives series for the bar and line channels
pub trait OutputSink {
    fn on_bar_data_load(&mut self, series: Option<&ChartSeries>);

    fn on_line_data_load(&mut self, series: Option<&ChartSeries>);

    /// Called whenever the user-facing error message changes
    fn on_error(&mut self, _message: Option<&str>) {}
}

/// Deliver an output: the other channel is cleared before the matching one is set.
pub fn publish<S: OutputSink + ?Sized>(sink: &mut S, output: &ChartOutput) {
    match output {
        ChartOutput::None => {
            sink.on_bar_data_load(None);
            sink.on_line_data_load(None);
        }
        ChartOutput::Bar(series) => {
            sink.on_line_data_load(None);
            sink.on_bar_data_load(Some(series));
        }
        ChartOutput::Line(series) => {
            sink.on_bar_data_load(None);
            sink.on_line_data_load(Some(series));
        }
    }
}

/// Adapts a pair of closures into a sink
pub struct CallbackSink<B, L>
where
    B: FnMut(Option<&ChartSeries>),
    L: FnMut(Option<&ChartSeries>),
{
    on_bar: B,
    on_line: L,
}

impl<B, L> CallbackSink<B, L>
where
    B: FnMut(Option<&ChartSeries>),
    L: FnMut(Option<&ChartSeries>),
{
    pub fn new(on_bar: B, on_line: L) -> Self {
        Self { on_bar, on_line }
    }
}

impl<B, L> OutputSink for CallbackSink<B, L>
where
    B: FnMut(Option<&ChartSeries>),
    L: FnMut(Option<&ChartSeries>),
{
    fn on_bar_data_load(&mut self, series: Option<&ChartSeries>) {
        (self.on_bar)(series)
    }

    fn on_line_data_load(&mut self, series: Option<&ChartSeries>) {
        (self.on_line)(series)
    }
}

/// Sink that keeps the latest value of each channel
#[derive(Clone, Debug, Default)]
pub struct LatestSink {
    pub bar: Option<ChartSeries>,
    pub line: Option<ChartSeries>,
    pub error: Option<String>,
}

impl OutputSink for LatestSink {
    fn on_bar_data_load(&mut self, series: Option<&ChartSeries>) {
        self.bar = series.cloned();
    }

    fn on_line_data_load(&mut self, series: Option<&ChartSeries>) {
        self.line = series.cloned();
    }

    fn on_error(&mut self, message: Option<&str>) {
        self.error = message.map(str::to_string);
    }
}
