use anyhow::{Context, Result, bail};
use chart_uploader::constants::UPLOAD_HINT;
use chart_uploader::settings::Settings;
use chart_uploader::types::{ChartKind, ChartSeries};
use chart_uploader::uploader::{OutputSink, Phase, Uploader};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

/// Prints every channel callback as one line of JSON on stdout
struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    fn emit(&mut self, channel: &str, series: Option<&ChartSeries>) {
        let json = series
            .and_then(|s| serde_json::to_string(s).ok())
            .unwrap_or_else(|| "null".to_string());
        if let Err(e) = writeln!(self.out, "{channel} {json}") {
            warn!(channel, error = %e, "failed to write channel output");
        }
    }
}

impl<W: Write> OutputSink for ConsoleSink<W> {
    fn on_bar_data_load(&mut self, series: Option<&ChartSeries>) {
        self.emit("onBarDataLoad", series);
    }

    fn on_line_data_load(&mut self, series: Option<&ChartSeries>) {
        self.emit("onLineDataLoad", series);
    }

    fn on_error(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("error: {message}");
        }
    }
}

fn usage() -> String {
    format!(
        "usage: chart-uploader <bar|line> <FILE> [<bar|line|unset>...]\n\n{UPLOAD_HINT}"
    )
}

fn main() -> Result<()> {
    // Logging comes up first so settings problems are reported
    let loaded = Settings::try_load();
    let log_filter = match &loaded {
        Ok(settings) => settings.log_filter.clone(),
        Err(_) => Settings::default().log_filter,
    };
    chart_uploader::init_logging(&log_filter);
    let settings = loaded.unwrap_or_else(|e| {
        warn!(error = %e, "unusable settings, using defaults");
        Settings::default()
    });

    let mut args = std::env::args().skip(1);
    let Some(first) = args.next() else {
        bail!(usage());
    };
    if first == "-h" || first == "--help" {
        println!("{}", usage());
        return Ok(());
    }

    let kind: ChartKind = first.parse().context("invalid chart kind")?;
    let path = PathBuf::from(args.next().with_context(usage)?);
    let switches = args
        .map(|a| a.parse::<ChartKind>())
        .collect::<Result<Vec<_>, _>>()
        .context("invalid chart kind switch")?;

    let stdout = std::io::stdout().lock();
    let mut uploader = Uploader::new(ConsoleSink { out: stdout }, &settings);

    uploader.select_chart_kind(kind);
    uploader
        .select_file(&path)
        .with_context(|| format!("cannot upload {}", path.display()))?;
    uploader.wait();

    for next in switches {
        uploader.select_chart_kind(next);
    }

    info!(phase = ?uploader.phase(), "done");
    if uploader.phase() == Phase::Errored {
        std::process::exit(1);
    }
    Ok(())
}
