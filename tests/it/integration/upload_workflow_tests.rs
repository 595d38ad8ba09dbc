//! Upload Workflow Integration Tests

use crate::helpers::{CsvFixture, FRUIT_CSV, RecordingSink, uploader_with, test_settings, Call};
use chart_uploader::data::FailureKind;
use chart_uploader::types::{ChartKind, SeriesPoint};
use chart_uploader::uploader::{Phase, RawFile, Uploader, UploaderError};

#[test]
fn test_bar_upload_from_disk() {
    let fixture = CsvFixture::new();
    let path = fixture.write("fruit.csv", FRUIT_CSV);

    let mut uploader = uploader_with(ChartKind::Bar);
    uploader.select_file(&path).unwrap();
    assert!(uploader.is_pending());
    assert_eq!(uploader.wait(), Phase::Populated);

    let sink = uploader.sink();
    let bar = sink.bar().unwrap();
    assert_eq!(bar.x_axis_label, "name");
    assert_eq!(bar.y_axis_label, "value");
    assert_eq!(
        bar.values,
        vec![SeriesPoint::new("Apple", 5.0), SeriesPoint::new("Banana", 7.0)]
    );
    assert!(sink.line().is_none());
    assert_eq!(uploader.error_message(), None);
    assert_eq!(sink.calls[0], Call::Line(None));
}

#[test]
fn test_idle_offers_no_file_control() {
    let mut uploader = Uploader::new(RecordingSink::default(), &test_settings());
    assert_eq!(uploader.phase(), Phase::Idle);
    assert!(!uploader.state().accepts_files());
    assert_eq!(uploader.select_file("whatever.csv"), Err(UploaderError::NoChartKind));
    assert!(uploader.sink().calls.is_empty());
}

#[test]
fn test_awaiting_file_after_kind_choice() {
    let uploader = uploader_with(ChartKind::Line);
    assert_eq!(uploader.phase(), Phase::AwaitingFile);
    assert!(uploader.output().is_none());
}

#[test]
fn test_missing_file_is_acquisition_failure() {
    let fixture = CsvFixture::new();
    let mut uploader = uploader_with(ChartKind::Bar);

    uploader.select_file(fixture.path("absent.csv")).unwrap();
    assert_eq!(uploader.wait(), Phase::Errored);
    assert_eq!(uploader.error_message(), Some("Error reading file"));
    assert_eq!(uploader.state().last_failure, Some(FailureKind::AcquisitionFailure));
    assert!(uploader.sink().bar().is_none());
    assert!(uploader.sink().line().is_none());
}

#[test]
fn test_oversized_file_refused() {
    let fixture = CsvFixture::new();
    let mut content = String::from("name,value\n");
    while content.len() < 1024 * 1024 + 16 {
        content.push_str("row,1\n");
    }
    let path = fixture.write("big.csv", &content);

    let mut settings = test_settings();
    settings.max_file_size_mb = 0;
    let mut uploader = Uploader::new(RecordingSink::default(), &settings);
    uploader.select_chart_kind(ChartKind::Bar);
    uploader.select_file(&path).unwrap();

    assert_eq!(uploader.wait(), Phase::Errored);
    assert_eq!(uploader.state().last_failure, Some(FailureKind::AcquisitionFailure));
}

#[test]
fn test_empty_file_clears_channels() {
    let mut uploader = uploader_with(ChartKind::Line);
    uploader.load_file(RawFile::from_text("ok.csv", FRUIT_CSV)).unwrap();
    assert!(uploader.sink().line().is_some());

    uploader.load_file(RawFile::from_text("empty.csv", "name,value\n")).unwrap();
    assert_eq!(uploader.phase(), Phase::Errored);
    assert_eq!(uploader.error_message(), Some("The CSV file is empty"));
    assert!(uploader.sink().line().is_none());
    assert!(uploader.sink().bar().is_none());
    assert!(uploader.output().is_none());
}

#[test]
fn test_error_channel_cleared_on_success() {
    let mut uploader = uploader_with(ChartKind::Bar);
    uploader.load_file(RawFile::from_text("one.csv", "only\n1")).unwrap();
    uploader.load_file(RawFile::from_text("two.csv", FRUIT_CSV)).unwrap();

    let errors: Vec<&Call> = uploader
        .sink()
        .calls
        .iter()
        .filter(|c| matches!(c, Call::Error(_)))
        .collect();
    assert_eq!(
        errors,
        vec![
            &Call::Error(Some("CSV must have at least two columns".to_string())),
            &Call::Error(None),
        ]
    );
}

#[test]
fn test_tsv_upload_from_disk() {
    let fixture = CsvFixture::new();
    let path = fixture.write("sales.tsv", "region\tsales\nNorth\t12\nSouth\t8\n");

    let mut uploader = uploader_with(ChartKind::Line);
    uploader.select_file(&path).unwrap();
    uploader.wait();

    let line = uploader.sink().line().unwrap();
    assert_eq!(line.y_axis_label, "sales");
    assert_eq!(line.values[1], SeriesPoint::new("South", 8.0));
}
