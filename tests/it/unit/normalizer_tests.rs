//! Unit tests for CSV normalization.

use chart_uploader::data::{DataError, FailureKind, normalize_bytes, normalize_csv, parse_csv_content};
use chart_uploader::types::{DelimitedFormat, SeriesPoint};

#[test]
fn test_row_count_and_order_preserved() {
    let mut content = String::from("day,visits\n");
    for i in 0..50 {
        content.push_str(&format!("d{},{}\n", 49 - i, i * 3));
    }

    let series = normalize_csv(&content).unwrap();
    assert_eq!(series.len(), 50);
    assert_eq!(series.values[0], SeriesPoint::new("d49", 0.0));
    assert_eq!(series.values[49], SeriesPoint::new("d0", 147.0));
}

#[test]
fn test_axis_labels_verbatim() {
    let series = normalize_csv(" Month Name ,Total (USD),ignored\nJan,1,x").unwrap();
    assert_eq!(series.x_axis_label, " Month Name ");
    assert_eq!(series.y_axis_label, "Total (USD)");
}

#[test]
fn test_x_cell_kept_raw() {
    let series = normalize_csv("name,value\n  spaced  ,1").unwrap();
    assert_eq!(series.values[0].x, "  spaced  ");
}

#[test]
fn test_empty_inputs() {
    for content in ["", "name,value", "name,value\n", "\n\n\n"] {
        let err = normalize_csv(content).unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyInput, "content: {content:?}");
    }
}

#[test]
fn test_single_column_input() {
    let err = normalize_csv("value\n1\n2").unwrap_err();
    assert!(matches!(err, DataError::InsufficientColumns { found: 1 }));
    assert_eq!(err.user_message(), "CSV must have at least two columns");
}

#[test]
fn test_non_numeric_values_do_not_fail() {
    let series = normalize_csv("name,value\nA,n/a\nB,\nC,12.5").unwrap();
    assert!(series.values[0].y.is_nan());
    assert_eq!(series.values[1].y, 0.0);
    assert_eq!(series.values[2].y, 12.5);
    assert_eq!(series.non_numeric_count(), 1);
    assert_eq!(series.y_range(), Some((0.0, 12.5)));
}

#[test]
fn test_multiline_quoted_cell() {
    let series = normalize_csv("name,value\n\"two\nlines\",3").unwrap();
    assert_eq!(series.len(), 1);
    assert_eq!(series.values[0].x, "two\nlines");
}

#[test]
fn test_semicolon_is_not_a_delimiter_for_csv() {
    let err = normalize_csv("name;value\nA;1").unwrap_err();
    assert_eq!(err.kind(), FailureKind::InsufficientColumns);
}

#[test]
fn test_tsv_format() {
    let series = normalize_bytes(b"name\tvalue\nA\t1\nB\t2", DelimitedFormat::Tsv).unwrap();
    assert_eq!(series.values[1], SeriesPoint::new("B", 2.0));
}

#[test]
fn test_encoding_error_is_parse_failure() {
    let err = normalize_bytes(b"name,value\nA,\xC3\x28", DelimitedFormat::Csv).unwrap_err();
    assert_eq!(err.kind(), FailureKind::ParseFailure);
    assert_eq!(err.user_message(), "Error processing CSV file");
}

#[test]
fn test_parsed_rows_share_headers() {
    let table = parse_csv_content("a,b,c\n1,2\n4,5,6,7", b',').unwrap();
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.row_count(), 2);
    assert!(table.rows.iter().all(|r| r.cells.len() == 3));
    assert_eq!(table.get(0, "c"), Some(""));
}
