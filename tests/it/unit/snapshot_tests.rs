//! Snapshot tests using the insta crate.
//!
//! The serialized series is the contract with chart renderers, so its exact
//! JSON shape is pinned here.
//!
//! To update snapshots after intentional changes:
//! ```sh
//! cargo insta test --accept
//! ```

use chart_uploader::data::normalize_csv;
use chart_uploader::settings::Settings;

#[test]
fn snapshot_fruit_series() {
    let series = normalize_csv("name,value\nApple,5\nBanana,7").unwrap();
    let json = serde_json::to_string_pretty(&series).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "xAxisLabel": "name",
      "yAxisLabel": "value",
      "values": [
        {
          "x": "Apple",
          "y": 5.0
        },
        {
          "x": "Banana",
          "y": 7.0
        }
      ]
    }
    "#);
}

#[test]
fn snapshot_non_numeric_serializes_as_null() {
    let series = normalize_csv("label,amount\nfirst,-2.5\nsecond,??").unwrap();
    let json = serde_json::to_string_pretty(&series).unwrap();

    insta::assert_snapshot!(json, @r#"
    {
      "xAxisLabel": "label",
      "yAxisLabel": "amount",
      "values": [
        {
          "x": "first",
          "y": -2.5
        },
        {
          "x": "second",
          "y": null
        }
      ]
    }
    "#);
}

#[test]
fn snapshot_default_settings() {
    insta::assert_json_snapshot!(Settings::default(), @r#"
    {
      "max_file_size_mb": 100,
      "read_timeout_secs": 10,
      "log_filter": "info"
    }
    "#);
}
