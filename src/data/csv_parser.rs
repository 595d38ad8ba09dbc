//! CSV and TSV parsing and chart-series projection
//!
//! Turns raw delimited text into a [`ChartSeries`]:
//!
//! 1. The first non-blank line defines the column headers.
//! 2. Every later non-blank line is a row mapped positionally onto those headers.
//! 3. The first two columns are projected into label/value pairs.
//!
//! Nothing here touches the filesystem; see the uploader for acquisition.

use crate::data::coerce::coerce_number;
use crate::data::error::{DataError, DataResult};
use crate::profile_scope;
use crate::types::{ChartSeries, DelimitedFormat, SeriesPoint};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One data line, with one cell per distinct header (in header order)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedRow {
    pub cells: Vec<String>,
}

impl ParsedRow {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Cell at a column index; missing cells read as empty
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// Header list plus rows, in file order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedTable {
    /// Distinct header names, left to right
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRow>,
}

impl ParsedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Look a cell up by header name
    pub fn get(&self, row: usize, header: &str) -> Option<&str> {
        let col = self.headers.iter().position(|h| h == header)?;
        self.rows.get(row).map(|r| r.cell(col))
    }

    /// Iterate a row as (header, cell) pairs in header order
    pub fn row_entries(&self, row: usize) -> impl Iterator<Item = (&str, &str)> {
        let parsed = self.rows.get(row);
        self.headers
            .iter()
            .enumerate()
            .filter_map(move |(i, h)| parsed.map(|r| (h.as_str(), r.cell(i))))
    }
}

/// Normalize comma-delimited text into a chart series
pub fn normalize_csv(content: &str) -> DataResult<ChartSeries> {
    profile_scope!("normalize_csv");
    let table = parse_csv_content(content, DelimitedFormat::Csv.delimiter())?;
    project_series(&table)
}

/// Normalize raw file bytes of the given format into a chart series
pub fn normalize_bytes(bytes: &[u8], format: DelimitedFormat) -> DataResult<ChartSeries> {
    profile_scope!("normalize_bytes");
    let table = parse_csv_bytes(bytes, format)?;
    project_series(&table)
}

/// Decode bytes as UTF-8 (dropping a leading BOM) and parse them
pub fn parse_csv_bytes(bytes: &[u8], format: DelimitedFormat) -> DataResult<ParsedTable> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let content = std::str::from_utf8(bytes)?;
    parse_csv_content(content, format.delimiter())
}

/// Parse delimited text into headers and rows
///
/// Blank and whitespace-only lines are skipped; a row of empty cells is
/// still a row. Short rows are padded with empty cells and
/// extra cells are dropped. Repeated header names collapse into a single
/// column that keeps the first position and takes the rightmost cell.
pub fn parse_csv_content(content: &str, delimiter: u8) -> DataResult<ParsedTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut records = reader.records().filter(|r| match r {
        Ok(record) => !is_blank_line(record),
        Err(_) => true,
    });

    let Some(header_record) = records.next().transpose()? else {
        debug!("no header line found");
        return Ok(ParsedTable::default());
    };

    let (headers, slots) = collapse_headers(&header_record);

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let mut cells = vec![String::new(); headers.len()];
        for (i, slot) in slots.iter().enumerate() {
            cells[*slot] = record.get(i).unwrap_or("").to_string();
        }
        rows.push(ParsedRow::new(cells));
    }

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        delimiter = %(delimiter as char).escape_default(),
        "parsed delimited content"
    );

    Ok(ParsedTable { headers, rows })
}

/// Project the first two columns of a parsed table into a chart series
pub fn project_series(table: &ParsedTable) -> DataResult<ChartSeries> {
    if table.rows.is_empty() {
        return Err(DataError::EmptyInput);
    }
    if table.headers.len() < 2 {
        return Err(DataError::InsufficientColumns {
            found: table.headers.len(),
        });
    }

    let values = table
        .rows
        .iter()
        .map(|row| SeriesPoint::new(row.cell(0), coerce_number(row.cell(1))))
        .collect();

    Ok(ChartSeries {
        x_axis_label: table.headers[0].clone(),
        y_axis_label: table.headers[1].clone(),
        values,
    })
}

/// Distinct headers plus, for every raw column, the index of its distinct header
fn collapse_headers(record: &StringRecord) -> (Vec<String>, Vec<usize>) {
    let mut headers: Vec<String> = Vec::new();
    let mut slots = Vec::with_capacity(record.len());

    for name in record.iter() {
        let slot = match headers.iter().position(|h| h == name) {
            Some(existing) => existing,
            None => {
                headers.push(name.to_string());
                headers.len() - 1
            }
        };
        slots.push(slot);
    }

    (headers, slots)
}

/// A whitespace-only line. Rows of empty cells such as `,` are kept.
fn is_blank_line(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}
