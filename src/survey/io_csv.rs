// Reading survey exports in CSV format.

use crate::survey::*;

use log::debug;
use std::fs::File;
use std::io;
use survey_mapping::{CellValue, Table};

/// Reads a CSV export. The first record carries the column headers, every
/// following record is one response.
pub fn read_csv_table(path: &str) -> SurveyResult<Table> {
    let file = File::open(path).context(OpeningCsvSnafu {
        path: path.to_string(),
    })?;
    parse_csv_table(file)
}

/// Parses CSV content from any reader. Records may be shorter or longer
/// than the header record.
pub fn parse_csv_table<R: io::Read>(input: R) -> SurveyResult<Table> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = rdr.into_records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record
            .context(CsvRecordSnafu { lineno: 1usize })?
            .iter()
            .map(|field| field.to_string())
            .collect(),
        None => whatever!("The CSV input has no header record"),
    };
    debug!("parse_csv_table: headers: {:?}", headers);

    let mut raw_rows: Vec<Vec<CellValue>> = Vec::new();
    for (idx, record) in records.enumerate() {
        // The header record is line 1.
        let lineno = idx + 2;
        let record = record.context(CsvRecordSnafu { lineno })?;
        raw_rows.push(record.iter().map(csv_cell).collect());
    }
    Ok(io_common::assemble_table(&headers, raw_rows))
}

// CSV carries no cell types: everything is text, except that the empty
// field marks a missing answer.
fn csv_cell(field: &str) -> CellValue {
    if field.is_empty() {
        CellValue::Empty
    } else {
        CellValue::Text(field.to_string())
    }
}
