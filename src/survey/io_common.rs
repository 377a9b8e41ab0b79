// Shared helpers for the table readers.

use std::path::Path;

use survey_mapping::{CellValue, Table, TableBuilder};

/// Assembles headers and raw rows into a table, padding or truncating every
/// row to the header width.
pub fn assemble_table(headers: &[String], raw_rows: Vec<Vec<CellValue>>) -> Table {
    let names: Vec<&str> = headers.iter().map(|header| header.as_str()).collect();
    let mut builder = TableBuilder::new(&names);
    for row in raw_rows.iter() {
        builder.add_row(row);
    }
    builder.build()
}

/// Guesses the input type from the file extension.
pub fn infer_input_type(path: &str) -> Option<&'static str> {
    let extension = Path::new(path).extension().and_then(|ext| ext.to_str());
    match extension {
        Some(ext) if ext.eq_ignore_ascii_case("xlsx") => Some("xlsx"),
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Some("csv"),
        _ => None,
    }
}
