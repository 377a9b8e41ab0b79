// Reading survey exports in Excel format.

use crate::survey::*;

use calamine::{open_workbook, DataType, Reader, Xlsx};
use log::debug;
use survey_mapping::{CellValue, Table};

/// Reads the first worksheet of an Excel export. The first row carries the
/// column headers, every following row is one response.
pub fn read_xlsx_table(path: &str) -> SurveyResult<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu {
        path: path.to_string(),
    })?;
    let wrange = workbook
        .worksheet_range_at(0)
        .context(EmptyExcelSnafu {})?
        .context(OpeningExcelSnafu {
            path: path.to_string(),
        })?;

    let mut rows = wrange.rows();
    let header_row = rows.next().context(EmptyExcelSnafu {})?;
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_value(cell).to_string())
        .collect();
    debug!("read_xlsx_table: headers: {:?}", headers);

    let mut raw_rows: Vec<Vec<CellValue>> = Vec::new();
    for row in rows {
        raw_rows.push(row.iter().map(cell_value).collect());
    }
    Ok(io_common::assemble_table(&headers, raw_rows))
}

/// Maps a spreadsheet cell to the engine's cell model. Error cells are
/// treated as missing.
pub fn cell_value(cell: &DataType) -> CellValue {
    match cell {
        DataType::String(s) => CellValue::Text(s.clone()),
        DataType::Int(i) => CellValue::Int(*i),
        DataType::Float(f) => CellValue::Number(*f),
        DataType::Bool(b) => CellValue::Bool(*b),
        DataType::DateTime(f) => CellValue::DateTime(*f),
        DataType::Empty => CellValue::Empty,
        _ => CellValue::Empty,
    }
}
