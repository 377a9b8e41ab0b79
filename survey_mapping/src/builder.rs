use crate::config::*;

/// A builder for assembling tables row by row.
///
/// It is the simplest way to feed data into the mapping engine when the
/// source is not one of the file readers.
///
/// ```
/// pub use survey_mapping::TableBuilder;
///
/// let mut builder = TableBuilder::new(&["Role", "Favorite colors"]);
/// builder.add_text_row(&["Engineer", "Red; Blue"]);
/// builder.add_text_row(&["Designer", ""]);
///
/// let table = builder.build();
/// assert_eq!(table.num_rows(), 2);
/// ```
pub struct TableBuilder {
    pub(crate) _headers: Vec<String>,
    pub(crate) _rows: Vec<Vec<CellValue>>,
}

impl TableBuilder {
    pub fn new(headers: &[&str]) -> TableBuilder {
        TableBuilder {
            _headers: headers.iter().map(|header| header.to_string()).collect(),
            _rows: Vec::new(),
        }
    }

    /// Adds a row of already typed cells.
    pub fn add_row(&mut self, cells: &[CellValue]) {
        self._rows.push(cells.to_vec());
    }

    /// Adds a row of plain text cells. Empty strings are recorded as missing
    /// cells, which is how the file readers treat them as well.
    pub fn add_text_row(&mut self, cells: &[&str]) {
        let row: Vec<CellValue> = cells
            .iter()
            .map(|text| {
                if text.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::Text(text.to_string())
                }
            })
            .collect();
        self._rows.push(row);
    }

    /// Produces the table. Rows are padded with missing cells or truncated
    /// so that every row has exactly one cell per header.
    pub fn build(self) -> Table {
        let width = self._headers.len();
        let mut rows = self._rows;
        for row in rows.iter_mut() {
            row.resize(width, CellValue::Empty);
        }
        Table {
            headers: self._headers,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_pads_and_truncates_to_the_header_width() {
        let mut builder = TableBuilder::new(&["a", "b"]);
        builder.add_text_row(&["1"]);
        builder.add_text_row(&["1", "2", "3"]);
        let table = builder.build();
        assert_eq!(
            table.rows[0],
            vec![CellValue::Text("1".to_string()), CellValue::Empty]
        );
        assert_eq!(
            table.rows[1],
            vec![
                CellValue::Text("1".to_string()),
                CellValue::Text("2".to_string())
            ]
        );
    }

    #[test]
    fn typed_rows_pass_through_unchanged() {
        let mut builder = TableBuilder::new(&["score"]);
        builder.add_row(&[CellValue::Number(4.5)]);
        let table = builder.build();
        assert_eq!(table.rows[0], vec![CellValue::Number(4.5)]);
    }
}
