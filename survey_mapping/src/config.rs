// ********* Input data structures ***********

use std::fmt::Display;

/// The declared type of a schema question.
///
/// The type controls how the raw cell content is turned into an output
/// value. Anything that is not one of the recognized labels is treated
/// as [QuestionKind::Other] and gets the plain cleaning behavior.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum QuestionKind {
    /// Free-form text answer.
    OpenText,
    /// One answer picked from a fixed list.
    SingleChoice,
    /// Several answers picked from a fixed list, delimited by `;` in the
    /// export.
    MultipleChoice,
    /// An identifying value (employee number, ticket code, ...). Cleaned
    /// like text; the distinction is kept for downstream consumers.
    Identifier,
    /// Unrecognized or unspecified type.
    Other,
}

impl QuestionKind {
    /// Maps the textual type label from a schema document to a kind.
    /// Unknown labels fall back to [QuestionKind::Other].
    pub fn from_label(label: &str) -> QuestionKind {
        match label {
            "open_text" => QuestionKind::OpenText,
            "single_choice" => QuestionKind::SingleChoice,
            "multiple_choice" => QuestionKind::MultipleChoice,
            "identifier" => QuestionKind::Identifier,
            _ => QuestionKind::Other,
        }
    }
}

/// One logical question from the schema document.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct SchemaQuestion {
    /// The stable output key for this question.
    pub key: String,
    /// The canonical question wording, used to locate the column.
    pub text: String,
    pub kind: QuestionKind,
}

/// A single cell of the input table, as produced by the table readers.
///
/// The variants follow what spreadsheet exports actually contain. Dates are
/// carried as the raw spreadsheet serial number; the engine only ever needs
/// the textual representation of a cell.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    /// A missing or blank cell.
    Empty,
    Text(String),
    Int(i64),
    Number(f64),
    Bool(bool),
    /// A date or time as a spreadsheet serial number.
    DateTime(f64),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Number(x) => write!(f, "{}", x),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::DateTime(x) => write!(f, "{}", x),
        }
    }
}

/// An in-memory survey export: ordered column headers and the data rows.
///
/// Headers are kept exactly as they appear in the source file. Rows are
/// indexed positionally; a row shorter than the header list simply has no
/// value for the trailing columns.
#[derive(PartialEq, Debug, Clone)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// The cell for `column` in `row`, if the row carries one.
    pub fn value_at(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

// ******** Output data structures *********

/// A normalized answer value.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Answer {
    /// No usable content (missing cell, placeholder text, unresolved
    /// question). Serializes as JSON `null`.
    Null,
    Text(String),
    /// The surviving parts of a multiple-choice cell, in cell order.
    /// Never empty: a multiple-choice cell with no surviving parts is
    /// [Answer::Null].
    Selections(Vec<String>),
}

/// One output record, corresponding to one input row.
///
/// `answers` is in schema order. Questions matched to a metadata column are
/// absent from `answers` entirely, which is different from being present
/// with [Answer::Null].
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResponseRecord {
    /// 1-based position of the source row. Not derived from any column.
    pub response_id: u64,
    pub answers: Vec<(String, Answer)>,
}

/// Where a question ended up after column resolution.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ColumnMatch {
    /// No header matched under any strategy.
    Unmatched,
    /// A header matched but is a bookkeeping column (IDs, timestamps,
    /// contact details); the question is suppressed from every record.
    Metadata { header: String },
    /// A regular data column.
    Data { header: String, column: usize },
}

/// The resolution recorded for one schema question.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct QuestionResolution {
    pub key: String,
    pub matched: ColumnMatch,
}

/// Non-fatal conditions observed while mapping. The caller decides how to
/// surface these; the engine itself never prints.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum MappingWarning {
    /// No column was found for the question; its key is `null` in every
    /// record.
    UnresolvedQuestion { key: String, question: String },
}

impl Display for MappingWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingWarning::UnresolvedQuestion { key, question } => {
                write!(f, "No column found for question {:?} (key {:?})", question, key)
            }
        }
    }
}

/// Everything produced by one mapping run.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MappingResult {
    /// One entry per schema question, in schema order.
    pub resolutions: Vec<QuestionResolution>,
    /// One record per input row, in row order.
    pub responses: Vec<ResponseRecord>,
    pub warnings: Vec<MappingWarning>,
}
