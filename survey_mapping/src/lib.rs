mod builder;
mod config;
pub mod manual;

use log::{debug, info};

pub use crate::builder::TableBuilder;
pub use crate::config::*;

/// Header substrings that mark a column as export bookkeeping rather than
/// survey content. The check is a plain substring test over the lowercased
/// header.
const METADATA_INDICATORS: [&str; 8] = [
    "id",
    "start time",
    "completion time",
    "email",
    "name",
    "timestamp",
    "response id",
    "ip address",
];

/// Returns true when a resolved header denotes a metadata column. Answers
/// under such columns are suppressed from the output records.
pub fn is_metadata_header(header: &str) -> bool {
    let lowered = header.to_lowercase();
    METADATA_INDICATORS
        .iter()
        .any(|indicator| lowered.contains(indicator))
}

/// Canonical form of question and header text used by the inexact matching
/// strategies: trimmed, lowercased, inner whitespace runs collapsed to one
/// space, then everything that is not alphanumeric or whitespace removed.
///
/// The punctuation pass runs after the collapse, so stripped characters can
/// leave adjacent spaces behind ("a - b" canonicalizes to "a  b").
pub fn normalize_question_text(text: &str) -> String {
    let collapsed = text
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

// ********* Column matching ***********

type MatchStrategy = fn(&str, &[String]) -> Option<usize>;

// Tried in order, first hit wins. Each strategy scans headers left to right,
// so ties inside a strategy also go to the leftmost column.
const MATCH_STRATEGIES: [MatchStrategy; 3] = [match_exact, match_normalized, match_contained];

fn match_exact(question: &str, headers: &[String]) -> Option<usize> {
    headers.iter().position(|header| header.trim() == question)
}

fn match_normalized(question: &str, headers: &[String]) -> Option<usize> {
    let needle = normalize_question_text(question);
    headers
        .iter()
        .position(|header| normalize_question_text(header) == needle)
}

fn match_contained(question: &str, headers: &[String]) -> Option<usize> {
    let needle = normalize_question_text(question);
    headers.iter().position(|header| {
        let candidate = normalize_question_text(header);
        candidate.contains(&needle) || needle.contains(&candidate)
    })
}

/// Finds the column index for a question, or [None] when no strategy
/// matches. Resolution depends only on the question text and the headers.
pub fn resolve_column(question_text: &str, headers: &[String]) -> Option<usize> {
    MATCH_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(question_text, headers))
}

// ********* Value cleaning ***********

/// Scalar cleaning: trims, drops every double quote and backslash, trims
/// again, and maps empty or placeholder text ("nan", "none", "-", in any
/// case) to [None]. Applying it twice gives the same result as applying it
/// once.
pub fn clean_text(raw: &str) -> Option<String> {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '"' && *c != '\\')
        .collect();
    let stripped = stripped.trim();
    if stripped.is_empty() || matches!(stripped.to_lowercase().as_str(), "nan" | "none" | "-") {
        return None;
    }
    Some(stripped.to_string())
}

/// Cleans one cell. Missing cells are [None]; everything else goes through
/// [clean_text] on the cell's textual form.
pub fn clean_value(raw: &CellValue) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    clean_text(&raw.to_string())
}

/// Normalizes one cell under the rules of its question kind.
pub fn transform_value(raw: &CellValue, kind: QuestionKind) -> Answer {
    match kind {
        QuestionKind::MultipleChoice => transform_multiple_choice(raw),
        _ => match clean_value(raw) {
            Some(text) => Answer::Text(text),
            None => Answer::Null,
        },
    }
}

fn transform_multiple_choice(raw: &CellValue) -> Answer {
    if raw.is_empty() {
        return Answer::Null;
    }
    // Split before cleaning: quotes and backslashes are stripped per part,
    // and parts that clean down to nothing are dropped.
    let selections: Vec<String> = raw.to_string().split(';').filter_map(clean_text).collect();
    if selections.is_empty() {
        Answer::Null
    } else {
        Answer::Selections(selections)
    }
}

// ********* Mapping engine ***********

/// Matches every schema question to a column and normalizes all rows into
/// response records.
///
/// Column resolution runs once per question before the row pass; the same
/// resolution is reused for every row. Questions that resolve to a metadata
/// column are left out of the records entirely, and questions that resolve
/// to no column at all are recorded as null answers alongside a warning.
pub fn run_survey_mapping(questions: &[SchemaQuestion], table: &Table) -> MappingResult {
    info!(
        "run_survey_mapping: mapping {} questions over {} rows and {} columns",
        questions.len(),
        table.num_rows(),
        table.headers.len()
    );

    let mut warnings: Vec<MappingWarning> = Vec::new();
    let mut resolutions: Vec<QuestionResolution> = Vec::new();
    for question in questions.iter() {
        let matched = match resolve_column(&question.text, &table.headers) {
            None => {
                warnings.push(MappingWarning::UnresolvedQuestion {
                    key: question.key.clone(),
                    question: question.text.clone(),
                });
                ColumnMatch::Unmatched
            }
            Some(column) => {
                let header = table.headers[column].clone();
                if is_metadata_header(&header) {
                    ColumnMatch::Metadata { header }
                } else {
                    ColumnMatch::Data { header, column }
                }
            }
        };
        debug!(
            "run_survey_mapping: question {:?} resolved to {:?}",
            question.key, matched
        );
        resolutions.push(QuestionResolution {
            key: question.key.clone(),
            matched,
        });
    }

    let mut responses: Vec<ResponseRecord> = Vec::with_capacity(table.num_rows());
    for idx in 0..table.num_rows() {
        let mut answers: Vec<(String, Answer)> = Vec::new();
        for (question, resolution) in questions.iter().zip(resolutions.iter()) {
            match &resolution.matched {
                ColumnMatch::Unmatched => {
                    answers.push((question.key.clone(), Answer::Null));
                }
                ColumnMatch::Metadata { .. } => {
                    // Suppressed: the key does not appear in the record.
                }
                ColumnMatch::Data { column, .. } => {
                    let answer = match table.value_at(idx, *column) {
                        Some(raw) => transform_value(raw, question.kind),
                        // Row shorter than the header set.
                        None => Answer::Null,
                    };
                    answers.push((question.key.clone(), answer));
                }
            }
        }
        responses.push(ResponseRecord {
            response_id: (idx + 1) as u64,
            answers,
        });
    }

    info!(
        "run_survey_mapping: produced {} records with {} warnings",
        responses.len(),
        warnings.len()
    );

    MappingResult {
        resolutions,
        responses,
        warnings,
    }
}
