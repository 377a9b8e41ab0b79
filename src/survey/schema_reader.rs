// Reading and validation of the question schema.

use crate::survey::*;

use log::debug;
use serde::{Deserialize, Serialize};
use survey_mapping::{QuestionKind, SchemaQuestion};

/// The schema document as it sits on disk.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SchemaDoc {
    /// Free-form description of the survey, copied to the output untouched.
    pub survey_metadata: Option<JSValue>,
    /// The questions, keyed by output field name. The key order is the
    /// field order of the output records.
    pub questions: JSMap<String, JSValue>,
}

/// One question entry. Extra keys (choice lists, notes) are allowed and
/// ignored.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RawQuestion {
    /// The question wording, matched against the export headers.
    #[serde(default)]
    pub question: String,
    /// The type label. Unrecognized labels get the default cleaning.
    #[serde(default, rename = "type")]
    pub question_type: String,
}

/// The schema after validation, ready for the mapping engine.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LoadedSchema {
    pub metadata: JSValue,
    pub questions: Vec<SchemaQuestion>,
}

pub fn read_schema(path: &str) -> SurveyResult<LoadedSchema> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    parse_schema(contents.as_str())
}

/// Parses a schema document. A document without a `questions` object is
/// rejected; a question without a type gets the default cleaning.
pub fn parse_schema(contents: &str) -> SurveyResult<LoadedSchema> {
    let doc: SchemaDoc = serde_json::from_str(contents).context(ParsingJsonSnafu {})?;
    debug!("parse_schema: {} questions", doc.questions.len());

    let mut questions: Vec<SchemaQuestion> = Vec::new();
    for (key, value) in doc.questions.iter() {
        let raw: RawQuestion = serde_json::from_value(value.clone()).context(ParsingJsonSnafu {})?;
        questions.push(SchemaQuestion {
            key: key.clone(),
            text: raw.question,
            kind: QuestionKind::from_label(&raw.question_type),
        });
    }
    Ok(LoadedSchema {
        metadata: doc.survey_metadata.unwrap_or_else(|| json!({})),
        questions,
    })
}

/// Reads a free-form JSON document, used for reference comparisons.
pub fn read_json_document(path: &str) -> SurveyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu {})?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
