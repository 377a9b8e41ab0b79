use log::{info, warn};

use snafu::{prelude::*, Snafu};
use survey_mapping::*;

use std::fs;

use serde_json::json;
use serde_json::Map as JSMap;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;

pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod schema_reader;

#[derive(Debug, Snafu)]
pub enum SurveyError {
    #[snafu(display("Error opening file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display(""))]
    EmptyExcel {},
    #[snafu(display("Error opening file {path}"))]
    OpeningCsv {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error reading CSV record at line {lineno}"))]
    CsvRecord { source: csv::Error, lineno: usize },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}"))]
    WritingJson {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SurveyResult<T> = Result<T, SurveyError>;

fn response_to_js(record: &ResponseRecord) -> JSValue {
    let mut obj: JSMap<String, JSValue> = JSMap::new();
    obj.insert("response_id".to_string(), json!(record.response_id));
    for (key, answer) in record.answers.iter() {
        let value = match answer {
            Answer::Null => JSValue::Null,
            Answer::Text(text) => json!(text),
            Answer::Selections(parts) => json!(parts),
        };
        obj.insert(key.clone(), value);
    }
    JSValue::Object(obj)
}

fn build_output_js(metadata: &JSValue, result: &MappingResult) -> JSValue {
    let responses: Vec<JSValue> = result.responses.iter().map(response_to_js).collect();
    json!({
        "survey_metadata": metadata,
        "responses": responses,
    })
}

fn read_table(path: &str, input_type: Option<&str>) -> SurveyResult<Table> {
    let resolved = match input_type {
        Some(explicit) => explicit.to_string(),
        None => match io_common::infer_input_type(path) {
            Some(inferred) => inferred.to_string(),
            None => {
                whatever!(
                    "Cannot infer the input type of {:?}, pass --input-type",
                    path
                )
            }
        },
    };
    info!("read_table: reading {:?} as {}", path, resolved);
    match resolved.as_str() {
        "xlsx" | "excel" => io_xlsx::read_xlsx_table(path),
        "csv" => io_csv::read_csv_table(path),
        x => whatever!("Input type not supported: {:?}", x),
    }
}

fn check_reference(path: &str, pretty_js: &str) -> SurveyResult<()> {
    let reference_js = schema_reader::read_json_document(path)?;
    let pretty_reference =
        serde_json::to_string_pretty(&reference_js).context(ParsingJsonSnafu {})?;
    if pretty_reference != pretty_js {
        warn!("Found differences with the reference document");
        print_diff(pretty_reference.as_str(), pretty_js, "\n");
        whatever!("Difference detected between converted output and reference document")
    }
    Ok(())
}

pub fn run_conversion(args: &Args) -> SurveyResult<()> {
    let schema = schema_reader::read_schema(&args.schema)?;
    info!(
        "run_conversion: loaded schema with {} questions",
        schema.questions.len()
    );

    let table = read_table(&args.input, args.input_type.as_deref())?;
    info!(
        "run_conversion: loaded {} rows with columns {:?}",
        table.num_rows(),
        table.headers
    );

    let result = run_survey_mapping(&schema.questions, &table);
    for warning in result.warnings.iter() {
        warn!("{}", warning);
    }

    let output_js = build_output_js(&schema.metadata, &result);
    let pretty_js = serde_json::to_string_pretty(&output_js).context(ParsingJsonSnafu {})?;

    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js),
        Some(out_path) => {
            fs::write(out_path, &pretty_js).context(WritingJsonSnafu {
                path: out_path.to_string(),
            })?;
            info!("run_conversion: wrote the converted document to {:?}", out_path);
        }
    }

    if let Some(reference_path) = args.reference.as_deref() {
        check_reference(reference_path, &pretty_js)?;
    }

    let suppressed = result
        .resolutions
        .iter()
        .filter(|r| matches!(r.matched, ColumnMatch::Metadata { .. }))
        .count();
    info!(
        "run_conversion: converted {} responses over {} questions ({} unresolved, {} suppressed)",
        result.responses.len(),
        schema.questions.len(),
        result.warnings.len(),
        suppressed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(schema_json: &str, csv_data: &str) -> (JSValue, MappingResult) {
        let schema = schema_reader::parse_schema(schema_json).unwrap();
        let table = io_csv::parse_csv_table(csv_data.as_bytes()).unwrap();
        let result = run_survey_mapping(&schema.questions, &table);
        let js = build_output_js(&schema.metadata, &result);
        (js, result)
    }

    #[test]
    fn converts_a_small_export_end_to_end() {
        let schema_json = r#"
        {
            "questions": {
                "who": { "question": "Name", "type": "open_text" },
                "role": { "question": "Role", "type": "single_choice" },
                "colors": { "question": "Favorite colors", "type": "multiple_choice" }
            }
        }"#;
        let csv_data = "Name,Role,Favorite colors\nAlice,Engineer,Red; Blue; \nBob,,\n";

        let (js, result) = convert(schema_json, csv_data);
        assert!(result.warnings.is_empty());

        // "Name" is a metadata column: the "who" key is absent, not null.
        let expected = json!({
            "survey_metadata": {},
            "responses": [
                { "response_id": 1, "role": "Engineer", "colors": ["Red", "Blue"] },
                { "response_id": 2, "role": null, "colors": null }
            ]
        });
        assert_eq!(
            serde_json::to_string_pretty(&js).unwrap(),
            serde_json::to_string_pretty(&expected).unwrap()
        );
    }

    #[test]
    fn copies_the_survey_metadata_untouched() {
        let schema_json = r#"
        {
            "survey_metadata": { "title": "Onboarding", "wave": 3 },
            "questions": {
                "role": { "question": "Role" }
            }
        }"#;
        let (js, _) = convert(schema_json, "Role\nEngineer\n");
        assert_eq!(
            js["survey_metadata"],
            json!({ "title": "Onboarding", "wave": 3 })
        );
        assert_eq!(js["responses"][0]["role"], json!("Engineer"));
    }

    #[test]
    fn reports_unmatched_questions_and_keeps_their_key_null() {
        let schema_json = r#"
        {
            "questions": {
                "pet": { "question": "Do you have a pet?", "type": "single_choice" }
            }
        }"#;
        let (js, result) = convert(schema_json, "Role\nEngineer\n");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            format!("{}", result.warnings[0]),
            "No column found for question \"Do you have a pet?\" (key \"pet\")"
        );
        assert_eq!(js["responses"][0]["pet"], JSValue::Null);
    }

    #[test]
    fn schema_without_questions_is_rejected() {
        let res = schema_reader::parse_schema(r#"{ "survey_metadata": {} }"#);
        assert!(matches!(res, Err(SurveyError::ParsingJson { .. })));
    }

    #[test]
    fn schema_with_a_malformed_question_is_rejected() {
        let res = schema_reader::parse_schema(r#"{ "questions": { "role": "Role" } }"#);
        assert!(matches!(res, Err(SurveyError::ParsingJson { .. })));
    }

    #[test]
    fn output_fields_follow_the_schema_key_order() {
        let schema_json = r#"
        {
            "questions": {
                "zeta": { "question": "Zeta" },
                "alpha": { "question": "Alpha" },
                "mid": { "question": "Mid" }
            }
        }"#;
        let schema = schema_reader::parse_schema(schema_json).unwrap();
        let keys: Vec<&str> = schema.questions.iter().map(|q| q.key.as_str()).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn unknown_question_types_fall_back_to_plain_cleaning() {
        let schema_json = r#"
        {
            "questions": {
                "a": { "question": "A", "type": "likert_scale" },
                "b": { "question": "B" }
            }
        }"#;
        let schema = schema_reader::parse_schema(schema_json).unwrap();
        assert_eq!(schema.questions[0].kind, QuestionKind::Other);
        assert_eq!(schema.questions[1].kind, QuestionKind::Other);
    }

    #[test]
    fn csv_rows_are_padded_to_the_header_width() {
        let table = io_csv::parse_csv_table("a,b,c\n1\n1,2,3,4\n".as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["a", "b", "c"]);
        assert_eq!(
            table.rows[0],
            vec![
                CellValue::Text("1".to_string()),
                CellValue::Empty,
                CellValue::Empty
            ]
        );
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn quoted_csv_fields_keep_their_delimiters() {
        let table = io_csv::parse_csv_table("colors\n\"Red; Blue\"\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0], vec![CellValue::Text("Red; Blue".to_string())]);
    }

    #[test]
    fn empty_csv_fields_are_missing_cells() {
        let table = io_csv::parse_csv_table("a,b\n,x\n".as_bytes()).unwrap();
        assert_eq!(table.rows[0][0], CellValue::Empty);
        assert_eq!(table.rows[0][1], CellValue::Text("x".to_string()));
    }

    #[test]
    fn infers_the_input_type_from_the_extension() {
        assert_eq!(io_common::infer_input_type("export.xlsx"), Some("xlsx"));
        assert_eq!(io_common::infer_input_type("EXPORT.XLSX"), Some("xlsx"));
        assert_eq!(io_common::infer_input_type("data/responses.csv"), Some("csv"));
        assert_eq!(io_common::infer_input_type("responses.txt"), None);
        assert_eq!(io_common::infer_input_type("responses"), None);
    }

    #[test]
    fn spreadsheet_cells_map_to_the_cell_model() {
        use calamine::DataType;
        assert_eq!(
            io_xlsx::cell_value(&DataType::String("x".to_string())),
            CellValue::Text("x".to_string())
        );
        assert_eq!(io_xlsx::cell_value(&DataType::Int(3)), CellValue::Int(3));
        assert_eq!(
            io_xlsx::cell_value(&DataType::Float(2.5)),
            CellValue::Number(2.5)
        );
        assert_eq!(
            io_xlsx::cell_value(&DataType::Bool(true)),
            CellValue::Bool(true)
        );
        assert_eq!(
            io_xlsx::cell_value(&DataType::DateTime(44927.25)),
            CellValue::DateTime(44927.25)
        );
        assert_eq!(io_xlsx::cell_value(&DataType::Empty), CellValue::Empty);
        assert_eq!(
            io_xlsx::cell_value(&DataType::Error(calamine::CellErrorType::Div0)),
            CellValue::Empty
        );
    }
}
