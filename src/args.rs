use clap::Parser;

/// This is a survey export conversion program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The JSON file describing the questions of the survey and their output keys.
    /// For more information about the file format, read the documentation of the survey_mapping crate.
    #[clap(short, long, value_parser)]
    pub schema: String,

    /// (file path) The survey export to convert. Excel (.xlsx) and CSV files are supported.
    #[clap(short, long, value_parser)]
    pub input: String,

    /// (default inferred from the extension) The type of the input: 'xlsx' (alias 'excel') or 'csv'.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the converted document will be written in JSON format to the given
    /// location. If not specified, the document is printed to the standard output.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path) A reference file containing the expected conversion in JSON format. If provided, svmap will
    /// check that the converted output matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
