use clap::Parser;

/// This is a voter list validation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) The file describing the voter lists to validate and the rules to apply, in JSON format.
    /// For more information about the file format, read the manual of the voter_validation crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference report in JSON format. If provided, votercheck will
    /// check that the produced report matches the reference.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the validation report will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) The voter list to validate. Setting this option overrides the file sources
    /// that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default csv) The type of the input: csv, xlsx or json.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (default: first worksheet) When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    /// If passed as an argument, columns that do not correspond to a voter field are an error instead
    /// of being ignored.
    #[clap(long, takes_value = false)]
    pub strict_columns: bool,

    /// (date in YYYY-MM-DD format, default today) The date at which the ages of the voters are computed.
    #[clap(long, value_parser)]
    pub reference_date: Option<String>,

    /// (default 18) Voters younger than this age are reported as invalid.
    #[clap(long, value_parser)]
    pub minimum_age: Option<u32>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
