use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use voter_validation::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::vcheck::config_reader::*;

mod config_reader;
mod io_common;
mod io_csv;
mod io_excel;
mod io_json;

#[derive(Debug, Snafu)]
pub enum VcheckError {
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Could not read line {lineno} of the CSV file {path}"))]
    CsvLineParse {
        source: csv::Error,
        path: String,
        lineno: u64,
    },
    #[snafu(display("The file {path} has no header row"))]
    MissingHeader { path: String },
    #[snafu(display("Column {column:?} in {path} does not correspond to a voter field"))]
    UnknownColumn { column: String, path: String },
    #[snafu(display("Columns {first:?} and {second:?} in {path} both describe the same voter field"))]
    DuplicateColumn {
        first: String,
        second: String,
        path: String,
    },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("The Excel file {path} has no worksheet"))]
    EmptyExcel { path: String },
    #[snafu(display("The Excel file {path} has no worksheet named {name:?}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Cannot read the cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening JSON file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON content"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing the report to {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("The configuration file has no parent directory"))]
    MissingParentDir {},
    #[snafu(display("Input type {provider:?} is not supported (expected csv, xlsx or json)"))]
    UnknownProvider { provider: String },
    #[snafu(display("Cannot read the reference date {value:?} (expected YYYY-MM-DD)"))]
    InvalidReferenceDate {
        source: chrono::ParseError,
        value: String,
    },
    #[snafu(display("No voter list to validate: use --input or --config"))]
    MissingInput {},
    #[snafu(display("The report differs from the reference report {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type VcheckResult<T> = Result<T, VcheckError>;

/// A voter record, as parsed by the readers.
/// This is before applying any of the validation rules.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ParsedVoter {
    /// Where the record comes from, for example `ward12.csv:4`.
    pub source: String,
    pub record: VoterRecord,
}

fn voter_to_json(vv: &ValidatedVoter, source: &str) -> JSValue {
    // The invalid records are displayed with an explicit placeholder for the missing fields.
    let show = |s: &str| -> String {
        let t = s.trim();
        if t.is_empty() && !vv.is_valid() {
            "N/A".to_string()
        } else {
            t.to_string()
        }
    };
    let errors: Vec<String> = vv.errors.iter().map(|e| e.to_string()).collect();
    json!({
        "id": vv.id,
        "source": source,
        "name": show(&vv.record.name),
        "dob": show(&vv.record.date_of_birth),
        "voterId": show(&vv.record.voter_id),
        "mobile": show(&vv.record.mobile),
        "isValid": vv.is_valid(),
        "errors": errors,
    })
}

fn build_report_js(
    config: &VcheckConfig,
    rules: &ValidationRules,
    voters: &[ParsedVoter],
    report: &ValidationReport,
) -> JSValue {
    let c = OutputConfig {
        list_name: config.output_settings.list_name.clone(),
        reference_date: rules.reference_date.map(|d| d.format("%Y-%m-%d").to_string()),
        minimum_age: rules.minimum_age,
    };
    let source_of = |vv: &ValidatedVoter| -> String {
        voters
            .get(vv.id - 1)
            .map(|pv| pv.source.clone())
            .unwrap_or_default()
    };
    let valid: Vec<JSValue> = report
        .valid
        .iter()
        .map(|vv| voter_to_json(vv, &source_of(vv)))
        .collect();
    let invalid: Vec<JSValue> = report
        .invalid
        .iter()
        .map(|vv| voter_to_json(vv, &source_of(vv)))
        .collect();
    json!({
        "config": c,
        "summary": {
            "total": report.summary.total,
            "valid": report.summary.valid,
            "invalid": report.summary.invalid,
        },
        "valid": valid,
        "invalid": invalid,
    })
}

fn log_report(voters: &[ParsedVoter], report: &ValidationReport) {
    info!(
        "Total voters: {}, valid: {}, invalid: {}",
        report.summary.total, report.summary.valid, report.summary.invalid
    );
    for vv in report.invalid.iter() {
        let source = voters
            .get(vv.id - 1)
            .map(|pv| pv.source.as_str())
            .unwrap_or("");
        let errors: Vec<String> = vv.errors.iter().map(|e| e.to_string()).collect();
        info!(
            "{:>6} {:<30} ({}) -> {}",
            vv.id,
            vv.record.name.trim(),
            source,
            errors.join(", ")
        );
    }
}

fn read_voter_data(cfs: &FileSource) -> VcheckResult<Vec<ParsedVoter>> {
    info!("Attempting to read voter file {:?}", cfs.file_path);
    let voters = match cfs.provider.as_str() {
        "csv" => io_csv::read_csv_voters(&cfs.file_path, cfs),
        "xlsx" | "excel" => io_excel::read_excel_voters(&cfs.file_path, cfs),
        "json" => io_json::read_json_voters(&cfs.file_path),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }?;
    info!("Read {} voters from {:?}", voters.len(), cfs.file_path);
    Ok(voters)
}

/// Assembles the configuration of a run from the command line arguments and, if provided,
/// the configuration file.
///
/// The file paths of the returned configuration are resolved and can be opened directly.
pub fn resolve_config(args: &Args) -> VcheckResult<VcheckConfig> {
    let mut config = match &args.config {
        Some(config_path) => {
            let mut config = read_config(config_path)?;
            let root_p = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {})?;
            for cfs in config.voter_file_sources.iter_mut() {
                let p: PathBuf = root_p.join(&cfs.file_path);
                cfs.file_path = p.as_path().display().to_string();
            }
            config
        }
        None => VcheckConfig::default(),
    };

    if let Some(input) = &args.input {
        config.voter_file_sources = vec![FileSource {
            provider: args.input_type.clone().unwrap_or_else(|| "csv".to_string()),
            file_path: input.clone(),
            excel_worksheet_name: None,
            strict_columns: None,
        }];
    } else if let Some(input_type) = &args.input_type {
        warn!("--input-type {:?} is ignored without --input", input_type);
    }

    for cfs in config.voter_file_sources.iter_mut() {
        if args.excel_worksheet_name.is_some() {
            cfs.excel_worksheet_name = args.excel_worksheet_name.clone();
        }
        if args.strict_columns {
            cfs.strict_columns = Some(true);
        }
    }

    if args.out.is_some() {
        config.output_settings.output_path = args.out.clone();
    }
    if args.reference_date.is_some() {
        config.rules.reference_date = args.reference_date.clone();
    }
    if args.minimum_age.is_some() {
        config.rules.minimum_age = args.minimum_age;
    }

    ensure!(!config.voter_file_sources.is_empty(), MissingInputSnafu {});
    debug!("resolve_config: {:?}", config);
    Ok(config)
}

/// Reads all the voter lists of the configuration, validates them together and writes the report.
///
/// If a reference report is provided, the produced report must match it.
pub fn run_validation(
    config: &VcheckConfig,
    check_report_path: Option<String>,
) -> VcheckResult<ValidationReport> {
    info!("config: {:?}", config);

    // The reference date is fixed here so that the report states the date actually used.
    let mut rules = config.rules.validation_rules()?;
    if rules.reference_date.is_none() {
        rules.reference_date = Some(chrono::Local::now().date_naive());
    }

    let mut voters: Vec<ParsedVoter> = Vec::new();
    for cfs in config.voter_file_sources.iter() {
        let mut file_data = read_voter_data(cfs)?;
        voters.append(&mut file_data);
    }
    if voters.is_empty() {
        warn!("No voter records found in the input files");
    }

    let records: Vec<VoterRecord> = voters.iter().map(|pv| pv.record.clone()).collect();
    let report = validate_voters(&records, &rules);
    log_report(&voters, &report);

    let report_js = build_report_js(config, &rules, &voters, &report);
    let pretty_js_report = serde_json::to_string_pretty(&report_js).context(ParsingJsonSnafu {})?;

    match config.output_settings.output_path.as_deref() {
        Some("stdout") => {
            println!("{}", pretty_js_report);
        }
        Some(out_path) => {
            info!("Writing report to {:?}", out_path);
            fs::write(out_path, &pretty_js_report).context(WritingOutputSnafu { path: out_path })?;
        }
        None => {
            debug!("No output path, the report is not written");
        }
    }

    // The reference report, if provided for comparison
    if let Some(reference_p) = check_report_path {
        let reference_js = read_reference(&reference_p)?;
        if reference_js != report_js {
            warn!("Found differences with the reference report");
            let pretty_js_reference =
                serde_json::to_string_pretty(&reference_js).context(ParsingJsonSnafu {})?;
            print_diff(
                pretty_js_reference.as_str(),
                pretty_js_report.as_str(),
                "\n",
            );
            return ReferenceMismatchSnafu { path: reference_p }.fail();
        }
    }

    Ok(report)
}
