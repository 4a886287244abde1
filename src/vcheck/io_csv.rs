// Primitives for reading CSV files.

use std::fs::File;

use crate::vcheck::{
    io_common::{assemble_record, is_blank_row, make_source_label, map_columns},
    *,
};

pub fn read_csv_voters(path: &str, cfs: &FileSource) -> VcheckResult<Vec<ParsedVoter>> {
    let source_label = make_source_label(path);
    let mut records = get_records(path)?;

    // The first non-blank line holds the column names.
    let mut header: Option<Vec<String>> = None;
    for (idx, line_r) in records.by_ref().enumerate() {
        let line = line_r.context(CsvLineParseSnafu {
            path,
            lineno: (idx + 1) as u64,
        })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        if !is_blank_row(&cells) {
            header = Some(cells);
            break;
        }
    }
    let header = header.context(MissingHeaderSnafu { path })?;
    debug!("read_csv_voters: header: {:?}", header);
    let columns = map_columns(&header, cfs, path)?;

    let mut res: Vec<ParsedVoter> = Vec::new();
    for line_r in records {
        let line = line_r.context(CsvLineParseSnafu {
            path,
            lineno: res.len() as u64 + 2,
        })?;
        let lineno = line
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(res.len() + 2);
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        if is_blank_row(&cells) {
            debug!("read_csv_voters: lineno: {:?} skipping blank line", lineno);
            continue;
        }
        let record = assemble_record(&columns, &cells);
        debug!(
            "read_csv_voters: lineno: {:?} record: {:?}",
            lineno, &record
        );
        res.push(ParsedVoter {
            source: source_label(lineno),
            record,
        });
    }
    Ok(res)
}

fn get_records(path: &str) -> VcheckResult<csv::StringRecordsIntoIter<File>> {
    // Rows may be shorter than the header: the missing cells are treated as empty.
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    Ok(rdr.into_records())
}
