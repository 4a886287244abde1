use std::path::Path;

use crate::vcheck::*;

// Column names after normalization, and the field they hold.
const FIELD_ALIASES: [(&str, VoterField); 16] = [
    ("name", VoterField::Name),
    ("fullname", VoterField::Name),
    ("votername", VoterField::Name),
    ("dob", VoterField::DateOfBirth),
    ("dateofbirth", VoterField::DateOfBirth),
    ("birthdate", VoterField::DateOfBirth),
    ("voterid", VoterField::VoterId),
    ("voteridnumber", VoterField::VoterId),
    ("epic", VoterField::VoterId),
    ("epicno", VoterField::VoterId),
    ("epicnumber", VoterField::VoterId),
    ("mobile", VoterField::Mobile),
    ("mobileno", VoterField::Mobile),
    ("mobilenumber", VoterField::Mobile),
    ("phone", VoterField::Mobile),
    ("phonenumber", VoterField::Mobile),
];

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Labels the records of a file by their line (or entry) number.
pub fn make_source_label(path: &str) -> impl Fn(usize) -> String {
    let simplified_file_name = simplify_file_name(path);
    move |lineno| format!("{}:{}", simplified_file_name, lineno)
}

/// Lowercase, without whitespace, dashes or underscores.
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(|c| c.to_lowercase())
        .collect()
}

pub fn field_for_header(header: &str) -> Option<VoterField> {
    let key = normalize_header(header);
    FIELD_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, field)| *field)
}

/// Maps each column of a header row to the voter field it holds, if any.
///
/// Unknown columns are ignored, unless the source is strict.
/// Fields without a column are left empty in all the records.
pub fn map_columns(
    headers: &[String],
    cfs: &FileSource,
    path: &str,
) -> VcheckResult<Vec<Option<VoterField>>> {
    let mut columns: Vec<Option<VoterField>> = Vec::new();
    for (idx, header) in headers.iter().enumerate() {
        let field = field_for_header(header);
        match field {
            Some(f) => {
                let previous = columns.iter().position(|c| *c == Some(f));
                if let Some(prev_idx) = previous {
                    return DuplicateColumnSnafu {
                        first: headers[prev_idx].clone(),
                        second: header.clone(),
                        path,
                    }
                    .fail();
                }
            }
            None if cfs.is_strict() => {
                return UnknownColumnSnafu {
                    column: header.clone(),
                    path,
                }
                .fail();
            }
            None => {
                warn!(
                    "map_columns: {}: ignoring column {} ({:?})",
                    path,
                    idx + 1,
                    header
                );
            }
        }
        columns.push(field);
    }

    for f in VoterField::ALL.iter() {
        if !columns.contains(&Some(*f)) {
            warn!(
                "map_columns: {}: no column for {:?}, all the records will be incomplete",
                path, f
            );
        }
    }
    debug!("map_columns: {}: {:?}", path, columns);
    Ok(columns)
}

/// Builds a record out of the cells of one row. Missing cells are empty.
pub fn assemble_record(columns: &[Option<VoterField>], cells: &[String]) -> VoterRecord {
    let mut record = VoterRecord::default();
    for (idx, column) in columns.iter().enumerate() {
        if let (Some(field), Some(cell)) = (column, cells.get(idx)) {
            *field.get_mut(&mut record) = cell.trim().to_string();
        }
    }
    record
}

pub fn is_blank_row(cells: &[String]) -> bool {
    cells.iter().all(|c| c.trim().is_empty())
}
