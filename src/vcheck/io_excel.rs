use calamine::{open_workbook, DataType, Range, Reader, Xlsx};
use chrono::{Days, NaiveDate};

use crate::vcheck::{
    io_common::{assemble_record, is_blank_row, make_source_label, map_columns},
    *,
};

pub fn read_excel_voters(path: &str, cfs: &FileSource) -> VcheckResult<Vec<ParsedVoter>> {
    let source_label = make_source_label(path);
    let wrange = get_range(path, cfs)?;
    // Line numbers as displayed by spreadsheet programs.
    let first_row = wrange.start().map(|(r, _)| r as usize + 1).unwrap_or(1);

    let mut rows = wrange.rows().enumerate();
    let mut header: Option<Vec<String>> = None;
    for (idx, row) in rows.by_ref() {
        let cells = read_row(row, first_row + idx)?;
        if !is_blank_row(&cells) {
            header = Some(cells);
            break;
        }
    }
    let header = header.context(MissingHeaderSnafu { path })?;
    debug!("read_excel_voters: header: {:?}", header);
    let columns = map_columns(&header, cfs, path)?;

    let mut res: Vec<ParsedVoter> = Vec::new();
    for (idx, row) in rows {
        let lineno = first_row + idx;
        let cells = read_row(row, lineno)?;
        if is_blank_row(&cells) {
            continue;
        }
        let record = assemble_record(&columns, &cells);
        debug!(
            "read_excel_voters: lineno: {:?} record: {:?}",
            lineno, &record
        );
        res.push(ParsedVoter {
            source: source_label(lineno),
            record,
        });
    }
    Ok(res)
}

fn get_range(path: &str, cfs: &FileSource) -> VcheckResult<Range<DataType>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match &cfs.excel_worksheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?
            .context(OpeningExcelSnafu { path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?,
    };
    Ok(wrange)
}

fn read_row(row: &[DataType], lineno: usize) -> VcheckResult<Vec<String>> {
    row.iter().map(|cell| read_cell(cell, lineno)).collect()
}

/// Renders a cell as text.
///
/// Mobile numbers and voter IDs are often stored as numbers, and dates of birth as dates.
fn read_cell(cell: &DataType, lineno: usize) -> VcheckResult<String> {
    match cell {
        DataType::String(s) => Ok(s.trim().to_string()),
        DataType::Empty => Ok("".to_string()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Ok(format!("{}", *f as i64)),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        DataType::DateTime(serial) => excel_serial_to_date(*serial)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .context(ExcelWrongCellTypeSnafu {
                lineno: lineno as u64,
                content: format!("{:?}", cell),
            }),
        _ => ExcelWrongCellTypeSnafu {
            lineno: lineno as u64,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

// Excel counts days from 1899-12-30 (this absorbs the fictitious 1900-02-29).
fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    epoch.checked_add_days(Days::new(serial.floor() as u64))
}
