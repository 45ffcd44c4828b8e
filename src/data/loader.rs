use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use super::table::{CellValue, EmployeeTable, Row};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an employee table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.xlsx` / `.xls` – first worksheet only, first row is the header
/// * `.csv`           – header row plus records
pub fn load_file(path: &Path) -> Result<EmployeeTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "xlsx" | "xls" => load_workbook(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// Read the first worksheet of an Excel workbook. Rows that are entirely
/// empty are skipped; empty cells inside a row become `CellValue::Null`.
fn load_workbook(path: &Path) -> Result<EmployeeTable> {
    let mut workbook = open_workbook_auto(path).context("opening workbook")?;

    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range.context("reading first worksheet")?,
        None => bail!("Workbook has no worksheets"),
    };

    let mut rows_iter = range.rows();
    let header = rows_iter.next().context("Worksheet is empty")?;
    let column_names: Vec<String> = header.iter().map(header_name).collect();

    let mut rows = Vec::new();
    for cells in rows_iter {
        if cells.iter().all(|c| matches!(c, Data::Empty)) {
            continue;
        }
        let row: Row = column_names
            .iter()
            .zip(cells.iter())
            .map(|(name, cell)| (name.clone(), excel_cell(cell)))
            .collect();
        rows.push(row);
    }

    Ok(EmployeeTable::new(column_names, rows))
}

fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Map an Excel cell to a [`CellValue`]. Whole floats become integers:
/// Excel stores every number as a float, but counts like satisfaction
/// scores and year tallies are integral in the source data.
fn excel_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::String(s) if s.trim().is_empty() => CellValue::Null,
        Data::String(s) => CellValue::String(s.trim().to_string()),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            CellValue::Integer(*f as i64)
        }
        Data::Float(f) => CellValue::Float(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(_) => CellValue::Null,
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<EmployeeTable> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(&mut reader)
}

/// Parse CSV records into a table. Cell types are guessed per value:
/// integer, then float, then bool, otherwise string; empty cells are null.
fn read_csv<R: io::Read>(reader: &mut csv::Reader<R>) -> Result<EmployeeTable> {
    let column_names: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row: Row = column_names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), guess_cell_type(record.get(i).unwrap_or(""))))
            .collect();
        rows.push(row);
    }

    Ok(EmployeeTable::new(column_names, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}
