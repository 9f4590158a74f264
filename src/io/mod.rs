//! Reading spreadsheets into tables and writing run artifacts.
//!
//! Only the first sheet of a workbook is read. Its first row is the header.
//! Cells are typed per column: a column whose observed cells are all numbers
//! (or booleans) is numeric, anything else is categorical.

mod artifact;
#[cfg(test)]
pub(crate) mod fixture;

pub use artifact::{
    RunArtifacts, model_path, read_model, write_json, write_model, write_table,
};

use crate::error::{PipelineError, Result};
use crate::table::{Column, ColumnData, Table};
use calamine::{Data, Reader, open_workbook_auto};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Strings read as missing values.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

static EMPTY_CELL: Data = Data::Empty;

/// Reads the first sheet of a workbook into a `Table`.
///
/// Fails with `NotFound` when `path` does not exist and `MalformedInput` when
/// the file is not a readable workbook or its first sheet has no header row.
pub fn read_spreadsheet(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook =
        open_workbook_auto(path).map_err(|e| PipelineError::malformed(path, e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| PipelineError::malformed(path, "workbook has no sheets"))?
        .map_err(|e| PipelineError::malformed(path, e.to_string()))?;

    let table = table_from_rows(path, range.rows())?;
    tracing::debug!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "read spreadsheet"
    );
    Ok(table)
}

/// Reads every path in order.
pub fn read_spreadsheets(paths: &[PathBuf]) -> Result<Vec<Table>> {
    paths.iter().map(read_spreadsheet).collect()
}

/// Builds a table from raw sheet rows, the first of which is the header.
pub(crate) fn table_from_rows<'a, I>(path: &Path, mut rows: I) -> Result<Table>
where
    I: Iterator<Item = &'a [Data]>,
{
    let header = rows
        .next()
        .ok_or_else(|| PipelineError::malformed(path, "sheet has no header row"))?;
    let names = column_names(header);

    let mut cells: Vec<Vec<&Data>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(row.get(i).unwrap_or(&EMPTY_CELL));
        }
    }

    let columns = names
        .into_iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name, infer_column(&values)))
        .collect();
    Table::new(columns)
}

fn column_names(header: &[Data]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let base = match cell {
                Data::Empty => format!("Unnamed: {}", i),
                other => other.to_string(),
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base
            } else {
                format!("{}.{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

fn is_missing(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => NA_TOKENS.contains(&s.as_str()),
        _ => false,
    }
}

fn as_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        Data::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn infer_column(cells: &[&Data]) -> ColumnData {
    let numeric = cells
        .iter()
        .filter(|c| !is_missing(c))
        .all(|c| as_number(c).is_some());

    if numeric {
        ColumnData::Numeric(
            cells
                .iter()
                .map(|c| if is_missing(c) { None } else { as_number(c) })
                .collect(),
        )
    } else {
        ColumnData::Categorical(
            cells
                .iter()
                .map(|c| match c {
                    c if is_missing(c) => None,
                    Data::String(s) => Some(s.clone()),
                    other => Some(other.to_string()),
                })
                .collect(),
        )
    }
}

/// Lists the input files of a directory, sorted by path.
///
/// Only files with the given extension are returned. With
/// `date_stamped_only`, file stems must start with a `YYYY-MM-DD` date.
pub fn discover_inputs(
    dir: impl AsRef<Path>,
    extension: &str,
    date_stamped_only: bool,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(PipelineError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let entries = std::fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::io(dir, e))?.path();
        if !path.is_file() {
            continue;
        }
        let matches_ext = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !matches_ext {
            continue;
        }
        if date_stamped_only {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            if !starts_with_date(stem) {
                tracing::debug!(path = %path.display(), "skipping file without date stamp");
                continue;
            }
        }
        paths.push(path);
    }
    paths.sort();

    if paths.is_empty() {
        return Err(PipelineError::NoInputs {
            context: format!("no .{} files in {}", extension, dir.display()),
        });
    }
    tracing::info!(dir = %dir.display(), files = paths.len(), "discovered input files");
    Ok(paths)
}

fn starts_with_date(stem: &str) -> bool {
    let bytes = stem.as_bytes();
    if bytes.len() < 10 {
        return false;
    }
    bytes[..10].iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    })
}
