use crate::error::{Result, SheetSplitError};
use calamine::{open_workbook_auto, Data, DataType, Range, Reader, Sheets};
use chrono::Timelike;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Decoded sheet contents: one header row plus data rows of equal width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(mut headers: Vec<String>, mut rows: Vec<Vec<String>>) -> Self {
        let width = rows.iter().map(Vec::len).fold(headers.len(), usize::max);
        headers.resize(width, String::new());
        for row in &mut rows {
            row.resize(width, String::new());
        }

        Self {
            headers: normalize_headers(headers),
            rows,
        }
    }

    /// First row of the used range becomes the header.
    ///
    /// Blank columns to the left of the used range are kept, so data that
    /// starts in column C still has two leading (unnamed) columns.
    pub fn from_range(range: &Range<Data>) -> Self {
        if range.is_empty() {
            return Self::default();
        }

        let leading = range.start().map_or(0, |(_, col)| col as usize);
        let mut rows = range.rows().map(|row| {
            std::iter::repeat(String::new())
                .take(leading)
                .chain(row.iter().map(render_cell))
                .collect::<Vec<_>>()
        });

        let headers = rows.next().unwrap_or_default();
        Self::new(headers, rows.collect())
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}

/// An opened workbook. Sheet names and ranges are read through one handle.
pub struct WorkbookSource {
    path: PathBuf,
    sheets: Sheets<BufReader<File>>,
    sheet_names: Vec<String>,
}

impl WorkbookSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let sheets = open_workbook_auto(path).map_err(|e| decode_error(path, e))?;
        let sheet_names = sheets.sheet_names();

        Ok(Self {
            path: path.to_path_buf(),
            sheets,
            sheet_names,
        })
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> &[String] {
        &self.sheet_names
    }

    /// Decode the named sheets. Any failure fails the whole request.
    pub fn read_sheets(&mut self, names: &[String]) -> Result<Vec<(String, Table)>> {
        names
            .iter()
            .map(|name| {
                let range = self
                    .sheets
                    .worksheet_range(name)
                    .map_err(|e| decode_error(&self.path, e))?;
                Ok((name.clone(), Table::from_range(&range)))
            })
            .collect()
    }
}

fn decode_error(path: &Path, error: calamine::Error) -> SheetSplitError {
    SheetSplitError::Decode {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}

pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) if dt.is_duration() => render_duration(dt.as_f64()),
        Data::DateTime(dt) => match cell.as_datetime() {
            Some(value) if value.time().num_seconds_from_midnight() == 0 => {
                value.format("%Y-%m-%d").to_string()
            }
            Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.as_f64().to_string(),
        },
    }
}

fn render_duration(days: f64) -> String {
    let total = (days * 86_400.0).round() as i64;
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

/// Blank headers become `Unnamed: {index}`; repeats get `.1`, `.2`, ...
pub fn normalize_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();

    headers
        .into_iter()
        .enumerate()
        .map(|(index, header)| {
            let base = if header.trim().is_empty() {
                format!("Unnamed: {}", index)
            } else {
                header
            };

            let mut candidate = base.clone();
            let mut suffix = 1;
            while seen.contains(&candidate) {
                candidate = format!("{}.{}", base, suffix);
                suffix += 1;
            }
            seen.insert(candidate.clone());
            candidate
        })
        .collect()
}
