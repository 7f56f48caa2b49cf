use crate::error::{Result, SheetSplitError};
use crate::extractor::csv_writer::write_csv;
use crate::extractor::workbook_reader::WorkbookSource;
use crate::scanner::WorkbookFile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResult {
    pub sheet: String,
    pub target: PathBuf,
    pub status: ExportStatus,
    pub detail: String,
    pub rows_written: u64,
}

impl ExportResult {
    pub fn is_success(&self) -> bool {
        self.status == ExportStatus::Success
    }
}

/// Writes one CSV per selected sheet into a fixed output directory.
pub struct ExportDriver {
    output_dir: PathBuf,
}

impl ExportDriver {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Create the output directory and any missing parents.
    pub fn prepare(&self) -> Result<()> {
        if !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir).map_err(SheetSplitError::Io)?;
        }
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// `{output_dir}/{base}_{sheet}.csv`. Same inputs always give the same
    /// path, so same-named sheets of same-named workbooks overwrite.
    pub fn export_target(&self, workbook_base: &str, sheet_name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.csv", workbook_base, sheet_name))
    }

    /// Decode the selected sheets, then write them one by one.
    ///
    /// A decode failure aborts the workbook before anything is written. A
    /// write failure is recorded for that sheet and the rest still run.
    pub fn export(
        &self,
        workbook: &WorkbookFile,
        source: &mut WorkbookSource,
        selected_sheets: &[String],
        on_result: Option<&dyn Fn(&ExportResult)>,
    ) -> Result<Vec<ExportResult>> {
        let tables = source.read_sheets(selected_sheets)?;
        let mut results = Vec::with_capacity(tables.len());

        for (sheet, table) in tables {
            let target = self.export_target(&workbook.base, &sheet);

            let result = match write_csv(&target, &table) {
                Ok(rows_written) => ExportResult {
                    detail: format!("{} rows", rows_written),
                    sheet,
                    target,
                    status: ExportStatus::Success,
                    rows_written,
                },
                Err(err) => {
                    let error = SheetSplitError::Write {
                        path: target.display().to_string(),
                        source: err,
                    };
                    ExportResult {
                        detail: error.to_string(),
                        sheet,
                        target,
                        status: ExportStatus::Failure,
                        rows_written: 0,
                    }
                }
            };

            if let Some(callback) = on_result {
                callback(&result);
            }
            results.push(result);
        }

        Ok(results)
    }
}
