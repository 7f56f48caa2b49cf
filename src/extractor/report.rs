use crate::extractor::export_driver::ExportResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkbookOutcome {
    Exported { results: Vec<ExportResult> },
    NoMatchingSheets { sheet_names: Vec<String> },
    DecodeFailed { message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: WorkbookOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub workbooks_found: usize,
    pub workbooks_exported: usize,
    pub workbooks_skipped: usize,
    pub workbooks_failed: usize,
    pub sheets_written: usize,
    pub sheets_failed: usize,
    pub rows_written: u64,
    pub duration: Duration,
}

/// Everything that happened in one run, in processing order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub input_directory: PathBuf,
    pub output_directory: PathBuf,
    pub patterns: Vec<String>,
    pub workbooks: Vec<WorkbookReport>,
    pub summary: BatchSummary,
    pub started_at: DateTime<Utc>,
    pub cancelled: bool,
    #[serde(skip)]
    start_time: Option<Instant>,
}

impl BatchReport {
    pub fn new(input_directory: PathBuf, output_directory: PathBuf, patterns: Vec<String>) -> Self {
        Self {
            input_directory,
            output_directory,
            patterns,
            workbooks: Vec::new(),
            summary: BatchSummary::default(),
            started_at: Utc::now(),
            cancelled: false,
            start_time: Some(Instant::now()),
        }
    }

    pub fn set_workbooks_found(&mut self, count: usize) {
        self.summary.workbooks_found = count;
    }

    pub fn record(&mut self, path: PathBuf, outcome: WorkbookOutcome) {
        match &outcome {
            WorkbookOutcome::Exported { results } => {
                self.summary.workbooks_exported += 1;
                for result in results {
                    if result.is_success() {
                        self.summary.sheets_written += 1;
                        self.summary.rows_written += result.rows_written;
                    } else {
                        self.summary.sheets_failed += 1;
                    }
                }
            }
            WorkbookOutcome::NoMatchingSheets { .. } => self.summary.workbooks_skipped += 1,
            WorkbookOutcome::DecodeFailed { .. } => self.summary.workbooks_failed += 1,
        }

        self.workbooks.push(WorkbookReport { path, outcome });
    }

    pub fn mark_cancelled(&mut self) {
        self.cancelled = true;
    }

    pub fn finish(&mut self) {
        if let Some(start) = self.start_time {
            self.summary.duration = start.elapsed();
        }
    }

    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        for workbook in &self.workbooks {
            match &workbook.outcome {
                WorkbookOutcome::DecodeFailed { message } => errors.push(format!(
                    "Failed to process {}: {}",
                    workbook.path.display(),
                    message
                )),
                WorkbookOutcome::Exported { results } => errors.extend(
                    results
                        .iter()
                        .filter(|r| !r.is_success())
                        .map(|r| r.detail.clone()),
                ),
                WorkbookOutcome::NoMatchingSheets { .. } => {}
            }
        }
        errors
    }
}
