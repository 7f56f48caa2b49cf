pub mod csv_writer;
pub mod export_driver;
pub mod report;
pub mod workbook_reader;

pub use csv_writer::{write_csv, write_table};
pub use export_driver::{ExportDriver, ExportResult, ExportStatus};
pub use report::{BatchReport, BatchSummary, WorkbookOutcome, WorkbookReport};
pub use workbook_reader::{Table, WorkbookSource};
