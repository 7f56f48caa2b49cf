pub mod file_filter;
pub mod workbook_scanner;

pub use file_filter::FileFilter;
pub use workbook_scanner::{WorkbookFile, WorkbookScanner};
