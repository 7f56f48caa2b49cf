use crate::config::DiscoveryConfig;
use crate::error::{Result, SheetSplitError};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A spreadsheet discovered in the input folder. Never written to.
#[derive(Debug, Clone)]
pub struct WorkbookFile {
    pub path: PathBuf,
    pub filename: String,
    /// File name without its final extension; prefixes every CSV.
    pub base: String,
    pub extension: String,
    pub size: u64,
}

impl WorkbookFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let base = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Self {
            path,
            filename,
            base,
            extension,
            size,
        }
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct WorkbookScanner {
    filter: FileFilter,
}

impl WorkbookScanner {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    /// List workbooks directly inside `root`, sorted by file name.
    pub fn scan_directory<P: AsRef<Path>>(&self, root: P) -> Result<Vec<WorkbookFile>> {
        let root_path = root.as_ref();

        if !root_path.exists() {
            return Err(SheetSplitError::InvalidPath {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(SheetSplitError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let mut workbooks = Vec::new();

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                // Unreadable entries are not workbooks we can export
                Err(_) => continue,
            };

            if let Some(workbook) = self.process_entry(&entry) {
                workbooks.push(workbook);
            }
        }

        if workbooks.is_empty() {
            return Err(SheetSplitError::NoWorkbooksFound {
                path: root_path.display().to_string(),
                searched_extensions: self.filter.get_extensions().clone(),
            });
        }

        Ok(workbooks)
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<WorkbookFile> {
        if !entry.file_type().is_file() || !self.filter.is_workbook_file(entry.path()) {
            return None;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
        Some(WorkbookFile::new(entry.path().to_path_buf(), size))
    }

    pub fn get_statistics(&self, workbooks: &[WorkbookFile]) -> ScanStatistics {
        ScanStatistics {
            total_files: workbooks.len(),
            total_size: workbooks.iter().map(|w| w.size).sum(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        format!(
            "Found {} workbook{} ({})",
            self.total_files,
            if self.total_files == 1 { "" } else { "s" },
            format_bytes(self.total_size)
        )
    }
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
