use crate::config::DiscoveryConfig;
use std::path::Path;

pub struct FileFilter {
    workbook_extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            workbook_extensions: config
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
        }
    }

    /// Extension check only, case-insensitive. Lock files and other
    /// look-alikes are left for the decoder to reject.
    pub fn is_workbook_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| self.workbook_extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }

    pub fn get_extensions(&self) -> &Vec<String> {
        &self.workbook_extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        let config = DiscoveryConfig::default();
        Self::new(&config)
    }
}
