use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_workbook_progress(&self, total_workbooks: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total_workbooks);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>4}/{len:4} workbooks {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_workbook_progress(pb: &ProgressBar, completed: usize, current_file: &str) {
    pb.set_position(completed as u64);
    pb.set_message(current_file.to_string());
}

pub fn finish_progress(pb: &ProgressBar) {
    pb.finish_and_clear();
}
