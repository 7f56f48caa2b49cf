use crate::error::{Result, SheetSplitError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Ctrl+C handling. The first signal lets the current workbook finish;
/// the second exits immediately.
pub struct GracefulShutdown {
    running: Arc<AtomicBool>,
}

impl GracefulShutdown {
    pub fn new() -> Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let shutdown_message_shown = Arc::new(AtomicBool::new(false));

        let running_clone = running.clone();

        ctrlc::set_handler(move || {
            running_clone.store(false, Ordering::SeqCst);

            if !shutdown_message_shown.swap(true, Ordering::SeqCst) {
                eprintln!("\n[!] Stopping after the current workbook... (press Ctrl+C again to force exit)");
            } else {
                eprintln!("\n[!] Force stopping...");
                std::process::exit(130);
            }
        })
        .map_err(|e| SheetSplitError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self { running })
    }

    /// No signal handler registration, so it can be built many times.
    pub fn new_for_test() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn check_shutdown(&self) -> Result<()> {
        if !self.is_running() {
            return Err(SheetSplitError::Cancelled);
        }
        Ok(())
    }

    pub fn request_shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
