use crate::error::{SheetSplitError, UserFriendlyError};
use crate::extractor::BatchReport;
use console::{style, Term};
use indicatif::ProgressBar;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

/// Console reporting for a batch run.
///
/// Human and plain modes print one line per event, prefixed `[→]`, `[✓]`
/// or `[!]`; human mode adds color when the terminal supports it. JSON mode
/// prints one object per event.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    use_error_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        // Failure lines go to stderr, everything else to stdout.
        let use_colors = mode == OutputMode::Human && !quiet && colors_supported(&Term::stdout());
        let use_error_colors = mode == OutputMode::Human && colors_supported(&Term::stderr());

        Self {
            mode,
            use_colors,
            use_error_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn processing(&self, message: &str) {
        if self.should_show_message(0) {
            self.emit(MessageType::Processing, message);
        }
    }

    pub fn success(&self, message: &str) {
        if self.should_show_message(0) {
            self.emit(MessageType::Success, message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            self.emit(MessageType::Warning, message);
        }
    }

    /// Failures are printed even in quiet mode.
    pub fn error(&self, message: &str) {
        self.emit(MessageType::Error, message);
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            self.emit(MessageType::Info, message);
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Json => self.print_json_message("debug", message),
                _ if self.use_colors => println!("    {}", style(message).dim()),
                _ => println!("    {}", message),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &SheetSplitError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Json => self.print_json_object(&serde_json::json!({
                    "type": "suggestion",
                    "message": suggestion
                })),
                _ if self.use_error_colors => {
                    eprintln!("    {}", style(format!("Suggestion: {}", suggestion)).cyan().for_stderr())
                }
                _ => eprintln!("    Suggestion: {}", suggestion),
            }
        }
    }

    pub fn print_batch_summary(&self, report: &BatchReport) {
        if self.quiet {
            return;
        }

        let summary = &report.summary;
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ if summary.workbooks_found == 0 => {}
            _ => {
                self.print_separator();
                let headline = format!(
                    "Exported {} sheet{} from {} of {} workbook{}",
                    summary.sheets_written,
                    plural(summary.sheets_written),
                    summary.workbooks_exported,
                    summary.workbooks_found,
                    plural(summary.workbooks_found),
                );
                if self.use_colors {
                    println!("{}", style(headline).green().bold());
                } else {
                    println!("{}", headline);
                }

                println!("  Rows written:    {}", summary.rows_written);
                if summary.workbooks_skipped > 0 {
                    println!("  No match:        {}", summary.workbooks_skipped);
                }
                let errors = report.errors();
                if !errors.is_empty() {
                    println!("  Failures:        {}", errors.len());
                    for error in &errors {
                        println!("    - {}", error);
                    }
                }
                println!("  Time taken:      {}", format_duration(summary.duration));
                if report.cancelled {
                    println!("  Stopped early by user request");
                }
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet || self.mode == OutputMode::Json {
            return;
        }

        if self.use_colors {
            println!("{}", style("─".repeat(60)).dim());
        } else {
            println!("{}", "-".repeat(60));
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn emit(&self, msg_type: MessageType, message: &str) {
        match self.mode {
            OutputMode::Json => self.print_json_message(msg_type.level(), message),
            _ => {
                let marker = msg_type.marker();
                let colored = match msg_type {
                    MessageType::Error => self.use_error_colors,
                    _ => self.use_colors,
                };
                let line = if colored {
                    let marker = match msg_type {
                        MessageType::Processing => style(marker).cyan(),
                        MessageType::Success => style(marker).green().bold(),
                        MessageType::Warning => style(marker).yellow().bold(),
                        MessageType::Error => style(marker).red().bold().for_stderr(),
                        MessageType::Info => style(marker).blue(),
                    };
                    format!("{} {}", marker, message)
                } else {
                    format!("{} {}", marker, message)
                };

                match msg_type {
                    MessageType::Error => eprintln!("{}", line),
                    _ => println!("{}", line),
                }
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Processing,
    Success,
    Warning,
    Error,
    Info,
}

impl MessageType {
    fn marker(self) -> &'static str {
        match self {
            MessageType::Processing => "[→]",
            MessageType::Success => "[✓]",
            MessageType::Warning | MessageType::Error => "[!]",
            MessageType::Info => "[i]",
        }
    }

    fn level(self) -> &'static str {
        match self {
            MessageType::Processing => "processing",
            MessageType::Success => "success",
            MessageType::Warning => "warning",
            MessageType::Error => "error",
            MessageType::Info => "info",
        }
    }
}

fn colors_supported(term: &Term) -> bool {
    term.features().colors_supported()
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

/// Routes formatter output through the progress bar so lines are not overdrawn.
pub struct ProgressAwareOutput<'a> {
    formatter: &'a OutputFormatter,
    progress_bar: Option<&'a ProgressBar>,
}

impl<'a> ProgressAwareOutput<'a> {
    pub fn new(formatter: &'a OutputFormatter, progress_bar: Option<&'a ProgressBar>) -> Self {
        Self {
            formatter,
            progress_bar,
        }
    }

    pub fn suspend_and_print<F>(&self, f: F)
    where
        F: FnOnce(&OutputFormatter),
    {
        match self.progress_bar {
            Some(pb) if !pb.is_hidden() => pb.suspend(|| f(self.formatter)),
            _ => f(self.formatter),
        }
    }

    pub fn processing(&self, message: &str) {
        self.suspend_and_print(|f| f.processing(message));
    }

    pub fn success(&self, message: &str) {
        self.suspend_and_print(|f| f.success(message));
    }

    pub fn warning(&self, message: &str) {
        self.suspend_and_print(|f| f.warning(message));
    }

    pub fn error(&self, message: &str) {
        self.suspend_and_print(|f| f.error(message));
    }

    pub fn debug(&self, message: &str) {
        self.suspend_and_print(|f| f.debug(message));
    }
}
