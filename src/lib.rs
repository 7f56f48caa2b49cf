pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod scanner;
pub mod selector;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, DiscoveryConfig, OutputConfig, SelectionConfig};
pub use error::{Result, SheetSplitError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    write_csv, BatchReport, BatchSummary, ExportDriver, ExportResult, ExportStatus, Table,
    WorkbookOutcome, WorkbookSource,
};
pub use scanner::{FileFilter, WorkbookFile, WorkbookScanner};
pub use selector::{select_sheets, GlobPattern, PatternSet};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressAwareOutput, ProgressManager};

use indicatif::ProgressBar;
use std::path::{Path, PathBuf};

/// Main library interface: one batch export per call to [`SheetSplit::run`].
pub struct SheetSplit {
    config: Config,
    patterns: PatternSet,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl SheetSplit {
    /// Create a new instance and install the Ctrl+C handler.
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let shutdown = GracefulShutdown::new()?;
        Self::with_shutdown(config, output_mode, verbose, quiet, shutdown)
    }

    /// Create an instance around an existing shutdown flag.
    pub fn with_shutdown(
        config: Config,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
        shutdown: GracefulShutdown,
    ) -> Result<Self> {
        let patterns = config.pattern_set()?;
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_progress = output_mode == OutputMode::Human
            && !quiet
            && console::Term::stderr().features().is_attended();
        let progress_manager = ProgressManager::new(show_progress);

        Ok(Self {
            config,
            patterns,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
    }

    /// Export every matching sheet of every workbook in the input folder.
    ///
    /// Per-workbook failures are reported and recorded; only startup
    /// problems (unreadable input folder, output folder creation) and
    /// cancellation are returned as errors.
    pub fn run(&self) -> Result<BatchReport> {
        let input_dir = &self.config.discovery.input_directory;
        let driver = ExportDriver::new(&self.config.output.directory);
        driver.prepare()?;

        let mut report = BatchReport::new(
            input_dir.clone(),
            driver.output_dir().to_path_buf(),
            self.patterns.sources(),
        );

        let workbooks = match self.discover(input_dir) {
            Ok(workbooks) => workbooks,
            Err(e @ SheetSplitError::NoWorkbooksFound { .. }) => {
                self.output_formatter.warning(&e.user_message());
                report.finish();
                return Ok(report);
            }
            Err(e) => return Err(e),
        };
        report.set_workbooks_found(workbooks.len());

        let progress = self
            .progress_manager
            .create_workbook_progress(workbooks.len() as u64);

        for (index, workbook) in workbooks.iter().enumerate() {
            if self.shutdown.check_shutdown().is_err() {
                report.mark_cancelled();
                break;
            }

            ui::progress::update_workbook_progress(&progress, index, &workbook.filename);
            let outcome = self.process_workbook(&driver, workbook, &progress);
            report.record(workbook.path.clone(), outcome);
        }

        ui::progress::finish_progress(&progress);
        report.finish();

        if report.cancelled {
            self.output_formatter
                .warning("Stopped before all workbooks were processed.");
        }

        Ok(report)
    }

    fn discover(&self, input_dir: &Path) -> Result<Vec<WorkbookFile>> {
        let scanner = WorkbookScanner::new(&self.config.discovery);
        let workbooks = scanner.scan_directory(input_dir)?;

        self.output_formatter
            .debug(&scanner.get_statistics(&workbooks).display_summary());
        self.output_formatter
            .debug(&format!("Sheet patterns: {}", self.patterns));

        Ok(workbooks)
    }

    /// Open once, select, export. Never fails the batch.
    fn process_workbook(
        &self,
        driver: &ExportDriver,
        workbook: &WorkbookFile,
        progress: &ProgressBar,
    ) -> WorkbookOutcome {
        let output = ProgressAwareOutput::new(&self.output_formatter, Some(progress));
        output.processing(&format!("Processing: {}", workbook.display_path()));

        let mut source = match WorkbookSource::open(&workbook.path) {
            Ok(source) => source,
            Err(e) => return decode_failed(&output, e),
        };

        let sheet_names = source.sheet_names().to_vec();
        output.debug(&format!("Sheets: {}", sheet_names.join(", ")));

        let selected = self.patterns.select(&sheet_names);
        if selected.is_empty() {
            let e = SheetSplitError::NoMatchingSheets {
                file: workbook.filename.clone(),
            };
            output.warning(&e.user_message());
            return WorkbookOutcome::NoMatchingSheets { sheet_names };
        }
        output.debug(&format!("Selected: {}", selected.join(", ")));

        let on_result = |result: &ExportResult| {
            if result.is_success() {
                output.success(&format!("Saved: {}", result.target.display()));
            } else {
                output.error(&result.detail);
            }
        };

        match driver.export(workbook, &mut source, &selected, Some(&on_result)) {
            Ok(results) => WorkbookOutcome::Exported { results },
            Err(e) => decode_failed(&output, e),
        }
    }

    /// Resolve discovery and selection without writing anything.
    pub fn plan(&self) -> Result<Vec<PlannedWorkbook>> {
        let driver = ExportDriver::new(&self.config.output.directory);
        let workbooks = self.discover(&self.config.discovery.input_directory)?;

        let planned = workbooks
            .into_iter()
            .map(|workbook| match WorkbookSource::open(&workbook.path) {
                Ok(source) => {
                    let sheet_names = source.sheet_names().to_vec();
                    let selected = self.patterns.select(&sheet_names);
                    let targets = selected
                        .iter()
                        .map(|sheet| driver.export_target(&workbook.base, sheet))
                        .collect();
                    PlannedWorkbook {
                        workbook,
                        sheet_names,
                        selected,
                        targets,
                        error: None,
                    }
                }
                Err(e) => PlannedWorkbook {
                    workbook,
                    sheet_names: Vec::new(),
                    selected: Vec::new(),
                    targets: Vec::new(),
                    error: Some(e.user_message()),
                },
            })
            .collect();

        Ok(planned)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        Config::default().save_to_file(output_path)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    pub fn handle_error(&self, error: &SheetSplitError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Dry-run view of one workbook.
#[derive(Debug, Clone)]
pub struct PlannedWorkbook {
    pub workbook: WorkbookFile,
    pub sheet_names: Vec<String>,
    pub selected: Vec<String>,
    pub targets: Vec<PathBuf>,
    pub error: Option<String>,
}

fn decode_failed(output: &ProgressAwareOutput<'_>, error: SheetSplitError) -> WorkbookOutcome {
    output.error(&error.user_message());
    let message = match error {
        SheetSplitError::Decode { message, .. } => message,
        other => other.to_string(),
    };
    WorkbookOutcome::DecodeFailed { message }
}

/// Export with default settings and no console output.
pub fn export_folder_simple<P: AsRef<Path>, Q: AsRef<Path>>(
    input_dir: P,
    output_dir: Q,
    patterns: &[String],
) -> Result<BatchReport> {
    let mut config = Config::default();
    let overrides = CliOverrides::new()
        .with_input_dir(Some(input_dir.as_ref().to_path_buf()))
        .with_output_dir(Some(output_dir.as_ref().to_path_buf()))
        .with_patterns(Some(patterns.to_vec()));
    config.merge_with_cli_args(&overrides);
    config.validate()?;

    let sheetsplit = SheetSplit::with_shutdown(
        config,
        OutputMode::Plain,
        0,
        true,
        GracefulShutdown::new_for_test(),
    )?;
    sheetsplit.run()
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
