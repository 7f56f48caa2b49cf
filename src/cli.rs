use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sheetsplit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Batch extract data from Excel sheets into .csv files")]
#[command(
    long_about = "SheetSplit scans a folder for .xls/.xlsx workbooks and writes every \
                  matching worksheet to its own CSV file named {workbook}_{sheet}.csv."
)]
#[command(after_help = "EXAMPLES:\n  \
    sheetsplit\n  \
    sheetsplit reports/ csv/\n  \
    sheetsplit reports/ csv/ --sheets 'Q[1-4]' 'Summary*'\n  \
    sheetsplit reports/ csv/ --config sheetsplit.toml --output-format json")]
pub struct Cli {
    /// Input folder containing Excel files (default: current dir)
    pub input_folder: Option<PathBuf>,

    /// Output folder for CSV files (default: current dir)
    pub output_folder: Option<PathBuf>,

    /// Sheet names to extract; supports Unix shell-style wildcards (default: all)
    #[arg(long, num_args = 0.., value_name = "PATTERN")]
    pub sheets: Option<Vec<String>>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only failures are printed)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (show what would be exported without writing files)
    #[arg(long, help = "Show which sheets would be exported without writing anything")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_input_dir(self.input_folder.clone())
            .with_output_dir(self.output_folder.clone())
            .with_patterns(self.sheets.clone())
    }

    pub fn output_mode(&self) -> OutputMode {
        match self.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
