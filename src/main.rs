use clap::Parser;
use sheetsplit::{
    Cli, OutputFormatter, OutputMode, SheetSplit, SheetSplitError, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let sheetsplit = match SheetSplit::from_cli(&cli) {
        Ok(sheetsplit) => sheetsplit,
        Err(e) => {
            print_startup_error(&e, cli.output_mode());
            return 1;
        }
    };

    if cli.dry_run {
        return handle_dry_run(&sheetsplit);
    }

    match sheetsplit.run() {
        Ok(report) => {
            sheetsplit.output_formatter().print_batch_summary(&report);

            // Per-workbook failures are already reported; the batch itself completed.
            if report.cancelled {
                130
            } else {
                0
            }
        }
        Err(e) => {
            sheetsplit.handle_error(&e);

            match e {
                SheetSplitError::Cancelled => 130,
                _ => 1,
            }
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "sheetsplit.toml".to_string());

    match SheetSplit::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  sheetsplit --config {}", config_path);
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn handle_dry_run(sheetsplit: &SheetSplit) -> i32 {
    let formatter = sheetsplit.output_formatter();
    let config = sheetsplit.config();

    formatter.info("DRY RUN MODE - No files will be written");
    formatter.print_separator();
    formatter.info(&format!(
        "Input folder:  {}",
        config.discovery.input_directory.display()
    ));
    formatter.info(&format!("Output folder: {}", config.output.directory.display()));
    formatter.info(&format!("Extensions:    {}", config.discovery.extensions.join(", ")));
    formatter.info(&format!("Sheets:        {}", sheetsplit.patterns()));
    formatter.print_separator();

    let planned = match sheetsplit.plan() {
        Ok(planned) => planned,
        Err(e @ SheetSplitError::NoWorkbooksFound { .. }) => {
            formatter.warning(&e.user_message());
            return 0;
        }
        Err(e) => {
            sheetsplit.handle_error(&e);
            return 1;
        }
    };

    for item in &planned {
        formatter.processing(&item.workbook.display_path());

        if let Some(ref error) = item.error {
            formatter.error(error);
        } else if item.selected.is_empty() {
            formatter.warning(&format!(
                "No matching sheets found in {}.",
                item.workbook.filename
            ));
        } else {
            for target in &item.targets {
                formatter.success(&format!("Would save: {}", target.display()));
            }
        }
    }

    formatter.print_separator();
    formatter.info("Run without --dry-run to perform the export");

    0
}

fn print_startup_error(error: &SheetSplitError, mode: OutputMode) {
    let formatter = OutputFormatter::new(mode, 0, false);
    formatter.print_user_friendly_error(error);
}
