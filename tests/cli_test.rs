use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn sheetsplit() -> Command {
    Command::cargo_bin("sheetsplit").unwrap()
}

fn write_sales_workbook(path: &Path) {
    let mut workbook = Workbook::new();

    let q1 = workbook.add_worksheet();
    q1.set_name("Q1").unwrap();
    q1.write_string(0, 0, "Region").unwrap();
    q1.write_string(0, 1, "Total").unwrap();
    q1.write_string(1, 0, "East").unwrap();
    q1.write_number(1, 1, 100.0).unwrap();

    let q2 = workbook.add_worksheet();
    q2.set_name("Q2").unwrap();
    q2.write_string(0, 0, "Region").unwrap();
    q2.write_string(0, 1, "Total").unwrap();
    q2.write_string(1, 0, "West").unwrap();
    q2.write_number(1, 1, 12.5).unwrap();

    workbook.save(path).unwrap();
}

fn write_months_workbook(path: &Path) {
    let mut workbook = Workbook::new();
    for month in ["Jan", "Feb", "Mar", "Jun", "Jul"] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(month).unwrap();
        sheet.write_string(0, 0, "Month").unwrap();
        sheet.write_string(1, 0, month).unwrap();
    }
    workbook.save(path).unwrap();
}

fn csv_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.ends_with(".csv"))
        .collect();
    names.sort();
    names
}

#[test]
fn exports_every_sheet_by_default() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_sales_workbook(&input.path().join("sales.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[→] Processing:"))
        .stdout(predicate::str::contains("[✓] Saved:"))
        .stdout(predicate::str::contains("sales_Q2.csv"));

    assert_eq!(csv_files(output.path()), vec!["sales_Q1.csv", "sales_Q2.csv"]);
    assert_eq!(
        fs::read_to_string(output.path().join("sales_Q1.csv")).unwrap(),
        "Region,Total\nEast,100\n"
    );
    assert_eq!(
        fs::read_to_string(output.path().join("sales_Q2.csv")).unwrap(),
        "Region,Total\nWest,12.5\n"
    );
}

#[test]
fn glob_patterns_select_sheets() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_months_workbook(&input.path().join("months.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain", "--sheets", "J*"])
        .assert()
        .success();

    assert_eq!(
        csv_files(output.path()),
        vec!["months_Jan.csv", "months_Jul.csv", "months_Jun.csv"]
    );
}

#[test]
fn character_class_patterns_select_sheets() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_months_workbook(&input.path().join("months.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain", "--sheets", "[FM]*"])
        .assert()
        .success();

    assert_eq!(
        csv_files(output.path()),
        vec!["months_Feb.csv", "months_Mar.csv"]
    );
}

#[test]
fn empty_folder_reports_once_and_succeeds() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let assert = sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert_eq!(stdout.matches("No Excel files found.").count(), 1);
    assert!(csv_files(output.path()).is_empty());
}

#[test]
fn unmatched_patterns_warn_per_workbook() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_sales_workbook(&input.path().join("sales.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain", "--sheets", "Summary"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[!] No matching sheets found in sales.xlsx.",
        ));

    assert!(csv_files(output.path()).is_empty());
}

#[test]
fn corrupt_workbook_does_not_stop_the_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a_broken.xlsx"), b"this is not a workbook").unwrap();
    write_sales_workbook(&input.path().join("b_sales.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to process"))
        .stderr(predicate::str::contains("a_broken.xlsx"));

    assert_eq!(
        csv_files(output.path()),
        vec!["b_sales_Q1.csv", "b_sales_Q2.csv"]
    );
}

#[test]
fn write_failure_is_isolated_to_one_sheet() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_sales_workbook(&input.path().join("sales.xlsx"));
    fs::create_dir(output.path().join("sales_Q1.csv")).unwrap();

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Failed to write"))
        .stdout(predicate::str::contains("Failures:        1"));

    assert!(output.path().join("sales_Q1.csv").is_dir());
    assert_eq!(
        fs::read_to_string(output.path().join("sales_Q2.csv")).unwrap(),
        "Region,Total\nWest,12.5\n"
    );
}

#[test]
fn blank_leading_columns_become_unnamed() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Offset").unwrap();
    sheet.write_string(0, 1, "Region").unwrap();
    sheet.write_string(1, 1, "East").unwrap();
    workbook.save(input.path().join("offset.xlsx")).unwrap();

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(output.path().join("offset_Offset.csv")).unwrap(),
        "Unnamed: 0,Region\n,East\n"
    );
}

#[test]
fn creates_missing_output_folder() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let nested = output.path().join("exports").join("2024");
    write_sales_workbook(&input.path().join("sales.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(&nested)
        .args(["--output-format", "plain", "--sheets", "Q1"])
        .assert()
        .success();

    assert_eq!(csv_files(&nested), vec!["sales_Q1.csv"]);
}

#[test]
fn existing_outputs_are_overwritten() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_sales_workbook(&input.path().join("sales.xlsx"));
    fs::write(output.path().join("sales_Q1.csv"), "stale\n").unwrap();

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "plain", "--sheets", "Q1"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(output.path().join("sales_Q1.csv")).unwrap(),
        "Region,Total\nEast,100\n"
    );
}

#[test]
fn missing_input_folder_is_a_startup_error() {
    let output = TempDir::new().unwrap();

    sheetsplit()
        .arg(output.path().join("does-not-exist"))
        .arg(output.path())
        .args(["--output-format", "plain"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid path"));
}

#[test]
fn quiet_mode_prints_only_failures() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_sales_workbook(&input.path().join("sales.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(csv_files(output.path()).len(), 2);
}

#[test]
fn json_output_reports_the_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_sales_workbook(&input.path().join("sales.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .args(["--output-format", "json", "--sheets", "Q2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"sheets_written\": 1"))
        .stdout(predicate::str::contains("\"outcome\": \"exported\""));
}

#[test]
fn config_file_supplies_patterns() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write_sales_workbook(&input.path().join("sales.xlsx"));

    let config_path = input.path().join("custom.toml");
    fs::write(&config_path, "[selection]\npatterns = [\"Q2\"]\n").unwrap();

    sheetsplit()
        .arg(input.path())
        .arg(output.path())
        .arg("--config")
        .arg(&config_path)
        .args(["--output-format", "plain"])
        .assert()
        .success();

    assert_eq!(csv_files(output.path()), vec!["sales_Q2.csv"]);
}

#[test]
fn dry_run_writes_nothing() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let target = output.path().join("csv");
    write_sales_workbook(&input.path().join("sales.xlsx"));

    sheetsplit()
        .arg(input.path())
        .arg(&target)
        .args(["--output-format", "plain", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would save:"))
        .stdout(predicate::str::contains("sales_Q1.csv"));

    assert!(!target.exists());
}
