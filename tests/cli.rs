//! End-to-end tests for the command-line binary.

use assert_cmd::Command;
use chrono::Local;

use std::fs;
use std::path::{Path, PathBuf};

fn order_splitter() -> Command {
    Command::cargo_bin("order-splitter").unwrap()
}

fn todays_orders_dir(parent: &Path) -> PathBuf {
    parent.join(format!("Orders_{}", Local::now().date_naive().format("%Y-%m-%d")))
}

#[test]
fn missing_argument_exits_1_and_creates_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    order_splitter()
        .current_dir(tmp.path())
        .assert()
        .failure()
        .code(1);
    let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
    assert!(entries.is_empty(), "directory should be untouched");
}

#[test]
fn nonexistent_input_path_exits_1_with_message() {
    let tmp = tempfile::tempdir().unwrap();
    let bogus = tmp.path().join("no_such_sales.csv");
    let output = order_splitter().arg(&bogus).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("not a valid existing file path"),
        "unexpected stderr: {stderr}"
    );
    assert!(!todays_orders_dir(tmp.path()).exists());
}

#[test]
fn splits_sales_csv_into_one_workbook_per_order() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("sales.csv");
    fs::copy("testdata/sales.csv", &input).unwrap();

    order_splitter().arg(&input).assert().success();

    let orders_dir = todays_orders_dir(tmp.path());
    assert!(orders_dir.is_dir());
    let mut names: Vec<String> = fs::read_dir(&orders_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["Order1001_JaneDoe.xlsx", "Order1002_OBrienMary.xlsx"]);

    // Re-running on the same day reuses the directory and succeeds.
    order_splitter().arg(&input).assert().success();
}

#[test]
fn write_failure_on_one_order_still_writes_the_others() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("sales.csv");
    fs::copy("testdata/sales.csv", &input).unwrap();
    let orders_dir = todays_orders_dir(tmp.path());
    // A directory squatting on the first order's file name makes that write
    // fail; the second order must still go through.
    fs::create_dir_all(orders_dir.join("Order1001_JaneDoe.xlsx")).unwrap();

    let output = order_splitter().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("order 1001"), "unexpected stderr: {stderr}");
    assert!(
        stderr.contains("1 order sheet(s) could not be written"),
        "unexpected stderr: {stderr}"
    );
    assert!(orders_dir.join("Order1002_OBrienMary.xlsx").is_file());
}

#[test]
fn header_only_input_creates_directory_but_no_files() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("sales.csv");
    fs::copy("testdata/header_only.csv", &input).unwrap();

    order_splitter().arg(&input).assert().success();

    let orders_dir = todays_orders_dir(tmp.path());
    assert!(orders_dir.is_dir());
    assert_eq!(fs::read_dir(&orders_dir).unwrap().count(), 0);
}

#[test]
fn missing_columns_exit_1_naming_the_columns() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("sales.csv");
    fs::copy("testdata/missing_columns.csv", &input).unwrap();

    let output = order_splitter().arg(&input).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("missing required column(s)") && stderr.contains("ITEM PRICE"),
        "unexpected stderr: {stderr}"
    );
}
