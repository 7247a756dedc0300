//! End-to-end tests driving the compiled binary with scripted stdin.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_accounts(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("accounts_list.txt");
    std::fs::write(&path, contents).unwrap();
    path
}

fn atm(accounts: &Path, output: &Path) -> Command {
    let mut cmd = Command::cargo_bin("atm").unwrap();
    cmd.arg("--accounts").arg(accounts);
    cmd.arg("--output").arg(output);
    cmd
}

#[test]
fn test_full_session_writes_sorted_output() {
    let dir = TempDir::new().unwrap();
    let accounts = write_accounts(
        &dir,
        "B2 Bob 20.00\nA1 Alice 100.00 50.00\nC3 Carol 0.00\n",
    );
    let output = dir.path().join("output_list.txt");

    // Deposit 10.00 (-> 110.00), then withdraw 160.00: the overdraft
    // allowance of 50.00 covers it exactly, landing on -50.00.
    atm(&accounts, &output)
        .write_stdin("A1\n2\n10.00\n3\n160.00\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Deposit successful. New balance for account (A1): 110.00",
        ))
        .stdout(predicate::str::contains(
            "Withdrawal successful. New balance for account (A1): -50.00",
        ));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        "A1 Alice -50.00 50.00\nB2 Bob 20.00\nC3 Carol 0.00\n",
        written
    );
}

#[test]
fn test_quit_at_identifier_stage_writes_no_output() {
    let dir = TempDir::new().unwrap();
    let accounts = write_accounts(&dir, "A1 Alice 100.00\n");
    let output = dir.path().join("output_list.txt");

    atm(&accounts, &output)
        .write_stdin("quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Thank you for using our ATM. Goodbye!",
        ));

    assert!(!output.exists());
}

#[test]
fn test_unknown_id_reprompts() {
    let dir = TempDir::new().unwrap();
    let accounts = write_accounts(&dir, "A1 Alice 100.00\n");
    let output = dir.path().join("output_list.txt");

    atm(&accounts, &output)
        .write_stdin("Z9\nA1\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Account NOT FOUND for ID: Z9"))
        .stdout(predicate::str::contains("Account FOUND for ID: A1"));
}

#[test]
fn test_insufficient_funds_leaves_file_unchanged() {
    let dir = TempDir::new().unwrap();
    let accounts = write_accounts(&dir, "A1 Alice 100.00\n");
    let output = dir.path().join("output_list.txt");

    atm(&accounts, &output)
        .write_stdin("A1\n3\n150.00\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Withdrawal failed. Insufficient funds in account (A1).",
        ));

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!("A1 Alice 100.00\n", written);
}

#[test]
fn test_one_digit_fraction_is_rejected_then_retried() {
    let dir = TempDir::new().unwrap();
    let accounts = write_accounts(&dir, "A1 Alice 100.00\n");
    let output = dir.path().join("output_list.txt");

    atm(&accounts, &output)
        .write_stdin("A1\n2\n12.5\n12.50\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid input. Please try again."))
        .stdout(predicate::str::contains(
            "Deposit successful. New balance for account (A1): 112.50",
        ));
}

#[test]
fn test_missing_account_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let accounts = dir.path().join("no_such_file.txt");
    let output = dir.path().join("output_list.txt");

    atm(&accounts, &output)
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no_such_file.txt"));
}

#[test]
fn test_duplicate_id_in_account_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let accounts = write_accounts(&dir, "A1 Alice 100.00\nA1 Alan 5.00\n");
    let output = dir.path().join("output_list.txt");

    atm(&accounts, &output)
        .write_stdin("quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate account identifier: A1"));
}
