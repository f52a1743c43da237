use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_malformed_rows_are_skipped() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, balance, apr, min_payment").unwrap();
    writeln!(file, "1, Card, 100, 0, 50").unwrap();
    // Text in the balance field
    writeln!(file, "2, Loan, lots, 5, 50").unwrap();
    // Minimum payment above the balance
    writeln!(file, "3, Store, 100, 5, 150").unwrap();
    // Missing name
    writeln!(file, "4, , 100, 5, 10").unwrap();

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path())
        .args(["--start", "2026-10", "--format", "summary"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Skipping debt"))
        .stderr(predicate::str::contains(
            "Minimum payment cannot be greater than the balance.",
        ))
        .stderr(predicate::str::contains("Debt name is required."))
        .stdout(predicate::str::contains("2,December 2026,0,100,true"));
}

#[test]
fn test_no_valid_debts_fails() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, balance, apr, min_payment").unwrap();
    writeln!(file, "1, Card, -100, 0, 50").unwrap();

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Balance must be a positive number."))
        .stderr(predicate::str::contains(
            "Please add at least one debt to calculate a payoff plan.",
        ));
}

#[test]
fn test_negative_extra_payment_fails() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, balance, apr, min_payment").unwrap();
    writeln!(file, "1, Card, 100, 0, 50").unwrap();

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path()).arg("--extra=-5");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Extra payment cannot be negative."));
}

#[test]
fn test_invalid_start_month() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, balance, apr, min_payment").unwrap();
    writeln!(file, "1, Card, 100, 0, 50").unwrap();

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path()).args(["--start", "2026-13"]);

    cmd.assert().failure();
}

#[test]
fn test_non_converging_plan_warns() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, balance, apr, min_payment").unwrap();
    // 2% a month on 1000 is more than the minimum payment.
    writeln!(file, "1, Payday Loan, 1000, 24, 10").unwrap();

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path())
        .args(["--start", "2026-10", "--format", "summary"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("month cap"))
        .stderr(predicate::str::contains(
            "Warning: debts are not paid off after 1200 months; the plan is incomplete.",
        ))
        .stdout(predicate::str::contains("1200,October 2126,"))
        .stdout(predicate::str::contains(",false"));
}

#[test]
fn test_non_converging_notice_ignores_log_filter() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, balance, apr, min_payment").unwrap();
    writeln!(file, "1, Payday Loan, 1000, 24, 10").unwrap();

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path())
        .args(["--start", "2026-10", "--format", "summary"])
        .env("RUST_LOG", "off");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("month cap").not())
        .stderr(predicate::str::contains("the plan is incomplete"));
}

#[test]
fn test_runaway_balance_does_not_panic() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "id, name, balance, apr, min_payment").unwrap();
    // 100% APR doubles the debt far faster than a 10 minimum can cover.
    writeln!(file, "1, Payday, 10000, 100, 10").unwrap();

    for format in ["schedule", "summary", "timeline", "json"] {
        let mut cmd = Command::new(cargo_bin!("debtplan"));
        cmd.arg(file.path())
            .args(["--start", "2026-10", "--format", format]);

        cmd.assert()
            .success()
            .stderr(predicate::str::contains("panicked").not())
            .stderr(predicate::str::contains("the plan is incomplete"));
    }

    let mut cmd = Command::new(cargo_bin!("debtplan"));
    cmd.arg(file.path())
        .args(["--start", "2026-10", "--format", "summary"]);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("decimal range"))
        .stdout(predicate::str::contains(",false"));
}
