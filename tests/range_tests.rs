//! Integration tests for the range command

use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::tsreport_cmd;

#[test]
fn test_range_whole_year() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .arg("range")
        .arg("2014")
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-12-30  2014-12-28  +52 week(s)"));
}

#[test]
fn test_range_year_boundary_date() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .args(["range", "2013/12/31"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-12-30  2014-01-05  +1 week(s)"));
}

#[test]
fn test_range_forward_weeks() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .args(["range", "2014/1/1", "--week-length", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2013-12-30  2014-01-19  +3 week(s)"));
}

#[test]
fn test_range_reverse_weeks() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .args(["range", "2014-W34", "-r", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2014-07-28  2014-08-24  -3 week(s)"));
}

#[test]
fn test_range_week_of_this_year() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .args(["range", "W34", "-l", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+3 week(s), 21 day(s)"));
}

#[test]
fn test_range_month_spills_into_next_month() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .args(["range", "2014.7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2014-06-30  2014-08-03  +5 week(s)"));
}

#[test]
fn test_range_defaults_to_this_week() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .arg("range")
        .assert()
        .success()
        .stdout(predicate::str::contains("+1 week(s), 7 day(s)"));
}

#[test]
fn test_range_conflicting_spans() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .args(["range", "2014", "-l", "2", "-r", "3"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("--reverse"))
        .stderr(predicate::str::contains("--week-length"));
}

#[test]
fn test_range_invalid_date() {
    let temp = TempDir::new().unwrap();

    tsreport_cmd()
        .current_dir(temp.path())
        .args(["range", "2014/13"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Invalid date: '2014/13'"))
        .stderr(predicate::str::contains("Examples"));
}
