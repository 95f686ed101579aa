use std::fs;

use paperup::ledger::InstallLedger;

#[test]
fn open_creates_logs_directory() {
    let tmp = tempfile::tempdir().unwrap();
    let logs_dir = tmp.path().join("logs");
    assert!(!logs_dir.exists());

    InstallLedger::open(&logs_dir).unwrap();
    assert!(logs_dir.is_dir());
}

#[test]
fn last_installed_is_empty_when_never_installed() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = InstallLedger::open(tmp.path()).unwrap();

    // "Never installed" is a valid state, not an error.
    assert_eq!(ledger.last_installed().unwrap(), "");
}

#[test]
fn save_installed_roundtrip_and_overwrite() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = InstallLedger::open(tmp.path()).unwrap();

    ledger.save_installed("paper-1.20-5.jar").unwrap();
    assert_eq!(ledger.last_installed().unwrap(), "paper-1.20-5.jar");

    ledger.save_installed("paper-1.20-6.jar").unwrap();
    assert_eq!(ledger.last_installed().unwrap(), "paper-1.20-6.jar");
}

#[test]
fn append_writes_timestamped_lines_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = InstallLedger::open(tmp.path()).unwrap();

    ledger.append("first entry").unwrap();
    ledger.append("second entry").unwrap();

    let log = fs::read_to_string(tmp.path().join("paper.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with("first entry"));
    assert!(lines[1].ends_with("second entry"));
}

#[test]
fn append_never_touches_the_marker() {
    let tmp = tempfile::tempdir().unwrap();
    let ledger = InstallLedger::open(tmp.path()).unwrap();

    ledger.append("noise").unwrap();
    assert_eq!(ledger.last_installed().unwrap(), "");
}
