//! Unit tests for the locking subsystem.
//!
//! Contention itself is not testable here: POSIX record locks never conflict
//! within a single process, so the busy path is exercised end-to-end in
//! `tests/singleton.rs` with two real processes. These tests cover file
//! creation, registration, release ordering effects, and idempotence.
//!
//! Tests are serialized because the registered-lock slot is process-wide.

use super::*;
use serial_test::serial;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use tempfile::TempDir;

fn argv(parts: &[&str]) -> Vec<OsString> {
    parts.iter().map(|part| OsString::from(*part)).collect()
}

#[test]
#[serial]
fn acquire_creates_owner_write_only_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cmd.lock");

    let lock = acquire(&path, &argv(&["sleep", "1"])).unwrap();
    assert_eq!(lock.path(), path.as_path());
    assert!(lock.raw_fd() >= 0);

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o200);

    release_registered();
}

#[test]
#[serial]
fn release_removes_the_lock_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cmd.lock");
    let _lock = acquire(&path, &argv(&["true"])).unwrap();
    assert!(path.exists());

    release_registered();
    assert!(!path.exists());
}

#[test]
#[serial]
fn release_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("cmd.lock");
    let _lock = acquire(&path, &argv(&["true"])).unwrap();

    release_registered();
    assert!(!path.exists());

    // Second release must neither fault nor remove anything new.
    fs::write(tmp.path().join("bystander"), b"").unwrap();
    release_registered();
    assert!(tmp.path().join("bystander").exists());
}

#[test]
#[serial]
fn release_with_nothing_registered_is_a_noop() {
    release_registered();
    release_registered();
}

#[test]
fn acquire_rejects_paths_with_interior_nul() {
    use std::os::unix::ffi::OsStringExt;

    let path = PathBuf::from(OsString::from_vec(b"/tmp/solo\0lock".to_vec()));
    let err = acquire(&path, &argv(&["true"])).unwrap_err();
    assert!(matches!(err, SoloError::NulInArgument));
}

#[test]
#[serial]
fn acquire_failure_registers_nothing() {
    let tmp = TempDir::new().unwrap();
    let unreachable_path = tmp.path().join("no-such-dir").join("cmd.lock");

    let err = acquire(&unreachable_path, &argv(&["true"])).unwrap_err();
    assert!(matches!(err, SoloError::LockIo { .. }));

    // The slot stayed empty, so a later release has nothing to tear down.
    let bystander = tmp.path().join("bystander.lock");
    fs::write(&bystander, b"").unwrap();
    release_registered();
    assert!(bystander.exists());
}

#[test]
fn metadata_records_process_and_command() {
    let meta = LockMetadata::new(&argv(&["printf", "hi"]));
    assert_eq!(meta.pid, std::process::id());
    assert_eq!(meta.command, "printf hi");
    assert!(meta.owner.contains('@'));
}

#[test]
fn metadata_write_replaces_previous_contents() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("meta.json");
    let mut file = fs::OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(false)
        .open(&path)
        .unwrap();

    LockMetadata::new(&argv(&["a-much-longer-command-line"]))
        .write_to(&mut file)
        .unwrap();
    LockMetadata::new(&argv(&["x"])).write_to(&mut file).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let parsed: LockMetadata = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.command, "x");
    assert_eq!(parsed.pid, std::process::id());
}
