// rtail - tests/e2e_tail.rs
//
// End-to-end tests for the tail session against the real filesystem:
// window location, initial drain, and the follow loop driven both tick by
// tick and on a background thread stopped through the cancel token.

use filetime::{set_file_mtime, FileTime};
use rtail::app::cancel::CancelToken;
use rtail::app::session::run_session;
use rtail::app::tail::{FollowMonitor, TickOutcome};
use rtail::core::locator::locate;
use rtail::core::model::{RawOptions, TailRequest};
use rtail::platform::fs;
use rtail::util::error::TailError;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

// =============================================================================
// Helpers
// =============================================================================

fn request(path: &Path, lines: usize, follow: bool) -> TailRequest {
    TailRequest::from_raw(RawOptions {
        positional: Some(path.to_path_buf()),
        lines,
        follow,
        poll_interval_ms: 10,
        ..Default::default()
    })
    .unwrap()
}

fn initial_output(path: &Path, lines: usize) -> Vec<u8> {
    let mut out = Vec::new();
    run_session(&request(path, lines, false), &mut out, &CancelToken::new()).unwrap();
    out
}

fn append(path: &Path, bytes: &[u8]) {
    let mut f = std::fs::OpenOptions::new().append(true).open(path).unwrap();
    f.write_all(bytes).unwrap();
}

/// Open `path` the way a session does and drain the initial window.
fn monitor_after_drain(path: &Path, lines: usize) -> (FollowMonitor, Vec<u8>) {
    let mut file = fs::open_target(path).unwrap();
    let offset = locate(&mut file, lines).unwrap();
    let mut monitor = FollowMonitor::new(PathBuf::from(path), file, offset).unwrap();
    let mut out = Vec::new();
    monitor.drain(&mut out).unwrap();
    (monitor, out)
}

// =============================================================================
// Initial drain
// =============================================================================

#[test]
fn e2e_last_two_of_three_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc.log");
    std::fs::write(&path, b"a\nb\nc\n").unwrap();

    assert_eq!(initial_output(&path, 2), b"b\nc\n");
}

#[test]
fn e2e_short_file_is_printed_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.log");
    let content = b"only\ntwo lines\n";
    std::fs::write(&path, content).unwrap();

    assert_eq!(initial_output(&path, 10), content);
}

#[test]
fn e2e_zero_lines_prints_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zero.log");
    std::fs::write(&path, b"a\nb\n").unwrap();

    assert!(initial_output(&path, 0).is_empty());
}

#[test]
fn e2e_non_utf8_bytes_pass_through() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.log");
    let content = [0xffu8, 0xfe, b'\n', 0x00, 0x80, b'\n'];
    std::fs::write(&path, content).unwrap();

    assert_eq!(initial_output(&path, 1), [0x00, 0x80, b'\n']);
}

#[test]
fn e2e_locator_is_idempotent_on_a_real_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("idem.log");
    std::fs::write(&path, b"1\n2\n3\n4\n").unwrap();

    let mut file = fs::open_target(&path).unwrap();
    let first = locate(&mut file, 3).unwrap();
    let second = locate(&mut file, 3).unwrap();
    assert_eq!(first, 2);
    assert_eq!(first, second);
}

// =============================================================================
// Follow mode, tick by tick
// =============================================================================

#[test]
fn e2e_empty_file_then_append() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.log");
    std::fs::write(&path, b"").unwrap();

    let (mut monitor, initial) = monitor_after_drain(&path, 5);
    assert!(initial.is_empty());

    append(&path, b"x\n");
    let mut out = Vec::new();
    assert_eq!(
        monitor.poll_once(&mut out).unwrap(),
        TickOutcome::Emitted { bytes: 2 }
    );
    assert_eq!(out, b"x\n");
}

#[test]
fn e2e_replacement_by_shorter_file_shows_only_new_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rotating.log");
    std::fs::write(&path, b"old line 1\nold line 2\n").unwrap();

    let (mut monitor, initial) = monitor_after_drain(&path, 10);
    assert_eq!(initial, b"old line 1\nold line 2\n");

    let staged = dir.path().join("rotating.log.tmp");
    std::fs::write(&staged, b"new\n").unwrap();
    std::fs::rename(&staged, &path).unwrap();

    let mut out = Vec::new();
    let outcome = monitor.poll_once(&mut out).unwrap();
    assert_eq!(outcome, TickOutcome::Resynced { from: 22, to: 4 });
    assert!(out.is_empty(), "nothing from the gap may be emitted");

    append(&path, b"fresh\n");
    monitor.poll_once(&mut out).unwrap();
    assert_eq!(out, b"fresh\n");
}

#[test]
fn e2e_truncate_in_place_never_seeks_past_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("trunc.log");
    std::fs::write(&path, b"0123456789\n0123456789\n").unwrap();

    let (mut monitor, _) = monitor_after_drain(&path, 10);

    let f = std::fs::OpenOptions::new().write(true).open(&path).unwrap();
    f.set_len(5).unwrap();
    let later = SystemTime::now() + Duration::from_secs(5);
    set_file_mtime(&path, FileTime::from_system_time(later)).unwrap();

    let mut out = Vec::new();
    monitor.poll_once(&mut out).unwrap();
    assert!(out.is_empty());
    assert_eq!(monitor.offset(), 5);
    assert_eq!(monitor.watch_state().size, 5);

    assert_eq!(monitor.poll_once(&mut out).unwrap(), TickOutcome::Idle);
}

// =============================================================================
// Follow mode through the session, on a background thread
// =============================================================================

#[test]
fn e2e_follow_session_streams_appends_until_cancelled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("live.log");
    std::fs::write(&path, b"").unwrap();

    let cancel = CancelToken::new();
    let remote = cancel.clone();
    let req = request(&path, 5, true);
    let handle = std::thread::spawn(move || {
        let mut out = Vec::new();
        let result = run_session(&req, &mut out, &remote);
        (result, out)
    });

    std::thread::sleep(Duration::from_millis(100));
    append(&path, b"x\n");
    std::thread::sleep(Duration::from_millis(100));
    append(&path, b"y\n");
    std::thread::sleep(Duration::from_millis(200));
    cancel.cancel();

    let (result, out) = handle.join().unwrap();
    assert!(result.is_ok(), "session failed: {result:?}");
    assert_eq!(out, b"x\ny\n");
}

#[test]
fn e2e_follow_session_ends_with_poll_error_when_target_removed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doomed.log");
    std::fs::write(&path, b"last words\n").unwrap();

    let req = request(&path, 10, true);
    let handle = std::thread::spawn(move || {
        let mut out = Vec::new();
        let result = run_session(&req, &mut out, &CancelToken::new());
        (result, out)
    });

    std::thread::sleep(Duration::from_millis(200));
    std::fs::remove_file(&path).unwrap();

    let (result, out) = handle.join().unwrap();
    assert!(
        matches!(result, Err(TailError::Poll { .. })),
        "expected Poll error, got {result:?}"
    );
    assert_eq!(out, b"last words\n");
}
