// rtail - core/model.rs
//
// Data model: the immutable tail request and the follow-mode watch state.
//
// `TailRequest` is built once from the command line and then only borrowed.
// `WatchState` holds change-detection signals and is mutated exclusively by
// the follow monitor that owns it.

use crate::util::constants;
use crate::util::error::ConfigError;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Raw options
// =============================================================================

/// Unvalidated option values as they come off the command line.
///
/// Kept free of any CLI-crate types so validation is testable on its own.
#[derive(Debug, Clone)]
pub struct RawOptions {
    /// Leading positional path argument, if any.
    pub positional: Option<PathBuf>,
    /// `-p` / `--path` value, if any. Takes precedence over `positional`.
    pub path: Option<PathBuf>,
    /// `-n` / `--lines` value.
    pub lines: usize,
    /// `-H` / `--headers`.
    pub show_header: bool,
    /// `-f` / `--follow`.
    pub follow: bool,
    /// `-s` / `--sleep-interval` value in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for RawOptions {
    fn default() -> Self {
        Self {
            positional: None,
            path: None,
            lines: constants::DEFAULT_LINE_COUNT,
            show_header: false,
            follow: false,
            poll_interval_ms: constants::DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

// =============================================================================
// TailRequest
// =============================================================================

/// Validated, immutable description of one tail session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TailRequest {
    /// Target file. Identity is the path, not the underlying inode.
    pub path: PathBuf,
    /// Number of trailing lines printed by the initial drain.
    pub lines: usize,
    /// Print the `==> path <==` banner before any content.
    pub show_header: bool,
    /// Keep polling the target for new content after the initial drain.
    pub follow: bool,
    /// Delay between poll ticks in follow mode.
    pub poll_interval: Duration,
}

impl TailRequest {
    /// Validate raw options into a request.
    ///
    /// Fails before any I/O is attempted. `-p` wins over the positional
    /// argument when both are present.
    pub fn from_raw(raw: RawOptions) -> Result<Self, ConfigError> {
        let path = raw
            .path
            .or(raw.positional)
            .ok_or(ConfigError::MissingPath)?;

        let length = path.as_os_str().len();
        if length == 0 {
            return Err(ConfigError::EmptyPath);
        }
        if length > constants::MAX_PATH_LENGTH {
            return Err(ConfigError::PathTooLong {
                length,
                max: constants::MAX_PATH_LENGTH,
            });
        }

        let interval_range = constants::MIN_POLL_INTERVAL_MS..=constants::MAX_POLL_INTERVAL_MS;
        if !interval_range.contains(&raw.poll_interval_ms) {
            return Err(ConfigError::ValueOutOfRange {
                field: "sleep-interval",
                value: raw.poll_interval_ms.to_string(),
                expected: format!(
                    "{}-{} ms",
                    constants::MIN_POLL_INTERVAL_MS,
                    constants::MAX_POLL_INTERVAL_MS
                ),
            });
        }

        Ok(Self {
            path,
            lines: raw.lines,
            show_header: raw.show_header,
            follow: raw.follow,
            poll_interval: Duration::from_millis(raw.poll_interval_ms),
        })
    }
}

// =============================================================================
// WatchState
// =============================================================================

/// Last observed size and modification time of the target.
///
/// Only a change signal: content is always read from the cursor, never
/// inferred from these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchState {
    pub size: u64,
    /// `None` when the platform cannot report modification times.
    pub modified: Option<DateTime<Utc>>,
}

impl WatchState {
    pub fn new(size: u64, modified: Option<DateTime<Utc>>) -> Self {
        Self { size, modified }
    }

    /// Returns `true` if `observed` is strictly later than the recorded time.
    ///
    /// A timestamp appearing where none was known counts as an advance; a
    /// timestamp disappearing does not.
    pub fn timestamp_advanced(&self, observed: Option<DateTime<Utc>>) -> bool {
        match (self.modified, observed) {
            (Some(last), Some(now)) => now > last,
            (None, Some(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw_with_path(path: &str) -> RawOptions {
        RawOptions {
            positional: Some(PathBuf::from(path)),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_match_reference_behaviour() {
        let req = TailRequest::from_raw(raw_with_path("app.log")).unwrap();
        assert_eq!(req.lines, 10);
        assert!(!req.show_header);
        assert!(!req.follow);
        assert_eq!(req.poll_interval, Duration::from_millis(250));
    }

    #[test]
    fn test_missing_path_is_rejected() {
        let err = TailRequest::from_raw(RawOptions::default()).unwrap_err();
        assert_eq!(err, ConfigError::MissingPath);
    }

    #[test]
    fn test_empty_path_is_rejected() {
        let err = TailRequest::from_raw(raw_with_path("")).unwrap_err();
        assert_eq!(err, ConfigError::EmptyPath);
    }

    #[test]
    fn test_path_option_overrides_positional() {
        let raw = RawOptions {
            positional: Some(PathBuf::from("first.log")),
            path: Some(PathBuf::from("second.log")),
            ..Default::default()
        };
        let req = TailRequest::from_raw(raw).unwrap();
        assert_eq!(req.path, PathBuf::from("second.log"));
    }

    #[test]
    fn test_overlong_path_is_rejected() {
        let long = "a".repeat(constants::MAX_PATH_LENGTH + 1);
        let err = TailRequest::from_raw(raw_with_path(&long)).unwrap_err();
        assert!(matches!(err, ConfigError::PathTooLong { .. }));
    }

    #[test]
    fn test_path_at_limit_is_accepted() {
        let long = "a".repeat(constants::MAX_PATH_LENGTH);
        assert!(TailRequest::from_raw(raw_with_path(&long)).is_ok());
    }

    #[test]
    fn test_line_count_does_not_enable_header() {
        let raw = RawOptions {
            lines: 3,
            ..raw_with_path("app.log")
        };
        let req = TailRequest::from_raw(raw).unwrap();
        assert_eq!(req.lines, 3);
        assert!(!req.show_header);
    }

    #[test]
    fn test_poll_interval_out_of_range() {
        for ms in [0, constants::MAX_POLL_INTERVAL_MS + 1] {
            let raw = RawOptions {
                poll_interval_ms: ms,
                ..raw_with_path("app.log")
            };
            let err = TailRequest::from_raw(raw).unwrap_err();
            assert!(
                matches!(err, ConfigError::ValueOutOfRange { field: "sleep-interval", .. }),
                "interval {ms} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn test_timestamp_advanced() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap();
        let state = WatchState::new(10, Some(t0));
        assert!(state.timestamp_advanced(Some(t1)));
        assert!(!state.timestamp_advanced(Some(t0)));
        assert!(!state.timestamp_advanced(None));
        assert!(WatchState::new(0, None).timestamp_advanced(Some(t0)));
        assert!(!WatchState::new(0, None).timestamp_advanced(None));
    }
}
