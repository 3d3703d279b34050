// rtail - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "rtail";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Request defaults and limits
// =============================================================================

/// Number of trailing lines printed when `-n` is not given.
pub const DEFAULT_LINE_COUNT: usize = 10;

/// Longest accepted target path in bytes (Linux `PATH_MAX`).
pub const MAX_PATH_LENGTH: usize = 4_096;

// =============================================================================
// Line locator
// =============================================================================

/// Block size used when walking backward from end-of-file.
///
/// Bytes inside each block are still inspected one at a time in reverse, so
/// the result matches a byte-at-a-time walk while avoiding a seek per byte.
pub const BACKWARD_SCAN_BLOCK_SIZE: usize = 4 * 1_024; // 4 KiB

/// Line terminator counted by the backward scan.
pub const LINE_TERMINATOR: u8 = b'\n';

// =============================================================================
// Follow mode
// =============================================================================

/// How often the follow loop polls the target for changes (ms).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 250;

/// Minimum user-configurable poll interval (ms).
pub const MIN_POLL_INTERVAL_MS: u64 = 10;

/// Maximum user-configurable poll interval (ms).
pub const MAX_POLL_INTERVAL_MS: u64 = 10_000; // 10 s

/// How often the cancel token is checked within each poll sleep (ms).
/// The follow loop wakes at least this often to observe cancellation.
pub const CANCEL_CHECK_INTERVAL_MS: u64 = 25;

/// Read buffer size used when draining bytes from the cursor to end-of-file.
pub const DRAIN_CHUNK_SIZE: usize = 64 * 1_024; // 64 KiB

// =============================================================================
// Output
// =============================================================================

/// Prefix of the banner printed before the first emitted chunk.
pub const HEADER_PREFIX: &str = "==> ";

/// Suffix of the banner printed before the first emitted chunk.
pub const HEADER_SUFFIX: &str = " <==";

// =============================================================================
// Logging
// =============================================================================

/// Default log level. Kept at `warn` so diagnostics stay off stderr during
/// normal runs.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// =============================================================================
// Exit codes
// =============================================================================

/// Process exit code for a successful run (including `--help`).
pub const EXIT_SUCCESS: i32 = 0;

/// Process exit code for usage errors and any fatal session error.
pub const EXIT_FAILURE: i32 = 1;
