// rtail - app/cancel.rs
//
// Cooperative cancellation for the follow loop.
//
// The loop never blocks for a whole poll interval in one call: `wait` sleeps
// in CANCEL_CHECK_INTERVAL_MS slices and returns as soon as the token is
// cancelled, so shutdown (or a test) can stop the loop between ticks.

use crate::util::constants::CANCEL_CHECK_INTERVAL_MS;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared cancel flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Sleep for up to `duration`, waking every CANCEL_CHECK_INTERVAL_MS.
    ///
    /// Returns `true` if the token was cancelled before or during the wait.
    pub fn wait(&self, duration: Duration) -> bool {
        let slice = Duration::from_millis(CANCEL_CHECK_INTERVAL_MS);
        let deadline = Instant::now() + duration;
        loop {
            if self.is_cancelled() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            std::thread::sleep(slice.min(deadline - now));
        }
    }
}
