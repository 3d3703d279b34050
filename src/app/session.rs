// rtail - app/session.rs
//
// One tail session: open the target, print the optional banner, locate the
// tail window, drain it, and hand over to the follow monitor when requested.
//
// Every failure is returned to the caller unchanged; nothing is retried.

use crate::app::cancel::CancelToken;
use crate::app::tail::FollowMonitor;
use crate::core::header;
use crate::core::locator;
use crate::core::model::TailRequest;
use crate::platform::fs;
use crate::util::error::{Result, TailError};
use std::io::Write;

/// What the initial drain produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Offset where the tail window started.
    pub start_offset: u64,
    /// Bytes emitted by the initial drain.
    pub initial_bytes: u64,
}

/// Run the session described by `request`, writing content to `out`.
///
/// Without follow mode this returns after the initial drain. With follow
/// mode it returns only when `cancel` fires or the poll loop fails.
pub fn run_session<W: Write>(
    request: &TailRequest,
    out: &mut W,
    cancel: &CancelToken,
) -> Result<SessionSummary> {
    let path = &request.path;

    let mut file = fs::open_target(path).map_err(|source| TailError::Open {
        path: path.clone(),
        source,
    })?;

    if request.show_header {
        header::write_header(out, path).map_err(|source| TailError::Io {
            path: path.clone(),
            operation: "write header",
            source,
        })?;
    }

    let start_offset = locator::locate(&mut file, request.lines).map_err(|source| {
        TailError::Io {
            path: path.clone(),
            operation: "locate tail window",
            source,
        }
    })?;

    tracing::debug!(
        file = %path.display(),
        lines = request.lines,
        start_offset,
        "Tail window located"
    );

    let mut monitor = FollowMonitor::new(path.clone(), file, start_offset)?;
    let initial_bytes = monitor.drain(out)?;
    out.flush().map_err(|source| TailError::Io {
        path: path.clone(),
        operation: "write output",
        source,
    })?;

    if request.follow {
        monitor.run(out, request.poll_interval, cancel)?;
    }

    Ok(SessionSummary {
        start_offset,
        initial_bytes,
    })
}
