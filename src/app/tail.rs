// rtail - app/tail.rs
//
// Follow monitor: streams the bytes of one file from a starting offset,
// then polls the file for growth, truncation, and replacement.
//
// States:
//   - DRAIN: emit every byte between the cursor and end-of-file.
//   - IDLE: cancellable sleep for one poll interval.
//   - STALE-CHECK: stat the path and compare against `WatchState`.
//
// Each tick (`poll_once`):
//   1. Drain bytes appended since the last read, in file order.
//   2. Stat the path. Failure ends the session with `TailError::Poll`.
//   3. If the path is now shorter than the cursor, or its timestamp advanced
//      while nothing new was read and nothing is pending on the open handle,
//      re-open the path and move the cursor to its current end-of-file.
//      Nothing is emitted for the lost interval.
//   4. Otherwise record the observed size/timestamp and go idle.
//
// The monitor owns its cursor and watch state exclusively; nothing here is
// shared across threads apart from the cancel token.

use crate::app::cancel::CancelToken;
use crate::core::model::WatchState;
use crate::platform::fs::{self, FileSnapshot};
use crate::util::constants::DRAIN_CHUNK_SIZE;
use crate::util::error::{Result, TailError};
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// Public types
// =============================================================================

/// Result of a single poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing changed.
    Idle,
    /// New bytes were appended and emitted.
    Emitted { bytes: u64 },
    /// The target shrank or was replaced; the cursor moved to the new end.
    Resynced { from: u64, to: u64 },
}

// =============================================================================
// FollowMonitor
// =============================================================================

/// Cursor plus watch state for one target path.
pub struct FollowMonitor {
    path: PathBuf,
    file: File,
    /// Byte position of the next byte to read. Never exceeds `watch.size`
    /// once a tick completes.
    offset: u64,
    watch: WatchState,
    buf: Vec<u8>,
}

impl FollowMonitor {
    /// Take ownership of an open handle positioned at `offset`.
    ///
    /// The watch state is seeded from the handle itself.
    pub fn new(path: PathBuf, mut file: File, offset: u64) -> Result<Self> {
        let snapshot = fs::stat_handle(&file).map_err(|source| TailError::Io {
            path: path.clone(),
            operation: "stat",
            source,
        })?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|source| TailError::Io {
                path: path.clone(),
                operation: "seek",
                source,
            })?;

        tracing::debug!(
            file = %path.display(),
            offset,
            size = snapshot.size,
            "Tail: seeding cursor"
        );

        Ok(Self {
            path,
            file,
            offset,
            watch: WatchState::new(snapshot.size, snapshot.modified),
            buf: vec![0u8; DRAIN_CHUNK_SIZE],
        })
    }

    /// Current cursor position.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Last recorded size and timestamp.
    pub fn watch_state(&self) -> WatchState {
        self.watch
    }

    /// Emit every byte from the cursor to the current end-of-file.
    ///
    /// Returns the number of bytes written to `out`. Output is flushed once
    /// at the end when anything was written.
    pub fn drain<W: Write>(&mut self, out: &mut W) -> Result<u64> {
        let mut total = 0u64;
        loop {
            let n = match self.file.read(&mut self.buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(TailError::Io {
                        path: self.path.clone(),
                        operation: "read",
                        source,
                    })
                }
            };
            out.write_all(&self.buf[..n])
                .map_err(|source| self.output_error(source))?;
            self.offset += n as u64;
            total += n as u64;
        }

        if total > 0 {
            out.flush().map_err(|source| self.output_error(source))?;
            // The bytes just read may carry a newer timestamp than the one
            // seeded earlier; record both signals from the handle that
            // produced them.
            let snapshot = self.stat_cursor()?;
            self.watch = WatchState::new(snapshot.size.max(self.offset), snapshot.modified);
            tracing::debug!(
                file = %self.path.display(),
                bytes = total,
                offset = self.offset,
                "Tail: drained"
            );
        }
        Ok(total)
    }

    /// Run one poll tick without sleeping.
    pub fn poll_once<W: Write>(&mut self, out: &mut W) -> Result<TickOutcome> {
        let emitted = self.drain(out)?;

        let current = fs::stat_path(&self.path).map_err(|source| {
            tracing::warn!(file = %self.path.display(), error = %source, "Tail: stat error");
            TailError::Poll {
                path: self.path.clone(),
                source,
            }
        })?;

        if current.size < self.offset {
            tracing::info!(
                file = %self.path.display(),
                old_offset = self.offset,
                new_size = current.size,
                "Tail: file truncated"
            );
            return self.resync();
        }

        if emitted == 0 && self.watch.timestamp_advanced(current.modified) && !self.has_pending()?
        {
            tracing::info!(
                file = %self.path.display(),
                offset = self.offset,
                new_size = current.size,
                "Tail: file modified without new bytes, treating as replaced"
            );
            return self.resync();
        }

        self.watch = WatchState::new(current.size, current.modified);

        Ok(if emitted > 0 {
            TickOutcome::Emitted { bytes: emitted }
        } else {
            TickOutcome::Idle
        })
    }

    /// Poll until `cancel` fires or a fatal error occurs.
    ///
    /// A cancelled loop returns `Ok(())`; a failed stat returns the
    /// `TailError::Poll` that stopped it.
    pub fn run<W: Write>(
        &mut self,
        out: &mut W,
        interval: Duration,
        cancel: &CancelToken,
    ) -> Result<()> {
        tracing::info!(
            file = %self.path.display(),
            interval_ms = (interval.as_millis() as u64),
            "Tail: following"
        );

        while !cancel.is_cancelled() {
            self.poll_once(out)?;
            if cancel.wait(interval) {
                break;
            }
        }

        tracing::info!(file = %self.path.display(), "Tail: follow loop cancelled");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Returns `true` if the open handle holds bytes past the cursor that the
    /// next drain will pick up (an append that landed after this tick's read).
    fn has_pending(&self) -> Result<bool> {
        Ok(self.stat_cursor()?.size > self.offset)
    }

    /// Size and timestamp of the file the cursor is reading.
    fn stat_cursor(&self) -> Result<FileSnapshot> {
        fs::stat_handle(&self.file).map_err(|source| {
            tracing::warn!(file = %self.path.display(), error = %source, "Tail: handle stat error");
            TailError::Io {
                path: self.path.clone(),
                operation: "stat",
                source,
            }
        })
    }

    /// Re-open the path and place the cursor at its current end-of-file.
    fn resync(&mut self) -> Result<TickOutcome> {
        let poll_error = |source| TailError::Poll {
            path: self.path.clone(),
            source,
        };

        let mut file = fs::open_target(&self.path).map_err(poll_error)?;
        let FileSnapshot { size, modified } = fs::stat_handle(&file).map_err(poll_error)?;
        file.seek(SeekFrom::Start(size))
            .map_err(|source| TailError::Io {
                path: self.path.clone(),
                operation: "seek",
                source,
            })?;

        let from = self.offset;
        self.file = file;
        self.offset = size;
        self.watch = WatchState::new(size, modified);

        tracing::debug!(file = %self.path.display(), from, to = size, "Tail: cursor resynced");
        Ok(TickOutcome::Resynced { from, to: size })
    }

    fn output_error(&self, source: io::Error) -> TailError {
        TailError::Io {
            path: self.path.clone(),
            operation: "write output",
            source,
        }
    }
}
