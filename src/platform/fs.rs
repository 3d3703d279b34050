// rtail - platform/fs.rs
//
// Filesystem access used by the tail session: opening the target and the
// size/modification-time query that drives change detection.
//
// Two flavours of the query exist. `stat_path` follows the path and so sees
// a replacement file; `stat_handle` asks the open handle and so sees the
// file the cursor is actually reading.

use chrono::{DateTime, Utc};
use std::fs::{File, Metadata};
use std::io;
use std::path::Path;

/// Size and modification time observed at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSnapshot {
    pub size: u64,
    /// `None` when the platform does not report modification times.
    pub modified: Option<DateTime<Utc>>,
}

impl FileSnapshot {
    fn from_metadata(meta: &Metadata) -> Self {
        Self {
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        }
    }
}

/// Open `path` read-only.
pub fn open_target(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Query size and modification time of whatever `path` currently names.
pub fn stat_path(path: &Path) -> io::Result<FileSnapshot> {
    std::fs::metadata(path).map(|m| FileSnapshot::from_metadata(&m))
}

/// Query size and modification time of an already-open handle.
pub fn stat_handle(file: &File) -> io::Result<FileSnapshot> {
    file.metadata().map(|m| FileSnapshot::from_metadata(&m))
}
