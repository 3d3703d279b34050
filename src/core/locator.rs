// rtail - core/locator.rs
//
// Line locator: finds the byte offset where the last N lines of a seekable
// stream begin, walking backward from end-of-file so the cost is bounded by
// the size of the tail window rather than the size of the file.
//
// Counting rules:
//   - A terminator that is the final byte of the stream ends the last line
//     and is not a window boundary.
//   - A last line without a terminator still counts as a line.
//   - Fewer than N lines selects the whole stream (offset 0).
//   - N = 0 selects nothing (offset = size).

use crate::util::constants::{BACKWARD_SCAN_BLOCK_SIZE, LINE_TERMINATOR};
use std::io::{self, Read, Seek, SeekFrom};

/// Return the offset of the first byte of the `n`-th line from the end.
///
/// On success the stream is left positioned at the returned offset. No other
/// state is touched.
pub fn locate<R: Read + Seek>(stream: &mut R, n: usize) -> io::Result<u64> {
    let size = stream.seek(SeekFrom::End(0))?;
    if n == 0 || size == 0 {
        return Ok(size);
    }

    let mut offset = 0u64;
    let mut found = 0usize;
    let mut end = size;
    let mut block = vec![0u8; BACKWARD_SCAN_BLOCK_SIZE];

    'scan: while end > 0 {
        let start = end.saturating_sub(BACKWARD_SCAN_BLOCK_SIZE as u64);
        let len = (end - start) as usize;
        stream.seek(SeekFrom::Start(start))?;
        stream.read_exact(&mut block[..len])?;

        for (i, byte) in block[..len].iter().enumerate().rev() {
            if *byte != LINE_TERMINATOR {
                continue;
            }
            let pos = start + i as u64;
            if pos + 1 == size {
                continue;
            }
            found += 1;
            if found == n {
                offset = pos + 1;
                break 'scan;
            }
        }
        end = start;
    }

    stream.seek(SeekFrom::Start(offset))?;
    Ok(offset)
}
