// rtail - core/header.rs
//
// Banner naming the target, printed once per session before any content.

use crate::util::constants::{HEADER_PREFIX, HEADER_SUFFIX};
use std::io::{self, Write};
use std::path::Path;

/// Format the banner line for `path`, without the trailing newline.
pub fn format_header(path: &Path) -> String {
    format!("{HEADER_PREFIX}{}{HEADER_SUFFIX}", path.display())
}

/// Write the banner line for `path` followed by a newline.
pub fn write_header<W: Write>(out: &mut W, path: &Path) -> io::Result<()> {
    writeln!(out, "{}", format_header(path))
}
