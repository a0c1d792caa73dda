// filter.rs — Drops embedding marker lines before a document is (re-)embedded.
//
// A file that was embedded before carries its vector in an HTML comment such as
// `<!-- embedding: [...] -->`. Those lines must not leak into the next embedding.

use std::io::{self, BufRead};

use crate::config;

/// True if the line, ignoring surrounding whitespace, starts with the marker prefix.
pub fn is_marker_line(line: &str) -> bool {
    line.trim().starts_with(config::filter::MARKER_PREFIX)
}

/// Read `reader` line by line and return every non-marker line, each terminated by `\n`.
///
/// Line endings are normalized: `\n` and `\r\n` both come out as `\n`, and a final line
/// without a terminator gets one. Read errors (including invalid UTF-8) are returned as-is.
pub fn strip_embedding_markers<R: BufRead>(reader: R) -> io::Result<String> {
    let mut out = String::new();
    let mut dropped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if is_marker_line(&line) {
            dropped += 1;
            continue;
        }
        out.push_str(&line);
        out.push('\n');
    }

    log::debug!("Filtered document: kept {} bytes, dropped {} marker line(s)", out.len(), dropped);
    Ok(out)
}
