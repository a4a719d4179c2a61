//! Capture file reader.
//!
//! One line per capture window. Rows of a capture are written in `{N}hex`
//! notation and separated by `/`, e.g. `{20}54e0c/{24}a1b2c3`. Anything after
//! `#` is a comment, and an optional `codes:` label (as printed by rtl_433 in
//! flex decoder output) is skipped.

use regency_fan_lib::BitBatch;

use crate::error::CliError;

/// Parse one capture line. Blank and comment-only lines yield `None`.
pub fn parse_capture_line(line: &str, line_no: usize) -> Result<Option<BitBatch>, CliError> {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let content = content.trim();
    let content = match content.strip_prefix("codes") {
        Some(rest) => rest.trim_start().trim_start_matches(':'),
        None => content,
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    content
        .parse::<BitBatch>()
        .map(Some)
        .map_err(|source| CliError::InvalidCapture { line: line_no, source })
}
