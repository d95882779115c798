// Whole-buffer substitution built on `matches`
//
// Walks the subject left to right. Each match contributes the text before
// its first capture, the replacement, and the text between the end of the
// capture and the end of the match. Unmatched text is copied verbatim.

use log::debug;

use super::engine::{Capture, capture_count, matches};
use crate::error::{Error, Result};

/// Replace the first capture group of every match of `pattern` in `subject`
/// with `replacement`.
///
/// The pattern must contain at least one capturing group. Matching resumes
/// right after the end of each match, so matches never overlap. A match
/// whose first group did not take part is copied unchanged.
pub fn replace(pattern: &str, subject: &[u8], replacement: &[u8]) -> Result<Vec<u8>> {
    let count = capture_count(pattern)?;
    if count == 0 {
        return Err(Error::MissingCapture);
    }

    let mut result = Vec::with_capacity(subject.len());
    let mut caps = vec![Capture::default(); count];
    let mut pos = 0;
    let mut replaced = 0usize;

    while pos < subject.len() {
        let rest = &subject[pos..];
        caps.fill(Capture::default());
        let end = match matches(pattern, rest, Some(&mut caps)) {
            Ok(end) => end,
            Err(Error::NoMatch) => 0,
            Err(err) => return Err(err),
        };
        if end == 0 {
            result.extend_from_slice(rest);
            break;
        }

        let cap = caps[0];
        if cap.len > 0 && cap.end() <= end {
            result.extend_from_slice(&rest[..cap.start]);
            result.extend_from_slice(replacement);
            result.extend_from_slice(&rest[cap.end()..end]);
            replaced += 1;
        } else {
            result.extend_from_slice(&rest[..end]);
        }
        pos += end;
    }

    debug!("replace [{pattern}]: {replaced} substitutions");
    Ok(result)
}
