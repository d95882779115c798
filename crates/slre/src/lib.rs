// SLRE
// A small backtracking regular-expression matcher over byte buffers

#[cfg(test)]
mod test;

pub mod error;
pub mod limits;
pub mod pattern;

pub use error::{Error, Result};
pub use limits::{Limits, MAX_BRACKETS, MAX_BRANCHES};
pub use pattern::{Capture, Options, capture_count, matches, matches_with, replace};
