// Minimal regular-expression matching, byte-oriented, no compiled program
//
// 1. Analysis pass records groups and `|` alternations as offsets into the
//    pattern text; nothing else is precomputed
// 2. The matcher interprets the pattern text directly, recursing into groups
//    and backtracking over `+` and `*`
// 3. All tables and scratch captures are owned by a single call, so separate
//    calls never share state
// 4. Subject is `&[u8]`; zero bytes are ordinary characters

mod analyzer;
mod class;
mod engine;
mod replace;

pub use engine::{Capture, Options, capture_count, matches, matches_with};
pub use replace::replace;
