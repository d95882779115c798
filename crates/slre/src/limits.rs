//! Centralized matcher limits and configuration constants.
//!
//! The analyzer records every group and every alternation of a pattern in
//! bounded tables. The bounds are collected here for easy tuning; a pattern
//! that needs more entries is rejected instead of overflowing.

// ===== Tables =====

/// Maximum number of groups per pattern, counting the implicit group 0 that
/// spans the whole pattern.
pub const MAX_BRACKETS: usize = 100;

/// Maximum number of `|` alternations per pattern, across all groups.
pub const MAX_BRANCHES: usize = 100;

/// Construction-time table capacities used by the pattern analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub max_groups: usize,
    pub max_branches: usize,
}

impl Limits {
    pub const fn new(max_groups: usize, max_branches: usize) -> Self {
        Self {
            max_groups,
            max_branches,
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(MAX_BRACKETS, MAX_BRANCHES)
    }
}
