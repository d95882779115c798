use thiserror::Error;

/// Why a pattern failed to analyze or to match.
///
/// Every error is terminal for the call that produced it. `NoMatch` is also
/// what the matcher uses internally to backtrack: a failed sub-match reports
/// `NoMatch` to its caller, which may try something else. All other kinds
/// stop the whole call.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("No match")]
    NoMatch,

    /// A quantifier appeared where an atom was expected.
    #[error("Unexpected quantifier")]
    UnexpectedQuantifier,

    #[error("Unbalanced brackets")]
    UnbalancedBrackets,

    /// An escape sequence with no defined meaning, e.g. `\_`.
    #[error("Invalid metacharacter")]
    InvalidMetacharacter,

    /// A computed table index is out of range, or the caller's capture array
    /// is too small for the pattern.
    #[error("Internal error")]
    Internal,

    #[error("Too many (. Increase MAX_BRACKETS (limit: {limit})")]
    TooManyGroups { limit: usize },

    #[error("Too many |. Increase MAX_BRANCHES (limit: {limit})")]
    TooManyBranches { limit: usize },

    /// Returned by [`crate::replace`] for a pattern without a capturing group.
    #[error("Pattern has no capture group")]
    MissingCapture,
}

impl Error {
    /// True for the internal-error class: table overflow or inconsistent
    /// table indices.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Error::Internal | Error::TooManyGroups { .. } | Error::TooManyBranches { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
