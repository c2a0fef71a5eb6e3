//! Error types for derivation, selection, and export.

use thiserror::Error;

/// Result type for Sortilege operations.
pub type SortResult<T> = Result<T, SortError>;

/// Errors that can occur while building or saving a reading.
#[derive(Debug, Error)]
pub enum SortError {
    /// The query was empty or whitespace only.
    #[error("a question is required")]
    EmptyQuery,

    /// A draw count fell outside the pool's bounds.
    #[error("count must be between {min} and {max}, got {count}")]
    CountOutOfRange {
        /// The requested count.
        count: usize,
        /// Smallest accepted count.
        min: usize,
        /// Largest accepted count.
        max: usize,
    },

    /// A spread size that the oracle does not offer.
    #[error("unsupported spread: {0}")]
    UnsupportedSpread(String),

    /// The key-stretching iteration count was zero.
    #[error("iteration count must be at least 1")]
    InvalidIterations,

    /// A token prefix shorter than the minimum length.
    #[error("prefix '{0}' is too short (3+ characters required)")]
    PrefixTooShort(String),

    /// The number of picks did not match the requested count.
    #[error("expected {expected} token prefixes, got {got}")]
    PickCount {
        /// How many picks were required.
        expected: usize,
        /// How many picks were supplied.
        got: usize,
    },

    /// Token deduplication ran out of retries.
    #[error("could not forge a unique token after {attempts} attempts")]
    TokenCollisionExhausted {
        /// Number of candidate positions tried.
        attempts: usize,
    },

    /// No displayed token starts with the prefix.
    #[error("no match for '{0}', reading aborted")]
    UnmatchedPrefix(String),

    /// More than one displayed token starts with the prefix.
    #[error("ambiguous prefix '{prefix}' matches {matches} tokens, reading aborted")]
    AmbiguousPrefix {
        /// The prefix as given.
        prefix: String,
        /// Number of tokens that matched.
        matches: usize,
    },

    /// Writing a saved reading failed.
    #[error("cannot write reading: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing a reading failed.
    #[error("cannot serialize reading: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SortError {
    /// Whether this error was raised by input validation, before any hashing.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::EmptyQuery
                | Self::CountOutOfRange { .. }
                | Self::UnsupportedSpread(_)
                | Self::InvalidIterations
                | Self::PrefixTooShort(_)
                | Self::PickCount { .. }
        )
    }
}

/// Reject empty or whitespace-only queries. The query is returned as given.
pub fn validate_query(query: &str) -> SortResult<&str> {
    if query.trim().is_empty() {
        Err(SortError::EmptyQuery)
    } else {
        Ok(query)
    }
}

/// Check that `count` lies within `min..=max`.
pub fn validate_count(count: usize, min: usize, max: usize) -> SortResult<()> {
    if (min..=max).contains(&count) {
        Ok(())
    } else {
        Err(SortError::CountOutOfRange { count, min, max })
    }
}
