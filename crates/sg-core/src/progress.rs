//! Progress notifications for callers that render a spinner or bar.

/// A step in building a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Stretching the query into the master key.
    Deriving {
        /// Rounds being run.
        iterations: u32,
    },
    /// Selecting draw `index` of `total`.
    Drawing {
        /// Zero-based draw index.
        index: usize,
        /// Number of draws requested.
        total: usize,
    },
    /// Forging display token `index` of `total`.
    Forging {
        /// Zero-based token index.
        index: usize,
        /// Size of the token pool.
        total: usize,
    },
    /// The reading is complete.
    Done,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deriving { iterations } => {
                write!(f, "Deriving master key ({iterations} rounds)...")
            }
            Self::Drawing { index, total } => write!(f, "Drawing {}/{total}...", index + 1),
            Self::Forging { index, total } => write!(f, "Forging tokens {}/{total}...", index + 1),
            Self::Done => write!(f, "Done"),
        }
    }
}

/// A callback that ignores every notification.
pub fn silent(_: Progress) {}
