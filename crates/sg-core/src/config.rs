//! Configuration for key derivation and seeding.

use serde::{Deserialize, Serialize};

use crate::error::{SortError, SortResult};

/// Default number of key-stretching rounds.
pub const DEFAULT_ITERATIONS: u32 = 888_888;

/// Which primitive stretches the query into a master key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KdfMode {
    /// PBKDF2-HMAC-SHA256.
    #[default]
    Pbkdf2,
    /// Repeated `SHA-256(out || salt)`. Used when PBKDF2 is unavailable.
    IteratedSha256,
}

/// What goes into the master-key material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SeedPolicy {
    /// The query text alone: identical queries give identical readings.
    #[default]
    QueryOnly,
    /// `query|timestamp`: readings differ per capture time.
    WithTimestamp,
}

/// Configuration for master-key derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfConfig {
    /// Key-stretching rounds.
    pub iterations: u32,
    /// Stretching primitive.
    pub mode: KdfMode,
}

impl Default for KdfConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            mode: KdfMode::Pbkdf2,
        }
    }
}

impl KdfConfig {
    /// Set the iteration count.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the stretching primitive.
    pub fn with_mode(mut self, mode: KdfMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reject configurations that cannot derive a key.
    pub fn validate(&self) -> SortResult<()> {
        if self.iterations == 0 {
            return Err(SortError::InvalidIterations);
        }
        Ok(())
    }
}

/// Settings shared by every oracle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OracleConfig {
    /// Master-key derivation settings.
    pub kdf: KdfConfig,
    /// Whether the capture time is mixed into the key.
    pub seed: SeedPolicy,
    /// Whether dual entries may come out reversed / shadowed.
    pub reversals: bool,
}

impl OracleConfig {
    /// Set the key derivation settings.
    pub fn with_kdf(mut self, kdf: KdfConfig) -> Self {
        self.kdf = kdf;
        self
    }

    /// Set the seed policy.
    pub fn with_seed(mut self, seed: SeedPolicy) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable reversals.
    pub fn with_reversals(mut self, reversals: bool) -> Self {
        self.reversals = reversals;
        self
    }
}
