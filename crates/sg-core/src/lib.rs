//! Deterministic selection engine for Sortilege.
//!
//! Turns a text query into a slow-derived master key, then derives cheap
//! per-decision sub-keys to draw entries from fixed symbol pools without
//! replacement, flip binary attributes, forge display tokens, and seal a
//! reading with a short authentication code.

pub mod config;
pub mod error;
pub mod export;
pub mod kdf;
pub mod progress;
pub mod reading;
pub mod select;
pub mod spread;
pub mod token;

pub use config::{KdfConfig, KdfMode, OracleConfig, SeedPolicy};
pub use error::{SortError, SortResult};
pub use kdf::{MasterKey, SubKey, derive_master_key, derive_master_key_with, derive_subkey, seed_digest};
pub use progress::Progress;
pub use reading::Casting;
pub use select::{Draw, Selector, Symbol};
pub use spread::Spread;
pub use token::{Slot, TokenPool};
