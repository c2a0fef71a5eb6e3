//! Oracles built on the Sortilege selection engine.
//!
//! Three readings share one derivation scheme: Elder Futhark rune casting,
//! Tree of Life readings, and the anthro totem oracle.

pub mod anthro;
pub mod kabbalah;
pub mod runes;

pub use anthro::{AnthroOracle, TotemPool, TotemReading};
pub use kabbalah::{ReadingType, TreeOracle, TreeReading};
pub use runes::{RuneCaster, RuneReading};
