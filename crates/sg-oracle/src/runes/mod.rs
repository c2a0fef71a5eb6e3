//! Rune casting.
//!
//! Draws runes from the bag without replacement. Every rune that can be
//! reversed gets an orientation bit; the others always land upright.

pub mod table;

pub use table::{RUNES, Rune};

use chrono::{DateTime, Utc};
use serde::Serialize;

use sg_core::error::validate_count;
use sg_core::progress::silent;
use sg_core::{Casting, OracleConfig, Progress, Selector, SortResult, Spread};

/// Domain label for selection and orientation sub-keys.
pub const DOMAIN: &str = "rune";
/// Salt for the master key.
pub const SALT: &[u8] = b"rune-cast-v1";
/// Label for the authentication code.
pub const AUTH_LABEL: &str = "rune-auth";

/// Spread sizes offered at the command line.
pub const SPREAD_SIZES: &[usize] = &[1, 3, 5];

/// Position names for rune spreads.
pub const SPREAD: Spread = Spread {
    noun: "Rune",
    layouts: &[
        (1, &["The Situation"]),
        (3, &["Past", "Present", "Future"]),
        (
            5,
            &["Situation", "Challenge", "Guidance", "Potential", "Outcome"],
        ),
    ],
};

/// One rune in a cast, with its spread position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawnRune {
    /// Spread position name.
    pub position: String,
    /// The rune drawn.
    pub rune: &'static Rune,
    /// Whether the rune landed reversed.
    pub is_reversed: bool,
    /// Short token of the sub-key that chose the rune.
    pub token: String,
}

impl DrawnRune {
    /// The meaning for this rune's orientation.
    pub fn meaning(&self) -> &'static str {
        self.rune.meaning(self.is_reversed)
    }

    /// "Upright" or "Reversed".
    pub fn orientation(&self) -> &'static str {
        if self.is_reversed { "Reversed" } else { "Upright" }
    }
}

/// A complete rune casting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuneReading {
    /// The question asked.
    pub query: String,
    /// Capture time.
    pub timestamp: String,
    /// Whether the capture time seeded the key.
    pub timestamp_seeded: bool,
    /// Eight upper-case hex characters sealing the reading.
    pub authentication: String,
    /// Runes in draw order.
    pub drawn_runes: Vec<DrawnRune>,
}

/// Casts runes for a query.
#[derive(Debug, Clone, Default)]
pub struct RuneCaster {
    config: OracleConfig,
}

impl RuneCaster {
    /// A caster using `config`. Reversals are always on for runes.
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    /// Cast `count` runes for `query`.
    pub fn cast(
        &self,
        query: &str,
        count: usize,
        at: Option<DateTime<Utc>>,
    ) -> SortResult<RuneReading> {
        self.cast_with_progress(query, count, at, &mut silent)
    }

    /// Like [`RuneCaster::cast`], reporting each step to `progress`.
    pub fn cast_with_progress(
        &self,
        query: &str,
        count: usize,
        at: Option<DateTime<Utc>>,
        progress: &mut dyn FnMut(Progress),
    ) -> SortResult<RuneReading> {
        validate_count(count, 1, RUNES.len())?;
        let casting = Casting::begin(query, SALT, &self.config, at, progress)?;

        let draws = Selector::new(casting.key(), DOMAIN)
            .with_orientation(true)
            .draw_with_progress(RUNES, count, progress)?;
        progress(Progress::Done);

        let drawn_runes = draws
            .into_iter()
            .map(|d| DrawnRune {
                position: SPREAD.label(count, d.position),
                rune: d.entry,
                is_reversed: d.reversed,
                token: d.token,
            })
            .collect();

        Ok(RuneReading {
            authentication: casting.auth(AUTH_LABEL),
            query: casting.query,
            timestamp: casting.timestamp,
            timestamp_seeded: casting.timestamp_seeded,
            drawn_runes,
        })
    }
}
