//! Anthro totem oracle.
//!
//! The query's master key forges a pool of totems, each shown under an
//! eight-character hex token. The player picks totems by typing token
//! prefixes; the picks become the reading. With reversals on, the pool is
//! twice as large and a totem may appear in its shadowed aspect.

pub mod tables;

use chrono::{DateTime, Utc};
use serde::Serialize;

use sg_core::error::validate_count;
use sg_core::progress::silent;
use sg_core::token::{normalize_prefixes, pick_from};
use sg_core::{
    Casting, OracleConfig, Progress, SortError, SortResult, Spread, SubKey, TokenPool, seed_digest,
};

use tables::{ELEMENTS, GIFTS, ROLES, SHADOWS, SPECIES, VIRTUES};

/// Salt for the master key.
pub const SALT: &[u8] = b"anthro-oracle-v1";
/// Label for the reading's authentication code.
pub const AUTH_LABEL: &str = "anthro-auth";

/// Default number of tokens shown.
pub const DEFAULT_POOL_SIZE: usize = 96;
/// Largest accepted pool size.
pub const MAX_POOL_SIZE: usize = 4096;

/// Spread sizes offered at the command line.
pub const SPREAD_SIZES: &[usize] = &[1, 3, 5];

const SPECIES_OFFSET: usize = 0;
const ROLE_OFFSET: usize = 5;
const ELEMENT_OFFSET: usize = 9;
const VIRTUE_OFFSET: usize = 13;
const SHADOW_OFFSET: usize = 17;
const GIFT_OFFSET: usize = 23;

/// Position names for totem spreads.
pub const SPREAD: Spread = Spread {
    noun: "Totem",
    layouts: &[
        (1, &["Heart of the Matter"]),
        (3, &["Path", "Obstacle", "Ally"]),
        (
            5,
            &["Situation", "Challenge", "Guidance", "Support", "Outcome"],
        ),
    ],
};

/// Which face of the totem shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Aspect {
    /// The totem's light side.
    Upright,
    /// The totem's shadow side. Only with reversals on.
    Shadowed,
}

impl std::fmt::Display for Aspect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upright => write!(f, "Upright"),
            Self::Shadowed => write!(f, "Shadowed"),
        }
    }
}

/// An animal totem forged from one sub-key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Totem {
    /// Animal form.
    pub species: &'static str,
    /// Role.
    pub role: &'static str,
    /// Elemental affinity.
    pub element: &'static str,
    /// Strength.
    pub virtue: &'static str,
    /// Weakness.
    pub shadow: &'static str,
    /// Named gift.
    pub gift: &'static str,
    /// Face showing.
    pub aspect: Aspect,
    /// Full hex of the sub-key.
    pub digest: String,
    /// Display token.
    pub token: String,
}

impl Totem {
    /// Forge a totem from a position's sub-key.
    pub fn forge(sub: &SubKey, reversals: bool) -> Self {
        let aspect = if reversals && sub.last_bit() {
            Aspect::Shadowed
        } else {
            Aspect::Upright
        };
        Self {
            species: *pick_from(sub, SPECIES, SPECIES_OFFSET),
            role: *pick_from(sub, ROLES, ROLE_OFFSET),
            element: *pick_from(sub, ELEMENTS, ELEMENT_OFFSET),
            virtue: *pick_from(sub, VIRTUES, VIRTUE_OFFSET),
            shadow: *pick_from(sub, SHADOWS, SHADOW_OFFSET),
            gift: *pick_from(sub, GIFTS, GIFT_OFFSET),
            aspect,
            digest: sub.hex(),
            token: sub.token(),
        }
    }

    /// Upper-case first eight characters of the digest.
    pub fn auth(&self) -> String {
        self.digest.chars().take(8).collect::<String>().to_uppercase()
    }
}

/// A forged pool awaiting the player's picks.
#[derive(Debug, Clone)]
pub struct TotemPool {
    casting: Casting,
    reversals: bool,
    pool: TokenPool<Totem>,
}

impl TotemPool {
    /// The displayed tokens and their totems.
    pub fn pool(&self) -> &TokenPool<Totem> {
        &self.pool
    }

    /// Tokens in display order.
    pub fn tokens(&self) -> Vec<&str> {
        self.pool.tokens().collect()
    }

    /// The query the pool was forged for.
    pub fn query(&self) -> &str {
        &self.casting.query
    }

    /// Resolve the player's prefixes into a reading.
    ///
    /// Exactly `count` prefixes are required. Any unmatched or ambiguous
    /// prefix aborts the whole reading.
    pub fn reveal<S: AsRef<str>>(&self, count: usize, prefixes: &[S]) -> SortResult<TotemReading> {
        validate_count(count, 1, self.pool.len())?;
        if prefixes.len() != count {
            return Err(SortError::PickCount {
                expected: count,
                got: prefixes.len(),
            });
        }

        let totems = self
            .pool
            .resolve(prefixes)?
            .into_iter()
            .enumerate()
            .map(|(i, slot)| DrawnTotem {
                position: SPREAD.label(count, i),
                totem: slot.value.clone(),
            })
            .collect();

        Ok(TotemReading {
            query: self.casting.query.clone(),
            timestamp: self.casting.timestamp.clone(),
            timestamp_seeded: self.casting.timestamp_seeded,
            authentication: self.casting.auth(AUTH_LABEL),
            reversals: self.reversals,
            pool_size: self.pool.len(),
            totems,
        })
    }
}

/// A totem picked into a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DrawnTotem {
    /// Spread position name.
    pub position: String,
    /// The totem.
    pub totem: Totem,
}

/// A complete anthro oracle reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotemReading {
    /// The question asked.
    pub query: String,
    /// Capture time.
    pub timestamp: String,
    /// Whether the capture time seeded the key.
    pub timestamp_seeded: bool,
    /// Eight upper-case hex characters sealing the reading.
    pub authentication: String,
    /// Whether shadow aspects were possible.
    pub reversals: bool,
    /// Number of tokens shown.
    pub pool_size: usize,
    /// Picked totems, in pick order.
    pub totems: Vec<DrawnTotem>,
}

/// Forges totem pools.
#[derive(Debug, Clone)]
pub struct AnthroOracle {
    config: OracleConfig,
    pool_size: usize,
}

impl Default for AnthroOracle {
    fn default() -> Self {
        Self::new(OracleConfig::default())
    }
}

impl AnthroOracle {
    /// An oracle using `config` and the default pool size.
    pub fn new(config: OracleConfig) -> Self {
        Self {
            config,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    /// Set the base pool size (doubled with reversals).
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Number of tokens a pool will show.
    pub fn token_count(&self) -> usize {
        if self.config.reversals {
            self.pool_size * 2
        } else {
            self.pool_size
        }
    }

    /// Check a reveal request without hashing anything.
    ///
    /// `count` must fit the pool this oracle forges. When the picks are
    /// already known, there must be exactly `count` of them and each must be
    /// long enough to resolve.
    pub fn check_request<S: AsRef<str>>(
        &self,
        count: usize,
        picks: Option<&[S]>,
    ) -> SortResult<()> {
        validate_count(self.pool_size, 1, MAX_POOL_SIZE)?;
        validate_count(count, 1, self.token_count())?;
        if let Some(picks) = picks {
            if picks.len() != count {
                return Err(SortError::PickCount {
                    expected: count,
                    got: picks.len(),
                });
            }
            normalize_prefixes(picks)?;
        }
        Ok(())
    }

    /// Forge the token pool for `query`.
    ///
    /// Surrounding whitespace is stripped from the query before hashing.
    pub fn build_pool(&self, query: &str) -> SortResult<TotemPool> {
        self.build_pool_with_progress(query, None, &mut silent)
    }

    /// Like [`AnthroOracle::build_pool`], with a capture time and progress.
    pub fn build_pool_with_progress(
        &self,
        query: &str,
        at: Option<DateTime<Utc>>,
        progress: &mut dyn FnMut(Progress),
    ) -> SortResult<TotemPool> {
        validate_count(self.pool_size, 1, MAX_POOL_SIZE)?;
        let casting = Casting::begin(query.trim(), SALT, &self.config, at, progress)?;

        let reversals = self.config.reversals;
        let seed = seed_digest(&casting.query);
        let pool = TokenPool::build(
            casting.key(),
            seed,
            self.token_count(),
            |sub| Totem::forge(sub, reversals),
            progress,
        )?;
        progress(Progress::Done);
        tracing::debug!(tokens = pool.len(), reversals, "totem pool forged");

        Ok(TotemPool {
            casting,
            reversals,
            pool,
        })
    }
}
