//! Tree of Life readings.
//!
//! Single and pillar readings pick sephirot by sequential elimination. The
//! full-tree and four-worlds readings reveal all ten sephirot in their
//! fixed order, with no elimination, and only compute each one's state.
//! Paths are always drawn by elimination.

pub mod table;

pub use table::{PATHS, Pillar, SEPHIROT, Sephirah, TreePath, World};

use chrono::{DateTime, Utc};
use serde::Serialize;

use sg_core::error::validate_count;
use sg_core::progress::silent;
use sg_core::select::reduce_label;
use sg_core::{Casting, MasterKey, OracleConfig, Progress, Selector, SortError, SortResult, Spread};

/// Domain label for sephirah selection.
pub const SEPHIRAH_DOMAIN: &str = "sephirah";
/// Domain label for path selection.
pub const PATH_DOMAIN: &str = "path";
/// Salt for the master key.
pub const SALT: &[u8] = b"kabbalah-tree-v1";
/// Label for the authentication code.
pub const AUTH_LABEL: &str = "kabbalah-auth";
/// Label for the derived path count.
pub const PATH_COUNT_LABEL: &str = "path-count";

/// Position names for sephirah spreads.
pub const SPREAD: Spread = Spread {
    noun: "Sephirah",
    layouts: &[
        (1, &["The Sephirah"]),
        (3, &["Mind", "Heart", "Body"]),
        (
            10,
            &[
                "First Emanation",
                "Second Emanation",
                "Third Emanation",
                "Fourth Emanation",
                "Fifth Emanation",
                "Sixth Emanation",
                "Seventh Emanation",
                "Eighth Emanation",
                "Ninth Emanation",
                "Tenth Emanation",
            ],
        ),
    ],
};

/// Position names for paths.
pub const PATH_SPREAD: Spread = Spread {
    noun: "Path",
    layouts: &[],
};

/// The kind of Tree reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadingType {
    /// One sephirah and its paths.
    Single,
    /// Mind, heart, and body: three sephirot.
    Pillars,
    /// All ten sephirot in order.
    FullTree,
    /// All ten sephirot grouped by world.
    FourWorlds,
}

impl ReadingType {
    /// Parse the numeric selector used at the command line.
    pub fn from_selector(selector: u32) -> SortResult<Self> {
        match selector {
            1 => Ok(Self::Single),
            3 => Ok(Self::Pillars),
            10 => Ok(Self::FullTree),
            4 => Ok(Self::FourWorlds),
            other => Err(SortError::UnsupportedSpread(format!(
                "reading type {other} (use 1, 3, 10, or 4)"
            ))),
        }
    }

    /// How many sephirot the reading reveals.
    pub fn sephirah_count(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Pillars => 3,
            Self::FullTree | Self::FourWorlds => SEPHIROT.len(),
        }
    }

    fn reveals_all(self) -> bool {
        matches!(self, Self::FullTree | Self::FourWorlds)
    }
}

impl std::fmt::Display for ReadingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "Single Sephirah"),
            Self::Pillars => write!(f, "Mind/Heart/Body"),
            Self::FullTree => write!(f, "Full Tree of Life"),
            Self::FourWorlds => write!(f, "Four Worlds"),
        }
    }
}

/// Balance of a revealed sephirah.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SephirahState {
    /// In balance.
    Normal,
    /// Underexpressed.
    Deficient,
    /// Overexpressed.
    Excessive,
}

impl SephirahState {
    const ALL: [Self; 3] = [Self::Normal, Self::Deficient, Self::Excessive];
}

impl std::fmt::Display for SephirahState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Deficient => write!(f, "Deficient"),
            Self::Excessive => write!(f, "Excessive"),
        }
    }
}

/// A sephirah revealed in a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedSephirah {
    /// Spread position name.
    pub position: String,
    /// The sphere.
    pub sephirah: &'static Sephirah,
    /// Its balance.
    pub state: SephirahState,
    /// Short token of the sub-key that chose or revealed the sphere.
    pub token: String,
}

/// A path revealed in a reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealedPath {
    /// Spread position name.
    pub position: String,
    /// The path.
    pub path: &'static TreePath,
    /// Short token of the sub-key that chose the path.
    pub token: String,
}

/// The sephirot of one world in a four-worlds reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldGroup {
    /// The world.
    pub world: World,
    /// Its sephirot, in Tree order.
    pub sephirot: Vec<RevealedSephirah>,
}

/// A complete Tree of Life reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeReading {
    /// The question asked.
    pub query: String,
    /// Capture time.
    pub timestamp: String,
    /// Whether the capture time seeded the key.
    pub timestamp_seeded: bool,
    /// Eight upper-case hex characters sealing the reading.
    pub authentication: String,
    /// The reading type.
    pub reading_type: ReadingType,
    /// Revealed sephirot, in draw order (or Tree order for full readings).
    pub sephirot: Vec<RevealedSephirah>,
    /// World grouping, for four-worlds readings only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worlds: Option<Vec<WorldGroup>>,
    /// Whether the path count came from the query rather than the caller.
    pub path_count_derived: bool,
    /// Revealed paths, in draw order.
    pub paths: Vec<RevealedPath>,
}

/// State of `sephirah` revealed at index `index`.
pub fn sephirah_state(key: &MasterKey, sephirah: &Sephirah, index: usize) -> SephirahState {
    let label = format!("sephirah-state-{}-{index}", sephirah.name);
    SephirahState::ALL[reduce_label(key, &label, SephirahState::ALL.len())]
}

/// Path count derived from the query: 1 to half the number of paths.
pub fn derived_path_count(key: &MasterKey) -> usize {
    reduce_label(key, PATH_COUNT_LABEL, PATHS.len() / 2) + 1
}

/// Performs Tree of Life readings.
#[derive(Debug, Clone, Default)]
pub struct TreeOracle {
    config: OracleConfig,
}

impl TreeOracle {
    /// An oracle using `config`.
    pub fn new(config: OracleConfig) -> Self {
        Self { config }
    }

    /// Read the Tree for `query`.
    ///
    /// `paths` fixes the number of paths (0 to 22); `None` derives it from
    /// the query.
    pub fn read(
        &self,
        query: &str,
        reading_type: ReadingType,
        paths: Option<usize>,
        at: Option<DateTime<Utc>>,
    ) -> SortResult<TreeReading> {
        self.read_with_progress(query, reading_type, paths, at, &mut silent)
    }

    /// Like [`TreeOracle::read`], reporting each step to `progress`.
    pub fn read_with_progress(
        &self,
        query: &str,
        reading_type: ReadingType,
        paths: Option<usize>,
        at: Option<DateTime<Utc>>,
        progress: &mut dyn FnMut(Progress),
    ) -> SortResult<TreeReading> {
        if let Some(n) = paths {
            validate_count(n, 0, PATHS.len())?;
        }
        let casting = Casting::begin(query, SALT, &self.config, at, progress)?;
        let key = casting.key();

        let count = reading_type.sephirah_count();
        let selector = Selector::new(key, SEPHIRAH_DOMAIN);
        let chosen = if reading_type.reveals_all() {
            selector.reveal_all(SEPHIROT)
        } else {
            selector.draw_with_progress(SEPHIROT, count, progress)?
        };

        let sephirot: Vec<RevealedSephirah> = chosen
            .into_iter()
            .enumerate()
            .map(|(i, d)| RevealedSephirah {
                position: SPREAD.label(count, i),
                sephirah: d.entry,
                state: sephirah_state(key, d.entry, i),
                token: d.token,
            })
            .collect();

        let worlds = (reading_type == ReadingType::FourWorlds).then(|| group_by_world(&sephirot));

        let (path_count, path_count_derived) = match paths {
            Some(n) => (n, false),
            None => (derived_path_count(key), true),
        };
        let revealed_paths = if path_count == 0 {
            Vec::new()
        } else {
            Selector::new(key, PATH_DOMAIN)
                .draw_with_progress(PATHS, path_count, progress)?
                .into_iter()
                .map(|d| RevealedPath {
                    position: PATH_SPREAD.label(path_count, d.position),
                    path: d.entry,
                    token: d.token,
                })
                .collect()
        };
        progress(Progress::Done);
        tracing::debug!(%reading_type, path_count, "tree reading complete");

        Ok(TreeReading {
            authentication: casting.auth(AUTH_LABEL),
            query: casting.query,
            timestamp: casting.timestamp,
            timestamp_seeded: casting.timestamp_seeded,
            reading_type,
            sephirot,
            worlds,
            path_count_derived,
            paths: revealed_paths,
        })
    }
}

fn group_by_world(sephirot: &[RevealedSephirah]) -> Vec<WorldGroup> {
    World::all()
        .iter()
        .map(|&world| WorldGroup {
            world,
            sephirot: sephirot
                .iter()
                .filter(|s| s.sephirah.world == world)
                .cloned()
                .collect(),
        })
        .collect()
}
