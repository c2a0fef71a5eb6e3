//! Display pools of short hex tokens.
//!
//! A pool shows the player a grid of eight-character tokens, each backed by
//! a value forged from the sub-key for `"token-{position}"`. Positions are
//! visited in an order shuffled by a ChaCha20 generator seeded from the
//! query digest. When a token repeats, the position is bumped until it is
//! unique. The player then picks values back out by token prefix.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::error::{SortError, SortResult};
use crate::kdf::{KEY_LEN, MasterKey, SubKey};
use crate::progress::Progress;

/// Shortest prefix accepted when picking a token.
pub const MIN_PREFIX_LEN: usize = 3;

/// Extra positions tried beyond the pool size before giving up on uniqueness.
pub const COLLISION_SLACK: usize = 16;

/// Label of the sub-key for pool position `position`.
pub fn token_label(position: usize) -> String {
    format!("token-{position}")
}

/// `table[subkey[offset mod 32] mod len(table)]`.
///
/// Each attribute table reads a different byte offset so one sub-key yields
/// independent attributes.
pub fn pick_from<'t, T>(sub: &SubKey, table: &'t [T], offset: usize) -> &'t T {
    &table[usize::from(sub.byte(offset % KEY_LEN)) % table.len()]
}

/// `0..count`, Fisher-Yates shuffled by a generator seeded from `seed`.
pub fn shuffled_positions(seed: [u8; KEY_LEN], count: usize) -> Vec<usize> {
    let mut rng = ChaCha20Rng::from_seed(seed);
    let mut order: Vec<usize> = (0..count).collect();
    order.shuffle(&mut rng);
    order
}

/// Lower-case and trim `prefixes`, rejecting any shorter than
/// [`MIN_PREFIX_LEN`].
pub fn normalize_prefixes<S: AsRef<str>>(prefixes: &[S]) -> SortResult<Vec<String>> {
    let normalized: Vec<String> = prefixes
        .iter()
        .map(|p| p.as_ref().trim().to_lowercase())
        .collect();
    if let Some(short) = normalized.iter().find(|p| p.chars().count() < MIN_PREFIX_LEN) {
        return Err(SortError::PrefixTooShort(short.clone()));
    }
    Ok(normalized)
}

/// A value shown under a unique token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slot<T> {
    /// Eight lower-case hex characters.
    pub token: String,
    /// Pool position the value was forged from.
    pub position: usize,
    /// The forged value.
    pub value: T,
}

/// An ordered pool of values keyed by unique display tokens.
#[derive(Debug, Clone)]
pub struct TokenPool<T> {
    slots: Vec<Slot<T>>,
}

impl<T> TokenPool<T> {
    /// Forge a pool of `count` unique tokens.
    ///
    /// `forge` turns a position's sub-key into the displayed value.
    pub fn build<F>(
        key: &MasterKey,
        seed: [u8; KEY_LEN],
        count: usize,
        forge: F,
        progress: &mut dyn FnMut(Progress),
    ) -> SortResult<Self>
    where
        F: FnMut(&SubKey) -> T,
    {
        Self::build_bounded(key, seed, count, count + COLLISION_SLACK, forge, progress)
    }

    fn build_bounded<F>(
        key: &MasterKey,
        seed: [u8; KEY_LEN],
        count: usize,
        budget: usize,
        mut forge: F,
        progress: &mut dyn FnMut(Progress),
    ) -> SortResult<Self>
    where
        F: FnMut(&SubKey) -> T,
    {
        let mut seen: HashSet<String> = HashSet::with_capacity(count);
        let mut slots = Vec::with_capacity(count);
        let mut attempts = 0usize;

        for (i, start) in shuffled_positions(seed, count).into_iter().enumerate() {
            progress(Progress::Forging {
                index: i,
                total: count,
            });
            let mut position = start;
            loop {
                attempts += 1;
                if attempts > budget {
                    return Err(SortError::TokenCollisionExhausted {
                        attempts: attempts - 1,
                    });
                }
                let sub = key.subkey(&token_label(position));
                let token = sub.token();
                if seen.insert(token.clone()) {
                    slots.push(Slot {
                        token,
                        position,
                        value: forge(&sub),
                    });
                    break;
                }
                tracing::debug!(position, token = %token, "token collision, bumping position");
                position += 1;
            }
        }

        Ok(Self { slots })
    }

    /// Slots in display order.
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Tokens in display order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().map(|s| s.token.as_str())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resolve each prefix to exactly one not-yet-picked slot.
    ///
    /// Prefixes are case-insensitive and need at least
    /// [`MIN_PREFIX_LEN`] characters. A slot picked by an earlier prefix is
    /// no longer a candidate. Any unmatched or ambiguous prefix fails the
    /// whole resolution.
    pub fn resolve<S: AsRef<str>>(&self, prefixes: &[S]) -> SortResult<Vec<&Slot<T>>> {
        let normalized = normalize_prefixes(prefixes)?;

        let mut available: Vec<&Slot<T>> = self.slots.iter().collect();
        let mut picks = Vec::with_capacity(normalized.len());

        for prefix in normalized {
            let matches: Vec<usize> = available
                .iter()
                .enumerate()
                .filter(|(_, s)| s.token.starts_with(&prefix))
                .map(|(i, _)| i)
                .collect();
            match matches.as_slice() {
                [only] => picks.push(available.remove(*only)),
                [] => return Err(SortError::UnmatchedPrefix(prefix)),
                many => {
                    return Err(SortError::AmbiguousPrefix {
                        matches: many.len(),
                        prefix,
                    });
                }
            }
        }

        Ok(picks)
    }
}
