//! No-replacement selection from fixed symbol pools.
//!
//! Draw `i` takes the sub-key for `"{domain}-select-{i}"`, reads it as a
//! big-endian integer, and removes `value mod remaining` from the candidate
//! list. The choice is a pure function of the master key, the domain label,
//! the draw index, and the remaining list, so replaying a reading needs no
//! RNG state.

use serde::Serialize;

use crate::error::{SortResult, validate_count};
use crate::kdf::{MasterKey, SubKey};
use crate::progress::{Progress, silent};

/// An entry in a fixed symbol pool.
pub trait Symbol {
    /// Unique name within the pool, used in derivation labels.
    fn name(&self) -> &str;

    /// Display glyph, if the symbol has one.
    fn glyph(&self) -> Option<&str> {
        None
    }

    /// Whether the entry has a distinct reversed/shadow reading.
    fn is_dual(&self) -> bool {
        false
    }
}

/// One entry drawn from a pool.
#[derive(Debug, Clone, Serialize)]
pub struct Draw<'a, T> {
    /// The selected entry.
    pub entry: &'a T,
    /// Zero-based draw index.
    pub position: usize,
    /// Binary attribute (reversed / shadowed). Always false for non-dual entries.
    pub reversed: bool,
    /// First eight hex characters of the sub-key that chose this entry.
    pub token: String,
}

impl<T: PartialEq> PartialEq for Draw<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.entry == other.entry
            && self.position == other.position
            && self.reversed == other.reversed
            && self.token == other.token
    }
}

/// Label of the sub-key selecting draw `index`.
pub fn select_label(domain: &str, index: usize) -> String {
    format!("{domain}-select-{index}")
}

/// Label of the sub-key deciding the orientation of `name` at draw `index`.
pub fn orient_label(domain: &str, name: &str, index: usize) -> String {
    format!("{domain}-orient-{name}-{index}")
}

/// Index into a candidate list of length `remaining` for draw `index`.
pub fn select_index(key: &MasterKey, domain: &str, index: usize, remaining: usize) -> usize {
    key.subkey(&select_label(domain, index)).reduce(remaining)
}

/// Pick one of `n` outcomes from the sub-key for `label`.
pub fn reduce_label(key: &MasterKey, label: &str, n: usize) -> usize {
    key.subkey(label).reduce(n)
}

/// Draws entries from pools under one master key and domain label.
#[derive(Debug, Clone, Copy)]
pub struct Selector<'k> {
    key: &'k MasterKey,
    domain: &'k str,
    orient: bool,
}

impl<'k> Selector<'k> {
    /// A selector with orientation disabled.
    pub fn new(key: &'k MasterKey, domain: &'k str) -> Self {
        Self {
            key,
            domain,
            orient: false,
        }
    }

    /// Enable or disable the per-draw binary attribute.
    pub fn with_orientation(mut self, orient: bool) -> Self {
        self.orient = orient;
        self
    }

    /// Orientation of `entry` at draw `index`.
    ///
    /// Non-dual entries, and every entry when orientation is disabled,
    /// report false.
    pub fn orientation<T: Symbol>(&self, entry: &T, index: usize) -> bool {
        if !self.orient || !entry.is_dual() {
            return false;
        }
        self.key
            .subkey(&orient_label(self.domain, entry.name(), index))
            .first_bit()
    }

    /// Draw `count` distinct entries by sequential elimination.
    pub fn draw<'a, T: Symbol>(&self, pool: &'a [T], count: usize) -> SortResult<Vec<Draw<'a, T>>> {
        self.draw_with_progress(pool, count, &mut silent)
    }

    /// Like [`Selector::draw`], reporting each step to `progress`.
    pub fn draw_with_progress<'a, T: Symbol>(
        &self,
        pool: &'a [T],
        count: usize,
        progress: &mut dyn FnMut(Progress),
    ) -> SortResult<Vec<Draw<'a, T>>> {
        validate_count(count, 1, pool.len())?;

        let mut candidates: Vec<&'a T> = pool.iter().collect();
        let mut draws = Vec::with_capacity(count);

        for position in 0..count {
            progress(Progress::Drawing {
                index: position,
                total: count,
            });
            let sub: SubKey = self.key.subkey(&select_label(self.domain, position));
            let chosen = sub.reduce(candidates.len());
            let entry = candidates.remove(chosen);
            tracing::trace!(domain = self.domain, position, chosen, name = entry.name(), "drew");

            draws.push(Draw {
                entry,
                position,
                reversed: self.orientation(entry, position),
                token: sub.token(),
            });
        }

        Ok(draws)
    }

    /// Every entry of `pool` in its fixed order, without elimination.
    ///
    /// Each entry's attribute and token come from labels carrying the
    /// entry's own name and pool position.
    pub fn reveal_all<'a, T: Symbol>(&self, pool: &'a [T]) -> Vec<Draw<'a, T>> {
        pool.iter()
            .enumerate()
            .map(|(position, entry)| Draw {
                entry,
                position,
                reversed: self.orientation(entry, position),
                token: self
                    .key
                    .subkey(&format!("{}-reveal-{}-{position}", self.domain, entry.name()))
                    .token(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::error::SortError;

    #[derive(Debug, PartialEq)]
    struct Stone {
        name: &'static str,
        dual: bool,
    }

    impl Symbol for Stone {
        fn name(&self) -> &str {
            self.name
        }
        fn is_dual(&self) -> bool {
            self.dual
        }
    }

    const STONES: &[Stone] = &[
        Stone { name: "Amber", dual: true },
        Stone { name: "Basalt", dual: false },
        Stone { name: "Cinnabar", dual: true },
        Stone { name: "Diorite", dual: false },
        Stone { name: "Emerald", dual: true },
        Stone { name: "Flint", dual: true },
        Stone { name: "Garnet", dual: false },
        Stone { name: "Hematite", dual: true },
    ];

    fn key(seed: u8) -> MasterKey {
        MasterKey::from_bytes([seed; 32])
    }

    #[test]
    fn count_out_of_range() {
        let k = key(1);
        let sel = Selector::new(&k, "stone");
        assert!(matches!(
            sel.draw(STONES, 0),
            Err(SortError::CountOutOfRange { count: 0, min: 1, max: 8 })
        ));
        assert!(sel.draw(STONES, 9).is_err());
        assert!(sel.draw(STONES, 8).is_ok());
    }

    #[test]
    fn first_draw_follows_select_index() {
        let k = key(2);
        let draws = Selector::new(&k, "stone").draw(STONES, 1).unwrap();
        let expected = select_index(&k, "stone", 0, STONES.len());
        assert_eq!(draws[0].entry.name, STONES[expected].name);
        assert_eq!(draws[0].token, k.subkey("stone-select-0").token());
    }

    #[test]
    fn elimination_replays_by_hand() {
        let k = key(3);
        let draws = Selector::new(&k, "stone").draw(STONES, 4).unwrap();

        let mut remaining: Vec<&Stone> = STONES.iter().collect();
        for (i, draw) in draws.iter().enumerate() {
            let idx = select_index(&k, "stone", i, remaining.len());
            assert_eq!(draw.entry, remaining.remove(idx));
            assert_eq!(draw.position, i);
        }
    }

    #[test]
    fn non_dual_never_reversed() {
        for seed in 0..32 {
            let k = key(seed);
            let draws = Selector::new(&k, "stone")
                .with_orientation(true)
                .draw(STONES, STONES.len())
                .unwrap();
            for d in draws.iter().filter(|d| !d.entry.dual) {
                assert!(!d.reversed, "{} reversed", d.entry.name);
            }
        }
    }

    #[test]
    fn orientation_uses_orient_label() {
        let k = key(4);
        let sel = Selector::new(&k, "stone").with_orientation(true);
        let bit = k.subkey("stone-orient-Amber-2").first_bit();
        assert_eq!(sel.orientation(&STONES[0], 2), bit);
    }

    #[test]
    fn orientation_disabled_is_upright() {
        let k = key(5);
        let draws = Selector::new(&k, "stone").draw(STONES, 8).unwrap();
        assert!(draws.iter().all(|d| !d.reversed));
    }

    #[test]
    fn some_dual_entry_reverses_over_many_keys() {
        let reversed = (0..64u8).any(|seed| {
            let k = key(seed);
            Selector::new(&k, "stone")
                .with_orientation(true)
                .draw(STONES, 8)
                .unwrap()
                .iter()
                .any(|d| d.reversed)
        });
        assert!(reversed);
    }

    #[test]
    fn reveal_all_keeps_pool_order() {
        let k = key(6);
        let draws = Selector::new(&k, "stone").with_orientation(true).reveal_all(STONES);
        assert_eq!(draws.len(), STONES.len());
        for (d, s) in draws.iter().zip(STONES) {
            assert_eq!(d.entry, s);
        }
    }

    #[test]
    fn reduce_label_in_range() {
        let k = key(7);
        for i in 0..20 {
            assert!(reduce_label(&k, &format!("state-{i}"), 3) < 3);
        }
    }

    proptest! {
        #[test]
        fn draws_are_distinct_members(seed in any::<[u8; 32]>(), count in 1usize..=8) {
            let k = MasterKey::from_bytes(seed);
            let draws = Selector::new(&k, "stone").draw(STONES, count).unwrap();
            prop_assert_eq!(draws.len(), count);
            let names: HashSet<_> = draws.iter().map(|d| d.entry.name).collect();
            prop_assert_eq!(names.len(), count);
            for d in &draws {
                prop_assert!(STONES.iter().any(|s| std::ptr::eq(s, d.entry)));
            }
        }

        #[test]
        fn draws_are_deterministic(seed in any::<[u8; 32]>(), count in 1usize..=8) {
            let k = MasterKey::from_bytes(seed);
            let sel = Selector::new(&k, "stone").with_orientation(true);
            prop_assert_eq!(sel.draw(STONES, count).unwrap(), sel.draw(STONES, count).unwrap());
        }
    }
}
