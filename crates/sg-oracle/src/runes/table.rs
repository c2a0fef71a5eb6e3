//! The Elder Futhark.

use serde::Serialize;

use sg_core::Symbol;

/// One rune of the Elder Futhark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rune {
    /// Runic glyph.
    pub symbol: &'static str,
    /// Rune name.
    pub name: &'static str,
    /// Sound value.
    pub phonetic: &'static str,
    /// Whether the rune has a distinct reversed (merkstave) reading.
    pub reversible: bool,
    /// Meaning when upright.
    pub upright_meaning: &'static str,
    /// Meaning when reversed. Equal to the upright meaning for non-reversible runes.
    pub reversed_meaning: &'static str,
}

impl Rune {
    /// The meaning for the given orientation.
    pub fn meaning(&self, reversed: bool) -> &'static str {
        if reversed {
            self.reversed_meaning
        } else {
            self.upright_meaning
        }
    }
}

impl Symbol for Rune {
    fn name(&self) -> &str {
        self.name
    }

    fn glyph(&self) -> Option<&str> {
        Some(self.symbol)
    }

    fn is_dual(&self) -> bool {
        self.reversible
    }
}

/// The 24 runes in futhark order.
pub const RUNES: &[Rune] = &[
    Rune {
        symbol: "ᚠ",
        name: "Fehu",
        phonetic: "f",
        reversible: true,
        upright_meaning: "Wealth, abundance, prosperity, foresight.",
        reversed_meaning: "Loss of property, failure, greed, burnout.",
    },
    Rune {
        symbol: "ᚢ",
        name: "Uruz",
        phonetic: "u",
        reversible: true,
        upright_meaning: "Strength, determination, health, courage.",
        reversed_meaning: "Weakness, obsession, misdirected force, sickness.",
    },
    Rune {
        symbol: "ᚦ",
        name: "Thurisaz",
        phonetic: "th",
        reversible: true,
        upright_meaning: "Reaction, defense, conflict, catharsis.",
        reversed_meaning: "Danger, defenselessness, compulsion, betrayal.",
    },
    Rune {
        symbol: "ᚨ",
        name: "Ansuz",
        phonetic: "a",
        reversible: true,
        upright_meaning: "Communication, signals, inspiration, divine messages.",
        reversed_meaning: "Misunderstanding, deceit, manipulation, vanity.",
    },
    Rune {
        symbol: "ᚱ",
        name: "Raido",
        phonetic: "r",
        reversible: true,
        upright_meaning: "Journey, change, movement, perspective.",
        reversed_meaning: "Crisis, rigidity, stasis, injustice.",
    },
    Rune {
        symbol: "ᚲ",
        name: "Kenaz",
        phonetic: "k",
        reversible: true,
        upright_meaning: "Vision, creativity, knowledge, enlightenment.",
        reversed_meaning: "Disease, breakup, instability, lack of creativity.",
    },
    Rune {
        symbol: "ᚷ",
        name: "Gebo",
        phonetic: "g",
        reversible: false,
        upright_meaning: "Gifts, partnership, generosity, balance.",
        reversed_meaning: "Gifts, partnership, generosity, balance.",
    },
    Rune {
        symbol: "ᚹ",
        name: "Wunjo",
        phonetic: "w",
        reversible: true,
        upright_meaning: "Joy, comfort, pleasure, fellowship.",
        reversed_meaning: "Sorrow, strife, alienation, intoxication.",
    },
    Rune {
        symbol: "ᚺ",
        name: "Hagalaz",
        phonetic: "h",
        reversible: false,
        upright_meaning: "Disruption, radical change, destructive natural forces.",
        reversed_meaning: "Disruption, radical change, destructive natural forces.",
    },
    Rune {
        symbol: "ᚾ",
        name: "Nauthiz",
        phonetic: "n",
        reversible: true,
        upright_meaning: "Need, constraint, distress, deliverance.",
        reversed_meaning: "Toil, drudgery, want, deprivation.",
    },
    Rune {
        symbol: "ᛁ",
        name: "Isa",
        phonetic: "i",
        reversible: false,
        upright_meaning: "Stasis, challenge, introspection, waiting.",
        reversed_meaning: "Stasis, challenge, introspection, waiting.",
    },
    Rune {
        symbol: "ᛃ",
        name: "Jera",
        phonetic: "j",
        reversible: false,
        upright_meaning: "Harvest, cycles, reward, fruition of efforts.",
        reversed_meaning: "Harvest, cycles, reward, fruition of efforts.",
    },
    Rune {
        symbol: "ᛇ",
        name: "Eihwaz",
        phonetic: "ei",
        reversible: false,
        upright_meaning: "Defense, endurance, connection between worlds.",
        reversed_meaning: "Defense, endurance, connection between worlds.",
    },
    Rune {
        symbol: "ᛈ",
        name: "Perthro",
        phonetic: "p",
        reversible: true,
        upright_meaning: "Mystery, fate, chance, occult abilities.",
        reversed_meaning: "Stagnation, loneliness, addiction, secrets revealed.",
    },
    Rune {
        symbol: "ᛉ",
        name: "Algiz",
        phonetic: "z",
        reversible: true,
        upright_meaning: "Protection, higher self, divinity, sanctuary.",
        reversed_meaning: "Hidden danger, warning, loss of divine link.",
    },
    Rune {
        symbol: "ᛊ",
        name: "Sowilo",
        phonetic: "s",
        reversible: false,
        upright_meaning: "Success, goals achieved, honor, wholeness.",
        reversed_meaning: "Success, goals achieved, honor, wholeness.",
    },
    Rune {
        symbol: "ᛏ",
        name: "Tiwaz",
        phonetic: "t",
        reversible: true,
        upright_meaning: "Honor, justice, leadership, victory.",
        reversed_meaning: "Injustice, imbalance, conflict, failure in competition.",
    },
    Rune {
        symbol: "ᛒ",
        name: "Berkano",
        phonetic: "b",
        reversible: true,
        upright_meaning: "Birth, fertility, new beginnings, growth.",
        reversed_meaning: "Family problems, domestic strife, sterility.",
    },
    Rune {
        symbol: "ᛖ",
        name: "Ehwaz",
        phonetic: "e",
        reversible: true,
        upright_meaning: "Movement, progress, teamwork, trust.",
        reversed_meaning: "Restlessness, disharmony, betrayal, lack of progress.",
    },
    Rune {
        symbol: "ᛗ",
        name: "Mannaz",
        phonetic: "m",
        reversible: true,
        upright_meaning: "The Self, humanity, awareness, social order.",
        reversed_meaning: "Depression, mortality, self-delusion, isolation.",
    },
    Rune {
        symbol: "ᛚ",
        name: "Laguz",
        phonetic: "l",
        reversible: true,
        upright_meaning: "Flow, water, intuition, the subconscious.",
        reversed_meaning: "Fear, circular thinking, avoidance, withering.",
    },
    Rune {
        symbol: "ᛜ",
        name: "Ingwaz",
        phonetic: "ng",
        reversible: false,
        upright_meaning: "Gestation, internal growth, potential energy.",
        reversed_meaning: "Gestation, internal growth, potential energy.",
    },
    Rune {
        symbol: "ᛞ",
        name: "Dagaz",
        phonetic: "d",
        reversible: false,
        upright_meaning: "Breakthrough, awakening, clarity, hope.",
        reversed_meaning: "Breakthrough, awakening, clarity, hope.",
    },
    Rune {
        symbol: "ᛟ",
        name: "Othala",
        phonetic: "o",
        reversible: true,
        upright_meaning: "Inheritance, heritage, home, spiritual legacy.",
        reversed_meaning: "Lack of custom, bad karma, prejudice, poverty.",
    },
];
