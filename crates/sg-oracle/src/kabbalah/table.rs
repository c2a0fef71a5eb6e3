//! The Tree of Life: ten sephirot, twenty-two paths, four worlds.

use serde::Serialize;

use sg_core::Symbol;

/// One of the four worlds of emanation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum World {
    /// Atziluth, the world of emanation.
    Archetypal,
    /// Beriah, the world of creation.
    Creative,
    /// Yetzirah, the world of formation.
    Formative,
    /// Assiah, the world of action.
    Material,
}

impl World {
    /// The worlds from highest to lowest.
    pub fn all() -> &'static [Self] {
        &[
            Self::Archetypal,
            Self::Creative,
            Self::Formative,
            Self::Material,
        ]
    }
}

impl std::fmt::Display for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Archetypal => write!(f, "Archetypal"),
            Self::Creative => write!(f, "Creative"),
            Self::Formative => write!(f, "Formative"),
            Self::Material => write!(f, "Material"),
        }
    }
}

/// The three pillars of the Tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Pillar {
    /// Right-hand pillar.
    Mercy,
    /// Left-hand pillar.
    Severity,
    /// Middle pillar.
    Balance,
}

impl std::fmt::Display for Pillar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mercy => write!(f, "Pillar of Mercy"),
            Self::Severity => write!(f, "Pillar of Severity"),
            Self::Balance => write!(f, "Pillar of Balance"),
        }
    }
}

/// A sphere on the Tree of Life.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sephirah {
    /// Hebrew name.
    pub name: &'static str,
    /// English title.
    pub title: &'static str,
    /// World the sphere belongs to.
    pub world: World,
    /// Pillar the sphere stands on.
    pub pillar: Pillar,
}

impl std::fmt::Display for Sephirah {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.title)
    }
}

impl Symbol for Sephirah {
    fn name(&self) -> &str {
        self.name
    }
}

/// A path joining two sephirot, named for its Hebrew letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreePath {
    /// Hebrew letter.
    pub letter: &'static str,
    /// Elemental, planetary, or zodiacal attribution.
    pub attribution: &'static str,
}

impl std::fmt::Display for TreePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Path of {} ({})", self.letter, self.attribution)
    }
}

impl Symbol for TreePath {
    fn name(&self) -> &str {
        self.letter
    }
}

const fn sephirah(name: &'static str, title: &'static str, world: World, pillar: Pillar) -> Sephirah {
    Sephirah {
        name,
        title,
        world,
        pillar,
    }
}

const fn path(letter: &'static str, attribution: &'static str) -> TreePath {
    TreePath {
        letter,
        attribution,
    }
}

/// The ten sephirot from Keter down to Malkuth.
pub const SEPHIROT: &[Sephirah] = &[
    sephirah("Keter", "Crown", World::Archetypal, Pillar::Balance),
    sephirah("Chokmah", "Wisdom", World::Archetypal, Pillar::Mercy),
    sephirah("Binah", "Understanding", World::Archetypal, Pillar::Severity),
    sephirah("Chesed", "Mercy", World::Creative, Pillar::Mercy),
    sephirah("Gevurah", "Strength", World::Creative, Pillar::Severity),
    sephirah("Tiferet", "Beauty", World::Creative, Pillar::Balance),
    sephirah("Netzach", "Victory", World::Formative, Pillar::Mercy),
    sephirah("Hod", "Splendor", World::Formative, Pillar::Severity),
    sephirah("Yesod", "Foundation", World::Formative, Pillar::Balance),
    sephirah("Malkuth", "Kingdom", World::Material, Pillar::Balance),
];

/// The twenty-two paths in letter order.
pub const PATHS: &[TreePath] = &[
    path("Aleph", "Air"),
    path("Beth", "Mercury"),
    path("Gimel", "Moon"),
    path("Daleth", "Venus"),
    path("Heh", "Aries"),
    path("Vav", "Taurus"),
    path("Zayin", "Gemini"),
    path("Cheth", "Cancer"),
    path("Teth", "Leo"),
    path("Yod", "Virgo"),
    path("Kaph", "Jupiter"),
    path("Lamed", "Libra"),
    path("Mem", "Water"),
    path("Nun", "Scorpio"),
    path("Samekh", "Sagittarius"),
    path("Ayin", "Capricorn"),
    path("Peh", "Mars"),
    path("Tzaddi", "Aquarius"),
    path("Qoph", "Pisces"),
    path("Resh", "Sun"),
    path("Shin", "Fire"),
    path("Tav", "Saturn"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        assert_eq!(SEPHIROT.len(), 10);
        assert_eq!(PATHS.len(), 22);
    }

    #[test]
    fn worlds_partition_the_tree() {
        let per_world: Vec<usize> = World::all()
            .iter()
            .map(|w| SEPHIROT.iter().filter(|s| s.world == *w).count())
            .collect();
        assert_eq!(per_world, [3, 3, 3, 1]);
    }

    #[test]
    fn display_names() {
        assert_eq!(SEPHIROT[0].to_string(), "Keter (Crown)");
        assert_eq!(PATHS[21].to_string(), "Path of Tav (Saturn)");
        assert_eq!(Pillar::Mercy.to_string(), "Pillar of Mercy");
    }
}
