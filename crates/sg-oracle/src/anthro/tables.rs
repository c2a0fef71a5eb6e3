//! Attribute tables for totems.

/// Animal forms a totem can take.
pub const SPECIES: &[&str] = &[
    "Wolf",
    "Fox",
    "Dog",
    "Cat",
    "Lion",
    "Tiger",
    "Leopard",
    "Cheetah",
    "Hyena",
    "Bear",
    "Otter",
    "Raccoon",
    "Red Panda",
    "Husky",
    "Coyote",
    "Jackal",
    "Rabbit",
    "Hare",
    "Deer",
    "Stag",
    "Moose",
    "Bison",
    "Horse",
    "Goat",
    "Sheep",
    "Boar",
    "Bat",
    "Eagle",
    "Raven",
    "Owl",
    "Hawk",
    "Crow",
    "Swan",
    "Phoenix",
    "Dragon",
    "Lizard",
    "Gecko",
    "Snake",
    "Cobra",
    "Crocodile",
    "Shark",
    "Dolphin",
    "Orca",
    "Seal",
];

/// Roles a totem plays.
pub const ROLES: &[&str] = &[
    "Guardian",
    "Healer",
    "Seer",
    "Warrior",
    "Trickster",
    "Bard",
    "Scholar",
    "Builder",
    "Navigator",
    "Shaman",
    "Alchemist",
    "Diplomat",
    "Scout",
    "Hermit",
    "Caretaker",
];

/// Elemental affinities.
pub const ELEMENTS: &[&str] = &[
    "Fire",
    "Water",
    "Earth",
    "Air",
    "Storm",
    "Wood",
    "Metal",
    "Light",
    "Shadow",
    "Aether",
];

/// Strengths a totem lends.
pub const VIRTUES: &[&str] = &[
    "Courage",
    "Devotion",
    "Compassion",
    "Patience",
    "Integrity",
    "Curiosity",
    "Discipline",
    "Joy",
    "Humility",
    "Grace",
    "Perseverance",
    "Wisdom",
    "Playfulness",
    "Ingenuity",
    "Justice",
];

/// Weaknesses a totem warns of.
pub const SHADOWS: &[&str] = &[
    "Fear",
    "Control",
    "Apathy",
    "Doubt",
    "Pride",
    "Impatience",
    "Isolation",
    "Resentment",
    "Greed",
    "Confusion",
    "Rigidity",
    "Escapism",
    "Despair",
    "Deceit",
    "Chaos",
];

/// Named gifts, each with a short gloss.
pub const GIFTS: &[&str] = &[
    "Moonstep (move between feelings without losing center)",
    "Sunheart (radiate safety to those nearby)",
    "Scent of Truth (sense honest intent)",
    "Starcall (hear guidance in silence)",
    "Packbond (summon allies through trust)",
    "Mirrorshine (reflect harm back as lesson)",
    "Driftwood (float above old patterns)",
    "Pawprint Path (track the next right step)",
    "Thunderpaw (break stagnation kindly)",
    "Sea-breath (soften grief into flow)",
    "Keenwhisker (notice the subtle invitation)",
    "Bloomcloak (protect new beginnings)",
    "Stonebed (rest deeply, wake clear)",
    "Kindlefang (ignite shared motivation)",
    "Skyweave (connect distant hearts)",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_sizes() {
        assert_eq!(SPECIES.len(), 44);
        assert_eq!(ROLES.len(), 15);
        assert_eq!(ELEMENTS.len(), 10);
        assert_eq!(VIRTUES.len(), 15);
        assert_eq!(SHADOWS.len(), 15);
        assert_eq!(GIFTS.len(), 15);
    }
}
