//! Positional labels for spreads.

/// Position names for the spread sizes an oracle special-cases.
///
/// Sizes without a table fall back to `"{noun} #{n}"`.
#[derive(Debug, Clone, Copy)]
pub struct Spread {
    /// Noun used by fallback labels, e.g. "Rune".
    pub noun: &'static str,
    /// `(count, labels)` pairs; each label slice has exactly `count` entries.
    pub layouts: &'static [(usize, &'static [&'static str])],
}

impl Spread {
    /// Labels for a spread of `count` positions.
    pub fn labels(&self, count: usize) -> Vec<String> {
        match self.layouts.iter().find(|(n, _)| *n == count) {
            Some((_, labels)) => labels.iter().map(|l| (*l).to_string()).collect(),
            None => (1..=count).map(|i| format!("{} #{i}", self.noun)).collect(),
        }
    }

    /// Label for position `index` of a `count`-position spread.
    pub fn label(&self, count: usize, index: usize) -> String {
        self.layouts
            .iter()
            .find(|(n, _)| *n == count)
            .and_then(|(_, labels)| labels.get(index))
            .map_or_else(|| format!("{} #{}", self.noun, index + 1), |l| (*l).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST: Spread = Spread {
        noun: "Card",
        layouts: &[(1, &["Focus"]), (3, &["Past", "Present", "Future"])],
    };

    #[test]
    fn special_cased_counts() {
        assert_eq!(TEST.labels(1), vec!["Focus"]);
        assert_eq!(TEST.labels(3), vec!["Past", "Present", "Future"]);
    }

    #[test]
    fn fallback_labels() {
        assert_eq!(TEST.labels(2), vec!["Card #1", "Card #2"]);
        assert_eq!(TEST.label(4, 3), "Card #4");
    }

    #[test]
    fn single_label_lookup() {
        assert_eq!(TEST.label(3, 1), "Present");
        assert_eq!(TEST.label(3, 7), "Card #8");
    }
}
