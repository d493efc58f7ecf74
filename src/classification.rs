//! Difficulty labels for Flesch reading-ease scores.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of seven ordered difficulty labels, hardest first.
///
/// The derived ordering follows readability: `VeryHard < Hard < … < VeryEasy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Classification {
    #[serde(rename = "very hard")]
    VeryHard,
    Hard,
    MediumHard,
    Medium,
    MediumEasy,
    Easy,
    #[serde(rename = "very easy")]
    VeryEasy,
}

/// Inclusive upper bounds, checked from the hardest bracket upwards.
const BRACKETS: &[(f64, Classification)] = &[
    (30.0, Classification::VeryHard),
    (50.0, Classification::Hard),
    (60.0, Classification::MediumHard),
    (70.0, Classification::Medium),
    (80.0, Classification::MediumEasy),
    (90.0, Classification::Easy),
];

impl Classification {
    /// All labels from hardest to easiest.
    pub const ALL: [Self; 7] = [
        Self::VeryHard,
        Self::Hard,
        Self::MediumHard,
        Self::Medium,
        Self::MediumEasy,
        Self::Easy,
        Self::VeryEasy,
    ];

    /// English label, e.g. `"medium-hard"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHard => "very hard",
            Self::Hard => "hard",
            Self::MediumHard => "medium-hard",
            Self::Medium => "medium",
            Self::MediumEasy => "medium-easy",
            Self::Easy => "easy",
            Self::VeryEasy => "very easy",
        }
    }

    /// Traditional German label, e.g. `"Mittelschwer"`.
    #[must_use]
    pub const fn german_label(self) -> &'static str {
        match self {
            Self::VeryHard => "Sehr schwer",
            Self::Hard => "Schwer",
            Self::MediumHard => "Mittelschwer",
            Self::Medium => "Mittel",
            Self::MediumEasy => "Mittelleicht",
            Self::Easy => "Leicht",
            Self::VeryEasy => "Sehr leicht",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a Flesch reading-ease score to its label.
///
/// Each bracket includes its upper bound, so `30.0` is still "very hard".
/// Callers must not pass an undefined score; `NaN` falls through every
/// bracket and is reported as [`Classification::VeryEasy`].
///
/// # Examples
///
/// ```
/// use reading_time::{classify, Classification};
///
/// assert_eq!(classify(30.0), Classification::VeryHard);
/// assert_eq!(classify(30.1), Classification::Hard);
/// assert_eq!(classify(107.75), Classification::VeryEasy);
/// ```
#[must_use]
pub fn classify(flesch_ease: f64) -> Classification {
    BRACKETS
        .iter()
        .find(|(upper, _)| flesch_ease <= *upper)
        .map_or(Classification::VeryEasy, |(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    #[case(f64::NEG_INFINITY, Classification::VeryHard)]
    #[case(-12.0, Classification::VeryHard)]
    #[case(30.0, Classification::VeryHard)]
    #[case(50.0, Classification::Hard)]
    #[case(60.0, Classification::MediumHard)]
    #[case(70.0, Classification::Medium)]
    #[case(80.0, Classification::MediumEasy)]
    #[case(90.0, Classification::Easy)]
    #[case(90.000_001, Classification::VeryEasy)]
    #[case(121.5, Classification::VeryEasy)]
    fn boundaries_belong_to_harder_bracket(#[case] score: f64, #[case] expected: Classification) {
        assert_eq!(classify(score), expected);
    }

    #[rstest]
    #[expect(clippy::expect_used, reason = "test should fail loudly")]
    fn serialises_english_labels() {
        for label in Classification::ALL {
            let json = serde_json::to_string(&label).expect("serialise classification");
            assert_eq!(json, format!("\"{label}\""));
            let back: Classification = serde_json::from_str(&json).expect("deserialise");
            assert_eq!(back, label);
        }
    }

    #[test]
    fn labels_are_distinct() {
        let german: HashSet<_> = Classification::ALL.iter().map(|c| c.german_label()).collect();
        let english: HashSet<_> = Classification::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(german.len(), 7);
        assert_eq!(english.len(), 7);
    }

    proptest! {
        #[test]
        fn easier_scores_never_get_harder_labels(a in -200.0f64..200.0, b in -200.0f64..200.0) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(classify(low) <= classify(high));
        }
    }
}
