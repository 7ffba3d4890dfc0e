// Severity bands: map a similarity score to a human-facing verdict.
//
// The score is first turned into a dissimilarity percentage,
// d = (1 - score) * 100, which is looked up in an ordered table of inclusive
// upper bounds. A value sitting exactly on a bound belongs to the more severe
// band. Anything above the last bound falls through to NoProblem.

use serde::{Deserialize, Serialize};

/// Verdict for one matched document, least severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityBand {
    NoProblem,
    Maybe,
    Suspected,
    Plagiarism,
}

/// (inclusive upper bound on dissimilarity %, band), most severe first.
pub const BAND_TABLE: &[(f64, SeverityBand)] = &[
    (25.0, SeverityBand::Plagiarism),
    (50.0, SeverityBand::Suspected),
    (75.0, SeverityBand::Maybe),
];

/// Band for dissimilarities above every bound in `BAND_TABLE`.
pub const FALLBACK_BAND: SeverityBand = SeverityBand::NoProblem;

/// Dissimilarity percentage for a similarity score.
pub fn dissimilarity_percent(score: f64) -> f64 {
    (1.0 - score) * 100.0
}

impl SeverityBand {
    /// Look up the band for a dissimilarity percentage.
    pub fn from_dissimilarity(dissimilarity: f64) -> Self {
        BAND_TABLE
            .iter()
            .find(|(upper, _)| dissimilarity <= *upper)
            .map(|&(_, band)| band)
            .unwrap_or(FALLBACK_BAND)
    }

    /// Look up the band for a similarity score.
    pub fn from_score(score: f64) -> Self {
        Self::from_dissimilarity(dissimilarity_percent(score))
    }

    /// Label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            SeverityBand::Plagiarism => "PLAGIARISM!",
            SeverityBand::Suspected => "SUSPECTED!",
            SeverityBand::Maybe => "MAYBE!",
            SeverityBand::NoProblem => "NO PROBLEM!",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityBand::Plagiarism => "PLAGIARISM",
            SeverityBand::Suspected => "SUSPECTED",
            SeverityBand::Maybe => "MAYBE",
            SeverityBand::NoProblem => "NO_PROBLEM",
        }
    }

    /// Dissimilarity range covered by this band, as (exclusive lower, inclusive upper).
    ///
    /// The most severe band starts at 0 and the fallback band has no upper bound.
    pub fn dissimilarity_range(&self) -> (f64, f64) {
        let mut lower = 0.0;
        for &(upper, band) in BAND_TABLE {
            if band == *self {
                return (lower, upper);
            }
            lower = upper;
        }
        (lower, f64::INFINITY)
    }
}

impl std::fmt::Display for SeverityBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Dissimilarity percentage and band for a similarity score.
pub fn classify(score: f64) -> (f64, SeverityBand) {
    let dissimilarity = dissimilarity_percent(score);
    (dissimilarity, SeverityBand::from_dissimilarity(dissimilarity))
}
