//! Race rating classification.
//!
//! Two tiers share one nine-label scale. The primary tier buckets a
//! simulated D win probability through an ordered threshold table;
//! the fallback tier buckets a raw margin by absolute value when no
//! simulation was run. The tables live here as data so the boundary
//! behavior is testable in one place and the two tiers cannot drift.

use crate::types::Party;
use serde::{Deserialize, Serialize};

/// The nine ordered rating categories, strongest-D first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RaceRating {
    #[serde(rename = "Safe D")]
    SafeD,
    #[serde(rename = "Likely D")]
    LikelyD,
    #[serde(rename = "Lean D")]
    LeanD,
    #[serde(rename = "Tilt D")]
    TiltD,
    #[serde(rename = "Toss-up")]
    TossUp,
    #[serde(rename = "Tilt R")]
    TiltR,
    #[serde(rename = "Lean R")]
    LeanR,
    #[serde(rename = "Likely R")]
    LikelyR,
    #[serde(rename = "Safe R")]
    SafeR,
}

impl RaceRating {
    /// Canonical presentation order, Safe D through Safe R.
    pub const ALL: [RaceRating; 9] = [
        RaceRating::SafeD,
        RaceRating::LikelyD,
        RaceRating::LeanD,
        RaceRating::TiltD,
        RaceRating::TossUp,
        RaceRating::TiltR,
        RaceRating::LeanR,
        RaceRating::LikelyR,
        RaceRating::SafeR,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RaceRating::SafeD => "Safe D",
            RaceRating::LikelyD => "Likely D",
            RaceRating::LeanD => "Lean D",
            RaceRating::TiltD => "Tilt D",
            RaceRating::TossUp => "Toss-up",
            RaceRating::TiltR => "Tilt R",
            RaceRating::LeanR => "Lean R",
            RaceRating::LikelyR => "Likely R",
            RaceRating::SafeR => "Safe R",
        }
    }

    /// True for the ratings a presentation layer groups as
    /// competitive (either Tilt plus the Toss-up).
    pub fn is_competitive(&self) -> bool {
        matches!(
            self,
            RaceRating::TiltD | RaceRating::TossUp | RaceRating::TiltR
        )
    }
}

impl std::fmt::Display for RaceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One band of the probability table: the first band whose lower
/// bound the probability clears (strictly, or inclusively when
/// `inclusive`) names the rating.
struct ProbabilityBand {
    min: f64,
    inclusive: bool,
    rating: RaceRating,
}

/// Ordered probability bands for the D win probability (percent).
/// The =50 band sits after the strict >50 band, so an exact coin
/// flip lands on the suffix-free Toss-up.
const PROBABILITY_BANDS: [ProbabilityBand; 8] = [
    ProbabilityBand { min: 99.0, inclusive: true, rating: RaceRating::SafeD },
    ProbabilityBand { min: 90.0, inclusive: true, rating: RaceRating::LikelyD },
    ProbabilityBand { min: 75.0, inclusive: true, rating: RaceRating::LeanD },
    ProbabilityBand { min: 50.0, inclusive: false, rating: RaceRating::TiltD },
    ProbabilityBand { min: 50.0, inclusive: true, rating: RaceRating::TossUp },
    ProbabilityBand { min: 25.0, inclusive: true, rating: RaceRating::TiltR },
    ProbabilityBand { min: 10.0, inclusive: true, rating: RaceRating::LeanR },
    ProbabilityBand { min: 1.0, inclusive: true, rating: RaceRating::LikelyR },
];

/// Classify a simulated D win probability (0–100) into a rating.
pub fn rate_by_probability(d_win_pct: f64) -> RaceRating {
    for band in &PROBABILITY_BANDS {
        let cleared = if band.inclusive {
            d_win_pct >= band.min
        } else {
            d_win_pct > band.min
        };
        if cleared {
            return band.rating;
        }
    }
    RaceRating::SafeR
}

/// Absolute-margin bands for the fallback tier; the winner's side is
/// resolved separately by the sign of the margin.
const MARGIN_BANDS: [(f64, MarginTier); 3] = [
    (15.0, MarginTier::Safe),
    (10.0, MarginTier::Likely),
    (5.0, MarginTier::Lean),
];

#[derive(Clone, Copy)]
enum MarginTier {
    Safe,
    Likely,
    Lean,
}

/// Classify a raw predicted margin when no win probability is
/// available. Margins inside ±5 are a Toss-up regardless of side;
/// exact zero resolves to R under the engine-wide sign convention,
/// which only matters for the wider bands.
pub fn rate_by_margin(margin: f64) -> RaceRating {
    let winner = Party::from_margin(margin);
    for (min, tier) in &MARGIN_BANDS {
        if margin.abs() > *min {
            return match (tier, winner) {
                (MarginTier::Safe, Party::D) => RaceRating::SafeD,
                (MarginTier::Safe, Party::R) => RaceRating::SafeR,
                (MarginTier::Likely, Party::D) => RaceRating::LikelyD,
                (MarginTier::Likely, Party::R) => RaceRating::LikelyR,
                (MarginTier::Lean, Party::D) => RaceRating::LeanD,
                (MarginTier::Lean, Party::R) => RaceRating::LeanR,
            };
        }
    }
    RaceRating::TossUp
}
