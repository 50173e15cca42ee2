//! Input records and per-race forecast rows.

use crate::rating::RaceRating;
use crate::types::{DistrictId, Party};
use serde::{Deserialize, Serialize};

/// One district as consumed from the data collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictRecord {
    pub district_id: DistrictId,
    pub incumbent_name: String,
    pub incumbent_party: Party,
    /// Source lean string, e.g. "D+5", "R+10", "EVEN". None when the
    /// source had no value; parses to neutral.
    pub lean_raw: Option<String>,
    pub lean_numeric: f64,
    /// Incumbent-performance value (WAR). 0.0 when the source had no
    /// value; forced to 0.0 for open seats (no incumbent to measure).
    pub incumbent_performance: f64,
    pub is_open_seat: bool,
    pub open_seat_reason: Option<String>,
}

impl DistrictRecord {
    /// Build a record from source values: derives the numeric lean
    /// from the raw string and forces performance to 0.0 for open
    /// seats. A missing performance value arrives as None → 0.0.
    pub fn from_source(
        district_id: DistrictId,
        incumbent_name: String,
        incumbent_party: Party,
        lean_raw: Option<String>,
        incumbent_performance: Option<f64>,
        open_seat_reason: Option<String>,
    ) -> Self {
        let is_open_seat = open_seat_reason.is_some();
        Self {
            lean_numeric: crate::lean::parse_lean(lean_raw.as_deref()),
            incumbent_performance: if is_open_seat {
                0.0
            } else {
                incumbent_performance.unwrap_or(0.0)
            },
            district_id,
            incumbent_name,
            incumbent_party,
            lean_raw,
            is_open_seat,
            open_seat_reason,
        }
    }
}

/// The forecast for one race. Computed once per run, immutable after
/// creation; margins are reported at 2 decimal places and
/// probabilities at 1, matching the published output schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceForecast {
    pub district_id: DistrictId,
    pub incumbent_name: String,
    pub incumbent_party: Party,
    pub lean_raw: Option<String>,
    pub lean_numeric: f64,
    pub is_open_seat: bool,
    pub open_seat_reason: Option<String>,
    pub incumbent_performance: f64,
    /// National environment value this forecast was run under.
    pub environment: f64,
    pub predicted_margin: f64,
    pub predicted_winner: Party,
    pub d_win_pct: f64,
    pub r_win_pct: f64,
    pub rating: RaceRating,
    /// True when the predicted winner differs from the party holding
    /// the seat.
    pub is_flip: bool,
    pub sim_avg_margin: f64,
    pub sim_margin_std: f64,
}

impl RaceForecast {
    /// Distance of the D win probability from a coin flip. Lower is
    /// more competitive; used for the top-K competitive ranking.
    pub fn competitiveness(&self) -> f64 {
        (self.d_win_pct - 50.0).abs()
    }
}

/// Round to the given number of decimal places for reporting.
/// Internal accumulation always keeps full precision.
pub(crate) fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
