//! Whole-chamber seat simulation.
//!
//! Each trial re-draws fresh Gaussian noise for every district and
//! counts the resulting seats per party. The trials draw from their
//! own RNG stream, so the seat distribution is statistically
//! independent of the per-race simulations.

use crate::rng::SimRng;
use crate::stats;
use crate::types::Party;

/// Distribution of one party's (D's) seat count across N trials.
/// R's count in any trial is `chamber seats − D seats`.
#[derive(Debug, Clone)]
pub struct ChamberSummary {
    /// D seat count per trial, in trial order.
    pub d_seat_counts: Vec<u32>,
    pub chamber_size: u32,
    pub majority_threshold: u32,
    pub d_mean: f64,
    pub d_median: f64,
    pub d_std: f64,
    pub d_min: u32,
    pub d_max: u32,
    /// Percent of trials in which D reached the majority threshold.
    pub d_majority_pct: f64,
}

impl ChamberSummary {
    pub fn trials(&self) -> usize {
        self.d_seat_counts.len()
    }

    pub fn majority_pct(&self, party: Party) -> f64 {
        match party {
            Party::D => self.d_majority_pct,
            Party::R => 100.0 - self.d_majority_pct,
        }
    }

    /// The p-th percentile of the D seat distribution.
    pub fn d_percentile(&self, p: f64) -> f64 {
        let counts: Vec<f64> = self.d_seat_counts.iter().map(|&c| c as f64).collect();
        stats::percentile(&counts, p)
    }
}

/// Run `trials` independent whole-chamber trials over the predicted
/// margins. Every trial perturbs every district's margin with fresh
/// N(0, rmse) noise and scores margin > 0 as a D seat.
pub fn simulate_chamber(
    predicted_margins: &[f64],
    rmse: f64,
    trials: u32,
    majority_threshold: u32,
    rng: &mut SimRng,
) -> ChamberSummary {
    let chamber_size = predicted_margins.len() as u32;
    let mut d_seat_counts = Vec::with_capacity(trials as usize);

    for trial in 0..trials {
        let mut d_seats = 0u32;
        for &margin in predicted_margins {
            if margin + rng.gauss(0.0, rmse) > 0.0 {
                d_seats += 1;
            }
        }
        d_seat_counts.push(d_seats);

        if (trial + 1) % 200 == 0 {
            log::info!("Completed {}/{} chamber trials", trial + 1, trials);
        }
    }

    let majority_hits = d_seat_counts
        .iter()
        .filter(|&&c| c >= majority_threshold)
        .count();
    let as_f64: Vec<f64> = d_seat_counts.iter().map(|&c| c as f64).collect();

    ChamberSummary {
        d_mean: stats::mean(&as_f64),
        d_median: stats::median(&as_f64),
        d_std: stats::std_dev(&as_f64),
        d_min: d_seat_counts.iter().copied().min().unwrap_or(0),
        d_max: d_seat_counts.iter().copied().max().unwrap_or(0),
        d_majority_pct: majority_hits as f64 / trials as f64 * 100.0,
        d_seat_counts,
        chamber_size,
        majority_threshold,
    }
}
