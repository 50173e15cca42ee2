//! Per-race Monte Carlo simulation.

use crate::district::round_to;
use crate::rng::SimRng;
use crate::stats;

/// Outcome distribution of one race across N simulated trials.
#[derive(Debug, Clone, PartialEq)]
pub struct RaceSimResult {
    pub d_wins: u32,
    pub r_wins: u32,
    /// Win probabilities in percent, rounded to 1 decimal place.
    pub d_win_pct: f64,
    pub r_win_pct: f64,
    /// Mean simulated margin, rounded to 2 decimal places.
    pub avg_margin: f64,
    /// Population standard deviation of the simulated margins,
    /// rounded to 2 decimal places.
    pub margin_std: f64,
}

/// Simulate one race `trials` times: each trial perturbs the predicted
/// margin with Gaussian noise N(0, rmse) and scores margin > 0 as a D
/// win, anything else as an R win (the engine-wide tie convention).
///
/// The caller supplies the random stream, so calls for different
/// districts share no state and each is reproducible in isolation.
pub fn simulate_race(
    predicted_margin: f64,
    rmse: f64,
    trials: u32,
    rng: &mut SimRng,
) -> RaceSimResult {
    let mut d_wins = 0u32;
    let mut margins = Vec::with_capacity(trials as usize);

    for _ in 0..trials {
        let simulated = predicted_margin + rng.gauss(0.0, rmse);
        margins.push(simulated);
        if simulated > 0.0 {
            d_wins += 1;
        }
    }

    let r_wins = trials - d_wins;
    let d_win_pct = round_to(d_wins as f64 / trials as f64 * 100.0, 1);

    RaceSimResult {
        d_wins,
        r_wins,
        d_win_pct,
        r_win_pct: round_to(100.0 - d_win_pct, 1),
        avg_margin: round_to(stats::mean(&margins), 2),
        margin_std: round_to(stats::std_dev(&margins), 2),
    }
}
