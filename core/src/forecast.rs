//! The forecast orchestrator.
//!
//! Drives the per-district pipeline (lean → model → simulation →
//! rating) over the full record set, then hands the predicted margins
//! to the chamber simulation. Every input record yields exactly one
//! forecast row — bad or missing values degrade to documented
//! defaults, they never drop a district.

use crate::chamber::{simulate_chamber, ChamberSummary};
use crate::config::ModelConfig;
use crate::district::{round_to, DistrictRecord, RaceForecast};
use crate::error::{ForecastError, ForecastResult};
use crate::model::predict_margin;
use crate::rating::{rate_by_probability, RaceRating};
use crate::rng::RngBank;
use crate::simulate::simulate_race;
use crate::types::Party;
use std::collections::HashSet;

/// The complete result of one forecast run.
#[derive(Debug, Clone)]
pub struct ForecastRun {
    /// One row per input district, ordered by ascending absolute
    /// predicted margin (most competitive first).
    pub forecasts: Vec<RaceForecast>,
    pub chamber: ChamberSummary,
    pub environment: f64,
    pub trials: u32,
    pub seed: u64,
    /// Point-estimate seats by predicted winner.
    pub d_seats: u32,
    pub r_seats: u32,
    pub flips_to_d: u32,
    pub flips_to_r: u32,
    /// Races per rating bucket, in canonical rating order.
    pub rating_counts: [(RaceRating, u32); 9],
}

impl ForecastRun {
    /// The K most competitive races, ranked by how close the D win
    /// probability sits to a coin flip.
    pub fn most_competitive(&self, k: usize) -> Vec<&RaceForecast> {
        let mut ranked: Vec<&RaceForecast> = self.forecasts.iter().collect();
        ranked.sort_by(|a, b| a.competitiveness().total_cmp(&b.competitiveness()));
        ranked.truncate(k);
        ranked
    }

    /// Predicted flips won by the given party, strongest first.
    pub fn flips_to(&self, party: Party) -> Vec<&RaceForecast> {
        let mut flips: Vec<&RaceForecast> = self
            .forecasts
            .iter()
            .filter(|f| f.is_flip && f.predicted_winner == party)
            .collect();
        flips.sort_by(|a, b| match party {
            Party::D => b.d_win_pct.total_cmp(&a.d_win_pct),
            Party::R => b.r_win_pct.total_cmp(&a.r_win_pct),
        });
        flips
    }
}

/// Forecast every district and simulate the chamber.
///
/// `environment` is the national generic-ballot value applied
/// uniformly to every district; `trials` is the per-simulation trial
/// count; `seed` roots every RNG stream, so a repeated run with the
/// same inputs reproduces the table bit for bit.
pub fn run_forecast(
    records: &[DistrictRecord],
    environment: f64,
    trials: u32,
    config: &ModelConfig,
    seed: u64,
) -> ForecastResult<ForecastRun> {
    if trials == 0 {
        return Err(ForecastError::InvalidConfiguration(
            "trial count must be positive".into(),
        ));
    }
    config.validate()?;

    log::info!(
        "Forecasting {} districts, {} trials per race, environment {:+.1}",
        records.len(),
        trials,
        environment
    );

    let bank = RngBank::new(seed);
    let mut seen_ids: HashSet<&str> = HashSet::with_capacity(records.len());
    let mut forecasts = Vec::with_capacity(records.len());
    let mut margins = Vec::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if !seen_ids.insert(&record.district_id) {
            log::warn!(
                "Duplicate district_id '{}'; forecasting every row anyway",
                record.district_id
            );
        }

        // No incumbent to measure in an open seat.
        let performance = if record.is_open_seat {
            0.0
        } else {
            record.incumbent_performance
        };

        let margin = predict_margin(
            &config.coefficients,
            record.lean_numeric,
            performance,
            environment,
        );
        let winner = Party::from_margin(margin);

        let mut rng = bank.for_race(index);
        let sim = simulate_race(margin, config.rmse, trials, &mut rng);
        let rating = rate_by_probability(sim.d_win_pct);

        margins.push(margin);
        forecasts.push(RaceForecast {
            district_id: record.district_id.clone(),
            incumbent_name: record.incumbent_name.clone(),
            incumbent_party: record.incumbent_party,
            lean_raw: record.lean_raw.clone(),
            lean_numeric: record.lean_numeric,
            is_open_seat: record.is_open_seat,
            open_seat_reason: record.open_seat_reason.clone(),
            incumbent_performance: performance,
            environment,
            predicted_margin: round_to(margin, 2),
            predicted_winner: winner,
            d_win_pct: sim.d_win_pct,
            r_win_pct: sim.r_win_pct,
            rating,
            is_flip: winner != record.incumbent_party,
            sim_avg_margin: sim.avg_margin,
            sim_margin_std: sim.margin_std,
        });

        if (index + 1) % 100 == 0 {
            log::info!("Processed {}/{} districts", index + 1, records.len());
        }
    }

    let mut rng = bank.for_chamber();
    let chamber = simulate_chamber(
        &margins,
        config.rmse,
        trials,
        config.majority_threshold(),
        &mut rng,
    );

    let d_seats = forecasts
        .iter()
        .filter(|f| f.predicted_winner == Party::D)
        .count() as u32;
    let flips_to_d = forecasts
        .iter()
        .filter(|f| f.is_flip && f.predicted_winner == Party::D)
        .count() as u32;
    let flips_to_r = forecasts
        .iter()
        .filter(|f| f.is_flip && f.predicted_winner == Party::R)
        .count() as u32;

    let mut rating_counts = RaceRating::ALL.map(|r| (r, 0u32));
    for forecast in &forecasts {
        for entry in rating_counts.iter_mut() {
            if entry.0 == forecast.rating {
                entry.1 += 1;
            }
        }
    }

    // Primary presentation order: most competitive margin first.
    forecasts.sort_by(|a, b| {
        a.predicted_margin
            .abs()
            .total_cmp(&b.predicted_margin.abs())
    });

    Ok(ForecastRun {
        r_seats: forecasts.len() as u32 - d_seats,
        d_seats,
        flips_to_d,
        flips_to_r,
        rating_counts,
        forecasts,
        chamber,
        environment,
        trials,
        seed,
    })
}
