//! Output artifacts: the per-district CSV, the JSON summary, and the
//! console summary.

use anyhow::{Context, Result};
use forecast_core::config::ModelConfig;
use forecast_core::district::RaceForecast;
use forecast_core::forecast::ForecastRun;
use forecast_core::types::Party;
use serde::Serialize;
use std::fmt::Write as _;

const PERCENTILE_BREAKPOINTS: [f64; 7] = [5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0];

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn csv_row(forecast: &RaceForecast) -> String {
    let mut row = String::new();
    let _ = write!(
        row,
        "{},{},{},{},{},{},{},{},{},{:.2},{},{:.1},{:.1},{},{},{:.2},{:.2}",
        csv_field(&forecast.district_id),
        csv_field(&forecast.incumbent_name),
        forecast.incumbent_party,
        csv_field(forecast.lean_raw.as_deref().unwrap_or("")),
        forecast.lean_numeric,
        forecast.is_open_seat,
        csv_field(forecast.open_seat_reason.as_deref().unwrap_or("")),
        forecast.incumbent_performance,
        forecast.environment,
        forecast.predicted_margin,
        forecast.predicted_winner,
        forecast.d_win_pct,
        forecast.r_win_pct,
        csv_field(forecast.rating.label()),
        forecast.is_flip,
        forecast.sim_avg_margin,
        forecast.sim_margin_std,
    );
    row
}

/// Write the one-row-per-district forecast table.
pub fn write_forecast_csv(path: &str, run: &ForecastRun) -> Result<()> {
    let mut out = String::from(
        "district_id,incumbent,incumbent_party,lean,lean_numeric,is_open_seat,\
         open_seat_reason,war,generic_ballot,predicted_margin,predicted_winner,\
         d_win_pct,r_win_pct,race_rating,potential_flip,sim_avg_margin,sim_margin_std\n",
    );
    for forecast in &run.forecasts {
        out.push_str(&csv_row(forecast));
        out.push('\n');
    }
    std::fs::write(path, out).with_context(|| format!("Cannot write {path}"))?;
    log::info!("Forecast table written to {path}");
    Ok(())
}

#[derive(Serialize)]
struct PointEstimate {
    d_seats: u32,
    r_seats: u32,
    flips_to_d: u32,
    flips_to_r: u32,
}

#[derive(Serialize)]
struct RatingCount {
    rating: String,
    count: u32,
}

#[derive(Serialize)]
struct PercentileRow {
    percentile: f64,
    d_seats: f64,
    r_seats: f64,
}

#[derive(Serialize)]
struct SeatSimulation {
    trials: u32,
    d_seat_mean: f64,
    d_seat_median: f64,
    d_seat_std: f64,
    d_seat_min: u32,
    d_seat_max: u32,
    d_majority_pct: f64,
    r_majority_pct: f64,
    percentiles: Vec<PercentileRow>,
}

#[derive(Serialize)]
struct CompetitiveRow {
    district_id: String,
    incumbent: String,
    lean: Option<String>,
    predicted_margin: f64,
    d_win_pct: f64,
    r_win_pct: f64,
    race_rating: String,
}

#[derive(Serialize)]
struct SummaryArtifact {
    generated_at: String,
    environment: f64,
    trials: u32,
    seed: u64,
    point_estimate: PointEstimate,
    rating_counts: Vec<RatingCount>,
    simulation: SeatSimulation,
    top_competitive: Vec<CompetitiveRow>,
}

/// Write the companion summary artifact.
pub fn write_summary_json(path: &str, run: &ForecastRun, top: usize) -> Result<()> {
    let chamber = &run.chamber;
    let summary = SummaryArtifact {
        generated_at: chrono::Utc::now().to_rfc3339(),
        environment: run.environment,
        trials: run.trials,
        seed: run.seed,
        point_estimate: PointEstimate {
            d_seats: run.d_seats,
            r_seats: run.r_seats,
            flips_to_d: run.flips_to_d,
            flips_to_r: run.flips_to_r,
        },
        rating_counts: run
            .rating_counts
            .iter()
            .map(|(rating, count)| RatingCount {
                rating: rating.label().to_string(),
                count: *count,
            })
            .collect(),
        simulation: SeatSimulation {
            trials: run.trials,
            d_seat_mean: chamber.d_mean,
            d_seat_median: chamber.d_median,
            d_seat_std: chamber.d_std,
            d_seat_min: chamber.d_min,
            d_seat_max: chamber.d_max,
            d_majority_pct: chamber.majority_pct(Party::D),
            r_majority_pct: chamber.majority_pct(Party::R),
            percentiles: PERCENTILE_BREAKPOINTS
                .iter()
                .map(|&p| {
                    let d = chamber.d_percentile(p);
                    PercentileRow {
                        percentile: p,
                        d_seats: d,
                        r_seats: chamber.chamber_size as f64 - d,
                    }
                })
                .collect(),
        },
        top_competitive: run
            .most_competitive(top)
            .into_iter()
            .map(|f| CompetitiveRow {
                district_id: f.district_id.clone(),
                incumbent: f.incumbent_name.clone(),
                lean: f.lean_raw.clone(),
                predicted_margin: f.predicted_margin,
                d_win_pct: f.d_win_pct,
                r_win_pct: f.r_win_pct,
                race_rating: f.rating.label().to_string(),
            })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&summary)?;
    std::fs::write(path, json).with_context(|| format!("Cannot write {path}"))?;
    log::info!("Summary written to {path}");
    Ok(())
}

fn print_flip_block(run: &ForecastRun, party: Party) {
    let flips = run.flips_to(party);
    let count = match party {
        Party::D => run.flips_to_d,
        Party::R => run.flips_to_r,
    };
    println!("\n{party} Pickups ({count} seats):");
    if flips.is_empty() {
        println!("  None");
        return;
    }
    for f in flips {
        let pct = match party {
            Party::D => f.d_win_pct,
            Party::R => f.r_win_pct,
        };
        println!(
            "  {:<8} held {}  {:<6} margin {:+7.2}  win {:5.1}%  {}",
            f.district_id,
            f.incumbent_party,
            f.lean_raw.as_deref().unwrap_or("EVEN"),
            f.predicted_margin,
            pct,
            f.rating
        );
    }
}

/// Print the human-readable run summary.
pub fn print_summary(run: &ForecastRun, config: &ModelConfig, top: usize) {
    let chamber = &run.chamber;
    let env_label = if run.environment >= 0.0 { "D" } else { "R" };

    println!("\n{}", "=".repeat(70));
    println!("HOUSE FORECAST SUMMARY");
    println!("{}", "=".repeat(70));
    println!(
        "\nNational Environment: Generic Ballot {env_label}+{:.1}",
        run.environment.abs()
    );
    println!(
        "Model: margin = {:+.2} {:+.2}*lean {:+.2}*WAR {:+.2}*GB  (RMSE = {:.2} pts)",
        config.coefficients.intercept,
        config.coefficients.lean_weight,
        config.coefficients.incumbent_weight,
        config.coefficients.environment_weight,
        config.rmse
    );

    println!("\nPOINT ESTIMATE (predicted margins)");
    println!("  Democrats:   {}", run.d_seats);
    println!("  Republicans: {}", run.r_seats);
    let net_party = if run.flips_to_d >= run.flips_to_r { "D" } else { "R" };
    println!(
        "  Net change:  {net_party}+{}",
        run.flips_to_d.abs_diff(run.flips_to_r)
    );

    println!("\nMONTE CARLO SIMULATION ({} trials)", run.trials);
    println!("  Dem seats (mean):    {:.1}", chamber.d_mean);
    println!("  Dem seats (median):  {:.0}", chamber.d_median);
    println!("  Dem seats (std dev): {:.1}", chamber.d_std);
    println!("  Dem seats (range):   {} - {}", chamber.d_min, chamber.d_max);
    println!("  DEM MAJORITY PROB:   {:.1}%", chamber.majority_pct(Party::D));
    println!("  GOP MAJORITY PROB:   {:.1}%", chamber.majority_pct(Party::R));

    println!("\n  Seat distribution percentiles:");
    for p in PERCENTILE_BREAKPOINTS {
        let d = chamber.d_percentile(p);
        println!(
            "    {:>2.0}th: D {:>3.0} - R {:>3.0}",
            p,
            d,
            chamber.chamber_size as f64 - d
        );
    }

    println!("\nRACE RATINGS (by win probability)");
    for (rating, count) in &run.rating_counts {
        if *count > 0 {
            println!("  {:<9} {count}", rating.label());
        }
    }

    println!("\nTOP {top} MOST COMPETITIVE RACES (by win probability)");
    println!(
        "  {:<8} {:<24} {:<6} {:>8} {:>6} {:>6}  rating",
        "district", "incumbent", "lean", "margin", "D%", "R%"
    );
    for f in run.most_competitive(top) {
        println!(
            "  {:<8} {:<24} {:<6} {:>+8.2} {:>6.1} {:>6.1}  {}",
            f.district_id,
            f.incumbent_name,
            f.lean_raw.as_deref().unwrap_or("EVEN"),
            f.predicted_margin,
            f.d_win_pct,
            f.r_win_pct,
            f.rating
        );
    }

    print_flip_block(run, Party::D);
    print_flip_block(run, Party::R);
}
