use forecast_core::rng::SimRng;
use forecast_core::simulate::simulate_race;

// ── Helpers ──────────────────────────────────────────────────────────────────

const RMSE: f64 = 5.3522;

fn rng(seed: u64) -> SimRng {
    SimRng::new(seed, 1)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Law-of-large-numbers sanity check: a dead-even race over 100k
/// trials converges to ~50% for each side within a few tenths.
#[test]
fn even_race_converges_to_fifty_percent() {
    let result = simulate_race(0.0, RMSE, 100_000, &mut rng(42));
    assert!(
        (result.d_win_pct - 50.0).abs() < 0.5,
        "d_win_pct={} expected ≈50",
        result.d_win_pct
    );
    assert!((result.avg_margin).abs() < 0.1, "avg_margin={}", result.avg_margin);
    assert!(
        (result.margin_std - RMSE).abs() < 0.1,
        "margin_std={} expected ≈{RMSE}",
        result.margin_std
    );
}

/// A margin far outside the noise scale is effectively certain.
#[test]
fn blowout_margin_saturates() {
    let result = simulate_race(50.0, RMSE, 10_000, &mut rng(7));
    assert_eq!(result.d_wins, 10_000);
    assert_eq!(result.d_win_pct, 100.0);
    assert_eq!(result.r_win_pct, 0.0);

    let result = simulate_race(-50.0, RMSE, 10_000, &mut rng(7));
    assert_eq!(result.r_wins, 10_000);
    assert_eq!(result.d_win_pct, 0.0);
}

#[test]
fn win_counts_sum_to_trials() {
    let result = simulate_race(2.5, RMSE, 1000, &mut rng(99));
    assert_eq!(result.d_wins + result.r_wins, 1000);
    assert!((result.d_win_pct + result.r_win_pct - 100.0).abs() < 1e-9);
}

/// Zero noise degenerates to the point estimate, with the margin ≤ 0
/// tie convention scoring an exactly-zero margin for R.
#[test]
fn zero_rmse_is_deterministic() {
    let result = simulate_race(3.0, 0.0, 100, &mut rng(1));
    assert_eq!(result.d_wins, 100);
    assert_eq!(result.avg_margin, 3.0);
    assert_eq!(result.margin_std, 0.0);

    let result = simulate_race(0.0, 0.0, 100, &mut rng(1));
    assert_eq!(result.r_wins, 100, "exact zero margin goes to R");
}

/// Same stream, same inputs → identical distribution. Different
/// streams are independent draws.
#[test]
fn reproducible_per_stream() {
    let a = simulate_race(1.5, RMSE, 5000, &mut rng(1234));
    let b = simulate_race(1.5, RMSE, 5000, &mut rng(1234));
    assert_eq!(a, b);

    let c = simulate_race(1.5, RMSE, 5000, &mut SimRng::new(1234, 2));
    assert_ne!(a.avg_margin, c.avg_margin, "distinct streams should not replay each other");
}
