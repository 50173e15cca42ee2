use forecast_core::config::{ModelConfig, OpenSeatEntry, OpenSeatTable};
use forecast_core::district::DistrictRecord;
use forecast_core::error::ForecastError;
use forecast_core::forecast::run_forecast;
use forecast_core::rating::RaceRating;
use forecast_core::types::Party;
use std::collections::HashSet;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn record(id: &str, lean: Option<&str>, party: Party, war: Option<f64>) -> DistrictRecord {
    DistrictRecord::from_source(
        id.into(),
        format!("Rep {id}"),
        party,
        lean.map(String::from),
        war,
        None,
    )
}

fn mixed_records() -> Vec<DistrictRecord> {
    vec![
        record("ST-01", Some("D+20"), Party::D, Some(0.5)),
        record("ST-02", Some("R+20"), Party::R, Some(-0.2)),
        record("ST-03", Some("D+1"), Party::R, None),
        record("ST-04", Some("R+1"), Party::D, Some(0.0)),
        record("ST-05", Some("EVEN"), Party::R, Some(2.0)),
        record("ST-06", None, Party::D, None),
        record("ST-07", Some("not-a-lean"), Party::R, Some(-1.0)),
    ]
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Every input record yields exactly one output row — none dropped,
/// none duplicated, whatever the data quality.
#[test]
fn row_conservation() {
    let run = run_forecast(&mixed_records(), 0.0, 200, &ModelConfig::default(), 1).unwrap();
    assert_eq!(run.forecasts.len(), 7);
    let ids: HashSet<&str> = run.forecasts.iter().map(|f| f.district_id.as_str()).collect();
    assert_eq!(ids.len(), 7);
}

/// Primary presentation order: ascending absolute predicted margin.
#[test]
fn sorted_most_competitive_first() {
    let run = run_forecast(&mixed_records(), 0.0, 200, &ModelConfig::default(), 1).unwrap();
    for pair in run.forecasts.windows(2) {
        assert!(
            pair[0].predicted_margin.abs() <= pair[1].predicted_margin.abs(),
            "table not sorted by |margin|: {} then {}",
            pair[0].predicted_margin,
            pair[1].predicted_margin
        );
    }
}

/// The top-K view ranks by |d_win_pct − 50| ascending.
#[test]
fn top_k_by_win_probability() {
    let run = run_forecast(&mixed_records(), 0.0, 2000, &ModelConfig::default(), 1).unwrap();
    let top = run.most_competitive(3);
    assert_eq!(top.len(), 3);
    for pair in top.windows(2) {
        assert!(pair[0].competitiveness() <= pair[1].competitiveness());
    }
    // K larger than the field returns the whole field.
    assert_eq!(run.most_competitive(100).len(), 7);
}

/// Seat totals by predicted winner always cover the whole field, and
/// flip counts match the per-row flags.
#[test]
fn aggregates_are_consistent() {
    let run = run_forecast(&mixed_records(), 0.0, 500, &ModelConfig::default(), 3).unwrap();
    assert_eq!(run.d_seats + run.r_seats, 7);

    let flips = run.forecasts.iter().filter(|f| f.is_flip).count() as u32;
    assert_eq!(run.flips_to_d + run.flips_to_r, flips);
    assert_eq!(run.flips_to_d, run.flips_to(Party::D).len() as u32);
    assert_eq!(run.flips_to_r, run.flips_to(Party::R).len() as u32);

    let rating_total: u32 = run.rating_counts.iter().map(|(_, n)| n).sum();
    assert_eq!(rating_total, 7);
}

/// A heavy D lean with a neutral environment is a predicted D win,
/// rated safe; the mirror district mirrors.
#[test]
fn lopsided_districts_rate_safe() {
    let run = run_forecast(&mixed_records(), 0.0, 2000, &ModelConfig::default(), 5).unwrap();
    let by_id = |id: &str| run.forecasts.iter().find(|f| f.district_id == id).unwrap();

    let d20 = by_id("ST-01");
    assert_eq!(d20.predicted_winner, Party::D);
    assert_eq!(d20.rating, RaceRating::SafeD);
    assert!(!d20.is_flip);

    let r20 = by_id("ST-02");
    assert_eq!(r20.predicted_winner, Party::R);
    assert_eq!(r20.rating, RaceRating::SafeR);
}

/// Open seats forecast with performance forced to 0.0 even when the
/// source carried a WAR value for the departing incumbent.
#[test]
fn open_seat_forces_neutral_performance() {
    let open = DistrictRecord::from_source(
        "ST-08".into(),
        "Departing Rep".into(),
        Party::R,
        Some("R+2".into()),
        Some(3.5),
        Some("Retiring".into()),
    );
    assert!(open.is_open_seat);
    assert_eq!(open.incumbent_performance, 0.0);

    let run = run_forecast(&[open], 0.0, 200, &ModelConfig::default(), 1).unwrap();
    let row = &run.forecasts[0];
    assert_eq!(row.incumbent_performance, 0.0);
    assert_eq!(row.open_seat_reason.as_deref(), Some("Retiring"));

    // Identical district with the WAR applied gets a different margin.
    let held = record("ST-09", Some("R+2"), Party::R, Some(3.5));
    let run_held = run_forecast(&[held], 0.0, 200, &ModelConfig::default(), 1).unwrap();
    assert_ne!(row.predicted_margin, run_held.forecasts[0].predicted_margin);
}

/// The injected open-seat table resolves districts independently of
/// forecast logic.
#[test]
fn open_seat_table_lookup() {
    let table = OpenSeatTable::from_entries(vec![OpenSeatEntry {
        district_id: "NY-21".into(),
        incumbent: "Elise Stefanik".into(),
        party: Party::R,
        reason: "Retiring".into(),
    }]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.get("NY-21").unwrap().reason, "Retiring");
    assert!(table.get("CA-11").is_none());
}

/// A zero trial count is rejected before any computation.
#[test]
fn zero_trials_is_invalid_configuration() {
    let err = run_forecast(&mixed_records(), 0.0, 0, &ModelConfig::default(), 1).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidConfiguration(_)));
}

/// The chamber summary is computed over the same field of margins.
#[test]
fn chamber_summary_covers_the_field() {
    let run = run_forecast(&mixed_records(), 0.0, 300, &ModelConfig::default(), 8).unwrap();
    assert_eq!(run.chamber.trials(), 300);
    assert_eq!(run.chamber.chamber_size, 7);
    assert!(run.chamber.d_seat_counts.iter().all(|&c| c <= 7));
}
