//! Input data loading for the forecast runner.
//!
//! Two simple CSV sources: the district file (id, incumbent, party,
//! lean string) and the incumbent-performance (WAR) file (year, id,
//! value). Malformed rows are logged and skipped; missing values
//! degrade to documented defaults inside the core.

use anyhow::{Context, Result};
use forecast_core::config::OpenSeatTable;
use forecast_core::district::DistrictRecord;
use forecast_core::types::{DistrictId, Party};
use std::collections::HashMap;

/// Split one CSV line into trimmed fields, honoring double quotes
/// around a field (names and reasons never contain quotes themselves).
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn read_lines(path: &str) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path).with_context(|| format!("Cannot read {path}"))?;
    // Spreadsheet exports often carry a UTF-8 BOM.
    let content = content.trim_start_matches('\u{feff}');
    Ok(content.lines().map(String::from).collect())
}

/// Load the WAR file: header `year,district_id,war`, one row per
/// district per cycle. Only the most recent year present is used.
pub fn load_war(path: &str) -> Result<HashMap<DistrictId, f64>> {
    let lines = read_lines(path)?;
    let mut rows: Vec<(u32, DistrictId, f64)> = Vec::new();

    for (number, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if fields.len() < 3 {
            log::warn!("{path}:{}: expected 3 fields, got {}; skipping", number + 1, fields.len());
            continue;
        }
        let year = match fields[0].parse::<u32>() {
            Ok(y) => y,
            Err(_) => {
                log::warn!("{path}:{}: bad year '{}'; skipping", number + 1, fields[0]);
                continue;
            }
        };
        let value = match fields[2].parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                log::warn!("{path}:{}: bad WAR value '{}'; skipping", number + 1, fields[2]);
                continue;
            }
        };
        rows.push((year, fields[1].clone(), value));
    }

    let latest = rows.iter().map(|(y, _, _)| *y).max().unwrap_or(0);
    let war: HashMap<DistrictId, f64> = rows
        .into_iter()
        .filter(|(y, _, _)| *y == latest)
        .map(|(_, id, v)| (id, v))
        .collect();
    log::info!("Loaded {} WAR values from {} (year {latest})", war.len(), path);
    Ok(war)
}

/// Load the district file: header `district_id,incumbent,party,pvi`.
/// WAR values and open-seat status are joined in here, so the core
/// receives fully assembled records.
pub fn load_districts(
    path: &str,
    war: &HashMap<DistrictId, f64>,
    open_seats: &OpenSeatTable,
) -> Result<Vec<DistrictRecord>> {
    let lines = read_lines(path)?;
    let mut records = Vec::new();

    for (number, line) in lines.iter().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_csv_line(line);
        if fields.len() < 4 {
            log::warn!("{path}:{}: expected 4 fields, got {}; skipping", number + 1, fields.len());
            continue;
        }
        let party = match fields[2].parse::<Party>() {
            Ok(p) => p,
            Err(e) => {
                log::warn!("{path}:{}: {e}; skipping", number + 1);
                continue;
            }
        };
        let district_id = fields[0].clone();
        let lean_raw = if fields[3].is_empty() {
            None
        } else {
            Some(fields[3].clone())
        };
        let reason = open_seats.get(&district_id).map(|e| e.reason.clone());
        records.push(DistrictRecord::from_source(
            district_id.clone(),
            fields[1].clone(),
            party,
            lean_raw,
            war.get(&district_id).copied(),
            reason,
        ));
    }

    log::info!("Loaded {} districts from {path}", records.len());
    Ok(records)
}
