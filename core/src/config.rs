//! Run configuration: model coefficients and injected reference data.
//!
//! RULE: coefficients and the open-seat table are injected into the
//! orchestrator at startup, never read as ambient globals. Tests
//! substitute refitted coefficients without touching call sites.

use crate::error::{ForecastError, ForecastResult};
use crate::types::{DistrictId, Party};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fitted linear-model coefficients. The defaults are the values
/// calibrated on 2020–2024 House results (OLS, 1,157 contested races,
/// R² = 0.892); they are inputs to this engine, never re-estimated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coefficients {
    pub intercept: f64,
    pub lean_weight: f64,
    pub incumbent_weight: f64,
    pub environment_weight: f64,
}

impl Default for Coefficients {
    fn default() -> Self {
        Self {
            intercept: -0.2425,
            lean_weight: 1.0320,
            incumbent_weight: -0.5130,
            environment_weight: 0.1876,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub coefficients: Coefficients,
    /// Root-mean-square error of the fitted model; one standard
    /// deviation of simulation noise.
    #[serde(default = "default_rmse")]
    pub rmse: f64,
    /// Seats in the chamber being forecast.
    #[serde(default = "default_chamber_size")]
    pub chamber_size: u32,
    /// Trials per simulation when the caller does not specify one.
    #[serde(default = "default_trials")]
    pub default_trials: u32,
}

fn default_rmse() -> f64 {
    5.3522
}

fn default_chamber_size() -> u32 {
    435
}

fn default_trials() -> u32 {
    1000
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            coefficients: Coefficients::default(),
            rmse: default_rmse(),
            chamber_size: default_chamber_size(),
            default_trials: default_trials(),
        }
    }
}

impl ModelConfig {
    /// Load from `<data_dir>/model.json` if present; fall back to the
    /// calibrated defaults when the file does not exist.
    pub fn load(data_dir: &str) -> ForecastResult<Self> {
        let path = format!("{data_dir}/model.json");
        let config = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No {path}; using calibrated default coefficients");
                Self::default()
            }
            Err(e) => {
                return Err(ForecastError::Other(anyhow::anyhow!(
                    "Cannot read {path}: {e}"
                )))
            }
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ForecastResult<()> {
        if self.rmse < 0.0 {
            return Err(ForecastError::InvalidConfiguration(format!(
                "rmse must be non-negative, got {}",
                self.rmse
            )));
        }
        if self.chamber_size == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "chamber_size must be positive".into(),
            ));
        }
        if self.default_trials == 0 {
            return Err(ForecastError::InvalidConfiguration(
                "default_trials must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Seats needed for a majority: half the chamber, rounded up past
    /// the midpoint (218 of 435).
    pub fn majority_threshold(&self) -> u32 {
        self.chamber_size / 2 + 1
    }
}

/// One open seat: the departing incumbent and why the seat is open.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenSeatEntry {
    pub district_id: DistrictId,
    pub incumbent: String,
    pub party: Party,
    pub reason: String,
}

#[derive(Debug, Clone, Deserialize)]
struct OpenSeatFile {
    districts: Vec<OpenSeatEntry>,
}

/// Injected reference table of open seats (retirements, resignations,
/// vacancies), keyed by district. Districts in this table have no
/// incumbent to measure, so their performance value is forced to 0.0.
#[derive(Debug, Clone, Default)]
pub struct OpenSeatTable {
    entries: HashMap<DistrictId, OpenSeatEntry>,
}

impl OpenSeatTable {
    /// Load from `<data_dir>/open_seats_2026.json`. A missing file is
    /// an empty table (no open seats), not an error.
    pub fn load(data_dir: &str) -> ForecastResult<Self> {
        let path = format!("{data_dir}/open_seats_2026.json");
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("No open-seat table at {path}; treating every seat as held");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ForecastError::Other(anyhow::anyhow!(
                    "Cannot read {path}: {e}"
                )))
            }
        };
        let file: OpenSeatFile = serde_json::from_str(&content)?;
        Ok(Self::from_entries(file.districts))
    }

    pub fn from_entries(entries: Vec<OpenSeatEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|e| (e.district_id.clone(), e))
            .collect();
        Self { entries }
    }

    pub fn get(&self, district_id: &str) -> Option<&OpenSeatEntry> {
        self.entries.get(district_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
