//! forecast-core: the electoral forecasting engine.
//!
//! Pipeline: district records → lean parsing → fitted linear model →
//! per-race Monte Carlo → rating classification → whole-chamber seat
//! simulation. All randomness flows through seeded streams (rng.rs),
//! so a run with a fixed seed is fully reproducible.

pub mod chamber;
pub mod config;
pub mod district;
pub mod error;
pub mod forecast;
pub mod lean;
pub mod model;
pub mod rating;
pub mod rng;
pub mod simulate;
pub mod stats;
pub mod types;
