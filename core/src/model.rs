//! The fitted district model: a fixed linear form over
//! (lean, incumbent performance, national environment).

use crate::config::Coefficients;

/// Predicted D margin for one district. Pure and total — every
/// combination of finite inputs yields a margin.
pub fn predict_margin(
    coefficients: &Coefficients,
    lean: f64,
    incumbent_performance: f64,
    environment: f64,
) -> f64 {
    coefficients.intercept
        + coefficients.lean_weight * lean
        + coefficients.incumbent_weight * incumbent_performance
        + coefficients.environment_weight * environment
}
