//! Partisan-lean string parsing.

/// Convert a lean string ("D+5", "R+10", "EVEN") to the signed numeric
/// scale: positive favors D, negative favors R, zero is neutral.
///
/// Missing values and "EVEN" map to 0.0. Any unrecognized string also
/// maps to 0.0 — a bad lean never fails a run, it only degrades that
/// district to neutral (logged for audit).
pub fn parse_lean(raw: Option<&str>) -> f64 {
    let s = match raw {
        Some(s) => s.trim(),
        None => return 0.0,
    };
    if s.is_empty() || s == "EVEN" {
        return 0.0;
    }
    let parsed = if let Some(n) = s.strip_prefix("D+") {
        n.parse::<f64>().ok()
    } else if let Some(n) = s.strip_prefix("R+") {
        n.parse::<f64>().ok().map(|v| -v)
    } else {
        None
    };
    match parsed {
        Some(v) => v,
        None => {
            log::warn!("Unrecognized lean string '{s}'; treating as EVEN");
            0.0
        }
    }
}
