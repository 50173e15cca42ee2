//! Shared primitive types used across the entire forecast engine.

use serde::{Deserialize, Serialize};

/// A stable, unique district identifier, e.g. "NY-21" or "WY-AL".
pub type DistrictId = String;

/// Major party. Margins are expressed from D's perspective:
/// positive favors D, negative favors R.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Party {
    D,
    R,
}

impl Party {
    pub fn opponent(&self) -> Party {
        match self {
            Party::D => Party::R,
            Party::R => Party::D,
        }
    }

    /// Winner of a margin under the engine-wide sign convention:
    /// margin > 0 is a D win, anything else (including exactly 0) is R.
    pub fn from_margin(margin: f64) -> Party {
        if margin > 0.0 {
            Party::D
        } else {
            Party::R
        }
    }

    pub fn letter(&self) -> &'static str {
        match self {
            Party::D => "D",
            Party::R => "R",
        }
    }
}

impl std::str::FromStr for Party {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "D" => Ok(Party::D),
            "R" => Ok(Party::R),
            other => Err(format!("unknown party '{other}'")),
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.letter())
    }
}
