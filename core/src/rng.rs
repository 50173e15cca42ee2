//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through SimRng instances derived from the
//! single master seed supplied to the forecast run.
//!
//! Each simulation unit gets its own RNG stream, seeded
//! deterministically from (master_seed XOR stream_index). This means:
//!   - Every race's per-district simulation is reproducible in isolation.
//!   - The whole-chamber simulation draws from its own stream, so its
//!     trials are statistically independent of the per-race trials.

use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single simulation unit.
pub struct SimRng {
    inner: Pcg64Mcg,
}

impl SimRng {
    /// Create a stream RNG from the master seed and a stable stream
    /// index. The index assignment must never change once published.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        use rand::RngCore;
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        use rand::RngCore;
        self.inner.next_u64()
    }

    /// Sample from a normal distribution with the given mean and
    /// standard deviation (Box–Muller over two uniform draws).
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-12);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos();
        mean + std_dev * z
    }
}

/// All stream RNGs for a single run, handed out by stable slot.
pub struct RngBank {
    master_seed: u64,
}

/// Stable stream index assignments.
/// NEVER reassign — reindexing changes every stream's seed.
/// Index 0 is the chamber simulation; race streams start at 1,
/// one per district in input order.
const CHAMBER_STREAM: u64 = 0;
const RACE_STREAM_BASE: u64 = 1;

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// RNG stream for the whole-chamber seat simulation.
    pub fn for_chamber(&self) -> SimRng {
        SimRng::new(self.master_seed, CHAMBER_STREAM)
    }

    /// RNG stream for the per-race simulation of the district at
    /// `race_index` (position in the input record set).
    pub fn for_race(&self, race_index: usize) -> SimRng {
        SimRng::new(self.master_seed, RACE_STREAM_BASE + race_index as u64)
    }
}
