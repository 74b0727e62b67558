use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::RandomCore;

/// Marsaglia's default register values.
pub const DEFAULT_STATE_A: u32 = 521_288_629;
pub const DEFAULT_STATE_B: u32 = 362_436_069;

/// 100 ns ticks between 1601-01-01 and the Unix epoch.
const FILETIME_UNIX_EPOCH: i64 = 116_444_736_000_000_000;

/// Two-register multiply-with-carry generator (George Marsaglia).
///
/// Each step updates both 32-bit registers independently and combines them
/// into one output word. A register must never be zero, so zero seeds are
/// replaced by the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MultiplyWithCarry {
    state_a: u32,
    state_b: u32,
}

impl MultiplyWithCarry {
    pub fn new(state_a: u32, state_b: u32) -> Self {
        let mut rng = Self { state_a: DEFAULT_STATE_A, state_b: DEFAULT_STATE_B };
        rng.reseed(state_a, state_b);
        rng
    }

    /// Seeds from the current wall-clock time.
    pub fn from_time() -> Self {
        let mut rng = Self::default();
        rng.reseed_from_time();
        rng
    }

    /// Replaces both registers. A zero register falls back to its default.
    pub fn reseed(&mut self, state_a: u32, state_b: u32) {
        if state_a == 0 || state_b == 0 {
            warn!(
                "MultiplyWithCarry seed ({}, {}) has a zero register, substituting defaults",
                state_a, state_b
            );
        }
        self.state_a = if state_a == 0 { DEFAULT_STATE_A } else { state_a };
        self.state_b = if state_b == 0 { DEFAULT_STATE_B } else { state_b };
        debug!("Seeded MultiplyWithCarry with ({}, {})", self.state_a, self.state_b);
    }

    /// Reseeds from the wall clock, read as Windows FILETIME ticks.
    ///
    /// The ticks are split into `(ticks >> 16, ticks mod 2^32)`, so two calls
    /// inside the same 100 ns tick produce the same stream.
    pub fn reseed_from_time(&mut self) {
        let now = Utc::now();
        let ticks = now.timestamp() * 10_000_000
            + i64::from(now.timestamp_subsec_nanos() / 100)
            + FILETIME_UNIX_EPOCH;
        self.reseed((ticks >> 16) as u32, ticks.rem_euclid(1 << 32) as u32);
    }

    /// Current `(state_a, state_b)` registers.
    pub fn state(&self) -> (u32, u32) {
        (self.state_a, self.state_b)
    }
}

impl Default for MultiplyWithCarry {
    fn default() -> Self {
        Self { state_a: DEFAULT_STATE_A, state_b: DEFAULT_STATE_B }
    }
}

impl RandomCore for MultiplyWithCarry {
    fn next_raw_u32(&mut self) -> u32 {
        self.state_b =
            36969u32.wrapping_mul(self.state_b & 0xFFFF).wrapping_add(self.state_b >> 16);
        self.state_a =
            18000u32.wrapping_mul(self.state_a & 0xFFFF).wrapping_add(self.state_a >> 16);
        (self.state_b << 16).wrapping_add(self.state_a)
    }
}

impl rand::RngCore for MultiplyWithCarry {
    fn next_u32(&mut self) -> u32 {
        self.next_raw_u32()
    }

    fn next_u64(&mut self) -> u64 {
        rand::rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand::rand_core::impls::fill_bytes_via_next(self, dest)
    }
}

impl rand::SeedableRng for MultiplyWithCarry {
    /// `state_a` then `state_b`, little-endian.
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let [a0, a1, a2, a3, b0, b1, b2, b3] = seed;
        Self::new(u32::from_le_bytes([a0, a1, a2, a3]), u32::from_le_bytes([b0, b1, b2, b3]))
    }
}
