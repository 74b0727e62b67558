use serde::{Deserialize, Serialize};
use tracing::debug;

use super::RandomCore;
use crate::error::MathError;

const N: usize = 624;
const M: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

/// Seed used by [`MersenneTwister::default`], matching the reference code.
pub const DEFAULT_SEED: u32 = 5489;

/// MT19937 Mersenne Twister with a 624-word state.
///
/// Output is bit-identical to the 2002 reference implementation by Matsumoto
/// and Nishimura for both `init_genrand` and `init_by_array` seeding.
///
/// # Example
///
/// ```rust
/// use lockstep_math::random::{MersenneTwister, RandomCore};
///
/// let mut rng = MersenneTwister::default();
/// assert_eq!(rng.next_raw_u32(), 3499211612);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MersenneTwisterState", into = "MersenneTwisterState")]
pub struct MersenneTwister {
    state: Box<[u32; N]>,
    /// Next word to temper; `N` means the block is exhausted.
    index: usize,
}

impl MersenneTwister {
    /// Seeds from the low 32 bits of `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: Box::new([0; N]), index: N };
        rng.reseed(seed);
        rng
    }

    /// Seeds from a key array.
    ///
    /// # Errors
    ///
    /// [`MathError::InvalidArgument`] if `key` is empty.
    pub fn from_array(key: &[u32]) -> Result<Self, MathError> {
        let mut rng = Self { state: Box::new([0; N]), index: N };
        rng.reseed_with_array(key)?;
        Ok(rng)
    }

    /// Re-initialises the state from the low 32 bits of `seed`.
    pub fn reseed(&mut self, seed: u64) {
        debug!("Seeding MersenneTwister with {}", seed as u32);
        self.init_genrand(seed as u32);
    }

    /// Re-initialises the state from a key array.
    ///
    /// # Errors
    ///
    /// [`MathError::InvalidArgument`] if `key` is empty; the state is left
    /// untouched in that case.
    pub fn reseed_with_array(&mut self, key: &[u32]) -> Result<(), MathError> {
        if key.is_empty() {
            return Err(MathError::invalid("key", "seed array must not be empty"));
        }
        debug!("Seeding MersenneTwister with a {}-word key", key.len());
        self.init_by_array(key);
        Ok(())
    }

    fn init_genrand(&mut self, seed: u32) {
        let mt = &mut self.state;
        mt[0] = seed;
        for i in 1..N {
            let prev = mt[i - 1];
            mt[i] = 1_812_433_253u32.wrapping_mul(prev ^ (prev >> 30)).wrapping_add(i as u32);
        }
        self.index = N;
    }

    fn init_by_array(&mut self, key: &[u32]) {
        self.init_genrand(19_650_218);
        let mt = &mut self.state;
        let mut i = 1;
        let mut j = 0;
        for _ in 0..N.max(key.len()) {
            let prev = mt[i - 1];
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..N - 1 {
            let prev = mt[i - 1];
            mt[i] = (mt[i] ^ (prev ^ (prev >> 30)).wrapping_mul(1_566_083_941))
                .wrapping_sub(i as u32);
            i += 1;
            if i >= N {
                mt[0] = mt[N - 1];
                i = 1;
            }
        }
        mt[0] = UPPER_MASK;
        self.index = N;
    }

    /// Regenerates all `N` words.
    fn twist(&mut self) {
        let mt = &mut self.state;
        for k in 0..N {
            let y = (mt[k] & UPPER_MASK) | (mt[(k + 1) % N] & LOWER_MASK);
            let mag = if y & 1 == 0 { 0 } else { MATRIX_A };
            mt[k] = mt[(k + M) % N] ^ (y >> 1) ^ mag;
        }
        self.index = 0;
    }
}

impl RandomCore for MersenneTwister {
    fn next_raw_u32(&mut self) -> u32 {
        if self.index >= N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9D2C_5680;
        y ^= (y << 15) & 0xEFC6_0000;
        y ^ (y >> 18)
    }
}

impl Default for MersenneTwister {
    fn default() -> Self {
        Self::new(u64::from(DEFAULT_SEED))
    }
}

impl std::fmt::Debug for MersenneTwister {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MersenneTwister").field("index", &self.index).finish_non_exhaustive()
    }
}

/// Serializable snapshot of a [`MersenneTwister`].
///
/// Deserializing validates the word count and index, so a corrupted save
/// cannot produce an engine that would index out of bounds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MersenneTwisterState {
    pub words: Vec<u32>,
    pub index: usize,
}

impl From<MersenneTwister> for MersenneTwisterState {
    fn from(rng: MersenneTwister) -> Self {
        Self { words: rng.state.to_vec(), index: rng.index }
    }
}

impl TryFrom<MersenneTwisterState> for MersenneTwister {
    type Error = MathError;

    fn try_from(snapshot: MersenneTwisterState) -> Result<Self, MathError> {
        let count = snapshot.words.len();
        let state: Box<[u32; N]> = snapshot
            .words
            .into_boxed_slice()
            .try_into()
            .map_err(|_| {
                MathError::invalid("words", format!("expected {N} state words, found {count}"))
            })?;
        if snapshot.index > N {
            return Err(MathError::invalid("index", format!("{} exceeds {N}", snapshot.index)));
        }
        Ok(Self { state, index: snapshot.index })
    }
}

impl rand::RngCore for MersenneTwister {
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

impl rand::SeedableRng for MersenneTwister {
    /// Little-endian 32-bit `init_genrand` seed.
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from(u32::from_le_bytes(seed)))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
