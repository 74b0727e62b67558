use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{ConfigError, MathError};
use crate::random::{Engine, MersenneTwister, MultiplyWithCarry, RandomCore};

/// Which engine a [`RandomConfig`] builds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineKind {
    #[default]
    MersenneTwister,
    MultiplyWithCarry,
}

/// How the engine is seeded.
///
/// - `Single(s)`: MT uses the low 32 bits; MWC splits it into
///   `(low 32 bits, high 32 bits)` registers.
/// - `Array(key)`: MT key array. Not valid for MWC.
/// - `Pair(a, b)`: MWC registers. Not valid for MT.
/// - `SystemTime`: wall clock at build time. Not reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeedSource {
    #[default]
    Default,
    Single(u64),
    Array(Vec<u32>),
    Pair(u32, u32),
    SystemTime,
}

/// Engine selection and seeding, stored as RON:
///
/// ```ron
/// (engine: MersenneTwister, seed: Array([0x123, 0x234, 0x345, 0x456]), warmup: 0)
/// ```
///
/// Missing fields take their defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub engine: EngineKind,
    pub seed: SeedSource,
    /// Raw draws discarded right after seeding.
    pub warmup: u64,
}

impl RandomConfig {
    pub fn from_ron_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(contents)?)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Builds and seeds the configured engine, then runs the warmup.
    ///
    /// # Errors
    ///
    /// [`MathError::InvalidArgument`] when the seed source does not fit the
    /// engine (`Pair` for MT, `Array` for MWC) or the key array is empty.
    pub fn build(&self) -> Result<Engine, MathError> {
        let mut engine: Engine = match (self.engine, &self.seed) {
            (EngineKind::MersenneTwister, SeedSource::Default) => {
                MersenneTwister::default().into()
            }
            (EngineKind::MersenneTwister, SeedSource::Single(seed)) => {
                MersenneTwister::new(*seed).into()
            }
            (EngineKind::MersenneTwister, SeedSource::Array(key)) => {
                MersenneTwister::from_array(key)?.into()
            }
            (EngineKind::MersenneTwister, SeedSource::SystemTime) => {
                MersenneTwister::new(unix_nanos()).into()
            }
            (EngineKind::MultiplyWithCarry, SeedSource::Default) => {
                MultiplyWithCarry::default().into()
            }
            (EngineKind::MultiplyWithCarry, SeedSource::Single(seed)) => {
                MultiplyWithCarry::new(*seed as u32, (*seed >> 32) as u32).into()
            }
            (EngineKind::MultiplyWithCarry, SeedSource::Pair(a, b)) => {
                MultiplyWithCarry::new(*a, *b).into()
            }
            (EngineKind::MultiplyWithCarry, SeedSource::SystemTime) => {
                MultiplyWithCarry::from_time().into()
            }
            (EngineKind::MersenneTwister, SeedSource::Pair(..)) => {
                return Err(MathError::invalid(
                    "seed",
                    "MersenneTwister cannot be seeded from a register pair",
                ));
            }
            (EngineKind::MultiplyWithCarry, SeedSource::Array(_)) => {
                return Err(MathError::invalid(
                    "seed",
                    "MultiplyWithCarry cannot be seeded from a key array",
                ));
            }
        };
        engine.advance(self.warmup);
        Ok(engine)
    }
}

fn unix_nanos() -> u64 {
    let now = Utc::now();
    (now.timestamp() as u64)
        .wrapping_mul(1_000_000_000)
        .wrapping_add(u64::from(now.timestamp_subsec_nanos()))
}

/// Loads a [`RandomConfig`] from `path`, falling back to the default
/// configuration if the file is missing or malformed.
pub fn load_random_config(path: impl AsRef<Path>) -> RandomConfig {
    let path = path.as_ref();
    match RandomConfig::from_file(path) {
        Ok(config) => {
            info!("Loaded random config from {}", path.display());
            config
        }
        Err(e) => {
            error!("Failed to load random config from {}: {}", path.display(), e);
            error!("Using default RandomConfig");
            RandomConfig::default()
        }
    }
}
