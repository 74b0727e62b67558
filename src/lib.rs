//! Deterministic numerics for lockstep simulations.
//!
//! - [`fixed_math`]: binary-scaled fixed-point numbers (`Fixed4`, `Fixed6`)
//!   and a function library whose results do not depend on the host FPU.
//! - [`random`]: reproducible engines (MT19937, multiply-with-carry) and
//!   statistical distributions on top of them.
//! - [`config`]: RON configuration for choosing and seeding an engine.
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod config;
pub mod error;
pub mod fixed_math;
pub mod random;

pub use error::{ConfigError, MathError};
pub use fixed_math::{Fixed4, Fixed6, FixedPoint};
pub use random::{Engine, MersenneTwister, MultiplyWithCarry, RandomCore};
