//! Reproducible pseudo-random number generation.
//!
//! Every engine implements [`RandomCore`], which needs a single raw 32-bit
//! draw and derives everything else from it: the open-interval uniform,
//! range draws for the primitive numeric types and fixed-point draws. The
//! statistical distributions in [`distributions`] are free functions generic
//! over any `RandomCore`.
//!
//! Two engines are provided:
//!
//! - [`MersenneTwister`]: MT19937, bit-compatible with the published
//!   reference implementation.
//! - [`MultiplyWithCarry`]: Marsaglia's two-register multiply-with-carry
//!   generator, small and fast.
//!
//! Engines are plain values. Two engines built from the same seed produce the
//! same stream on every platform, and nothing is shared between instances.
//!
//! ```rust
//! use lockstep_math::random::{distributions, MersenneTwister, RandomCore};
//!
//! let mut rng = MersenneTwister::new(42);
//! let roll: i32 = rng.next_in(1, 6);
//! assert!((1..=6).contains(&roll));
//! let sample = distributions::normal(&mut rng, 10.0, 2.0).unwrap();
//! assert!(sample.is_finite());
//! ```

pub use mersenne_twister::{MersenneTwister, MersenneTwisterState};
pub use multiply_with_carry::MultiplyWithCarry;

pub mod distributions;
mod mersenne_twister;
mod multiply_with_carry;

use crate::fixed_math::{FixedPoint, Precision};

/// `1 / (2^32 + 2)`: maps a raw draw into the open interval `(0, 1)`.
pub const UNIFORM_SCALE: f64 = 2.328306435454494e-10;

/// The contract every random engine fulfils.
///
/// Implementors supply [`next_raw_u32`](RandomCore::next_raw_u32); the
/// remaining methods are provided and must not be overridden in ways that
/// change the stream, since saved seeds are expected to replay identically.
pub trait RandomCore {
    /// Next raw 32-bit output of the engine. Advances the state by one step.
    fn next_raw_u32(&mut self) -> u32;

    /// Uniform sample strictly inside `(0, 1)`.
    fn uniform(&mut self) -> f64 {
        (f64::from(self.next_raw_u32()) + 1.0) * UNIFORM_SCALE
    }

    /// Draws a value between `min` and `max` (both reachable).
    ///
    /// The value is `uniform * (max - min) + min` evaluated in `f64`, then
    /// rounded half away from zero and saturated into `T`. The endpoints get
    /// half the weight of interior integers.
    fn next_in<T: RangeSample>(&mut self, min: T, max: T) -> T
    where
        Self: Sized,
    {
        T::from_unit(self.uniform(), min, max)
    }

    /// Draws across the whole range of `T`.
    fn next_full<T: RangeSample>(&mut self) -> T
    where
        Self: Sized,
    {
        self.next_in(T::LOWEST, T::HIGHEST)
    }

    /// Fair boolean: `uniform() < 0.5`.
    fn next_bool(&mut self) -> bool {
        self.uniform() < 0.5
    }

    /// Fixed-point draw, `uniform * (max - min) + min` in fixed arithmetic.
    fn next_fixed<P: Precision>(
        &mut self,
        min: FixedPoint<P>,
        max: FixedPoint<P>,
    ) -> FixedPoint<P>
    where
        Self: Sized,
    {
        let scaled = self.uniform() * FixedPoint::<P>::ONE_RAW as f64;
        let unit = FixedPoint::<P>::from_raw(scaled.round() as i64);
        unit * (max - min) + min
    }

    /// Discards `steps` raw draws.
    fn advance(&mut self, steps: u64) {
        for _ in 0..steps {
            self.next_raw_u32();
        }
    }
}

impl<R: RandomCore + ?Sized> RandomCore for &mut R {
    fn next_raw_u32(&mut self) -> u32 {
        (**self).next_raw_u32()
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Primitive numeric types that [`RandomCore::next_in`] can produce.
pub trait RangeSample: sealed::Sealed + Copy {
    const LOWEST: Self;
    const HIGHEST: Self;

    /// Maps a unit sample in `(0, 1)` onto `[min, max]`.
    fn from_unit(unit: f64, min: Self, max: Self) -> Self;
}

macro_rules! impl_integer_sample {
    ($($int:ty),*) => {$(
        impl sealed::Sealed for $int {}

        impl RangeSample for $int {
            const LOWEST: Self = <$int>::MIN;
            const HIGHEST: Self = <$int>::MAX;

            fn from_unit(unit: f64, min: Self, max: Self) -> Self {
                // `as` from f64 saturates at the type bounds.
                (unit * (max as f64 - min as f64) + min as f64).round() as $int
            }
        }
    )*};
}

impl_integer_sample!(i8, u8, i16, u16, i32, u32, i64, u64);

// Floats draw `u * (max - min) + min` with the span taken in the native type.
// A span that overflows to infinity interpolates as `(1 - u) * min + u * max`.
macro_rules! impl_float_sample {
    ($($float:ty),*) => {$(
        impl sealed::Sealed for $float {}

        impl RangeSample for $float {
            const LOWEST: Self = <$float>::MIN;
            const HIGHEST: Self = <$float>::MAX;

            fn from_unit(unit: f64, min: Self, max: Self) -> Self {
                let span = max - min;
                if span.is_finite() {
                    (unit * f64::from(span) + f64::from(min)) as $float
                } else {
                    ((1.0 - unit) * f64::from(min) + unit * f64::from(max)) as $float
                }
            }
        }
    )*};
}

impl_float_sample!(f32, f64);

/// One of the two engines, chosen at runtime (usually from a
/// [`RandomConfig`](crate::config::RandomConfig)).
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Engine {
    MersenneTwister(MersenneTwister),
    MultiplyWithCarry(MultiplyWithCarry),
}

impl RandomCore for Engine {
    fn next_raw_u32(&mut self) -> u32 {
        match self {
            Engine::MersenneTwister(rng) => rng.next_raw_u32(),
            Engine::MultiplyWithCarry(rng) => rng.next_raw_u32(),
        }
    }
}

impl From<MersenneTwister> for Engine {
    fn from(rng: MersenneTwister) -> Self {
        Engine::MersenneTwister(rng)
    }
}

impl From<MultiplyWithCarry> for Engine {
    fn from(rng: MultiplyWithCarry) -> Self {
        Engine::MultiplyWithCarry(rng)
    }
}

impl rand::RngCore for Engine {
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
