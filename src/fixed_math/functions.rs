//! Elementary and transcendental functions over [`FixedPoint`].
//!
//! `sin` and `cos` are computed natively in fixed point: the argument is
//! folded into `[0, π/4]` using symmetry and periodicity, then a six-term
//! nested Taylor polynomial is evaluated innermost-first with fixed-point
//! multiplication and division. The inverse trigonometric functions, `sqrt`
//! and the logarithms go through `f64` and back, so their precision is bounded
//! by that round trip. Results return to fixed point by rounding through `i64`
//! over the full `[MIN, MAX]` range.

use super::fixed_point::{div_raw, mul_raw, round_scaled, FixedPoint};
use super::precision::Precision;
use crate::error::MathError;

impl<P: Precision> FixedPoint<P> {
    pub const PI: Self = Self::from_raw(round_scaled(std::f64::consts::PI, P::SHIFT));
    pub const TWO_PI: Self = Self::from_raw(mul_raw(Self::PI.raw(), 2 << P::SHIFT, P::SHIFT));
    pub const PI_OVER_180: Self =
        Self::from_raw(div_raw(Self::PI.raw(), 180 << P::SHIFT, P::SHIFT));
    pub const HALF_PI: Self = Self::from_raw(div_raw(Self::PI.raw(), 2 << P::SHIFT, P::SHIFT));
    pub const QUARTER_PI: Self = Self::from_raw(div_raw(Self::PI.raw(), 4 << P::SHIFT, P::SHIFT));
    pub const E: Self = Self::from_raw(round_scaled(std::f64::consts::E, P::SHIFT));
}

fn int<P: Precision>(value: i64) -> FixedPoint<P> {
    FixedPoint::from_int(value)
}

/// Folds `x > π` back into `(0, π]` by whole half turns.
///
/// Subtracting `k·π` at once gives the same raw bits as subtracting `π`
/// `k` times; the flag reports whether `k` is odd (the result changes sign).
fn reduce_half_turns<P: Precision>(x: FixedPoint<P>) -> (FixedPoint<P>, bool) {
    let pi = FixedPoint::<P>::PI.raw();
    if x.raw() <= pi {
        return (x, false);
    }
    let turns = (x.raw() - 1) / pi;
    (FixedPoint::from_raw(x.raw() - turns * pi), turns % 2 == 1)
}

pub fn sin<P: Precision>(x: FixedPoint<P>) -> FixedPoint<P> {
    let zero = FixedPoint::<P>::ZERO;
    if x == zero {
        return zero;
    }
    if x < zero {
        if x == FixedPoint::<P>::MIN {
            // MIN has no positive counterpart.
            return -sin(x + FixedPoint::<P>::PI);
        }
        return -sin(-x);
    }

    let (x, flipped) = reduce_half_turns(x);
    if flipped {
        return -sin(x);
    }
    if x > FixedPoint::<P>::QUARTER_PI {
        return cos(FixedPoint::<P>::HALF_PI - x);
    }

    let one = FixedPoint::<P>::ONE;
    let x2 = x * x;
    let inner = x2 / int(72) * (x2 / int(110) * (x2 / int(156) - one) + one) - one;
    x * (x2 / int(6) * (x2 / int(20) * (x2 / int(42) * inner + one) - one) + one)
}

pub fn cos<P: Precision>(x: FixedPoint<P>) -> FixedPoint<P> {
    let zero = FixedPoint::<P>::ZERO;
    let one = FixedPoint::<P>::ONE;
    if x == zero {
        return one;
    }
    if x < zero {
        if x == FixedPoint::<P>::MIN {
            return -cos(x + FixedPoint::<P>::PI);
        }
        return cos(-x);
    }

    let (x, flipped) = reduce_half_turns(x);
    if flipped {
        return -cos(x);
    }
    if x > FixedPoint::<P>::QUARTER_PI {
        return sin(FixedPoint::<P>::HALF_PI - x);
    }

    let x2 = x * x;
    let inner = x2 / int(56) * (x2 / int(90) * (x2 / int(132) - one) + one) - one;
    x2 / int(2) * (x2 / int(12) * (x2 / int(30) * inner + one) - one) + one
}

/// # Errors
///
/// [`MathError::DivideByZero`] where `cos(x)` is exactly zero (for example at
/// `HALF_PI`).
pub fn tan<P: Precision>(x: FixedPoint<P>) -> Result<FixedPoint<P>, MathError> {
    sin(x).try_div(cos(x))
}

pub fn asin<P: Precision>(x: FixedPoint<P>) -> Result<FixedPoint<P>, MathError> {
    FixedPoint::from_f64_rounded(x.to_f64().asin())
}

pub fn acos<P: Precision>(x: FixedPoint<P>) -> Result<FixedPoint<P>, MathError> {
    FixedPoint::from_f64_rounded(x.to_f64().acos())
}

pub fn atan<P: Precision>(x: FixedPoint<P>) -> Result<FixedPoint<P>, MathError> {
    FixedPoint::from_f64_rounded(x.to_f64().atan())
}

pub fn atan2<P: Precision>(
    y: FixedPoint<P>,
    x: FixedPoint<P>,
) -> Result<FixedPoint<P>, MathError> {
    FixedPoint::from_f64_rounded(y.to_f64().atan2(x.to_f64()))
}

/// # Errors
///
/// [`MathError::Domain`] for negative input.
pub fn sqrt<P: Precision>(x: FixedPoint<P>) -> Result<FixedPoint<P>, MathError> {
    if x.is_negative() {
        return Err(MathError::Domain { function: "sqrt", value: x.to_f64() });
    }
    FixedPoint::from_f64_rounded(x.to_f64().sqrt())
}

/// Raises `x` to an integer power with `|exponent|` successive
/// multiplications. Every step rounds, so error grows with the exponent.
///
/// # Errors
///
/// [`MathError::DivideByZero`] for a negative exponent when the positive
/// power is zero.
pub fn pow<P: Precision>(x: FixedPoint<P>, exponent: i32) -> Result<FixedPoint<P>, MathError> {
    let one = FixedPoint::<P>::ONE;
    if exponent == 0 {
        return Ok(one);
    }
    let mut result = one;
    for _ in 0..exponent.unsigned_abs() {
        result = result * x;
    }
    if exponent < 0 {
        one.try_div(result)
    } else {
        Ok(result)
    }
}

pub fn abs<P: Precision>(x: FixedPoint<P>) -> FixedPoint<P> {
    if x.is_negative() {
        x.negate()
    } else {
        x
    }
}

/// Logarithm of `x` in an integer base.
pub fn log<P: Precision>(x: FixedPoint<P>, base: i32) -> Result<FixedPoint<P>, MathError> {
    FixedPoint::from_f64_rounded(x.to_f64().log(f64::from(base)))
}

/// Natural logarithm.
pub fn ln<P: Precision>(x: FixedPoint<P>) -> Result<FixedPoint<P>, MathError> {
    FixedPoint::from_f64_rounded(x.to_f64().ln())
}

pub fn log10<P: Precision>(x: FixedPoint<P>) -> Result<FixedPoint<P>, MathError> {
    FixedPoint::from_f64_rounded(x.to_f64().log10())
}

fn decimal_factor<P: Precision>(decimals: i32) -> f64 {
    10f64.powi(decimals.clamp(0, P::DIGITS as i32))
}

/// Rounds half away from zero to `decimals` places, clamped to `[0, P::DIGITS]`.
pub fn round<P: Precision>(x: FixedPoint<P>, decimals: i32) -> Result<FixedPoint<P>, MathError> {
    let factor = decimal_factor::<P>(decimals);
    FixedPoint::from_f64_rounded((x.to_f64() * factor).round() / factor)
}

pub fn ceiling<P: Precision>(x: FixedPoint<P>, decimals: i32) -> Result<FixedPoint<P>, MathError> {
    let factor = decimal_factor::<P>(decimals);
    FixedPoint::from_f64_rounded((x.to_f64() * factor).ceil() / factor)
}

pub fn floor<P: Precision>(x: FixedPoint<P>, decimals: i32) -> Result<FixedPoint<P>, MathError> {
    let factor = decimal_factor::<P>(decimals);
    FixedPoint::from_f64_rounded((x.to_f64() * factor).floor() / factor)
}

pub fn clamp<P: Precision>(
    x: FixedPoint<P>,
    min: FixedPoint<P>,
    max: FixedPoint<P>,
) -> FixedPoint<P> {
    if x > max {
        max
    } else if x < min {
        min
    } else {
        x
    }
}
