use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Neg, Rem, Shl, Shr, Sub};
use std::str::FromStr;

use fixed::FixedI64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::precision::Precision;
use crate::error::MathError;

/// A binary-scaled fixed-point number.
///
/// The value is stored as a single `i64` (`raw`) representing `raw / 2^P::SHIFT`.
/// Instances are never mutated: every operator returns a new value.
///
/// # Arithmetic semantics
///
/// - `+` and `-` operate on the raw integers and wrap on overflow.
/// - `*` computes `(a.raw * b.raw) >> SHIFT` with a wrapping 64-bit product, so
///   operands whose raw product exceeds `i64` silently lose their high bits.
///   This is the precision ceiling of the format.
/// - `/` computes `(a.raw << SHIFT) / b.raw`; pre-shifting the numerator keeps
///   the fractional bits of the quotient.
/// - `%` is the truncating remainder of the raw integers.
/// - `<<` and `>>` shift the raw integer directly (a change of scale, not a
///   multiplication of the real value).
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint<P: Precision> {
    raw: i64,
    precision: PhantomData<P>,
}

/// Rounds half away from zero in a const context.
pub(crate) const fn round_scaled(value: f64, shift: u32) -> i64 {
    let scaled = value * (1i64 << shift) as f64;
    let truncated = scaled as i64;
    let fraction = scaled - truncated as f64;
    if fraction >= 0.5 {
        truncated + 1
    } else if fraction <= -0.5 {
        truncated - 1
    } else {
        truncated
    }
}

pub(crate) const fn mul_raw(lhs: i64, rhs: i64, shift: u32) -> i64 {
    lhs.wrapping_mul(rhs) >> shift
}

pub(crate) const fn div_raw(lhs: i64, rhs: i64, shift: u32) -> i64 {
    lhs.wrapping_shl(shift).wrapping_div(rhs)
}

impl<P: Precision> FixedPoint<P> {
    /// Raw representation of `1`.
    pub const ONE_RAW: i64 = 1 << P::SHIFT;

    pub const ZERO: Self = Self::from_raw(0);
    pub const ONE: Self = Self::from_int(1);
    pub const MAX: Self = Self::from_raw(i64::MAX);
    pub const MIN: Self = Self::from_raw(i64::MIN);

    /// Wraps raw bits verbatim.
    pub const fn from_raw(raw: i64) -> Self {
        Self { raw, precision: PhantomData }
    }

    /// Converts an integer by shifting it into place. Wraps on overflow.
    pub const fn from_int(value: i64) -> Self {
        Self::from_raw(value.wrapping_shl(P::SHIFT))
    }

    /// Converts a double, rounding half away from zero.
    ///
    /// Inputs within `i32` range are rounded through an `i32` intermediate
    /// (saturating), so for `Fixed4` values beyond ±524288 and `Fixed6` values
    /// beyond ±2048 the result clamps to the `i32` raw range. Inputs outside
    /// `i32` range but inside `[MIN, MAX]` are rounded through `i64`.
    ///
    /// # Errors
    ///
    /// [`MathError::Range`] if `value` is NaN or lies outside `[MIN, MAX]`.
    pub fn from_f64(value: f64) -> Result<Self, MathError> {
        Self::from_scaled(value, value * Self::ONE_RAW as f64)
    }

    /// Converts a float; the scaling multiplication happens in `f32`.
    ///
    /// # Errors
    ///
    /// [`MathError::Range`] if `value` is NaN or lies outside `[MIN, MAX]`.
    pub fn from_f32(value: f32) -> Result<Self, MathError> {
        Self::from_scaled(f64::from(value), f64::from(value * Self::ONE_RAW as f32))
    }

    fn from_scaled(value: f64, scaled: f64) -> Result<Self, MathError> {
        if value <= f64::from(i32::MAX) && value >= f64::from(i32::MIN) {
            Ok(Self::from_raw(i64::from(scaled.round() as i32)))
        } else if value <= Self::MAX.to_f64() && value >= Self::MIN.to_f64() {
            Ok(Self::from_raw(scaled.round() as i64))
        } else {
            Err(Self::range_error(value))
        }
    }

    /// Rounds `value * 2^SHIFT` half away from zero through `i64`, with no
    /// `i32` tier. Function results come back from `f64` this way.
    pub(crate) fn from_f64_rounded(value: f64) -> Result<Self, MathError> {
        if value <= Self::MAX.to_f64() && value >= Self::MIN.to_f64() {
            Ok(Self::from_raw((value * Self::ONE_RAW as f64).round() as i64))
        } else {
            Err(Self::range_error(value))
        }
    }

    fn range_error(value: f64) -> MathError {
        MathError::Range { value, min: Self::MIN.to_f64(), max: Self::MAX.to_f64() }
    }

    /// Combines a whole part with a fractional part counted in thousandths.
    ///
    /// A negative `thousandths` is treated as "no fractional part". The
    /// fraction is added to the raw value, so `from_int_parts(-3, 500)` is
    /// `-2.5`. The fraction is truncated to the raw grid, as a fixed-point
    /// division by `1000` would.
    pub fn from_int_parts(whole: i32, thousandths: i32) -> Self {
        let mut raw = Self::from_int(i64::from(whole)).raw;
        if thousandths >= 0 {
            raw = raw.wrapping_add((i64::from(thousandths) << P::SHIFT) / 1000);
        }
        Self::from_raw(raw)
    }

    pub const fn raw(self) -> i64 {
        self.raw
    }

    /// Integer part, rounded toward negative infinity.
    pub const fn to_i32(self) -> i32 {
        (self.raw >> P::SHIFT) as i32
    }

    /// Integer part, rounded toward negative infinity.
    pub const fn to_i64(self) -> i64 {
        self.raw >> P::SHIFT
    }

    pub fn to_f64(self) -> f64 {
        self.raw as f64 / Self::ONE_RAW as f64
    }

    pub fn to_f32(self) -> f32 {
        self.raw as f32 / Self::ONE_RAW as f32
    }

    /// Negates the raw bits (wrapping).
    pub const fn negate(self) -> Self {
        Self::from_raw(self.raw.wrapping_neg())
    }

    pub const fn is_negative(self) -> bool {
        self.raw < 0
    }

    pub const fn is_zero(self) -> bool {
        self.raw == 0
    }

    /// Division that reports a zero divisor instead of panicking.
    pub fn try_div(self, rhs: Self) -> Result<Self, MathError> {
        if rhs.raw == 0 {
            return Err(MathError::DivideByZero);
        }
        Ok(Self::from_raw(div_raw(self.raw, rhs.raw, P::SHIFT)))
    }

    /// Remainder that reports a zero divisor instead of panicking.
    pub fn try_rem(self, rhs: Self) -> Result<Self, MathError> {
        if rhs.raw == 0 {
            return Err(MathError::DivideByZero);
        }
        Ok(Self::from_raw(self.raw.wrapping_rem(rhs.raw)))
    }

    /// Adds any operand that converts to fixed point, floats included.
    ///
    /// # Errors
    ///
    /// The conversion error of `rhs`, e.g. [`MathError::Range`] for a float
    /// outside `[MIN, MAX]` or NaN.
    pub fn checked_add<T: ToFixedPoint<P>>(self, rhs: T) -> Result<Self, MathError> {
        Ok(self + rhs.to_fixed_point()?)
    }

    pub fn checked_sub<T: ToFixedPoint<P>>(self, rhs: T) -> Result<Self, MathError> {
        Ok(self - rhs.to_fixed_point()?)
    }

    pub fn checked_mul<T: ToFixedPoint<P>>(self, rhs: T) -> Result<Self, MathError> {
        Ok(self * rhs.to_fixed_point()?)
    }

    /// # Errors
    ///
    /// The conversion error of `rhs`, or [`MathError::DivideByZero`].
    pub fn checked_div<T: ToFixedPoint<P>>(self, rhs: T) -> Result<Self, MathError> {
        self.try_div(rhs.to_fixed_point()?)
    }

    pub fn checked_rem<T: ToFixedPoint<P>>(self, rhs: T) -> Result<Self, MathError> {
        self.try_rem(rhs.to_fixed_point()?)
    }

    /// Reinterprets the raw bits as the `fixed` crate's equivalent type
    /// (`I52F12` for `Fixed4`, `I44F20` for `Fixed6`).
    pub fn to_fixed_i64(self) -> FixedI64<P::Frac> {
        FixedI64::from_bits(self.raw)
    }

    pub fn from_fixed_i64(value: FixedI64<P::Frac>) -> Self {
        Self::from_raw(value.to_bits())
    }
}

impl<P: Precision> Add for FixedPoint<P> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_add(rhs.raw))
    }
}

impl<P: Precision> Sub for FixedPoint<P> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.raw.wrapping_sub(rhs.raw))
    }
}

impl<P: Precision> Mul for FixedPoint<P> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(mul_raw(self.raw, rhs.raw, P::SHIFT))
    }
}

impl<P: Precision> Div for FixedPoint<P> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero. Use [`FixedPoint::try_div`] to handle it.
    fn div(self, rhs: Self) -> Self {
        match self.try_div(rhs) {
            Ok(quotient) => quotient,
            Err(_) => panic!("attempt to divide a {} by zero", P::NAME),
        }
    }
}

impl<P: Precision> Rem for FixedPoint<P> {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero. Use [`FixedPoint::try_rem`] to handle it.
    fn rem(self, rhs: Self) -> Self {
        match self.try_rem(rhs) {
            Ok(remainder) => remainder,
            Err(_) => panic!(
                "attempt to calculate the remainder of a {} with a divisor of zero",
                P::NAME
            ),
        }
    }
}

impl<P: Precision> Neg for FixedPoint<P> {
    type Output = Self;
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<P: Precision> Shl<u32> for FixedPoint<P> {
    type Output = Self;
    fn shl(self, bits: u32) -> Self {
        Self::from_raw(self.raw.wrapping_shl(bits))
    }
}

impl<P: Precision> Shr<u32> for FixedPoint<P> {
    type Output = Self;
    fn shr(self, bits: u32) -> Self {
        Self::from_raw(self.raw.wrapping_shr(bits))
    }
}

/// Conversion of a native operand into a fixed-point value, used by every
/// mixed-type comparison and by the `checked_*` arithmetic.
pub trait ToFixedPoint<P: Precision>: Copy {
    fn to_fixed_point(self) -> Result<FixedPoint<P>, MathError>;
}

impl<P: Precision> ToFixedPoint<P> for FixedPoint<P> {
    fn to_fixed_point(self) -> Result<FixedPoint<P>, MathError> {
        Ok(self)
    }
}

impl<P: Precision> ToFixedPoint<P> for i32 {
    fn to_fixed_point(self) -> Result<FixedPoint<P>, MathError> {
        Ok(FixedPoint::from_int(i64::from(self)))
    }
}

impl<P: Precision> ToFixedPoint<P> for i64 {
    fn to_fixed_point(self) -> Result<FixedPoint<P>, MathError> {
        Ok(FixedPoint::from_int(self))
    }
}

impl<P: Precision> ToFixedPoint<P> for f32 {
    fn to_fixed_point(self) -> Result<FixedPoint<P>, MathError> {
        FixedPoint::from_f32(self)
    }
}

impl<P: Precision> ToFixedPoint<P> for f64 {
    fn to_fixed_point(self) -> Result<FixedPoint<P>, MathError> {
        FixedPoint::from_f64(self)
    }
}

// Integer operands convert through `from_int`, then the fixed-point operator runs.
macro_rules! impl_integer_operands {
    (@op $int:ty, $trait:ident, $method:ident) => {
        impl<P: Precision> $trait<$int> for FixedPoint<P> {
            type Output = Self;
            fn $method(self, rhs: $int) -> Self {
                $trait::$method(self, Self::from(rhs))
            }
        }

        impl<P: Precision> $trait<FixedPoint<P>> for $int {
            type Output = FixedPoint<P>;
            fn $method(self, rhs: FixedPoint<P>) -> FixedPoint<P> {
                $trait::$method(FixedPoint::from(self), rhs)
            }
        }
    };
    ($($int:ty),*) => {$(
        impl<P: Precision> From<$int> for FixedPoint<P> {
            fn from(value: $int) -> Self {
                Self::from_int(i64::from(value))
            }
        }

        impl_integer_operands!(@op $int, Add, add);
        impl_integer_operands!(@op $int, Sub, sub);
        impl_integer_operands!(@op $int, Mul, mul);
        impl_integer_operands!(@op $int, Div, div);
        impl_integer_operands!(@op $int, Rem, rem);
    )*};
}

impl_integer_operands!(i32, i64);

// A float that cannot be represented compares unequal and unordered.
macro_rules! impl_native_comparisons {
    ($($native:ty),*) => {$(
        impl<P: Precision> PartialEq<$native> for FixedPoint<P> {
            fn eq(&self, other: &$native) -> bool {
                <$native as ToFixedPoint<P>>::to_fixed_point(*other)
                    .map_or(false, |rhs| self.raw == rhs.raw)
            }
        }

        impl<P: Precision> PartialEq<FixedPoint<P>> for $native {
            fn eq(&self, other: &FixedPoint<P>) -> bool {
                <$native as ToFixedPoint<P>>::to_fixed_point(*self)
                    .map_or(false, |lhs| lhs.raw == other.raw)
            }
        }

        impl<P: Precision> PartialOrd<$native> for FixedPoint<P> {
            fn partial_cmp(&self, other: &$native) -> Option<Ordering> {
                <$native as ToFixedPoint<P>>::to_fixed_point(*other)
                    .ok()
                    .map(|rhs| self.raw.cmp(&rhs.raw))
            }
        }

        impl<P: Precision> PartialOrd<FixedPoint<P>> for $native {
            fn partial_cmp(&self, other: &FixedPoint<P>) -> Option<Ordering> {
                <$native as ToFixedPoint<P>>::to_fixed_point(*self)
                    .ok()
                    .map(|lhs| lhs.raw.cmp(&other.raw))
            }
        }
    )*};
}

impl_native_comparisons!(i32, i64, f32, f64);

impl<P: Precision> TryFrom<f64> for FixedPoint<P> {
    type Error = MathError;
    fn try_from(value: f64) -> Result<Self, MathError> {
        Self::from_f64(value)
    }
}

impl<P: Precision> TryFrom<f32> for FixedPoint<P> {
    type Error = MathError;
    fn try_from(value: f32) -> Result<Self, MathError> {
        Self::from_f32(value)
    }
}

impl<P: Precision> From<FixedPoint<P>> for f64 {
    fn from(value: FixedPoint<P>) -> f64 {
        value.to_f64()
    }
}

impl<P: Precision> From<FixedPoint<P>> for f32 {
    fn from(value: FixedPoint<P>) -> f32 {
        value.to_f32()
    }
}

impl<P: Precision> fmt::Display for FixedPoint<P> {
    /// Renders the value rounded to `P::DIGITS` decimals (half away from
    /// zero) in its shortest form. An explicit `{:.N}` overrides the digits.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = f.precision().unwrap_or(P::DIGITS);
        let factor = 10f64.powi(digits as i32);
        let mut rounded = (self.to_f64() * factor).round() / factor;
        if rounded == 0.0 {
            // Drop the sign of negative zero.
            rounded = 0.0;
        }
        match f.precision() {
            Some(digits) => write!(f, "{:.*}", digits, rounded),
            None => write!(f, "{}", rounded),
        }
    }
}

impl<P: Precision> fmt::Debug for FixedPoint<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({} raw={})", P::NAME, self, self.raw)
    }
}

impl<P: Precision> FromStr for FixedPoint<P> {
    type Err = MathError;

    /// Parses a decimal literal such as `"42"`, `"-3.25"` or `".5"`.
    ///
    /// The fractional digits are converted exactly and rounded half away from
    /// zero to the nearest raw value; digits past the 18th are ignored.
    fn from_str(s: &str) -> Result<Self, MathError> {
        let invalid = || MathError::Parse(s.to_string());
        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        let is_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if (whole.is_empty() && fraction.is_empty()) || !is_digits(whole) || !is_digits(fraction)
        {
            return Err(invalid());
        }

        let whole: i128 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction = &fraction[..fraction.len().min(18)];
        let fraction_raw = if fraction.is_empty() {
            0
        } else {
            let numerator: i128 = fraction.parse().map_err(|_| invalid())?;
            let denominator = 10i128.pow(fraction.len() as u32);
            ((numerator << P::SHIFT) + denominator / 2) / denominator
        };

        let magnitude = whole
            .checked_mul(1i128 << P::SHIFT)
            .and_then(|scaled| scaled.checked_add(fraction_raw))
            .ok_or_else(invalid)?;
        let raw = if negative { -magnitude } else { magnitude };
        i64::try_from(raw)
            .map(Self::from_raw)
            .map_err(|_| Self::range_error(raw as f64 / Self::ONE_RAW as f64))
    }
}

impl<P: Precision> Serialize for FixedPoint<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.raw)
    }
}

impl<'de, P: Precision> Deserialize<'de> for FixedPoint<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}
