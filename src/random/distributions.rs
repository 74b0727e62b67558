//! Statistical distributions sampled from any [`RandomCore`] engine.
//!
//! Parameters are validated before the engine is touched: a rejected call
//! never consumes draws, so a stream stays reproducible across error paths.

use std::f64::consts::PI;

use super::RandomCore;
use crate::error::MathError;

fn require_positive(name: &'static str, value: f64) -> Result<(), MathError> {
    if value.is_nan() || value <= 0.0 {
        return Err(MathError::invalid(name, format!("must be positive, received {value}")));
    }
    Ok(())
}

fn require_non_negative(name: &'static str, value: i32) -> Result<(), MathError> {
    if value < 0 {
        return Err(MathError::invalid(name, format!("must be at least 0, received {value}")));
    }
    Ok(())
}

/// Normal sample via the Box-Muller transform.
///
/// # Errors
///
/// [`MathError::InvalidArgument`] if `standard_deviation <= 0`.
pub fn normal<R: RandomCore>(
    rng: &mut R,
    mean: f64,
    standard_deviation: f64,
) -> Result<f64, MathError> {
    require_positive("standard_deviation", standard_deviation)?;
    Ok(sample_normal(rng, mean, standard_deviation))
}

// Products evaluate left to right: `(sd * r) * sin(theta)`.
fn sample_normal<R: RandomCore>(rng: &mut R, mean: f64, standard_deviation: f64) -> f64 {
    let u1 = rng.uniform();
    let u2 = rng.uniform();
    let r = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * PI * u2;
    mean + standard_deviation * r * theta.sin()
}

/// Exponential sample with the given mean.
pub fn exponential<R: RandomCore>(rng: &mut R, mean: f64) -> Result<f64, MathError> {
    require_positive("mean", mean)?;
    Ok(mean * -rng.uniform().ln())
}

/// Gamma sample using Marsaglia and Tsang, "A Simple Method for Generating
/// Gamma Variables" (2000).
///
/// For `shape < 1` the sample is boosted from `gamma(shape + 1)` by
/// `u^(1/shape)`.
///
/// # Errors
///
/// [`MathError::InvalidArgument`] if `shape` or `scale` is not positive.
pub fn gamma<R: RandomCore>(rng: &mut R, shape: f64, scale: f64) -> Result<f64, MathError> {
    require_positive("shape", shape)?;
    require_positive("scale", scale)?;
    Ok(sample_gamma(rng, shape, scale))
}

// `scale` multiplies first, as in `scale * d * v`.
fn sample_gamma<R: RandomCore>(rng: &mut R, shape: f64, scale: f64) -> f64 {
    if shape < 1.0 {
        let g = sample_gamma(rng, shape + 1.0, 1.0);
        let w = rng.uniform();
        return scale * g * w.powf(1.0 / shape);
    }

    let d = shape - 1.0 / 3.0;
    let c = 1.0 / (9.0 * d).sqrt();
    loop {
        let (x, v) = loop {
            let x = sample_normal(rng, 0.0, 1.0);
            let v = 1.0 + c * x;
            if v > 0.0 {
                break (x, v * v * v);
            }
        };
        let u = rng.uniform();
        let x2 = x * x;
        if u < 1.0 - 0.0331 * x2 * x2 || u.ln() < 0.5 * x2 + d * (1.0 - v + v.ln()) {
            return scale * d * v;
        }
    }
}

/// Chi-square sample, `gamma(df / 2, 2)`.
pub fn chi_square<R: RandomCore>(
    rng: &mut R,
    degrees_of_freedom: f64,
) -> Result<f64, MathError> {
    require_positive("degrees_of_freedom", degrees_of_freedom)?;
    gamma(rng, 0.5 * degrees_of_freedom, 2.0)
}

/// Inverse-gamma sample, `1 / gamma(shape, 1 / scale)`.
pub fn inverse_gamma<R: RandomCore>(
    rng: &mut R,
    shape: f64,
    scale: f64,
) -> Result<f64, MathError> {
    require_positive("scale", scale)?;
    Ok(1.0 / gamma(rng, shape, 1.0 / scale)?)
}

pub fn weibull<R: RandomCore>(rng: &mut R, shape: f64, scale: f64) -> Result<f64, MathError> {
    require_positive("shape", shape)?;
    require_positive("scale", scale)?;
    Ok(scale * (-rng.uniform().ln()).powf(1.0 / shape))
}

/// Cauchy sample by inverting the distribution function.
pub fn cauchy<R: RandomCore>(rng: &mut R, median: f64, scale: f64) -> Result<f64, MathError> {
    require_positive("scale", scale)?;
    let p = rng.uniform();
    Ok(median + scale * (PI * (p - 0.5)).tan())
}

/// Student's t sample (Knuth, Seminumerical Algorithms).
pub fn student_t<R: RandomCore>(
    rng: &mut R,
    degrees_of_freedom: f64,
) -> Result<f64, MathError> {
    require_positive("degrees_of_freedom", degrees_of_freedom)?;
    let y1 = sample_normal(rng, 0.0, 1.0);
    let y2 = chi_square(rng, degrees_of_freedom)?;
    Ok(y1 / (y2 / degrees_of_freedom).sqrt())
}

/// Laplace (double exponential) sample. Any `scale` is accepted.
pub fn laplace<R: RandomCore>(rng: &mut R, mean: f64, scale: f64) -> f64 {
    let u = rng.uniform();
    if u < 0.5 {
        mean + scale * (2.0 * u).ln()
    } else {
        mean - scale * (2.0 * (1.0 - u)).ln()
    }
}

pub fn log_normal<R: RandomCore>(rng: &mut R, mu: f64, sigma: f64) -> Result<f64, MathError> {
    Ok(normal(rng, mu, sigma)?.exp())
}

/// Beta sample from two gamma draws, `ga / (ga + gb)`.
pub fn beta<R: RandomCore>(rng: &mut R, a: f64, b: f64) -> Result<f64, MathError> {
    require_positive("a", a)?;
    require_positive("b", b)?;
    let u = sample_gamma(rng, a, 1.0);
    let v = sample_gamma(rng, b, 1.0);
    Ok(u / (u + v))
}

pub fn coin_flip<R: RandomCore>(rng: &mut R) -> bool {
    rng.next_bool()
}

pub fn coin_flips<R: RandomCore>(rng: &mut R, count: usize) -> Vec<bool> {
    (0..count).map(|_| rng.next_bool()).collect()
}

/// Flips `count` coins and returns `(heads, tails)`.
pub fn coin_flip_results<R: RandomCore>(rng: &mut R, count: usize) -> (usize, usize) {
    let heads = (0..count).filter(|_| rng.next_bool()).count();
    (heads, count - heads)
}

fn roll_die<R: RandomCore>(rng: &mut R, faces: i32) -> i64 {
    i64::from(rng.next_in::<i32>(0, faces))
}

/// Sums `count` rolls of a die with `faces` faces.
///
/// Each roll is `next_in(0, faces)`, so a roll can be `0`. Returns `0` without
/// drawing when either argument is zero.
///
/// # Errors
///
/// [`MathError::InvalidArgument`] if `faces` or `count` is negative.
pub fn dice_roll<R: RandomCore>(rng: &mut R, faces: i32, count: i32) -> Result<i64, MathError> {
    if faces == 0 || count == 0 {
        return Ok(0);
    }
    require_non_negative("faces", faces)?;
    require_non_negative("count", count)?;
    Ok((0..count).map(|_| roll_die(rng, faces)).sum())
}

/// Rolls `count` dice and returns each die's result.
pub fn dice_rolls_per_die<R: RandomCore>(
    rng: &mut R,
    faces: i32,
    count: i32,
) -> Result<Vec<i64>, MathError> {
    require_non_negative("faces", faces)?;
    require_non_negative("count", count)?;
    if faces == 0 {
        return Ok(vec![0; count as usize]);
    }
    Ok((0..count).map(|_| roll_die(rng, faces)).collect())
}

macro_rules! standard_dice {
    ($($name:ident => $faces:expr),*) => {$(
        #[doc = concat!("Sum of `count` rolls of a ", stringify!($faces), "-faced die.")]
        pub fn $name<R: RandomCore>(rng: &mut R, count: i32) -> Result<i64, MathError> {
            dice_roll(rng, $faces, count)
        }
    )*};
}

standard_dice!(d6 => 6, d8 => 8, d10 => 10, d12 => 12, d20 => 20, d25 => 25, d99 => 99);

/// Discards `steps` raw draws.
pub fn advance<R: RandomCore>(rng: &mut R, steps: u64) {
    rng.advance(steps);
}
