//! Deterministic fixed-point mathematics library.
//!
//! This module provides a binary-scaled fixed-point number type and a small
//! function library on top of it. Every operation works on the raw integer
//! representation, so results are bit-identical across platforms and
//! architectures, which is what lockstep simulations need.
//!
//! Two precisions are provided:
//!
//! | Alias    | Shift | Resolution     | Display digits | Integer range |
//! |----------|-------|----------------|----------------|---------------|
//! | `Fixed4` | 12    | ~0.000244      | 4              | ±2^51         |
//! | `Fixed6` | 20    | ~0.00000095    | 6              | ±2^43         |
//!
//! # Example
//!
//! ```rust
//! use lockstep_math::fixed_math::{self, Fixed6};
//!
//! let angle = Fixed6::from_int(1);
//! let s = fixed_math::sin(angle);
//! assert!((s.to_f64() - 1f64.sin()).abs() < 1e-3);
//! ```

pub use fixed_point::{FixedPoint, ToFixedPoint};
pub use functions::{
    abs, acos, asin, atan, atan2, ceiling, clamp, cos, floor, ln, log, log10, pow, round, sin,
    sqrt, tan,
};
pub use precision::{Precision, Precision4, Precision6};

mod fixed_point;
mod functions;
mod precision;

/// Fixed-point number with a 12-bit fraction, rendered with 4 decimal digits.
pub type Fixed4 = FixedPoint<Precision4>;

/// Fixed-point number with a 20-bit fraction, rendered with 6 decimal digits.
pub type Fixed6 = FixedPoint<Precision6>;
