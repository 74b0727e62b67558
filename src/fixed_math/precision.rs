use std::fmt::Debug;
use std::hash::Hash;

use fixed::types::extra::{LeEqU64, U12, U20};

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Precision4 {}
    impl Sealed for super::Precision6 {}
}

/// Type-level description of a fixed-point format.
///
/// Sealed: the crate supports exactly the two formats below.
pub trait Precision:
    sealed::Sealed + Copy + Debug + Default + Eq + Ord + Hash + Send + Sync + 'static
{
    /// Number of fractional bits in the raw integer.
    const SHIFT: u32;

    /// Decimal digits used when rendering to text. Does not bound stored precision.
    const DIGITS: usize;

    /// Short name used in `Debug` output.
    const NAME: &'static str;

    /// Matching fraction width in the `fixed` crate, for bit-exact interop.
    type Frac: LeEqU64;
}

/// 12 fractional bits, 4 display digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision4;

impl Precision for Precision4 {
    const SHIFT: u32 = 12;
    const DIGITS: usize = 4;
    const NAME: &'static str = "Fixed4";
    type Frac = U12;
}

/// 20 fractional bits, 6 display digits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision6;

impl Precision for Precision6 {
    const SHIFT: u32 = 20;
    const DIGITS: usize = 6;
    const NAME: &'static str = "Fixed6";
    type Frac = U20;
}
