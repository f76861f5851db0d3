//! A thin abstraction over the numerical types we compare slopes in.

use std::hash::Hash;

use malachite::Rational;
use ordered_float::NotNan;

/// A trait for abstracting over the properties we need from slope values.
///
/// This is implemented for `malachite::Rational`, which compares slopes exactly, and for
/// `NotNan<f64>`, which divides in floating point and relies on a tolerance to decide
/// which slopes are equal.
pub trait Float:
    Sized
    + std::ops::Sub<Self, Output = Self>
    + for<'a> std::ops::Sub<&'a Self, Output = Self>
    + Clone
    + std::fmt::Debug
    + Ord
    + Eq
    + Hash
    + Send
    + Sync
    + 'static
{
    /// The quotient `num / den`. The denominator must be non-zero.
    fn from_ratio(num: i64, den: i64) -> Self;

    /// Converts a tolerance, returning `None` if `x` isn't representable (i.e. it's a nan
    /// or infinite).
    fn from_f64(x: f64) -> Option<Self>;

    fn abs(self) -> Self;

    fn zero() -> Self {
        Self::from_ratio(0, 1)
    }

    /// Returns true if `self` and `other` differ by strictly less than `eps`.
    ///
    /// Equal values are always close, even for a zero `eps`.
    fn approx_eq(&self, other: &Self, eps: &Self) -> bool {
        self == other || &(self.clone() - other).abs() < eps
    }
}

impl Float for Rational {
    fn from_ratio(num: i64, den: i64) -> Self {
        debug_assert!(den != 0);
        Rational::from(num) / Rational::from(den)
    }

    fn from_f64(x: f64) -> Option<Self> {
        Rational::try_from(x).ok()
    }

    fn abs(self) -> Self {
        <Rational as malachite::num::arithmetic::traits::Abs>::abs(self)
    }
}

impl Float for NotNan<f64> {
    fn from_ratio(num: i64, den: i64) -> Self {
        debug_assert!(den != 0);
        // unwrap: both operands are finite and the denominator is non-zero, so the
        // quotient isn't a nan.
        NotNan::new(num as f64 / den as f64).unwrap()
    }

    fn from_f64(x: f64) -> Option<Self> {
        if x.is_finite() {
            NotNan::new(x).ok()
        } else {
            None
        }
    }

    fn abs(self) -> Self {
        // unwrap: the absolute value of a non-nan is a non-nan.
        self.into_inner().abs().try_into().unwrap()
    }
}
