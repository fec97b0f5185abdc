use std::{
    fmt::{Debug, Display},
    ops::Neg,
};

use num::{traits::NumAssign, Num};

use crate::util::big_float::{BigFloat, Context};

/// Real numbers the root finder can compute with.
///
/// The root finding algorithms are written once against this trait and
/// instantiated for machine precision (`f64`) and for arbitrary decimal
/// precision ([`BigFloat`]). Constants that do not come from the input, like
/// the points of the initial guess circle or the default tolerance, are built
/// through an explicit [`RealScalar::Context`] rather than global state.
pub trait RealScalar:
    Clone + Debug + Display + PartialOrd + Num + NumAssign + Neg<Output = Self>
{
    /// Everything needed to construct a value of this type from machine
    /// numbers. For `f64` this is `()`, for [`BigFloat`] the decimal
    /// precision.
    type Context: Clone + Debug;

    /// Convert a machine float, returns [`None`] if it is not finite.
    fn from_f64_in(value: f64, ctx: &Self::Context) -> Option<Self>;

    /// Nearest `f64`, may saturate or lose digits.
    fn to_f64_lossy(&self) -> f64;

    fn abs(&self) -> Self;

    /// Values that went through an overflow or a division by zero are not
    /// finite. Types without such states are always finite.
    fn is_finite(&self) -> bool {
        true
    }

    /// Convergence tolerance used when the caller does not provide one
    fn default_tolerance(ctx: &Self::Context) -> Self;

    /// Lower bound for the iteration budget of iterative algorithms. Higher
    /// precision takes more sweeps to settle the last digits.
    fn min_iterations(_ctx: &Self::Context) -> usize {
        0
    }
}

/// Default machine precision tolerance.
pub const MACHINE_TOLERANCE: f64 = 1E-10;

/// Digits of headroom between the precision and the default tolerance of
/// arbitrary precision computations.
pub const TOLERANCE_HEADROOM_DIGITS: i64 = 5;

/// Arbitrary precision iteration budgets are at least this many sweeps per
/// decimal digit.
pub const ITERATIONS_PER_DIGIT: usize = 20;

impl RealScalar for f64 {
    type Context = ();

    fn from_f64_in(value: f64, _ctx: &Self::Context) -> Option<Self> {
        value.is_finite().then_some(value)
    }

    fn to_f64_lossy(&self) -> f64 {
        *self
    }

    fn abs(&self) -> Self {
        f64::abs(*self)
    }

    fn is_finite(&self) -> bool {
        f64::is_finite(*self)
    }

    fn default_tolerance(_ctx: &Self::Context) -> Self {
        MACHINE_TOLERANCE
    }
}

impl RealScalar for BigFloat {
    type Context = Context;

    fn from_f64_in(value: f64, ctx: &Self::Context) -> Option<Self> {
        ctx.from_f64(value)
    }

    fn to_f64_lossy(&self) -> f64 {
        self.to_f64()
    }

    fn abs(&self) -> Self {
        Self::abs(self)
    }

    /// `10^(-dps + 5)`
    fn default_tolerance(ctx: &Self::Context) -> Self {
        ctx.pow10(TOLERANCE_HEADROOM_DIGITS - i64::from(ctx.dps()))
    }

    fn min_iterations(ctx: &Self::Context) -> usize {
        (ctx.dps() as usize).saturating_mul(ITERATIONS_PER_DIGIT)
    }
}

#[cfg(test)]
mod test {
    use super::RealScalar;
    use crate::util::big_float::{BigFloat, Context};

    #[test]
    fn machine_defaults() {
        assert!((f64::default_tolerance(&()) - 1E-10).abs() < f64::EPSILON);
        assert_eq!(f64::min_iterations(&()), 0);
        assert!(f64::from_f64_in(f64::NAN, &()).is_none());
        assert!(!RealScalar::is_finite(&f64::INFINITY));
    }

    #[test]
    fn arbitrary_defaults() {
        let ctx = Context::new(50);
        assert_eq!(BigFloat::default_tolerance(&ctx), ctx.pow10(-45));
        assert_eq!(BigFloat::min_iterations(&ctx), 1000);
        let x = BigFloat::from_f64_in(-0.25, &ctx).unwrap();
        assert_eq!(RealScalar::abs(&x).to_f64_lossy(), 0.25);
    }
}
