//! Selecting the arithmetic a computation runs in.

use anyhow::anyhow;
use num::complex::Complex64;

use crate::{
    poly::roots::{self, DurandKerner, Solution},
    util::{
        big_float::{BigFloat, Context, DEFAULT_DIGITS},
        complex::c_to_f64,
        doc_macros::{errors_division_by_zero, errors_invalid_polynomial, precision_digits},
    },
    Poly, RealScalar,
};

/// Default number of decimal digits of arbitrary precision computations.
pub const DEFAULT_DPS: u32 = DEFAULT_DIGITS;

/// Machine precision (`f64`, about 15 significant digits) or arbitrary
/// decimal precision.
///
/// The precision only exists for the duration of one call: every call builds
/// its own [`Context`], so computations at different precisions can run side
/// by side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Precision {
    #[default]
    Machine,
    Arbitrary {
        dps: u32,
    },
}

/// Caller supplied replacements for the defaults of a [`Precision`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overrides {
    pub max_iter: Option<usize>,
    pub tolerance: Option<f64>,
}

impl Precision {
    /// Arbitrary precision with `dps` significant digits, at least one.
    #[must_use]
    pub fn arbitrary(dps: u32) -> Self {
        Self::Arbitrary { dps: dps.max(1) }
    }

    /// `None` selects machine precision
    #[must_use]
    pub fn from_digits(digits: Option<u32>) -> Self {
        digits.map_or(Self::Machine, Self::arbitrary)
    }

    /// Decimal digits of arbitrary precision, [`None`] for machine precision
    #[must_use]
    pub const fn dps(&self) -> Option<u32> {
        match self {
            Self::Machine => None,
            Self::Arbitrary { dps } => Some(*dps),
        }
    }

    /// Default convergence tolerance, `1e-10` or `10^(-dps+5)`, projected to
    /// machine precision.
    #[must_use]
    pub fn default_tolerance(&self) -> f64 {
        match self {
            Self::Machine => f64::default_tolerance(&()),
            Self::Arbitrary { dps } => BigFloat::default_tolerance(&Context::new(*dps)).to_f64(),
        }
    }

    /// The iteration budget actually granted when `requested` sweeps are
    /// asked for.
    #[must_use]
    pub fn iteration_budget(&self, requested: usize) -> usize {
        match self {
            Self::Machine => requested.max(f64::min_iterations(&())),
            Self::Arbitrary { dps } => requested.max(BigFloat::min_iterations(&Context::new(*dps))),
        }
    }

    /// Find the roots of the polynomial with the given coefficients, leading
    /// coefficient first.
    ///
    /// The roots are computed in this precision and projected to machine
    /// precision.
    ///
    /// # Errors
    #[doc = errors_invalid_polynomial!()]
    #[doc = errors_division_by_zero!()]
    /// - `Other`: a coefficient or the tolerance is not finite.
    pub fn find_roots(
        &self,
        coefficients: &[f64],
        overrides: &Overrides,
    ) -> roots::Result<f64> {
        self.solve(coefficients, overrides).map(|s| s.roots)
    }

    /// Same as [`Precision::find_roots`], but also reports the number of sweeps
    /// and whether the tolerance was met.
    ///
    /// # Errors
    #[doc = errors_invalid_polynomial!()]
    #[doc = errors_division_by_zero!()]
    /// - `Other`: a coefficient or the tolerance is not finite.
    pub fn solve(
        &self,
        coefficients: &[f64],
        overrides: &Overrides,
    ) -> Result<Solution<f64>, roots::Error> {
        match self {
            Self::Machine => solve_in::<f64>((), coefficients, overrides),
            Self::Arbitrary { dps } => {
                solve_in::<BigFloat>(Context::new(*dps), coefficients, overrides)
            }
        }
    }
}

fn solve_in<T: RealScalar>(
    ctx: T::Context,
    coefficients: &[f64],
    overrides: &Overrides,
) -> Result<Solution<f64>, roots::Error> {
    let poly = Poly::<T>::from_f64_descending(coefficients, &ctx)
        .ok_or_else(|| anyhow!("coefficients must be finite"))?;

    let mut finder = DurandKerner::<T>::new(ctx.clone());
    if let Some(max_iter) = overrides.max_iter {
        finder = finder.max_iter(max_iter);
    }
    if let Some(tolerance) = overrides.tolerance {
        let tolerance =
            T::from_f64_in(tolerance, &ctx).ok_or_else(|| anyhow!("tolerance must be finite"))?;
        finder = finder.tolerance(tolerance);
    }

    let solution = finder.solve(&poly)?;
    Ok(Solution {
        roots: solution.roots.iter().map(c_to_f64).collect(),
        iterations: solution.iterations,
        converged: solution.converged,
        max_correction: solution.max_correction,
    })
}

/// Find all roots of a real polynomial, coefficients in descending order.
///
/// `max_iterations` defaults to [`roots::DEFAULT_MAX_ITER`] and `tolerance`
/// to the default tolerance of the precision.
#[doc = precision_digits!()]
/// # Errors
#[doc = errors_invalid_polynomial!()]
#[doc = errors_division_by_zero!()]
///
/// # Examples
/// ```
/// // x^2 - 1
/// let roots = durand_kerner::find_roots(&[1.0, 0.0, -1.0], None, None, Some(30)).unwrap();
/// assert_eq!(roots.len(), 2);
/// assert!(roots.iter().any(|z| (z.re - 1.0).abs() < 1E-12));
/// assert!(roots.iter().any(|z| (z.re + 1.0).abs() < 1E-12));
/// ```
pub fn find_roots(
    coefficients: &[f64],
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    precision_digits: Option<u32>,
) -> Result<Vec<Complex64>, roots::Error> {
    Precision::from_digits(precision_digits).find_roots(
        coefficients,
        &Overrides {
            max_iter: max_iterations,
            tolerance,
        },
    )
}
