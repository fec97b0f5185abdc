//! Zeros of FIR filter transfer functions.
//!
//! The transfer function `H(z) = sum h[n] z^-n` of a symmetric impulse
//! response of length `N` is, after multiplying by `z^(N/2)`, a polynomial
//! whose coefficients are the samples of the impulse response in order.

use num::complex::Complex64;

use crate::{
    poly::roots,
    precision::{Overrides, Precision},
    scalar::{MACHINE_TOLERANCE, TOLERANCE_HEADROOM_DIGITS},
};

mod gaussian;
pub use gaussian::{
    calculate_gaussian_zeros, gaussian_impulse_response, try_gaussian_zeros, MAX_TAPS, MIN_TAPS,
};

/// Window applied to an impulse response before normalization
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Window {
    #[default]
    None,

    /// Raised cosine of length `N + 1`, shifted by one sample so that
    /// neither end of the response is zeroed out.
    Hann,
}

impl Window {
    /// Weight of sample `i` of a response of `len` taps
    #[must_use]
    pub fn weight(self, i: usize, len: usize) -> f64 {
        match self {
            Self::None => 1.0,
            Self::Hann => {
                #[allow(clippy::cast_precision_loss)]
                let x = (i + 1) as f64 / (len + 1) as f64;
                0.5 * (1.0 - (std::f64::consts::TAU * x).cos())
            }
        }
    }
}

/// Coefficients left after [`trim_coefficients`].
#[derive(Clone, Debug, PartialEq)]
pub struct Trimmed {
    /// Descending order, like the input
    pub coefficients: Vec<f64>,

    /// Each removed leading coefficient is a root at infinity
    pub removed_leading: usize,

    /// Each removed constant term is a root at the origin
    pub removed_constant: usize,
}

impl Trimmed {
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }
}

/// Strip negligible coefficients from both ends of a descending coefficient
/// vector, first the leading ones, then the constant terms.
///
/// A coefficient is negligible if its magnitude is at most `tolerance`.
/// Trimming never goes below a single coefficient.
///
/// ```
/// use durand_kerner::filter::trim_coefficients;
///
/// let t = trim_coefficients(&[1E-7, 0.5, 1.0, 0.5, 1E-7], 1E-5);
/// assert_eq!(t.coefficients, vec![0.5, 1.0, 0.5]);
/// assert_eq!((t.removed_leading, t.removed_constant), (1, 1));
/// ```
#[must_use]
pub fn trim_coefficients(coefficients: &[f64], tolerance: f64) -> Trimmed {
    let mut trimmed = coefficients;
    let mut removed_leading = 0;
    while let [first, rest @ ..] = trimmed {
        if rest.is_empty() || first.abs() > tolerance {
            break;
        }
        trimmed = rest;
        removed_leading += 1;
    }

    let mut removed_constant = 0;
    while let [rest @ .., last] = trimmed {
        if rest.is_empty() || last.abs() > tolerance {
            break;
        }
        trimmed = rest;
        removed_constant += 1;
    }

    Trimmed {
        coefficients: trimmed.to_vec(),
        removed_leading,
        removed_constant,
    }
}

/// Thresholds of the zero extractor, tunable independently of each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZeroTolerances {
    /// Coefficients up to this magnitude are trimmed
    pub trim: f64,

    /// Zeros with an imaginary part up to this magnitude lie on the real
    /// axis
    pub classify: f64,
}

/// Trimming is one order of magnitude looser than classification in
/// arbitrary precision.
const TRIM_HEADROOM_DIGITS: i64 = TOLERANCE_HEADROOM_DIGITS + 1;

/// Leading coefficients below the machine precision convergence tolerance
/// destabilize the iteration, trimming in machine precision is looser.
const MACHINE_TRIM_TOLERANCE: f64 = 1E-5;

impl ZeroTolerances {
    /// Machine: trim `1e-5`, classify `1e-10`. Arbitrary: trim
    /// `10^(-dps+6)`, classify `10^(-dps+5)`.
    #[must_use]
    pub fn for_precision(precision: Precision) -> Self {
        match precision {
            Precision::Machine => Self {
                trim: MACHINE_TRIM_TOLERANCE,
                classify: MACHINE_TOLERANCE,
            },
            Precision::Arbitrary { dps } => Self {
                trim: pow10(TRIM_HEADROOM_DIGITS, dps),
                classify: pow10(TOLERANCE_HEADROOM_DIGITS, dps),
            },
        }
    }

    /// Whether `zero` lies on the real axis or in the upper half plane
    #[must_use]
    pub fn is_upper_half_plane(&self, zero: Complex64) -> bool {
        self.is_real(zero) || zero.im > 0.0
    }

    #[must_use]
    pub fn is_real(&self, zero: Complex64) -> bool {
        zero.im.abs() <= self.classify
    }

    /// Keep real and upper half plane zeros, dropping the conjugate
    /// duplicates of real polynomials. The imaginary part of real zeros is
    /// set to exactly zero.
    #[must_use]
    pub fn upper_half_plane(&self, zeros: &[Complex64]) -> Vec<Complex64> {
        zeros
            .iter()
            .filter(|z| self.is_upper_half_plane(**z))
            .map(|z| {
                if self.is_real(*z) {
                    Complex64::new(z.re, 0.0)
                } else {
                    *z
                }
            })
            .collect()
    }
}

impl Default for ZeroTolerances {
    fn default() -> Self {
        Self::for_precision(Precision::Machine)
    }
}

/// Zeros of a filter transfer function, see [`try_filter_zeros`].
#[derive(Clone, Debug, PartialEq)]
pub struct FilterZeros {
    /// Real and upper half plane zeros, in the order the root finder
    /// produced them
    pub zeros: Vec<Complex64>,

    /// Degree of the polynomial left after trimming, zero if nothing was
    /// left to solve
    pub degree: usize,

    pub removed_leading: usize,

    /// Zeros at the origin. They are counted, not reported in `zeros`.
    pub removed_constant: usize,

    /// Whether the root finder met its tolerance
    pub converged: bool,
}

/// Find the zeros of the transfer function with the given coefficients,
/// leading coefficient first.
///
/// Negligible coefficients are trimmed from both ends, the rest is solved in
/// `precision` and only the real and upper half plane zeros are kept. A
/// polynomial that is constant after trimming has no zeros.
///
/// # Errors
/// Any error of the root finder is passed on, see
/// [`DurandKerner::find_roots`](crate::DurandKerner::find_roots).
pub fn try_filter_zeros(
    coefficients: &[f64],
    precision: Precision,
    tolerances: &ZeroTolerances,
) -> Result<FilterZeros, roots::Error> {
    let trimmed = trim_coefficients(coefficients, tolerances.trim);
    log::debug!(
        "trimmed {{leading: {}, constant: {}}}",
        trimmed.removed_leading,
        trimmed.removed_constant
    );

    let degree = trimmed.degree().unwrap_or(0);
    let mut result = FilterZeros {
        zeros: vec![],
        degree,
        removed_leading: trimmed.removed_leading,
        removed_constant: trimmed.removed_constant,
        converged: true,
    };
    let solvable = trimmed
        .coefficients
        .first()
        .is_some_and(|c| c.abs() > tolerances.trim);
    if degree == 0 || !solvable {
        return Ok(result);
    }

    let solution = precision.solve(&trimmed.coefficients, &Overrides::default())?;
    if !solution.converged {
        log::warn!(
            "zeros did not converge within {} iterations, largest correction {:e}",
            solution.iterations,
            solution.max_correction
        );
    }
    result.zeros = tolerances.upper_half_plane(&solution.roots);
    result.converged = solution.converged;
    Ok(result)
}

/// The zeros of a successful extraction, no zeros if it failed. Failures are
/// logged.
pub(crate) fn zeros_or_empty(result: Result<FilterZeros, roots::Error>) -> Vec<Complex64> {
    match result {
        Ok(result) => result.zeros,
        Err(e) => {
            log::warn!("failed to calculate filter zeros: {e}");
            vec![]
        }
    }
}

/// `10^(headroom - dps)`
fn pow10(headroom: i64, dps: u32) -> f64 {
    let exponent = headroom.saturating_sub(i64::from(dps));
    10f64.powi(i32::try_from(exponent).unwrap_or(i32::MIN))
}
