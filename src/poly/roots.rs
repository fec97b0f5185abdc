use std::fmt::Display;

use num::Complex;

use crate::{util::complex::complex_fmt, RealScalar};

mod durand_kerner;
pub use durand_kerner::{DurandKerner, DEFAULT_MAX_ITER};
mod initial_guess;
pub use initial_guess::{initial_guesses_circle, root_radius};

/// Why a polynomial was rejected before iterating.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPolynomial {
    #[error("the polynomial has no coefficients")]
    Empty,

    #[error("the leading coefficient is negligible")]
    NegligibleLeading,
}

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid polynomial: {0}")]
    InvalidPolynomial(#[from] InvalidPolynomial),

    /// Two estimates coincided (or the correction overflowed), the next
    /// sweep is undefined.
    #[error("division by zero while updating root estimate {index} in sweep {iteration}")]
    DivisionByZero { iteration: usize, index: usize },

    #[error("unexpected error while running root finder")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<Vec<Complex<T>>, Error>;

/// Roots together with some information on how they were found.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<T: RealScalar> {
    pub roots: Vec<Complex<T>>,

    /// Number of sweeps performed, zero for closed form solutions
    pub iterations: usize,

    /// Whether every correction of the last sweep was within tolerance.
    /// Closed form solutions are always converged.
    pub converged: bool,

    /// Magnitude of the largest correction of the last sweep, projected to
    /// machine precision. Zero for closed form solutions.
    pub max_correction: f64,
}

impl<T: RealScalar> Solution<T> {
    pub(crate) const fn closed_form(roots: Vec<Complex<T>>) -> Self {
        Self {
            roots,
            iterations: 0,
            converged: true,
            max_correction: 0.0,
        }
    }
}

impl<T: RealScalar> Display for Solution<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.converged {
            "converged"
        } else {
            "not converged"
        };
        write!(f, "{} after {} iterations: [", status, self.iterations)?;
        for (i, root) in self.roots.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", complex_fmt(root))?;
        }
        write!(f, "]")
    }
}
