use std::fmt::Display;

use itertools::Itertools;
use num::{Complex, Zero};

use crate::RealScalar;

pub mod roots;

/// A polynomial with real coefficients.
///
/// Coefficients are stored in ascending order of degree, index `i` holds the
/// coefficient of `x^i`. Unlike most polynomial containers, leading zeros
/// are *not* trimmed on construction: a negligible leading coefficient means
/// the caller handed in a malformed polynomial, and the root finder reports
/// it instead of silently lowering the degree.
#[derive(Clone, Debug, PartialEq)]
pub struct Poly<T: RealScalar>(pub(crate) Vec<T>);

impl<T: RealScalar> Poly<T> {
    /// Coefficients from the constant term up, `[a_0, a_1, ..., a_n]`.
    #[must_use]
    pub fn from_ascending(coeffs: &[T]) -> Self {
        Self(coeffs.to_vec())
    }

    /// Coefficients from the leading term down, `[a_n, ..., a_1, a_0]`.
    ///
    /// # Examples
    /// ```
    /// use durand_kerner::Poly;
    ///
    /// let p = Poly::from_descending(&[1.0, 0.0, -1.0]);
    /// assert_eq!(p.as_slice(), &[-1.0, 0.0, 1.0]);
    /// ```
    #[must_use]
    pub fn from_descending(coeffs: &[T]) -> Self {
        Self(coeffs.iter().rev().cloned().collect_vec())
    }

    /// Lift descending machine coefficients into the scalar type of a
    /// precision context.
    ///
    /// Returns [`None`] if any coefficient is not finite.
    #[must_use]
    pub fn from_f64_descending(coeffs: &[f64], ctx: &T::Context) -> Option<Self> {
        coeffs
            .iter()
            .rev()
            .map(|c| T::from_f64_in(*c, ctx))
            .collect::<Option<Vec<_>>>()
            .map(Self)
    }

    /// Coefficients in ascending order of degree
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        self.0.as_slice()
    }

    /// Iterate over coefficients, from the least significant
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    /// Coefficients in descending order of degree
    #[must_use]
    pub fn to_descending(&self) -> Vec<T> {
        self.0.iter().rev().cloned().collect_vec()
    }

    /// Number of coefficients, including leading zeros
    #[must_use]
    pub fn len_raw(&self) -> usize {
        self.0.len()
    }

    /// The degree, counting leading zeros as regular coefficients.
    ///
    /// The polynomial with no coefficients has no degree.
    #[must_use]
    pub fn degree(&self) -> Option<usize> {
        self.len_raw().checked_sub(1)
    }

    /// Coefficient of the highest power
    #[must_use]
    pub fn leading(&self) -> Option<&T> {
        self.0.last()
    }

    /// Coefficient of `x^0`
    #[must_use]
    pub fn constant(&self) -> Option<&T> {
        self.0.first()
    }

    /// Largest coefficient magnitude
    #[must_use]
    pub fn max_abs_coefficient(&self) -> Option<T> {
        self.0
            .iter()
            .map(T::abs)
            .reduce(|acc, c| if c > acc { c } else { acc })
    }

    /// Evaluate the polynomial at a complex point using Horner's method.
    ///
    /// The polynomial with no coefficients evaluates to zero everywhere.
    ///
    /// ```
    /// use durand_kerner::Poly;
    /// use num::Complex;
    ///
    /// // x^2 + 1
    /// let p = Poly::from_descending(&[1.0, 0.0, 1.0]);
    /// assert_eq!(p.eval(Complex::new(0.0, 1.0)), Complex::new(0.0, 0.0));
    /// assert_eq!(p.eval(Complex::new(2.0, 0.0)), Complex::new(5.0, 0.0));
    /// ```
    #[must_use]
    pub fn eval(&self, x: Complex<T>) -> Complex<T> {
        self.0
            .iter()
            .rev()
            .fold(Complex::<T>::zero(), |acc, c| acc * x.clone() + c.clone())
    }

    /// Evaluate at each point in `points` and write the results to `out`
    ///
    /// Needs `points.len() == out.len()`.
    pub fn eval_multiple(&self, points: &[Complex<T>], out: &mut [Complex<T>]) {
        debug_assert_eq!(points.len(), out.len());
        for (y, x) in out.iter_mut().zip(points) {
            *y = self.eval(x.clone());
        }
    }
}

impl<'a, T: RealScalar> IntoIterator for &'a Poly<T> {
    type IntoIter = std::slice::Iter<'a, T>;
    type Item = &'a T;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: RealScalar> Display for Poly<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut iter = self.iter().enumerate();
        if let Some((_, c)) = iter.next() {
            write!(f, "{c}")?;
        } else {
            return Ok(());
        }
        for (i, c) in iter {
            write!(f, " + {c}*x^{i}")?;
        }
        Ok(())
    }
}
