use anyhow::anyhow;
use num::{Complex, Zero};

use crate::{
    poly::roots::{self, initial_guess, InvalidPolynomial, Solution},
    util::doc_macros::{errors_division_by_zero, errors_invalid_polynomial},
    Poly, RealScalar,
};

/// Iteration budget used when the caller does not set one.
pub const DEFAULT_MAX_ITER: usize = 1000;

/// Find all roots at once using the Durand-Kerner (Weierstrass) method.
///
/// Every sweep updates all estimates simultaneously: the correction of the
/// `i`-th estimate is
///
/// `P(x_i) / (a_n * prod_{j != i} (x_i - x_j))`
///
/// where every `x_j` is taken from the *start* of the sweep. Iteration stops
/// as soon as every correction of a sweep has magnitude within `tolerance`,
/// or when the iteration budget is exhausted, in which case the current
/// estimates are returned anyway.
///
/// The same algorithm runs at machine precision (`DurandKerner<f64>`) and at
/// arbitrary precision (`DurandKerner<BigFloat>`); the precision context is
/// part of the finder, see [`RealScalar::Context`].
///
/// # Examples
/// ```
/// use durand_kerner::{DurandKerner, Poly};
///
/// // x^3 - 6x^2 + 11x - 6 = (x - 1)(x - 2)(x - 3)
/// let p = Poly::from_descending(&[1.0, -6.0, 11.0, -6.0]);
/// let roots = DurandKerner::default().find_roots(&p).unwrap();
/// for expected in [1.0, 2.0, 3.0] {
///     assert!(roots.iter().any(|z| (z.re - expected).abs() < 1E-8 && z.im.abs() < 1E-8));
/// }
/// ```
#[derive(Clone, Debug)]
pub struct DurandKerner<T: RealScalar> {
    max_iter: usize,
    tolerance: T,
    negligible: T,
    context: T::Context,
}

impl Default for DurandKerner<f64> {
    fn default() -> Self {
        Self::new(())
    }
}

impl<T: RealScalar> DurandKerner<T> {
    /// A finder with the default tolerance and iteration budget of the
    /// precision described by `context`.
    #[must_use]
    pub fn new(context: T::Context) -> Self {
        let tolerance = T::default_tolerance(&context);
        Self {
            max_iter: DEFAULT_MAX_ITER,
            negligible: tolerance.clone(),
            tolerance,
            context,
        }
    }

    /// Maximum number of sweeps. Arbitrary precision finders raise this to
    /// their minimum budget, see [`RealScalar::min_iterations`].
    #[must_use]
    pub const fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Largest correction magnitude that counts as converged.
    #[must_use]
    pub fn tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Leading coefficients with magnitude up to this threshold are rejected.
    /// Defaults to the default tolerance of the precision.
    #[must_use]
    pub fn negligible(mut self, negligible: T) -> Self {
        self.negligible = negligible;
        self
    }

    #[must_use]
    pub const fn context(&self) -> &T::Context {
        &self.context
    }

    #[must_use]
    pub const fn get_tolerance(&self) -> &T {
        &self.tolerance
    }

    /// The number of sweeps that will actually be allowed
    #[must_use]
    pub fn iteration_budget(&self) -> usize {
        self.max_iter.max(T::min_iterations(&self.context))
    }

    /// Find all roots of `poly`, one per degree.
    ///
    /// A constant polynomial has no roots. A linear polynomial is solved in
    /// closed form without iterating.
    ///
    /// # Errors
    #[doc = errors_invalid_polynomial!()]
    #[doc = errors_division_by_zero!()]
    pub fn find_roots(&self, poly: &Poly<T>) -> roots::Result<T> {
        self.solve(poly).map(|s| s.roots)
    }

    /// Same as [`DurandKerner::find_roots`], but also reports how many sweeps
    /// were performed and whether the tolerance was met.
    ///
    /// # Errors
    #[doc = errors_invalid_polynomial!()]
    #[doc = errors_division_by_zero!()]
    pub fn solve(&self, poly: &Poly<T>) -> Result<Solution<T>, roots::Error> {
        let degree = poly.degree().ok_or(InvalidPolynomial::Empty)?;
        if degree == 0 {
            return Ok(Solution::closed_form(vec![]));
        }

        let leading = poly.leading().ok_or(InvalidPolynomial::Empty)?.clone();
        // also rejects NaN
        if !(leading.abs() > self.negligible) {
            return Err(InvalidPolynomial::NegligibleLeading.into());
        }

        if degree == 1 {
            return Ok(Solution::closed_form(vec![linear_root(poly)]));
        }

        let radius = initial_guess::root_radius(poly).ok_or(InvalidPolynomial::Empty)?;
        let mut points = initial_guess::initial_guesses_circle(degree, &radius, &self.context)
            .ok_or_else(|| anyhow!("initial guesses are not representable"))?;
        let mut corrections = vec![Complex::<T>::zero(); degree];

        let max_iter = self.iteration_budget();
        for i in 0..max_iter {
            let converged = self.sweep(poly, &leading, &mut points, &mut corrections, i)?;
            log::trace!("{points:?}");
            if converged {
                log::debug!("converged {{degree: {degree}, iterations: {}}}", i + 1);
                return Ok(Solution {
                    roots: points,
                    iterations: i + 1,
                    converged: true,
                    max_correction: largest_correction(&corrections),
                });
            }
        }

        let max_correction = largest_correction(&corrections);
        log::debug!(
            "did not converge {{degree: {degree}, max_iter: {max_iter}, max_correction: {max_correction:e}}}"
        );
        Ok(Solution {
            roots: points,
            iterations: max_iter,
            converged: false,
            max_correction,
        })
    }

    /// One synchronous sweep, all corrections are computed from the current
    /// `points` before any of them is updated.
    ///
    /// Returns `true` if every correction is within tolerance.
    fn sweep(
        &self,
        poly: &Poly<T>,
        leading: &T,
        points: &mut [Complex<T>],
        corrections: &mut [Complex<T>],
        iteration: usize,
    ) -> Result<bool, roots::Error> {
        debug_assert_eq!(points.len(), corrections.len());

        poly.eval_multiple(points, corrections);
        for (index, d) in corrections.iter_mut().enumerate() {
            let x = &points[index];
            let denominator = points
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != index)
                .fold(Complex::from(leading.clone()), |acc, (_, y)| {
                    acc * (x.clone() - y.clone())
                });
            if denominator.norm_sqr().is_zero() {
                return Err(roots::Error::DivisionByZero { iteration, index });
            }
            *d = d.clone() / denominator;
            if !(d.re.is_finite() && d.im.is_finite()) {
                return Err(roots::Error::DivisionByZero { iteration, index });
            }
        }

        for (y, d) in points.iter_mut().zip(corrections.iter()) {
            *y -= d.clone();
        }

        let tolerance_sqr = self.tolerance.clone() * self.tolerance.clone();
        Ok(corrections.iter().all(|d| d.norm_sqr() <= tolerance_sqr))
    }
}

fn largest_correction<T: RealScalar>(corrections: &[Complex<T>]) -> f64 {
    corrections
        .iter()
        .map(|d| d.norm_sqr().to_f64_lossy().sqrt())
        .fold(0.0, f64::max)
}

/// `-a_0 / a_1`, needs a non-zero `a_1`
fn linear_root<T: RealScalar>(poly: &Poly<T>) -> Complex<T> {
    debug_assert_eq!(poly.degree(), Some(1));
    let a0 = poly.0[0].clone();
    let a1 = poly.0[1].clone();
    Complex::from(-a0 / a1)
}

#[cfg(test)]
mod test {
    use num::{complex::Complex64, Zero};

    use super::DurandKerner;
    use crate::{
        poly::roots::{Error, InvalidPolynomial},
        util::{
            __testing::check_roots,
            big_float::{BigFloat, Context},
            complex::c_to_f64,
        },
        Poly,
    };

    #[test]
    fn degree_0() {
        let p = Poly::from_descending(&[3.0]);
        let roots = DurandKerner::default().find_roots(&p).unwrap();
        assert!(roots.is_empty());
    }

    #[test]
    fn empty_is_invalid() {
        let p = Poly::<f64>::from_descending(&[]);
        assert!(matches!(
            DurandKerner::default().find_roots(&p),
            Err(Error::InvalidPolynomial(InvalidPolynomial::Empty))
        ));
    }

    #[test]
    fn degree_1_closed_form() {
        let p = Poly::from_descending(&[2.0, -3.0]);
        // closed form does not care about the iteration budget or tolerance
        for finder in [
            DurandKerner::default(),
            DurandKerner::default().max_iter(0),
            DurandKerner::default().tolerance(-1.0),
        ] {
            let s = finder.solve(&p).unwrap();
            assert_eq!(s.roots, vec![Complex64::new(1.5, 0.0)]);
            assert_eq!(s.iterations, 0);
            assert!(s.converged);
        }
    }

    #[test]
    fn negligible_leading() {
        for coeffs in [[0.0, 1.0, 1.0], [1E-12, 1.0, 1.0], [f64::NAN, 1.0, 1.0]] {
            let p = Poly::from_descending(&coeffs);
            assert!(matches!(
                DurandKerner::default().find_roots(&p),
                Err(Error::InvalidPolynomial(InvalidPolynomial::NegligibleLeading))
            ));
        }
        // threshold can be tuned
        let p = Poly::from_descending(&[1E-12, 1.0]);
        let roots = DurandKerner::default()
            .negligible(1E-14)
            .find_roots(&p)
            .unwrap();
        assert_eq!(roots.len(), 1);
    }

    #[test]
    fn square_roots_of_unity() {
        let p = Poly::from_descending(&[1.0, 0.0, -1.0]);
        let roots = DurandKerner::default().find_roots(&p).unwrap();
        assert!(check_roots(
            roots,
            vec![Complex64::new(1.0, 0.0), Complex64::new(-1.0, 0.0)],
            1E-10
        ));
    }

    #[test]
    fn cube_roots_of_unity() {
        let p = Poly::from_descending(&[1.0, 0.0, 0.0, -1.0]);
        let roots = DurandKerner::default().find_roots(&p).unwrap();
        let h = 3f64.sqrt() / 2.0;
        assert!(check_roots(
            roots,
            vec![
                Complex64::new(1.0, 0.0),
                Complex64::new(-0.5, h),
                Complex64::new(-0.5, -h)
            ],
            1E-10
        ));
    }

    #[test]
    fn degree_3() {
        let p = Poly::from_descending(&[1.0, -6.0, 11.0, -6.0]);
        let s = DurandKerner::default().solve(&p).unwrap();
        assert!(s.converged);
        assert!(s.iterations > 1);
        assert!(check_roots(
            s.roots,
            vec![
                Complex64::new(1.0, 0.0),
                Complex64::new(2.0, 0.0),
                Complex64::new(3.0, 0.0)
            ],
            1E-9
        ));
    }

    #[test]
    fn degree_4_complex() {
        // (x^2 + 1)(x^2 - 4x + 5), roots +-i and 2+-i
        let p = Poly::from_descending(&[1.0, -4.0, 6.0, -4.0, 5.0]);
        let roots = DurandKerner::default().tolerance(1E-12).find_roots(&p).unwrap();
        assert!(check_roots(
            roots,
            vec![
                Complex64::new(0.0, 1.0),
                Complex64::new(0.0, -1.0),
                Complex64::new(2.0, 1.0),
                Complex64::new(2.0, -1.0)
            ],
            1E-9
        ));
    }

    #[test]
    fn scaled_leading_coefficient() {
        // 4 (x - 0.5)(x + 0.25) = 4x^2 - x - 0.5
        let p = Poly::from_descending(&[4.0, -1.0, -0.5]);
        let roots = DurandKerner::default().find_roots(&p).unwrap();
        assert!(check_roots(
            roots,
            vec![Complex64::new(0.5, 0.0), Complex64::new(-0.25, 0.0)],
            1E-10
        ));
    }

    #[test]
    fn idempotent() {
        let p = Poly::from_descending(&[1.0, 2.0, -3.0, 0.5, 7.0]);
        let finder = DurandKerner::default();
        let first = finder.solve(&p).unwrap();
        let second = finder.solve(&p).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn exhausted_budget_returns_estimates() {
        let p = Poly::from_descending(&[1.0, -6.0, 11.0, -6.0]);
        let s = DurandKerner::default().max_iter(1).solve(&p).unwrap();
        assert!(!s.converged);
        assert_eq!(s.iterations, 1);
        assert_eq!(s.roots.len(), 3);
        assert!(s.max_correction > 1E-10);
        let s = DurandKerner::default().max_iter(0).solve(&p).unwrap();
        assert!(!s.converged);
        assert_eq!(s.iterations, 0);

        let s = DurandKerner::default().solve(&p).unwrap();
        assert!(s.converged);
        assert!(s.max_correction <= 1E-10);
    }

    #[test]
    fn coinciding_estimates() {
        let p = Poly::from_descending(&[1.0, 0.0, -1.0]);
        let finder = DurandKerner::default();
        let mut points = vec![Complex64::new(0.5, 0.5), Complex64::new(0.5, 0.5)];
        let mut corrections = vec![Complex64::zero(); 2];
        let res = finder.sweep(&p, &1.0, &mut points, &mut corrections, 7);
        assert!(matches!(
            res,
            Err(Error::DivisionByZero {
                iteration: 7,
                index: 0
            })
        ));
    }

    #[test]
    fn overflowing_correction() {
        let p = Poly::from_descending(&[1.0, 0.0, -1.0]);
        let finder = DurandKerner::default();
        let mut points = vec![
            Complex64::new(1E300, 0.0),
            Complex64::new(1E300 * (1.0 + 1E-15), 0.0),
        ];
        let mut corrections = vec![Complex64::zero(); 2];
        let res = finder.sweep(&p, &1.0, &mut points, &mut corrections, 0);
        assert!(matches!(res, Err(Error::DivisionByZero { .. })));
    }

    #[test]
    fn arbitrary_precision_matches_machine() {
        let coeffs = [1.0, -6.0, 11.0, -6.0];
        let machine = DurandKerner::default()
            .find_roots(&Poly::from_descending(&coeffs))
            .unwrap();

        let ctx = Context::new(50);
        let p = Poly::<BigFloat>::from_f64_descending(&coeffs, &ctx).unwrap();
        let finder = DurandKerner::<BigFloat>::new(ctx);
        assert_eq!(finder.iteration_budget(), 1000);
        let s = finder.solve(&p).unwrap();
        assert!(s.converged);
        let arbitrary = s.roots.iter().map(c_to_f64).collect::<Vec<_>>();
        assert!(check_roots(arbitrary.clone(), machine, 1E-9));
        assert!(check_roots(
            arbitrary,
            vec![
                Complex64::new(1.0, 0.0),
                Complex64::new(2.0, 0.0),
                Complex64::new(3.0, 0.0)
            ],
            1E-14
        ));

        // the digits beyond machine precision are correct too
        let three = s
            .roots
            .iter()
            .find(|z| z.re > ctx.from_i64(2) + ctx.parse("0.5").unwrap())
            .unwrap();
        let err = (three.re.clone() - ctx.from_i64(3)).abs();
        assert!(err < ctx.pow10(-40), "{err}");
    }

    #[test]
    fn arbitrary_precision_budget_is_raised() {
        let finder = DurandKerner::<BigFloat>::new(Context::new(80)).max_iter(10);
        assert_eq!(finder.iteration_budget(), 1600);
        let finder = DurandKerner::<BigFloat>::new(Context::new(5)).max_iter(500);
        assert_eq!(finder.iteration_budget(), 500);
        assert_eq!(DurandKerner::<f64>::default().max_iter(10).iteration_budget(), 10);
    }

    #[test]
    fn arbitrary_precision_linear() {
        let ctx = Context::new(30);
        let p = Poly::<BigFloat>::from_f64_descending(&[3.0, 1.0], &ctx).unwrap();
        let roots = DurandKerner::<BigFloat>::new(ctx).find_roots(&p).unwrap();
        assert_eq!(roots.len(), 1);
        let expected = -(ctx.from_i64(1) / ctx.from_i64(3));
        assert_eq!(roots[0].re, expected);
        assert!(roots[0].im.is_zero());
    }
}
