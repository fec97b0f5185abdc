use num::Complex;

use crate::{Poly, RealScalar};

/// The radius of a disk centered at the origin which contains all the roots,
/// `max(1, max_i |a_i| / |a_n|)`.
///
/// Returns [`None`] for the empty polynomial.
///
/// Needs a non-zero leading coefficient.
pub fn root_radius<T: RealScalar>(poly: &Poly<T>) -> Option<T> {
    let leading = poly.leading()?.abs();
    debug_assert!(!num::Zero::is_zero(&leading));
    let ratio = poly.max_abs_coefficient()? / leading;
    let one = T::one();
    Some(if ratio > one { ratio } else { one })
}

/// `n` points equally spaced on a circle of the given radius, the `k`-th
/// at angle `2 pi k / n`.
///
/// The angles are computed in machine precision and lifted with `ctx`. The
/// guesses only need to be distinct and enclose the roots, the iteration
/// takes care of the remaining digits.
///
/// Returns [`None`] if a point could not be represented in `T`.
pub fn initial_guesses_circle<T: RealScalar>(
    n: usize,
    radius: &T,
    ctx: &T::Context,
) -> Option<Vec<Complex<T>>> {
    #[allow(clippy::cast_precision_loss)]
    let n_f64 = n as f64;
    (0..n)
        .map(|k| {
            #[allow(clippy::cast_precision_loss)]
            let angle = (std::f64::consts::TAU * k as f64) / n_f64;
            let (sin, cos) = angle.sin_cos();
            Some(Complex::new(
                radius.clone() * T::from_f64_in(cos, ctx)?,
                radius.clone() * T::from_f64_in(sin, ctx)?,
            ))
        })
        .collect()
}
