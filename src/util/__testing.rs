//! Testing utilities, do not depend on any of these in production!

use fastrand::Rng;
use itertools::Itertools;
use num::{complex::Complex64, Zero};

use crate::Poly;

/// Seeded stream of uniformly distributed reals in `[min, max)`
pub struct RandStreamR64 {
    state: Rng,
    min: f64,
    max: f64,
}

impl RandStreamR64 {
    #[must_use]
    pub fn new(seed: u64, min: f64, max: f64) -> Self {
        assert!(min <= max, "minimum should be smaller or equal to maximum");
        Self {
            state: Rng::with_seed(seed),
            min,
            max,
        }
    }
}

impl Iterator for RandStreamR64 {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.state.f64().mul_add(self.max - self.min, self.min))
    }
}

/// Seeded stream of complex numbers uniformly distributed in a rectangle
pub struct RandStreamC64Cartesian {
    re: RandStreamR64,
    im: RandStreamR64,
}

impl RandStreamC64Cartesian {
    #[must_use]
    pub fn new(seed: u64, min_re: f64, max_re: f64, min_im: f64, max_im: f64) -> Self {
        Self {
            re: RandStreamR64::new(seed, min_re, max_re),
            im: RandStreamR64::new(seed.wrapping_add(1), min_im, max_im),
        }
    }
}

impl Iterator for RandStreamC64Cartesian {
    type Item = Complex64;

    fn next(&mut self) -> Option<Self::Item> {
        Some(Complex64::new(self.re.next()?, self.im.next()?))
    }
}

/// Draw `n` roots from `stream`, skipping any that would lie closer than
/// `min_spacing` to an already accepted one.
///
/// # Panics
/// If the stream runs dry.
pub fn separated_roots(
    stream: &mut impl Iterator<Item = Complex64>,
    n: usize,
    min_spacing: f64,
) -> Vec<Complex64> {
    let mut roots: Vec<Complex64> = Vec::with_capacity(n);
    while roots.len() < n {
        let r = stream.next().expect("rng stream should be infinite");
        if roots.iter().all(|q| (q - r).norm() >= min_spacing) {
            roots.push(r);
        }
    }
    roots
}

/// Like [`separated_roots`], but every root comes with its conjugate, so the
/// resulting polynomial has real coefficients. Roots closer than
/// `min_spacing` to the real axis are snapped onto it and not paired.
///
/// # Panics
/// If the stream runs dry.
pub fn separated_conj_roots(
    stream: &mut impl Iterator<Item = Complex64>,
    n: usize,
    min_spacing: f64,
) -> Vec<Complex64> {
    let mut roots: Vec<Complex64> = Vec::with_capacity(n);
    while roots.len() < n {
        let mut r = stream.next().expect("rng stream should be infinite");
        let real = r.im.abs() < min_spacing;
        if real {
            r.im = 0.0;
        } else if roots.len() + 2 > n {
            continue;
        }
        if roots.iter().all(|q| (q - r).norm() >= min_spacing) {
            roots.push(r);
            if !real {
                roots.push(r.conj());
            }
        }
    }
    roots
}

/// `scale * prod (x - r)`, the imaginary parts of the coefficients are
/// dropped, so `roots` must be closed under conjugation.
#[must_use]
pub fn poly_from_roots(roots: &[Complex64], scale: f64) -> Poly<f64> {
    let mut coeffs = vec![Complex64::new(scale, 0.0)];
    for r in roots {
        // multiply by (x - r), coefficients are ascending
        let mut next = vec![Complex64::zero(); coeffs.len() + 1];
        for (i, c) in coeffs.iter().enumerate() {
            next[i + 1] += c;
            next[i] -= c * r;
        }
        coeffs = next;
    }
    Poly::from_ascending(&coeffs.iter().map(|c| c.re).collect_vec())
}

/// Check that all roots have been found
#[must_use]
pub fn check_roots(roots1: Vec<Complex64>, mut roots2: Vec<Complex64>, tol: f64) -> bool {
    if roots1.len() != roots2.len() {
        return false;
    }

    for r1 in roots1 {
        let mut best_idx = 0;
        let mut best_d = f64::MAX;
        for (i, r2) in roots2.iter().enumerate() {
            let d = (r1 - r2).norm();
            if d < best_d {
                best_idx = i;
                best_d = d;
            }
        }
        if best_d > tol {
            return false;
        }
        roots2.remove(best_idx);
    }
    true
}
