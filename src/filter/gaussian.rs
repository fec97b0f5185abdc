use anyhow::anyhow;
use num::complex::Complex64;

use super::{try_filter_zeros, zeros_or_empty, FilterZeros, Window, ZeroTolerances};
use crate::{poly::roots, precision::Precision};

/// Shortest supported impulse response
pub const MIN_TAPS: usize = 3;

/// Longest supported impulse response
pub const MAX_TAPS: usize = 31;

/// Samples of a normalized Gaussian, `exp(-n^2 / (2 sigma^2))` for
/// `n = -N/2 ..= N/2`, with the window applied and scaled to unit sum.
///
/// `taps` is clamped to [`MIN_TAPS`]`..=`[`MAX_TAPS`]. Even tap counts yield
/// `taps + 1` samples, as the response is always symmetric around its center
/// sample.
///
/// ```
/// use durand_kerner::filter::{gaussian_impulse_response, Window};
///
/// let h = gaussian_impulse_response(1.0, 5, Window::Hann);
/// assert_eq!(h.len(), 5);
/// assert!((h.iter().sum::<f64>() - 1.0).abs() < 1E-15);
/// ```
#[must_use]
pub fn gaussian_impulse_response(sigma: f64, taps: usize, window: Window) -> Vec<f64> {
    let taps = taps.clamp(MIN_TAPS, MAX_TAPS);
    let half = taps / 2;
    let len = 2 * half + 1;
    let two_sigma_sqr = 2.0 * sigma * sigma;

    #[allow(clippy::cast_precision_loss)]
    let samples: Vec<f64> = (0..len)
        .map(|i| {
            let n = i.abs_diff(half) as f64;
            (-(n * n) / two_sigma_sqr).exp() * window.weight(i, taps)
        })
        .collect();

    let sum: f64 = samples.iter().sum();
    samples.into_iter().map(|h| h / sum).collect()
}

/// Zeros of the transfer function of a Hann windowed Gaussian filter, see
/// [`try_filter_zeros`].
///
/// # Errors
/// - `Other`: `sigma` is not a positive number.
///
/// Otherwise any error of the root finder is passed on.
pub fn try_gaussian_zeros(
    taps: usize,
    sigma: f64,
    precision: Precision,
) -> Result<FilterZeros, roots::Error> {
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(anyhow!("sigma must be a positive number, got {sigma}").into());
    }
    let coefficients = gaussian_impulse_response(sigma, taps, Window::Hann);
    try_filter_zeros(
        &coefficients,
        precision,
        &ZeroTolerances::for_precision(precision),
    )
}

/// Best effort version of [`try_gaussian_zeros`]: failures are logged and
/// yield no zeros.
///
/// # Examples
/// ```
/// use durand_kerner::{filter::calculate_gaussian_zeros, Precision};
///
/// let zeros = calculate_gaussian_zeros(7, 1.0, Precision::Machine);
/// assert_eq!(zeros.len(), 6);
/// assert!(zeros.iter().all(|z| z.re < 0.0 && z.im == 0.0));
/// ```
#[must_use]
pub fn calculate_gaussian_zeros(taps: usize, sigma: f64, precision: Precision) -> Vec<Complex64> {
    zeros_or_empty(try_gaussian_zeros(taps, sigma, precision))
}

#[cfg(test)]
mod test {
    use num::complex::Complex64;

    use super::{calculate_gaussian_zeros, gaussian_impulse_response, try_gaussian_zeros};
    use crate::{filter::Window, poly::roots::Error, precision::Precision};

    #[test]
    fn impulse_response_is_normalized() {
        for window in [Window::None, Window::Hann] {
            for taps in [3, 7, 15, 31] {
                let h = gaussian_impulse_response(1.5, taps, window);
                assert_eq!(h.len(), taps);
                assert!((h.iter().sum::<f64>() - 1.0).abs() < 1E-14);
                for i in 0..taps {
                    assert!(h[i] > 0.0);
                    assert!((h[i] - h[taps - 1 - i]).abs() < 1E-15);
                }
                // peak in the middle
                let mid = h[taps / 2];
                assert!(h.iter().all(|x| *x <= mid));
            }
        }
    }

    #[test]
    fn impulse_response_values() {
        let h = gaussian_impulse_response(1.0, 3, Window::None);
        let e = (-0.5f64).exp();
        let sum = 1.0 + 2.0 * e;
        assert!((h[0] - e / sum).abs() < 1E-15);
        assert!((h[1] - 1.0 / sum).abs() < 1E-15);
    }

    #[test]
    fn taps_are_clamped() {
        assert_eq!(gaussian_impulse_response(1.0, 1, Window::None).len(), 3);
        assert_eq!(gaussian_impulse_response(1.0, 0, Window::Hann).len(), 3);
        assert_eq!(gaussian_impulse_response(1.0, 99, Window::None).len(), 31);
        assert_eq!(gaussian_impulse_response(1.0, 8, Window::None).len(), 9);
    }

    /// The transfer function of a symmetric response is palindromic, so the
    /// zeros come in reciprocal pairs.
    fn assert_reciprocal_pairs(zeros: &[Complex64]) {
        for z in zeros {
            let r = z.inv();
            assert!(
                zeros.iter().any(|w| (w - r).norm() < 1E-6 * r.norm().max(1.0)),
                "{r} missing from {zeros:?}"
            );
        }
    }

    #[test]
    fn seven_taps_machine() {
        let result = try_gaussian_zeros(7, 1.0, Precision::Machine).unwrap();
        assert!(result.converged);
        assert_eq!(result.degree, 6);
        assert_eq!((result.removed_leading, result.removed_constant), (0, 0));
        assert_eq!(result.zeros.len(), 6);
        for z in &result.zeros {
            assert!(z.re < 0.0);
            assert_eq!(z.im, 0.0);
        }
        assert_reciprocal_pairs(&result.zeros);
        let largest = result.zeros.iter().map(|z| z.norm()).fold(0.0, f64::max);
        assert!((largest - 32.3292).abs() < 1E-3, "{largest}");
    }

    #[test]
    fn seven_taps_arbitrary() {
        let machine = calculate_gaussian_zeros(7, 1.0, Precision::Machine);
        let arbitrary = calculate_gaussian_zeros(7, 1.0, Precision::arbitrary(50));
        assert_eq!(arbitrary.len(), 6);
        for z in &arbitrary {
            assert_eq!(z.im, 0.0);
            assert!(
                machine.iter().any(|w| ((w - z).norm() / z.norm()) < 1E-8),
                "{z} missing from {machine:?}"
            );
        }
    }

    #[test]
    fn complex_zeros_are_halved() {
        // 2 real zeros and 3 conjugate pairs
        let result = try_gaussian_zeros(9, 2.0, Precision::Machine).unwrap();
        assert_eq!(result.degree, 8);
        assert_eq!(result.zeros.len(), 5);
        assert_eq!(result.zeros.iter().filter(|z| z.im == 0.0).count(), 2);
        assert!(result.zeros.iter().all(|z| z.im >= 0.0));
    }

    #[test]
    fn narrow_gaussian_is_trimmed() {
        // the outermost samples are below the trimming tolerance
        let result = try_gaussian_zeros(7, 0.5, Precision::Machine).unwrap();
        assert_eq!((result.removed_leading, result.removed_constant), (1, 1));
        assert_eq!(result.degree, 4);
        assert_eq!(result.zeros.len(), 4);
        assert_reciprocal_pairs(&result.zeros);

        // nothing is negligible at 50 digits
        let result = try_gaussian_zeros(7, 0.5, Precision::arbitrary(50)).unwrap();
        assert_eq!((result.removed_leading, result.removed_constant), (0, 0));
        assert_eq!(result.degree, 6);
    }

    #[test]
    fn invalid_sigma() {
        for sigma in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                try_gaussian_zeros(7, sigma, Precision::Machine),
                Err(Error::Other(_))
            ));
            assert!(calculate_gaussian_zeros(7, sigma, Precision::Machine).is_empty());
        }
    }
}
