// src/processing/differentiators.rs
//! Numerical differentiators built on the generic recursive filters
//!
//! Every stencil is a numerator table for unit sample spacing, newest sample
//! first. Fixed-rate differentiators divide it by `timestep^order`; the
//! irregular-spacing ("ISD") tables are meant for [`TimeVaryingFilter`], which
//! divides each tap by its own elapsed time at every step.
//!
//! Stencil families:
//! - central differences (3, 5, 7, 9 points)
//! - low-noise Lanczos (odd N ≥ 3) and super low-noise Lanczos (7, 9, 11 points)
//! - one-sided noise-robust (N ≥ 2) and hybrid noise-robust (4 to 11 points)
//! - centered noise-robust, tangency 2 (odd N ≥ 3) and tangency 4 (7, 9, 11 points)
//! - second order centered noise-robust (odd N ≥ 5)

use crate::error::{FilterError, FilterResult};
use crate::processing::coefficients::FilterType;
use crate::processing::filters::{DigitalFilter, TimeVaryingFilter};
use crate::utils::{constant, from_usize, Sample};
use tracing::debug;

fn scaled<F: Sample>(numerators: &[f64], denominator: f64) -> Vec<F> {
    numerators.iter().map(|&n| constant::<F>(n / denominator)).collect()
}

fn unsupported(points: usize) -> FilterError {
    FilterError::BadOrderSize { order: points }
}

fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

/// Central difference stencils.
pub fn central_difference<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    match points {
        3 => Ok(scaled(&[1.0, 0.0, -1.0], 2.0)),
        5 => Ok(scaled(&[-1.0, 8.0, 0.0, -8.0, 1.0], 12.0)),
        7 => Ok(scaled(&[1.0, -9.0, 45.0, 0.0, -45.0, 9.0, -1.0], 60.0)),
        9 => Ok(scaled(
            &[-3.0, 32.0, -168.0, 672.0, 0.0, -672.0, 168.0, -32.0, 3.0],
            840.0,
        )),
        _ => Err(unsupported(points)),
    }
}

/// Low-noise Lanczos stencil, `points` odd and at least 3.
pub fn low_noise_lanczos<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    if points < 3 || points % 2 == 0 {
        return Err(unsupported(points));
    }
    let m = (points - 1) / 2;
    let den = (m * (m + 1) * (2 * m + 1)) as f64;
    let mut v = vec![F::zero(); points];
    for k in 0..m {
        v[k] = constant(3.0 * (m - k) as f64 / den);
        v[points - 1 - k] = -v[k];
    }
    Ok(v)
}

/// Super low-noise Lanczos stencils.
pub fn super_low_noise_lanczos<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    match points {
        7 => Ok(scaled(&[-22.0, 67.0, 58.0, 0.0, -58.0, -67.0, 22.0], 252.0)),
        9 => Ok(scaled(
            &[-86.0, 142.0, 193.0, 126.0, 0.0, -126.0, -193.0, -142.0, 86.0],
            1188.0,
        )),
        11 => Ok(scaled(
            &[-300.0, 294.0, 532.0, 503.0, 296.0, 0.0, -296.0, -503.0, -532.0, -294.0, 300.0],
            5148.0,
        )),
        _ => Err(unsupported(points)),
    }
}

/// One-sided noise-robust stencil, `points ≥ 2`.
pub fn noise_robust_backward<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    if points < 2 {
        return Err(unsupported(points));
    }
    let n = points - 2;
    let m = points / 2;
    let mut v = vec![0.0; points];
    v[0] = 1.0;
    v[m] = 0.0;
    v[points - 1] = -1.0;
    for i in 1..m {
        v[i] = binomial(n, i) - binomial(n, i - 1);
        v[points - 1 - i] = -v[i];
    }
    Ok(scaled(&v, 2.0_f64.powi(n as i32)))
}

/// One-sided hybrid noise-robust stencils.
pub fn hybrid_noise_robust_backward<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    match points {
        4 => Ok(scaled(&[2.0, -1.0, -2.0, 1.0], 2.0)),
        5 => Ok(scaled(&[7.0, 1.0, -10.0, -1.0, 3.0], 10.0)),
        6 => Ok(scaled(&[16.0, 1.0, -10.0, -10.0, -6.0, 9.0], 28.0)),
        7 => Ok(scaled(&[12.0, 5.0, -8.0, -6.0, -10.0, 1.0, 6.0], 28.0)),
        8 => Ok(scaled(&[22.0, 7.0, -6.0, -11.0, -14.0, -9.0, -2.0, 13.0], 60.0)),
        9 => Ok(scaled(
            &[52.0, 29.0, -14.0, -17.0, -40.0, -23.0, -26.0, 11.0, 28.0],
            180.0,
        )),
        10 => Ok(scaled(
            &[56.0, 26.0, -2.0, -17.0, -30.0, -30.0, -28.0, -13.0, 4.0, 34.0],
            220.0,
        )),
        11 => Ok(scaled(
            &[320.0, 206.0, -8.0, -47.0, -186.0, -150.0, -214.0, -103.0, -92.0, 94.0, 180.0],
            1540.0,
        )),
        _ => Err(unsupported(points)),
    }
}

/// Centered noise-robust stencil with tangency 2; same weights as the one-sided one.
pub fn noise_robust_centered<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    if points % 2 == 0 {
        return Err(FilterError::BadCenteringLength { length: points });
    }
    noise_robust_backward(points)
}

/// Centered noise-robust stencils with tangency 4.
pub fn noise_robust_centered_4<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    match points {
        7 => Ok(scaled(&[-5.0, 12.0, 39.0, 0.0, -39.0, -12.0, 5.0], 96.0)),
        9 => Ok(scaled(&[-2.0, -1.0, 16.0, 27.0, 0.0, -27.0, -16.0, 1.0, 2.0], 96.0)),
        11 => Ok(scaled(
            &[-11.0, -32.0, 39.0, 256.0, 322.0, 0.0, -322.0, -256.0, -39.0, 32.0, 11.0],
            1536.0,
        )),
        _ => Err(unsupported(points)),
    }
}

/// Base weights `s_0..s_M` of the second order noise-robust stencil.
fn second_order_base(points: usize) -> Vec<f64> {
    let m = (points - 1) / 2;
    let n = points as f64;
    // two trailing zeros stand for s_{M+1} and s_{M+2}
    let mut s = vec![0.0; m + 3];
    s[m] = 1.0;
    for k in (0..m).rev() {
        let kf = k as f64;
        s[k] = ((2.0 * n - 10.0) * s[k + 1] - (n + 2.0 * kf + 3.0) * s[k + 2]) / (n - 2.0 * kf - 1.0);
    }
    s.truncate(m + 1);
    s
}

fn check_second_order(points: usize) -> FilterResult<()> {
    if points < 5 {
        return Err(unsupported(points));
    }
    if points % 2 == 0 {
        return Err(FilterError::BadCenteringLength { length: points });
    }
    Ok(())
}

/// Second order centered noise-robust stencil, `points` odd and at least 5.
pub fn second_order_noise_robust<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    check_second_order(points)?;
    let m = (points - 1) / 2;
    let s = second_order_base(points);
    let mut v = vec![0.0; points];
    v[m] = s[0];
    for k in 1..=m {
        v[m + k] = s[k];
        v[m - k] = s[k];
    }
    Ok(scaled(&v, 2.0_f64.powi(points as i32 - 3)))
}

/// Irregular-spacing version of a one-sided stencil: `k·c_k`.
pub fn backward_isd<F: Sample>(coeffs: &[F]) -> Vec<F> {
    coeffs
        .iter()
        .enumerate()
        .map(|(k, &c)| from_usize::<F>(k) * c)
        .collect()
}

/// Irregular-spacing version of a centered stencil: `2k·c_{M±k}`, center 0.
pub fn centered_isd<F: Sample>(coeffs: &[F]) -> FilterResult<Vec<F>> {
    if coeffs.len() % 2 == 0 {
        return Err(FilterError::BadCenteringLength { length: coeffs.len() });
    }
    let m = (coeffs.len() - 1) / 2;
    let mut v = vec![F::zero(); coeffs.len()];
    for k in 1..=m {
        let weight = from_usize::<F>(2 * k);
        v[m - k] = weight * coeffs[m - k];
        v[m + k] = weight * coeffs[m + k];
    }
    Ok(v)
}

/// Irregular-spacing second order stencil: `4k²·s_k`, center `-2·Σ`.
pub fn second_order_isd<F: Sample>(points: usize) -> FilterResult<Vec<F>> {
    check_second_order(points)?;
    let m = (points - 1) / 2;
    let s = second_order_base(points);
    let mut v = vec![0.0; points];
    for k in 1..=m {
        let alpha = 4.0 * (k * k) as f64 * s[k];
        v[m] -= 2.0 * alpha;
        v[m + k] = alpha;
        v[m - k] = alpha;
    }
    Ok(scaled(&v, 2.0_f64.powi(points as i32 - 3)))
}

fn check_timestep<F: Sample>(timestep: F) -> FilterResult<()> {
    if timestep > F::zero() {
        Ok(())
    } else {
        Err(FilterError::BadTimestep {
            timestep: timestep.to_f64().unwrap_or(f64::NAN),
        })
    }
}

fn fixed_rate<F: Sample>(
    coeffs: &[F],
    timestep: F,
    derivative_order: usize,
    filter_type: FilterType,
) -> FilterResult<DigitalFilter<F>> {
    if derivative_order == 0 {
        return Err(FilterError::BadOrderSize { order: 0 });
    }
    check_timestep(timestep)?;
    let order = i32::try_from(derivative_order).map_err(|_| FilterError::BadOrderSize { order: derivative_order })?;
    let scale = timestep.powi(order);
    let b: Vec<F> = coeffs.iter().map(|&c| c / scale).collect();

    debug!(points = coeffs.len(), derivative_order, ?filter_type, "built differentiator");
    DigitalFilter::with_type(&[F::one()], &b, filter_type)
}

/// Causal differentiator of order `derivative_order` for samples `timestep` apart.
pub fn backward_differentiator<F: Sample>(
    coeffs: &[F],
    timestep: F,
    derivative_order: usize,
) -> FilterResult<DigitalFilter<F>> {
    fixed_rate(coeffs, timestep, derivative_order, FilterType::Backward)
}

/// Centered differentiator, its output lags the input by `(len - 1) / 2` samples.
pub fn centered_differentiator<F: Sample>(
    coeffs: &[F],
    timestep: F,
    derivative_order: usize,
) -> FilterResult<DigitalFilter<F>> {
    fixed_rate(coeffs, timestep, derivative_order, FilterType::Centered)
}

/// Differentiator for irregularly sampled data, fed with `(time, value)` pairs.
///
/// `coeffs` should be an ISD table ([`backward_isd`], [`centered_isd`],
/// [`second_order_isd`]).
pub fn time_varying_differentiator<F: Sample>(
    coeffs: &[F],
    filter_type: FilterType,
    derivative_order: usize,
) -> FilterResult<TimeVaryingFilter<F>> {
    TimeVaryingFilter::new(&[F::one()], coeffs, filter_type, derivative_order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn check(coeffs: &[f64], numerators: &[f64], denominator: f64) {
        assert_eq!(coeffs.len(), numerators.len());
        for (c, n) in coeffs.iter().zip(numerators) {
            assert_approx_eq!(*c, n / denominator, 5.0 * f64::EPSILON);
        }
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 2), 6.0);
        assert_eq!(binomial(9, 0), 1.0);
        assert_eq!(binomial(9, 9), 1.0);
        assert_eq!(binomial(3, 4), 0.0);
    }

    #[test]
    fn test_low_noise_lanczos() {
        check(&low_noise_lanczos(5).unwrap(), &[2.0, 1.0, 0.0, -1.0, -2.0], 10.0);
        check(&low_noise_lanczos(7).unwrap(), &[3.0, 2.0, 1.0, 0.0, -1.0, -2.0, -3.0], 28.0);
        check(
            &low_noise_lanczos(11).unwrap(),
            &[5.0, 4.0, 3.0, 2.0, 1.0, 0.0, -1.0, -2.0, -3.0, -4.0, -5.0],
            110.0,
        );
        assert!(low_noise_lanczos::<f64>(4).is_err());
    }

    #[test]
    fn test_noise_robust_backward() {
        check(&noise_robust_backward(2).unwrap(), &[1.0, -1.0], 1.0);
        check(&noise_robust_backward(3).unwrap(), &[1.0, 0.0, -1.0], 2.0);
        check(&noise_robust_backward(4).unwrap(), &[1.0, 1.0, -1.0, -1.0], 4.0);
        check(&noise_robust_backward(5).unwrap(), &[1.0, 2.0, 0.0, -2.0, -1.0], 8.0);
        check(&noise_robust_backward(6).unwrap(), &[1.0, 3.0, 2.0, -2.0, -3.0, -1.0], 16.0);
        check(&noise_robust_backward(7).unwrap(), &[1.0, 4.0, 5.0, 0.0, -5.0, -4.0, -1.0], 32.0);
        check(
            &noise_robust_backward(8).unwrap(),
            &[1.0, 5.0, 9.0, 5.0, -5.0, -9.0, -5.0, -1.0],
            64.0,
        );
        check(
            &noise_robust_backward(11).unwrap(),
            &[1.0, 8.0, 27.0, 48.0, 42.0, 0.0, -42.0, -48.0, -27.0, -8.0, -1.0],
            512.0,
        );
        assert!(noise_robust_backward::<f64>(1).is_err());
        assert!(hybrid_noise_robust_backward::<f64>(16).is_err());
    }

    #[test]
    fn test_second_order_stencils() {
        check(&second_order_noise_robust(5).unwrap(), &[1.0, 0.0, -2.0, 0.0, 1.0], 4.0);
        check(
            &second_order_noise_robust(7).unwrap(),
            &[1.0, 2.0, -1.0, -4.0, -1.0, 2.0, 1.0],
            16.0,
        );
        check(&second_order_isd(5).unwrap(), &[16.0, 0.0, -32.0, 0.0, 16.0], 4.0);
        assert!(second_order_noise_robust::<f64>(3).is_err());
        assert!(matches!(
            second_order_isd::<f64>(6),
            Err(FilterError::BadCenteringLength { length: 6 })
        ));
    }

    #[test]
    fn test_first_order_stencils_are_consistent() {
        // Σ c_k = 0 and Σ k·c_k = -1 for a first derivative, newest sample first
        let tables: Vec<Vec<f64>> = vec![
            central_difference(3).unwrap(),
            central_difference(5).unwrap(),
            central_difference(7).unwrap(),
            central_difference(9).unwrap(),
            low_noise_lanczos(9).unwrap(),
            super_low_noise_lanczos(7).unwrap(),
            super_low_noise_lanczos(9).unwrap(),
            super_low_noise_lanczos(11).unwrap(),
            noise_robust_centered(9).unwrap(),
            noise_robust_centered_4(7).unwrap(),
            noise_robust_centered_4(9).unwrap(),
            noise_robust_centered_4(11).unwrap(),
            hybrid_noise_robust_backward(4).unwrap(),
            hybrid_noise_robust_backward(11).unwrap(),
        ];
        for table in tables {
            let sum: f64 = table.iter().sum();
            let moment: f64 = table.iter().enumerate().map(|(k, c)| k as f64 * c).sum();
            assert_approx_eq!(sum, 0.0, 1e-12);
            assert_approx_eq!(moment, -1.0, 1e-12);
        }
    }

    #[test]
    fn test_isd_tables() {
        let cnr = noise_robust_centered::<f64>(5).unwrap();
        let isd = centered_isd(&cnr).unwrap();
        check(&isd, &[4.0, 4.0, 0.0, -4.0, -4.0], 8.0);
        assert!(centered_isd(&[1.0, -1.0]).is_err());

        let fnr = noise_robust_backward::<f64>(4).unwrap();
        check(&backward_isd(&fnr), &[0.0, 1.0, -2.0, -3.0], 4.0);
    }

    #[test]
    fn test_centered_differentiator_on_quadratic() {
        let dt = 0.01;
        let mut diff = centered_differentiator(&central_difference(5).unwrap(), dt, 1).unwrap();
        assert_eq!(diff.center(), 2);
        let times: Vec<f64> = (0..50).map(|i| i as f64 * dt).collect();
        let values: Vec<f64> = times.iter().map(|t| 3.0 * t * t - t).collect();
        let out = diff.filter(&values).unwrap();
        for i in 10..50 {
            let t = times[i - diff.center()];
            assert_approx_eq!(out[i], 6.0 * t - 1.0, 1e-9);
        }
    }

    #[test]
    fn test_backward_second_order() {
        let dt = 0.1;
        let mut diff = backward_differentiator(&second_order_noise_robust(5).unwrap(), dt, 2).unwrap();
        let values: Vec<f64> = (0..20).map(|i| (i as f64 * dt).powi(2)).collect();
        let out = diff.filter(&values).unwrap();
        assert_approx_eq!(out[19], 2.0, 1e-9);
    }

    #[test]
    fn test_bad_timestep() {
        let coeffs = central_difference::<f64>(3).unwrap();
        assert!(matches!(
            backward_differentiator(&coeffs, 0.0, 1),
            Err(FilterError::BadTimestep { .. })
        ));
        assert!(matches!(
            centered_differentiator(&coeffs, 0.1, 0),
            Err(FilterError::BadOrderSize { order: 0 })
        ));
    }

    #[test]
    fn test_time_varying_matches_fixed_rate_on_uniform_grid() {
        let dt = 0.002;
        let cnr = noise_robust_centered::<f64>(7).unwrap();
        let mut fixed = centered_differentiator(&cnr, dt, 1).unwrap();
        let mut varying = time_varying_differentiator(&centered_isd(&cnr).unwrap(), FilterType::Centered, 1).unwrap();

        for i in 0..40 {
            let t = i as f64 * dt;
            let x = (2.0 * t).sin();
            let expected = fixed.step_filter(x).unwrap();
            let got = varying.step_filter(t, x).unwrap();
            if i >= 6 {
                assert_approx_eq!(got, expected, 1e-8);
            }
        }
    }
}
