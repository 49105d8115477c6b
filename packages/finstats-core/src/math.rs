//! Descriptive statistics over plain `f64` slices.
//!
//! These are the building blocks the metric modules share. They take slices
//! rather than [`ReturnSeries`](crate::ReturnSeries) so that excess and active
//! return vectors can flow through them without being re-validated.

use crate::{Error, Result};

/// Arithmetic mean. Returns NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Variance with divisor `N - ddof`.
///
/// A slice whose values are all identical has a variance of exactly zero,
/// independent of rounding in the mean.
pub fn variance(values: &[f64], ddof: usize) -> Result<f64> {
    let n = values.len();
    if n <= ddof {
        return Err(Error::InsufficientData(format!(
            "variance needs more than {} observations, got {}",
            ddof, n
        )));
    }

    if values.iter().all(|v| *v == values[0]) {
        return Ok(0.0);
    }

    let m = mean(values);
    let sum_sq = values.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    Ok(sum_sq / (n - ddof) as f64)
}

/// Standard deviation with divisor `N - ddof`.
pub fn std_dev(values: &[f64], ddof: usize) -> Result<f64> {
    variance(values, ddof).map(f64::sqrt)
}

/// Covariance of two equal-length slices with divisor `N - ddof`.
pub fn covariance(x: &[f64], y: &[f64], ddof: usize) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::Validation(format!(
            "covariance needs equal lengths, got {} and {}",
            x.len(),
            y.len()
        )));
    }
    let n = x.len();
    if n <= ddof {
        return Err(Error::InsufficientData(format!(
            "covariance needs more than {} observations, got {}",
            ddof, n
        )));
    }

    let mx = mean(x);
    let my = mean(y);
    let sum = x
        .iter()
        .zip(y)
        .map(|(a, b)| (a - mx) * (b - my))
        .sum::<f64>();
    Ok(sum / (n - ddof) as f64)
}

/// Quantile of an ascending-sorted slice using linear interpolation between
/// order statistics.
///
/// With `h = (N - 1) * p`, the result is
/// `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    let frac = h - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Copy and sort ascending. Inputs are validated finite so the comparison is total.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

/// Inverse cumulative distribution function for standard normal distribution.
///
/// Uses Acklam's algorithm for high accuracy across the full range.
/// Source: https://web.archive.org/web/20151110174102/http://home.online.no/~pjacklam/notes/invnorm/
pub fn norm_ppf(p: f64) -> f64 {
    // Coefficients in rational approximations
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];

    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];

    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];

    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= P_HIGH {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm_ppf() {
        assert!((norm_ppf(0.5)).abs() < 0.001);
        assert!((norm_ppf(0.95) - 1.645).abs() < 0.01);
        assert!((norm_ppf(0.975) - 1.96).abs() < 0.01);
        assert!((norm_ppf(0.99) - 2.326).abs() < 0.01);

        // Symmetry
        assert!((norm_ppf(0.05) + 1.645).abs() < 0.01);
    }

    #[test]
    fn test_variance_ddof() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(variance(&data, 0).unwrap(), 1.25);
        assert_relative_eq!(variance(&data, 1).unwrap(), 5.0 / 3.0);
    }

    #[test]
    fn test_variance_needs_more_than_ddof() {
        assert!(matches!(
            variance(&[0.01], 1),
            Err(Error::InsufficientData(_))
        ));
        assert!(matches!(variance(&[], 0), Err(Error::InsufficientData(_))));
    }

    #[test]
    fn test_constant_values_have_zero_variance() {
        let data = vec![0.01; 37];
        assert_eq!(variance(&data, 1).unwrap(), 0.0);
    }

    #[test]
    fn test_covariance_with_self_is_variance() {
        let data = [0.02, -0.01, 0.03, 0.0, -0.02];
        assert_relative_eq!(
            covariance(&data, &data, 1).unwrap(),
            variance(&data, 1).unwrap()
        );
    }

    #[test]
    fn test_covariance_length_mismatch() {
        assert!(matches!(
            covariance(&[1.0, 2.0], &[1.0], 1),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(quantile_sorted(&data, 0.0), 1.0);
        assert_relative_eq!(quantile_sorted(&data, 1.0), 5.0);
        assert_relative_eq!(quantile_sorted(&data, 0.5), 3.0);
        // h = 4 * 0.1 = 0.4
        assert_relative_eq!(quantile_sorted(&data, 0.1), 1.4);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile_sorted(&[0.3], 0.05), 0.3);
    }
}
