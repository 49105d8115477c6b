//! Dispersion and tail-loss measures.
//!
//! Provides standard deviation, historical and parametric Value at Risk, and
//! Expected Shortfall.

use crate::math;
use crate::{Error, Result, ReturnSeries};

/// Delta degrees of freedom for sample statistics.
pub const DEFAULT_DDOF: usize = 1;

/// Standard deviation of the series' returns with divisor `N - ddof`.
///
/// # Arguments
///
/// * `series` - Periodic returns
/// * `ddof` - Delta degrees of freedom ([`DEFAULT_DDOF`] for the sample estimate)
///
/// # Errors
///
/// [`Error::InsufficientData`] when `N <= ddof`.
pub fn standard_deviation(series: &ReturnSeries, ddof: usize) -> Result<f64> {
    math::std_dev(series.values(), ddof)
}

/// Historical Value at Risk.
///
/// The negated `(1 - confidence)` empirical quantile of returns, with linear
/// interpolation between order statistics. A positive value is a loss.
///
/// # Arguments
///
/// * `series` - Periodic returns
/// * `confidence` - Confidence level in `(0, 1)`, e.g. 0.95
///
/// # Example
///
/// ```rust
/// use chrono::{Days, NaiveDate};
/// use finstats_core::{risk::value_at_risk, ReturnSeries};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let returns = [-0.05, -0.03, -0.01, 0.00, 0.02, 0.04, 0.06, 0.08, 0.10, 0.12];
/// let series = ReturnSeries::from_returns(
///     returns.iter().enumerate().map(|(i, r)| (start + Days::new(i as u64), *r)),
/// )
/// .unwrap();
///
/// let var = value_at_risk(&series, 0.95).unwrap();
/// assert!((var - 0.041).abs() < 1e-12);
/// ```
pub fn value_at_risk(series: &ReturnSeries, confidence: f64) -> Result<f64> {
    check_confidence(confidence)?;
    let sorted = math::sorted(series.values());
    Ok(-math::quantile_sorted(&sorted, 1.0 - confidence))
}

/// Parametric (Gaussian) Value at Risk.
///
/// `-(mean + z * std)` where `z` is the standard normal quantile at
/// `1 - confidence` and `std` is the sample standard deviation.
///
/// # Errors
///
/// [`Error::Validation`] for a confidence outside `(0, 1)`,
/// [`Error::InsufficientData`] for fewer than two returns.
pub fn parametric_var(series: &ReturnSeries, confidence: f64) -> Result<f64> {
    check_confidence(confidence)?;
    let std = math::std_dev(series.values(), DEFAULT_DDOF)?;
    let mean = math::mean(series.values());
    let z = math::norm_ppf(1.0 - confidence);
    Ok(-(mean + z * std))
}

/// Expected Shortfall (Conditional VaR).
///
/// The arithmetic mean of returns at or below the historical VaR quantile,
/// negated so that a loss is positive. If no return falls in the tail, the
/// single worst return is used instead.
pub fn expected_shortfall(series: &ReturnSeries, confidence: f64) -> Result<f64> {
    check_confidence(confidence)?;
    let sorted = math::sorted(series.values());
    let threshold = math::quantile_sorted(&sorted, 1.0 - confidence);

    let tail_len = sorted.partition_point(|r| *r <= threshold);
    let tail_mean = if tail_len == 0 {
        tracing::debug!(threshold, "empty tail, falling back to worst return");
        sorted[0]
    } else {
        math::mean(&sorted[..tail_len])
    };

    Ok(-tail_mean)
}

pub(crate) fn check_confidence(confidence: f64) -> Result<()> {
    if confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(Error::Validation(format!(
            "confidence must be in (0, 1), got {}",
            confidence
        )))
    }
}
