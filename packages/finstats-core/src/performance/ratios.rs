//! Benchmark-relative and risk-adjusted performance ratios.

use super::returns::geometric_mean_of;
use crate::math;
use crate::risk::DEFAULT_DDOF;
use crate::{AlignedPair, Error, Result, ReturnSeries, RiskFreeRate};

/// Target return used by the Sortino ratio when none is given.
pub const DEFAULT_TARGET_RETURN: f64 = 0.0;

/// Beta of the asset against the benchmark.
///
/// `cov(excess asset, excess benchmark) / var(excess benchmark)`, using sample
/// statistics over the dates both series share.
///
/// # Errors
///
/// [`Error::InsufficientData`] if fewer than two dates are shared.
///
/// Returns NaN when the benchmark's excess returns have zero variance.
pub fn beta(
    asset: &ReturnSeries,
    benchmark: &ReturnSeries,
    risk_free: &RiskFreeRate,
) -> Result<f64> {
    let pair = aligned_for_regression(asset, benchmark)?;
    let (asset_ex, bench_ex) = pair.excess_returns(risk_free)?;
    beta_of(&asset_ex, &bench_ex)
}

/// Annualized alpha of the asset against the benchmark.
///
/// `(mean(excess asset) - beta * mean(excess benchmark)) * periods_per_year`.
/// A NaN beta yields a NaN alpha.
///
/// # Arguments
///
/// * `periods_per_year` - Sampling frequency, e.g. 252 for daily or 12 for monthly returns
pub fn alpha(
    asset: &ReturnSeries,
    benchmark: &ReturnSeries,
    risk_free: &RiskFreeRate,
    periods_per_year: u32,
) -> Result<f64> {
    check_periods(periods_per_year)?;
    let pair = aligned_for_regression(asset, benchmark)?;
    let (asset_ex, bench_ex) = pair.excess_returns(risk_free)?;

    let beta = beta_of(&asset_ex, &bench_ex)?;
    let per_period = math::mean(&asset_ex) - beta * math::mean(&bench_ex);
    Ok(per_period * periods_per_year as f64)
}

/// Jensen's alpha per period, on geometric mean returns.
///
/// `g_asset - (rf + beta * (g_benchmark - rf))` over the dates both series
/// share, where `g` is the geometric mean return, `rf` the mean per-period
/// risk-free rate on those dates, and `beta` as in [`beta`]. Not annualized.
pub fn jensen_alpha(
    asset: &ReturnSeries,
    benchmark: &ReturnSeries,
    risk_free: &RiskFreeRate,
) -> Result<f64> {
    let pair = aligned_for_regression(asset, benchmark)?;
    let (asset_ex, bench_ex) = pair.excess_returns(risk_free)?;
    let beta = beta_of(&asset_ex, &bench_ex)?;
    let rf = math::mean(&risk_free.rates_for(pair.dates())?);

    let expected = rf + beta * (geometric_mean_of(pair.benchmark()) - rf);
    Ok(geometric_mean_of(pair.asset()) - expected)
}

/// Annualized Sharpe ratio.
///
/// `mean(excess) / std(excess) * sqrt(periods_per_year)` with the sample
/// standard deviation. Returns NaN for a flat excess-return series.
///
/// # Example
///
/// ```rust
/// use chrono::{Days, NaiveDate};
/// use finstats_core::{performance::sharpe_ratio, ReturnSeries, RiskFreeRate};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let flat = ReturnSeries::from_returns((0..20).map(|i| (start + Days::new(i), 0.01))).unwrap();
///
/// let sharpe = sharpe_ratio(&flat, &RiskFreeRate::zero(), 252).unwrap();
/// assert!(sharpe.is_nan());
/// ```
pub fn sharpe_ratio(
    asset: &ReturnSeries,
    risk_free: &RiskFreeRate,
    periods_per_year: u32,
) -> Result<f64> {
    check_periods(periods_per_year)?;
    let excess = asset.excess_returns(risk_free)?;
    let std = math::std_dev(&excess, DEFAULT_DDOF)?;

    if std == 0.0 {
        tracing::warn!("zero volatility, Sharpe ratio is undefined");
        return Ok(f64::NAN);
    }

    Ok(math::mean(&excess) / std * (periods_per_year as f64).sqrt())
}

/// Annualized Sortino ratio.
///
/// `mean(excess) / downside * sqrt(periods_per_year)`, where `downside` is the
/// [`downside_deviation`] of the asset's own returns below `target_return`.
/// The risk-free rate only enters the numerator. Returns positive infinity
/// when no return falls below the target.
pub fn sortino_ratio(
    asset: &ReturnSeries,
    risk_free: &RiskFreeRate,
    periods_per_year: u32,
    target_return: f64,
) -> Result<f64> {
    check_periods(periods_per_year)?;
    let excess = asset.excess_returns(risk_free)?;
    let downside = downside_deviation_of(asset.values(), target_return);

    if downside == 0.0 {
        tracing::debug!(target_return, "no returns below target, Sortino ratio is infinite");
        return Ok(f64::INFINITY);
    }

    Ok(math::mean(&excess) / downside * (periods_per_year as f64).sqrt())
}

/// Downside deviation of a series' returns below `target_return`.
///
/// Root-mean-square of `r - target` over only those returns strictly below
/// the target. Zero if there are none.
pub fn downside_deviation(series: &ReturnSeries, target_return: f64) -> f64 {
    downside_deviation_of(series.values(), target_return)
}

/// Calmar ratio per period: geometric mean excess return over the worst loss.
///
/// `(g - rf) / |worst return|`, with `rf` the mean per-period risk-free rate
/// over the series' dates. Returns NaN when the worst return is exactly zero.
pub fn calmar_ratio(asset: &ReturnSeries, risk_free: &RiskFreeRate) -> Result<f64> {
    let rf = math::mean(&risk_free.rates_for(asset.dates())?);
    let worst = asset.values().iter().copied().fold(f64::INFINITY, f64::min);

    if worst == 0.0 {
        tracing::warn!("worst return is zero, Calmar ratio is undefined");
        return Ok(f64::NAN);
    }

    Ok((geometric_mean_of(asset.values()) - rf) / worst.abs())
}

/// Annualized information ratio: mean active return over tracking error.
///
/// Active returns are asset minus benchmark on shared dates. Returns NaN when
/// the tracking error is zero.
pub fn information_ratio(
    asset: &ReturnSeries,
    benchmark: &ReturnSeries,
    periods_per_year: u32,
) -> Result<f64> {
    check_periods(periods_per_year)?;
    let active = aligned_for_regression(asset, benchmark)?.active_returns();
    let tracking_error = math::std_dev(&active, DEFAULT_DDOF)?;

    if tracking_error == 0.0 {
        tracing::warn!("zero tracking error, information ratio is undefined");
        return Ok(f64::NAN);
    }

    Ok(math::mean(&active) / tracking_error * (periods_per_year as f64).sqrt())
}

/// Pearson correlation between asset and benchmark returns on shared dates.
///
/// Returns NaN if either side has zero variance.
pub fn correlation(asset: &ReturnSeries, benchmark: &ReturnSeries) -> Result<f64> {
    let pair = aligned_for_regression(asset, benchmark)?;
    let cov = math::covariance(pair.asset(), pair.benchmark(), DEFAULT_DDOF)?;
    let std_a = math::std_dev(pair.asset(), DEFAULT_DDOF)?;
    let std_b = math::std_dev(pair.benchmark(), DEFAULT_DDOF)?;

    if std_a == 0.0 || std_b == 0.0 {
        return Ok(f64::NAN);
    }
    Ok(cov / (std_a * std_b))
}

fn beta_of(asset_ex: &[f64], bench_ex: &[f64]) -> Result<f64> {
    let var = math::variance(bench_ex, DEFAULT_DDOF)?;
    if var == 0.0 {
        tracing::warn!("benchmark has zero variance, beta is undefined");
        return Ok(f64::NAN);
    }
    Ok(math::covariance(asset_ex, bench_ex, DEFAULT_DDOF)? / var)
}

fn downside_deviation_of(values: &[f64], target: f64) -> f64 {
    let (sum_sq, count) = values
        .iter()
        .filter(|r| **r < target)
        .fold((0.0, 0usize), |(sum, n), r| (sum + (r - target).powi(2), n + 1));

    if count == 0 {
        0.0
    } else {
        (sum_sq / count as f64).sqrt()
    }
}

fn aligned_for_regression(asset: &ReturnSeries, benchmark: &ReturnSeries) -> Result<AlignedPair> {
    let pair = AlignedPair::new(asset, benchmark)?;
    if pair.len() < 2 {
        return Err(Error::InsufficientData(format!(
            "need at least 2 shared observations, got {}",
            pair.len()
        )));
    }
    Ok(pair)
}

pub(crate) fn check_periods(periods_per_year: u32) -> Result<()> {
    if periods_per_year == 0 {
        return Err(Error::Validation(
            "periods_per_year must be positive".to_string(),
        ));
    }
    Ok(())
}
