//! Return summaries that need no benchmark.

use crate::ReturnSeries;

/// Geometric mean return per period: `exp(mean(ln(1 + r))) - 1`.
///
/// Any return at or below -100% wipes out the compounded value, so the result
/// is -1.0.
pub fn geometric_mean_return(series: &ReturnSeries) -> f64 {
    geometric_mean_of(series.values())
}

pub(crate) fn geometric_mean_of(values: &[f64]) -> f64 {
    if values.iter().any(|r| *r <= -1.0) {
        return -1.0;
    }

    let mean_log = values.iter().map(|r| r.ln_1p()).sum::<f64>() / values.len() as f64;
    mean_log.exp_m1()
}

/// Arithmetic mean return per period.
pub fn mean_return(series: &ReturnSeries) -> f64 {
    crate::math::mean(series.values())
}

/// Compounded return over the whole series: `prod(1 + r) - 1`.
pub fn cumulative_return(series: &ReturnSeries) -> f64 {
    series.values().iter().map(|r| 1.0 + r).product::<f64>() - 1.0
}

/// Share of periods with a strictly positive return, in `[0, 1]`.
pub fn positive_share(series: &ReturnSeries) -> f64 {
    let positive = series.values().iter().filter(|r| **r > 0.0).count();
    positive as f64 / series.len() as f64
}

/// Largest single-period return.
pub fn best_return(series: &ReturnSeries) -> f64 {
    series
        .values()
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max)
}

/// Smallest single-period return.
pub fn worst_return(series: &ReturnSeries) -> f64 {
    series.values().iter().copied().fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::{Days, NaiveDate};

    fn series(returns: &[f64]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2019, 12, 31).unwrap();
        ReturnSeries::from_returns(
            returns
                .iter()
                .enumerate()
                .map(|(i, r)| (start + Days::new(i as u64), *r)),
        )
        .unwrap()
    }

    #[test]
    fn test_geometric_mean() {
        // +10% then -10%: sqrt(1.1 * 0.9) - 1
        let s = series(&[0.10, -0.10]);
        assert_relative_eq!(
            geometric_mean_return(&s),
            (0.99_f64).sqrt() - 1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_geometric_mean_total_loss() {
        let s = series(&[0.5, -1.0, 0.2]);
        assert_eq!(geometric_mean_return(&s), -1.0);
    }

    #[test]
    fn test_cumulative_return() {
        let s = series(&[0.10, 0.05, -0.20]);
        assert_relative_eq!(cumulative_return(&s), -0.076, epsilon = 1e-12);
    }

    #[test]
    fn test_positive_share() {
        let s = series(&[0.01, 0.0, -0.02, 0.03]);
        assert_relative_eq!(positive_share(&s), 0.5);
    }

    #[test]
    fn test_best_and_worst() {
        let s = series(&[0.01, -0.04, 0.07, 0.0]);
        assert_eq!(best_return(&s), 0.07);
        assert_eq!(worst_return(&s), -0.04);
        assert_relative_eq!(mean_return(&s), 0.01, epsilon = 1e-12);
    }
}
