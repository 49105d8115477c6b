//! Full statistics sheet for an asset against a benchmark.

use crate::config::StatsConfig;
use crate::performance::{self, downside_deviation};
use crate::risk;
use crate::types::{MetricResult, MetricUnit};
use crate::{Result, ReturnSeries, RiskFreeRate};
use chrono::NaiveDate;
use serde::Serialize;

/// Every metric of the engine for one asset, computed with one config.
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    /// First analysed return date
    pub start: NaiveDate,
    /// Last analysed return date
    pub end: NaiveDate,
    /// Asset return observations
    pub observations: usize,
    /// Parameters the metrics were computed with
    pub config: StatsConfig,
    /// Computed metrics, in display order
    pub metrics: Vec<MetricResult>,
}

impl StatsReport {
    /// Compute the full sheet.
    ///
    /// The per-period risk-free rate is `config.annual_risk_free /
    /// config.periods_per_year`. Validation and data-sufficiency errors from
    /// any metric are returned unchanged.
    pub fn compute(
        asset: &ReturnSeries,
        benchmark: &ReturnSeries,
        config: &StatsConfig,
    ) -> Result<Self> {
        config.validate()?;
        let rf = RiskFreeRate::from_annual(config.annual_risk_free, config.periods_per_year)?;
        let ppy = config.periods_per_year;
        let c = config.confidence;
        let pct = (c * 100.0).round();

        let positive = performance::positive_share(asset);
        let recovery = recovery_metric(asset)?;

        use MetricUnit::*;
        let metrics = vec![
            MetricResult::new(
                "Geometric Mean Return",
                performance::geometric_mean_return(asset),
                Fraction,
            ),
            MetricResult::new(
                "Arithmetic Mean Return",
                performance::mean_return(asset),
                Fraction,
            ),
            MetricResult::new(
                "Cumulative Return",
                performance::cumulative_return(asset),
                Fraction,
            ),
            MetricResult::new(
                "Standard Deviation",
                risk::standard_deviation(asset, config.ddof)?,
                Fraction,
            ),
            MetricResult::new(
                "Downside Deviation",
                downside_deviation(asset, config.target_return),
                Fraction,
            ),
            MetricResult::new(
                "Sharpe Ratio",
                performance::sharpe_ratio(asset, &rf, ppy)?,
                Ratio,
            ),
            MetricResult::new(
                "Sortino Ratio",
                performance::sortino_ratio(asset, &rf, ppy, config.target_return)?,
                Ratio,
            ),
            MetricResult::new("Calmar Ratio", performance::calmar_ratio(asset, &rf)?, Ratio),
            MetricResult::new("Max Drawdown", risk::max_drawdown(asset)?, LossFraction),
            MetricResult::new("Best Return", performance::best_return(asset), Fraction),
            MetricResult::new("Worst Return", performance::worst_return(asset), Fraction),
            MetricResult::new(
                format!("VaR {}", pct),
                risk::value_at_risk(asset, c)?,
                LossFraction,
            ),
            MetricResult::new(
                format!("Parametric VaR {}", pct),
                risk::parametric_var(asset, c)?,
                LossFraction,
            ),
            MetricResult::new(
                format!("ES {}", pct),
                risk::expected_shortfall(asset, c)?,
                LossFraction,
            ),
            MetricResult::new("Positive Share", positive, Fraction),
            MetricResult::new("Negative Share", 1.0 - positive, Fraction),
            MetricResult::new(
                "Max Losing Streak",
                risk::losing_streak(asset) as f64,
                Periods,
            ),
            MetricResult::new("Recovery Max Drawdown", recovery, Periods),
            MetricResult::new(
                "Correlation",
                performance::correlation(asset, benchmark)?,
                Ratio,
            ),
            MetricResult::new(
                "Information Ratio",
                performance::information_ratio(asset, benchmark, ppy)?,
                Ratio,
            ),
            MetricResult::new("Beta", performance::beta(asset, benchmark, &rf)?, Ratio),
            MetricResult::new(
                "Alpha",
                performance::alpha(asset, benchmark, &rf, ppy)?,
                Fraction,
            ),
            MetricResult::new(
                "Jensen Alpha",
                performance::jensen_alpha(asset, benchmark, &rf)?,
                Fraction,
            ),
        ];

        let undefined = metrics.iter().filter(|m| !m.is_defined()).count();
        tracing::debug!(
            observations = asset.len(),
            undefined,
            "computed statistics report"
        );

        Ok(Self {
            start: asset.first_date(),
            end: asset.last_date(),
            observations: asset.len(),
            config: config.clone(),
            metrics,
        })
    }

    /// Look up a metric by name.
    pub fn metric(&self, name: &str) -> Option<&MetricResult> {
        self.metrics.iter().find(|m| m.name == name)
    }
}

/// "Recovery Max Drawdown" value: 0 when the series never draws down, NaN
/// when the maximum drawdown is still open at the end of the series.
fn recovery_metric(asset: &ReturnSeries) -> Result<f64> {
    if risk::max_drawdown(asset)? == 0.0 {
        return Ok(0.0);
    }
    Ok(risk::recovery_period(asset)?.map_or(f64::NAN, |p| p as f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_relative_eq;
    use chrono::Days;

    fn series(returns: &[f64]) -> ReturnSeries {
        let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        ReturnSeries::from_returns(
            returns
                .iter()
                .enumerate()
                .map(|(i, r)| (start + Days::new(i as u64), *r)),
        )
        .unwrap()
    }

    fn asset() -> ReturnSeries {
        series(&[
            0.01, -0.005, 0.008, -0.003, 0.012, -0.007, 0.005, 0.002, -0.004, 0.006, 0.003,
            -0.002, 0.007, -0.001, 0.004,
        ])
    }

    fn benchmark() -> ReturnSeries {
        series(&[
            0.006, -0.004, 0.005, -0.001, 0.009, -0.006, 0.003, 0.001, -0.002, 0.004, 0.002,
            -0.003, 0.005, 0.000, 0.002,
        ])
    }

    #[test]
    fn test_report_contains_every_metric() {
        let report = StatsReport::compute(&asset(), &benchmark(), &StatsConfig::default()).unwrap();

        assert_eq!(report.observations, 15);
        assert_eq!(report.metrics.len(), 23);
        for name in [
            "Arithmetic Mean Return",
            "Calmar Ratio",
            "Jensen Alpha",
            "Sharpe Ratio",
            "Sortino Ratio",
            "VaR 95",
            "ES 95",
            "Beta",
            "Alpha",
            "Max Drawdown",
        ] {
            assert!(report.metric(name).is_some(), "missing {}", name);
        }

        let var = report.metric("VaR 95").unwrap().value;
        let es = report.metric("ES 95").unwrap().value;
        assert!(var > 0.0);
        assert!(es >= var);
    }

    #[test]
    fn test_report_matches_direct_calls() {
        let config = StatsConfig {
            periods_per_year: 12,
            annual_risk_free: 0.012,
            ..Default::default()
        };
        let report = StatsReport::compute(&asset(), &benchmark(), &config).unwrap();

        let rf = RiskFreeRate::Constant(0.001);
        let sharpe = performance::sharpe_ratio(&asset(), &rf, 12).unwrap();
        let beta = performance::beta(&asset(), &benchmark(), &rf).unwrap();

        assert_relative_eq!(report.metric("Sharpe Ratio").unwrap().value, sharpe, epsilon = 1e-12);
        assert_relative_eq!(report.metric("Beta").unwrap().value, beta, epsilon = 1e-12);

        let calmar = performance::calmar_ratio(&asset(), &rf).unwrap();
        let jensen = performance::jensen_alpha(&asset(), &benchmark(), &rf).unwrap();
        assert_relative_eq!(report.metric("Calmar Ratio").unwrap().value, calmar, epsilon = 1e-12);
        assert_relative_eq!(report.metric("Jensen Alpha").unwrap().value, jensen, epsilon = 1e-12);
    }

    #[test]
    fn test_report_sortino_agrees_with_downside_deviation() {
        let gains = series(&[0.0, 0.01, 0.02, 0.0, 0.005]);
        let report = StatsReport::compute(&gains, &benchmark(), &StatsConfig::default()).unwrap();

        assert_eq!(report.metric("Downside Deviation").unwrap().value, 0.0);
        assert_eq!(report.metric("Sortino Ratio").unwrap().value, f64::INFINITY);
    }

    #[test]
    fn test_report_recovery_distinguishes_no_drawdown() {
        let config = StatsConfig::default();
        let recovery = |returns: &[f64]| {
            StatsReport::compute(&series(returns), &benchmark(), &config)
                .unwrap()
                .metric("Recovery Max Drawdown")
                .unwrap()
                .value
        };

        assert_eq!(recovery(&[0.01, 0.02, 0.0, 0.01]), 0.0);
        assert!(recovery(&[0.01, -0.20, 0.01, 0.02]).is_nan());
        assert_eq!(recovery(&[0.10, -0.10, 0.05, 0.10]), 2.0);
    }

    #[test]
    fn test_report_propagates_insufficient_data() {
        let short = series(&[0.01]);
        let result = StatsReport::compute(&short, &benchmark(), &StatsConfig::default());
        assert!(matches!(result, Err(Error::InsufficientData(_))));
    }

    #[test]
    fn test_report_rejects_invalid_config() {
        let config = StatsConfig {
            confidence: 0.0,
            ..Default::default()
        };
        let result = StatsReport::compute(&asset(), &benchmark(), &config);
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
