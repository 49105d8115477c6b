//! Asset and benchmark restricted to their common dates.

use super::{ReturnSeries, RiskFreeRate};
use crate::{Error, Result};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Asset and benchmark returns observed on the same dates.
///
/// Dates missing from either side (non-trading days, holidays on one
/// exchange) are dropped; relative order is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    dates: Vec<NaiveDate>,
    asset: Vec<f64>,
    benchmark: Vec<f64>,
}

impl AlignedPair {
    /// Intersect two series by date.
    ///
    /// Fails with [`Error::InsufficientData`] if they share no date.
    pub fn new(asset: &ReturnSeries, benchmark: &ReturnSeries) -> Result<Self> {
        let (a_dates, a_vals) = (asset.dates(), asset.values());
        let (b_dates, b_vals) = (benchmark.dates(), benchmark.values());

        let capacity = a_dates.len().min(b_dates.len());
        let mut dates = Vec::with_capacity(capacity);
        let mut asset_out = Vec::with_capacity(capacity);
        let mut bench_out = Vec::with_capacity(capacity);

        // Both sides are sorted, so a merge walk finds the intersection.
        let (mut i, mut j) = (0, 0);
        while i < a_dates.len() && j < b_dates.len() {
            match a_dates[i].cmp(&b_dates[j]) {
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
                Ordering::Equal => {
                    dates.push(a_dates[i]);
                    asset_out.push(a_vals[i]);
                    bench_out.push(b_vals[j]);
                    i += 1;
                    j += 1;
                }
            }
        }

        if dates.is_empty() {
            return Err(Error::InsufficientData(
                "asset and benchmark share no observation dates".to_string(),
            ));
        }

        let dropped = asset.len() + benchmark.len() - 2 * dates.len();
        if dropped > 0 {
            tracing::debug!(aligned = dates.len(), dropped, "aligned asset and benchmark");
        }

        Ok(Self {
            dates,
            asset: asset_out,
            benchmark: bench_out,
        })
    }

    /// Number of common observations.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always `false`; construction fails on an empty intersection.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Common dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Asset returns on the common dates.
    pub fn asset(&self) -> &[f64] {
        &self.asset
    }

    /// Benchmark returns on the common dates.
    pub fn benchmark(&self) -> &[f64] {
        &self.benchmark
    }

    /// Asset minus benchmark, per date.
    pub fn active_returns(&self) -> Vec<f64> {
        self.asset
            .iter()
            .zip(&self.benchmark)
            .map(|(a, b)| a - b)
            .collect()
    }

    /// Excess returns of `(asset, benchmark)` over `risk_free`.
    pub fn excess_returns(&self, risk_free: &RiskFreeRate) -> Result<(Vec<f64>, Vec<f64>)> {
        let rates = risk_free.rates_for(&self.dates)?;
        let asset = self.asset.iter().zip(&rates).map(|(r, rf)| r - rf).collect();
        let benchmark = self
            .benchmark
            .iter()
            .zip(&rates)
            .map(|(r, rf)| r - rf)
            .collect();
        Ok((asset, benchmark))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn test_intersection_preserves_order() {
        let asset =
            ReturnSeries::from_returns([(day(1), 0.01), (day(2), 0.02), (day(4), 0.04)]).unwrap();
        let bench =
            ReturnSeries::from_returns([(day(2), -0.02), (day(3), -0.03), (day(4), -0.04)])
                .unwrap();

        let pair = AlignedPair::new(&asset, &bench).unwrap();

        assert_eq!(pair.dates(), &[day(2), day(4)]);
        assert_eq!(pair.asset(), &[0.02, 0.04]);
        assert_eq!(pair.benchmark(), &[-0.02, -0.04]);
    }

    #[test]
    fn test_disjoint_series_fail() {
        let asset = ReturnSeries::from_returns([(day(1), 0.01)]).unwrap();
        let bench = ReturnSeries::from_returns([(day(2), 0.01)]).unwrap();

        assert!(matches!(
            AlignedPair::new(&asset, &bench),
            Err(Error::InsufficientData(_))
        ));
    }

    #[test]
    fn test_active_returns() {
        let asset = ReturnSeries::from_returns([(day(1), 0.05), (day(2), 0.01)]).unwrap();
        let bench = ReturnSeries::from_returns([(day(1), 0.03), (day(2), 0.01)]).unwrap();
        let pair = AlignedPair::new(&asset, &bench).unwrap();

        let active = pair.active_returns();
        assert!((active[0] - 0.02).abs() < 1e-12);
        assert_eq!(active[1], 0.0);
    }
}
