//! Validated, time-ordered return series.
//!
//! A [`ReturnSeries`] is the only input type the metric functions accept. It is
//! built through one of two explicit constructors, [`ReturnSeries::from_prices`]
//! and [`ReturnSeries::from_returns`], and never changes afterwards.

mod aligned;
mod risk_free;

pub use aligned::AlignedPair;
pub use risk_free::RiskFreeRate;

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated value: a price or a periodic return depending on context.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    /// Observation date
    pub date: NaiveDate,
    /// Price level or fractional return (0.01 = 1%)
    pub value: f64,
}

impl Observation {
    /// Create a new observation.
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

impl From<(NaiveDate, f64)> for Observation {
    fn from((date, value): (NaiveDate, f64)) -> Self {
        Self { date, value }
    }
}

/// Periodic returns of a single asset, keyed by strictly increasing dates.
///
/// Invariants upheld by every constructor:
///
/// - at least one observation
/// - dates strictly increasing (no duplicates)
/// - every return is finite
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ReturnSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Build a return series from price observations.
    ///
    /// Each return is `p_t / p_{t-1} - 1`, dated at `t`, so `N` prices yield
    /// `N - 1` returns.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use finstats_core::ReturnSeries;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
    /// let series = ReturnSeries::from_prices([(d(2), 100.0), (d(3), 110.0), (d(4), 99.0)]).unwrap();
    ///
    /// assert_eq!(series.len(), 2);
    /// assert!((series.values()[0] - 0.10).abs() < 1e-12);
    /// ```
    pub fn from_prices<I, O>(prices: I) -> Result<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<Observation>,
    {
        let prices: Vec<Observation> = prices.into_iter().map(Into::into).collect();
        if prices.len() < 2 {
            return Err(Error::Validation(format!(
                "need at least 2 prices to derive returns, got {}",
                prices.len()
            )));
        }
        check_increasing(&prices)?;

        if let Some(bad) = prices
            .iter()
            .find(|p| !p.value.is_finite() || p.value <= 0.0)
        {
            return Err(Error::Validation(format!(
                "price on {} must be finite and positive, got {}",
                bad.date, bad.value
            )));
        }

        let (dates, values): (Vec<NaiveDate>, Vec<f64>) = prices
            .windows(2)
            .map(|w| (w[1].date, w[1].value / w[0].value - 1.0))
            .unzip();

        if let Some(idx) = values.iter().position(|r| !r.is_finite()) {
            return Err(Error::Validation(format!(
                "return on {} overflows, got {}",
                dates[idx], values[idx]
            )));
        }

        tracing::debug!(prices = prices.len(), "built return series from prices");
        Ok(Self { dates, values })
    }

    /// Build a return series from already-computed periodic returns.
    pub fn from_returns<I, O>(returns: I) -> Result<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<Observation>,
    {
        let returns: Vec<Observation> = returns.into_iter().map(Into::into).collect();
        if returns.is_empty() {
            return Err(Error::Validation(
                "need at least 1 return observation".to_string(),
            ));
        }
        check_increasing(&returns)?;

        if let Some(bad) = returns.iter().find(|r| !r.value.is_finite()) {
            return Err(Error::Validation(format!(
                "return on {} must be finite, got {}",
                bad.date, bad.value
            )));
        }

        Ok(Self {
            dates: returns.iter().map(|r| r.date).collect(),
            values: returns.iter().map(|r| r.value).collect(),
        })
    }

    /// Number of return observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Date of the first return.
    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Date of the last return.
    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    /// Observation dates, ascending.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Return values in date order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Iterate over `(date, return)` pairs.
    ///
    /// The iterator borrows the series, so calling `iter` again always restarts
    /// from the first observation.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + Clone + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Return value on `date`, if observed.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.values[idx])
    }

    /// Restrict the series to `start..=end`.
    ///
    /// Fails with [`Error::Validation`] if `start > end` and with
    /// [`Error::InsufficientData`] if no observation falls in the range.
    pub fn slice(&self, start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(Error::Validation(format!(
                "slice start {} is after end {}",
                start, end
            )));
        }

        let lo = self.dates.partition_point(|d| *d < start);
        let hi = self.dates.partition_point(|d| *d <= end);
        if lo >= hi {
            return Err(Error::InsufficientData(format!(
                "no observations between {} and {}",
                start, end
            )));
        }

        Ok(Self {
            dates: self.dates[lo..hi].to_vec(),
            values: self.values[lo..hi].to_vec(),
        })
    }

    /// Returns in excess of `risk_free`, one per observation.
    pub fn excess_returns(&self, risk_free: &RiskFreeRate) -> Result<Vec<f64>> {
        self.iter()
            .map(|(date, r)| Ok(r - risk_free.rate_on(date)?))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ReturnSeries {
    type Item = (NaiveDate, f64);
    type IntoIter = std::iter::Zip<
        std::iter::Copied<std::slice::Iter<'a, NaiveDate>>,
        std::iter::Copied<std::slice::Iter<'a, f64>>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

fn check_increasing(observations: &[Observation]) -> Result<()> {
    for pair in observations.windows(2) {
        if pair[1].date <= pair[0].date {
            return Err(Error::Validation(format!(
                "dates must be strictly increasing: {} follows {}",
                pair[1].date, pair[0].date
            )));
        }
    }
    Ok(())
}
