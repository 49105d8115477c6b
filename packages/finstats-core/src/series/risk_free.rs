//! Riskless return per period.

use super::ReturnSeries;
use crate::{Error, Result};
use chrono::NaiveDate;

/// The riskless return for each period, either broadcast or per date.
#[derive(Debug, Clone, PartialEq)]
pub enum RiskFreeRate {
    /// Same per-period rate for every observation
    Constant(f64),
    /// Per-period rate looked up by observation date
    Series(ReturnSeries),
}

impl RiskFreeRate {
    /// No risk-free return.
    pub fn zero() -> Self {
        Self::Constant(0.0)
    }

    /// Convert an annual rate to a per-period constant by simple division.
    ///
    /// `from_annual(0.024, 12)` is a monthly rate of 0.2%.
    pub fn from_annual(annual_rate: f64, periods_per_year: u32) -> Result<Self> {
        if periods_per_year == 0 {
            return Err(Error::Validation(
                "periods_per_year must be positive".to_string(),
            ));
        }
        if !annual_rate.is_finite() {
            return Err(Error::Validation(format!(
                "annual risk-free rate must be finite, got {}",
                annual_rate
            )));
        }
        Ok(Self::Constant(annual_rate / periods_per_year as f64))
    }

    /// The per-period rate applying on `date`.
    pub fn rate_on(&self, date: NaiveDate) -> Result<f64> {
        match self {
            Self::Constant(rate) => Ok(*rate),
            Self::Series(series) => series.get(date).ok_or_else(|| {
                Error::Validation(format!("risk-free series has no observation on {}", date))
            }),
        }
    }

    /// Rates for each of `dates`, in order.
    pub fn rates_for(&self, dates: &[NaiveDate]) -> Result<Vec<f64>> {
        dates.iter().map(|d| self.rate_on(*d)).collect()
    }
}

impl Default for RiskFreeRate {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<f64> for RiskFreeRate {
    fn from(rate: f64) -> Self {
        Self::Constant(rate)
    }
}

impl From<ReturnSeries> for RiskFreeRate {
    fn from(series: ReturnSeries) -> Self {
        Self::Series(series)
    }
}
