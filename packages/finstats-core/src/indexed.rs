//! Growth-of-unit index over a return series.
//!
//! The index starts at a base level and compounds each return:
//! `index_0 = base`, `index_t = index_{t-1} * (1 + r_t)`.

use crate::{Error, Result, ReturnSeries};
use chrono::NaiveDate;
use std::iter::FusedIterator;

/// Conventional starting level for indexed returns.
pub const DEFAULT_BASE: f64 = 100.0;

/// Lazy cumulative index over a borrowed return series.
///
/// Yields `len + 1` values: the base, then one level per return. Clone the
/// iterator (or call [`to_index`] again) to restart from the base.
#[derive(Debug, Clone)]
pub struct GrowthIndex<'a> {
    returns: std::slice::Iter<'a, f64>,
    level: f64,
    started: bool,
}

impl Iterator for GrowthIndex<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if !self.started {
            self.started = true;
            return Some(self.level);
        }
        let r = self.returns.next()?;
        self.level *= 1.0 + r;
        Some(self.level)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.returns.len() + usize::from(!self.started);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GrowthIndex<'_> {}
impl FusedIterator for GrowthIndex<'_> {}

/// Build the cumulative index of `series` starting at `base`.
///
/// # Errors
///
/// [`Error::Validation`] if `base` is not finite and positive.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use finstats_core::{indexed::to_index, ReturnSeries};
///
/// let d = |m| NaiveDate::from_ymd_opt(2024, m, 1).unwrap();
/// let series = ReturnSeries::from_returns([(d(1), 0.10), (d(2), -0.50)]).unwrap();
///
/// let index: Vec<f64> = to_index(&series, 100.0).unwrap().collect();
/// assert_eq!(index.len(), 3);
/// assert!((index[2] - 55.0).abs() < 1e-9);
/// ```
pub fn to_index(series: &ReturnSeries, base: f64) -> Result<GrowthIndex<'_>> {
    if !base.is_finite() || base <= 0.0 {
        return Err(Error::Validation(format!(
            "index base must be finite and positive, got {}",
            base
        )));
    }

    Ok(GrowthIndex {
        returns: series.values().iter(),
        level: base,
        started: false,
    })
}

/// The index paired with dates. The base level has no date of its own.
pub fn dated_index(series: &ReturnSeries, base: f64) -> Result<Vec<(Option<NaiveDate>, f64)>> {
    let dates = std::iter::once(None).chain(series.dates().iter().copied().map(Some));
    Ok(dates.zip(to_index(series, base)?).collect())
}

/// Recover periodic returns from consecutive index levels.
///
/// Inverse of [`to_index`]: `r_t = index_t / index_{t-1} - 1`.
pub fn index_to_returns(levels: &[f64]) -> Vec<f64> {
    levels.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}
