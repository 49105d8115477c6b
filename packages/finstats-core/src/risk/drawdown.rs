//! Path-dependent loss measures on the compounded growth index.

use crate::indexed::{to_index, DEFAULT_BASE};
use crate::{Result, ReturnSeries};

/// Maximum peak-to-trough decline of the compounded series.
///
/// Returns a positive fraction (e.g., 0.15 for a 15% drawdown), or 0.0 if the
/// index never falls below a previous peak. The starting level counts as a peak.
pub fn max_drawdown(series: &ReturnSeries) -> Result<f64> {
    let mut running_max = f64::NEG_INFINITY;
    let mut max_drawdown = 0.0;

    for value in to_index(series, DEFAULT_BASE)? {
        if value > running_max {
            running_max = value;
        }
        let drawdown = (running_max - value) / running_max;
        if drawdown > max_drawdown {
            max_drawdown = drawdown;
        }
    }

    Ok(max_drawdown)
}

/// Longest run of consecutive negative returns.
pub fn losing_streak(series: &ReturnSeries) -> usize {
    let mut current = 0;
    let mut longest = 0;

    for r in series.values() {
        if *r < 0.0 {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }

    longest
}

/// Periods spent below the peak preceding the maximum drawdown.
///
/// Counts the periods after the peak in which the index stays under it; the
/// period that regains the peak is not counted. Returns `None` when there is
/// no drawdown or the index has not recovered by the end of the series.
pub fn recovery_period(series: &ReturnSeries) -> Result<Option<usize>> {
    let index: Vec<f64> = to_index(series, DEFAULT_BASE)?.collect();

    let mut peak_idx = 0;
    let mut worst = 0.0;
    let mut worst_peak_idx = None;

    for (i, value) in index.iter().enumerate() {
        if *value > index[peak_idx] {
            peak_idx = i;
        }
        let drawdown = (index[peak_idx] - value) / index[peak_idx];
        if drawdown > worst {
            worst = drawdown;
            worst_peak_idx = Some(peak_idx);
        }
    }

    let Some(start) = worst_peak_idx else {
        return Ok(None);
    };
    let peak = index[start];

    Ok(index[start + 1..].iter().position(|v| *v >= peak))
}
