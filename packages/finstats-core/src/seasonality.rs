//! Calendar seasonality of returns.
//!
//! [`analyze`] groups returns by a calendar attribute (ignoring the year) and
//! summarizes each group. [`monthly_returns_table`] lays out compounded
//! returns per calendar month and year.

use crate::math;
use crate::risk::DEFAULT_DDOF;
use crate::ReturnSeries;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Calendar attribute used to bucket returns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Calendar month, keys 1-12
    Month,
    /// Calendar quarter, keys 1-4
    Quarter,
    /// ISO weekday, keys 1 (Monday) to 7 (Sunday)
    Weekday,
}

impl GroupBy {
    /// Number of buckets, i.e. the size of the fixed key set.
    pub fn bucket_count(self) -> usize {
        match self {
            Self::Month => 12,
            Self::Quarter => 4,
            Self::Weekday => 7,
        }
    }

    /// Bucket key of `date`, starting at 1.
    pub fn key_of(self, date: NaiveDate) -> u32 {
        match self {
            Self::Month => date.month(),
            Self::Quarter => (date.month() - 1) / 3 + 1,
            Self::Weekday => date.weekday().number_from_monday(),
        }
    }

    // `key` must come from `key_of` or lie in `1..=bucket_count`.
    fn label(self, key: u32) -> String {
        let idx = key as usize - 1;
        match self {
            Self::Month => MONTH_NAMES[idx].to_string(),
            Self::Quarter => format!("Q{}", key),
            Self::Weekday => WEEKDAY_NAMES[idx].to_string(),
        }
    }
}

impl std::str::FromStr for GroupBy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "weekday" => Ok(Self::Weekday),
            other => Err(crate::Error::Validation(format!(
                "unknown grouping '{}', expected month, quarter or weekday",
                other
            ))),
        }
    }
}

/// Summary of the returns falling in one bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BucketStats {
    /// Number of returns in the bucket
    pub count: usize,
    /// Arithmetic mean return
    pub mean: f64,
    /// Sample standard deviation (NaN with a single observation)
    pub std: f64,
}

/// One calendar bucket. `stats` is `None` when no return fell in it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonalBucket {
    /// Bucket key, 1-based (month number, quarter, ISO weekday)
    pub key: u32,
    /// Display name, e.g. "March", "Q2" or "Friday"
    pub label: String,
    /// Summary of the bucket's returns, `None` when it has none
    pub stats: Option<BucketStats>,
}

impl SeasonalBucket {
    /// Whether any return fell in this bucket.
    pub fn has_data(&self) -> bool {
        self.stats.is_some()
    }
}

/// Seasonal profile of a series: every bucket of the grouping, in key order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonalProfile {
    /// Grouping the profile was computed with
    pub group_by: GroupBy,
    /// One bucket per key, ascending
    pub buckets: Vec<SeasonalBucket>,
}

impl SeasonalProfile {
    /// Bucket for `key`, if the key belongs to the grouping.
    pub fn bucket(&self, key: u32) -> Option<&SeasonalBucket> {
        self.buckets.iter().find(|b| b.key == key)
    }
}

/// Group returns by calendar attribute and summarize each group.
///
/// The result always contains the full key set of `group_by`; buckets with no
/// observations are reported with `stats: None`.
///
/// # Example
///
/// ```rust
/// use chrono::NaiveDate;
/// use finstats_core::seasonality::{analyze, GroupBy};
/// use finstats_core::ReturnSeries;
///
/// let d = |m| NaiveDate::from_ymd_opt(2024, m, 28).unwrap();
/// let series = ReturnSeries::from_returns([(d(1), 0.02), (d(2), -0.01)]).unwrap();
///
/// let profile = analyze(&series, GroupBy::Quarter);
/// assert_eq!(profile.buckets.len(), 4);
/// assert!(profile.buckets[0].has_data());
/// assert!(!profile.buckets[1].has_data());
/// ```
pub fn analyze(series: &ReturnSeries, group_by: GroupBy) -> SeasonalProfile {
    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); group_by.bucket_count()];
    for (date, r) in series.iter() {
        groups[group_by.key_of(date) as usize - 1].push(r);
    }

    let buckets = groups
        .iter()
        .enumerate()
        .map(|(idx, values)| {
            let key = idx as u32 + 1;
            let stats = (!values.is_empty()).then(|| BucketStats {
                count: values.len(),
                mean: math::mean(values),
                std: math::std_dev(values, DEFAULT_DDOF).unwrap_or(f64::NAN),
            });
            SeasonalBucket {
                key,
                label: group_by.label(key),
                stats,
            }
        })
        .collect();

    tracing::debug!(?group_by, observations = series.len(), "computed seasonal profile");
    SeasonalProfile { group_by, buckets }
}

/// Compounded returns of one calendar year, by month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct YearRow {
    /// Calendar year
    pub year: i32,
    /// Index 0 is January; `None` where the year has no return in that month
    pub months: [Option<f64>; 12],
    /// Compounded return over every observed month of the year
    pub total: f64,
}

/// Year-by-month grid of compounded returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlyReturnsTable {
    /// One row per observed year, ascending
    pub rows: Vec<YearRow>,
}

impl MonthlyReturnsTable {
    /// Row for `year`, if the series covers it.
    pub fn year(&self, year: i32) -> Option<&YearRow> {
        self.rows.iter().find(|r| r.year == year)
    }
}

/// Compound returns within each calendar (year, month) into a table.
///
/// Each cell is `prod(1 + r) - 1` over the returns dated in that month, so a
/// daily series is rolled up to monthly returns. Rows are in year order.
pub fn monthly_returns_table(series: &ReturnSeries) -> MonthlyReturnsTable {
    let mut growth: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
    for (date, r) in series.iter() {
        let cell = &mut growth.entry(date.year()).or_insert([None; 12])[date.month0() as usize];
        *cell = Some(cell.unwrap_or(1.0) * (1.0 + r));
    }

    let rows = growth
        .into_iter()
        .map(|(year, cells)| {
            let total = cells.iter().flatten().product::<f64>() - 1.0;
            YearRow {
                year,
                months: cells.map(|c| c.map(|g| g - 1.0)),
                total,
            }
        })
        .collect();

    MonthlyReturnsTable { rows }
}
