//! Finstats Core - Performance and risk statistics over return series.
//!
//! This crate scores already-realized returns of an asset, optionally against
//! a benchmark:
//!
//! - **Return series**: validated, date-ordered returns built from prices or returns
//! - **Risk metrics**: standard deviation, VaR, Expected Shortfall, drawdown
//! - **Performance metrics**: Alpha, Beta, Sharpe, Sortino, information ratio
//! - **Seasonality**: returns grouped by month, quarter or weekday
//! - **Indexed returns**: growth-of-base index for comparison charts
//!
//! Every metric is a pure function of its inputs. Malformed input is an
//! [`Error`]; mathematically undefined results (a flat series has no Sharpe
//! ratio) come back as NaN or infinity.
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use finstats_core::{performance, risk, ReturnSeries, RiskFreeRate};
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
//! let prices = [(d(1), 100.0), (d(2), 101.0), (d(3), 99.5), (d(6), 100.5), (d(7), 102.0)];
//! let asset = ReturnSeries::from_prices(prices).unwrap();
//!
//! let std = risk::standard_deviation(&asset, risk::DEFAULT_DDOF).unwrap();
//! let sharpe = performance::sharpe_ratio(&asset, &RiskFreeRate::zero(), 252).unwrap();
//! assert!(std > 0.0);
//! assert!(sharpe.is_finite());
//! ```

pub mod config;
pub mod indexed;
pub mod loader;
pub mod math;
pub mod performance;
pub mod report;
pub mod risk;
pub mod seasonality;
pub mod series;
pub mod types;

// Re-export commonly used types
pub use config::StatsConfig;
pub use report::StatsReport;
pub use series::{AlignedPair, Observation, ReturnSeries, RiskFreeRate};
pub use types::{ApiResponse, MetricResult, MetricUnit};

// Re-export main functionality
pub use indexed::{to_index, GrowthIndex};
pub use performance::{alpha, beta, sharpe_ratio, sortino_ratio};
pub use risk::{expected_shortfall, standard_deviation, value_at_risk};
pub use seasonality::{analyze, GroupBy, SeasonalBucket, SeasonalProfile};

/// Error types for finstats-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Date parse error: {0}")]
    Date(#[from] chrono::ParseError),
}

/// Result type for finstats-core operations.
pub type Result<T> = std::result::Result<T, Error>;
