//! Result types shared by the report and the CLI.

use serde::{Deserialize, Serialize};

/// How a metric value should be read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    /// Dimensionless ratio (Sharpe, Beta, correlation)
    Ratio,
    /// Fractional return or share (0.01 = 1%)
    Fraction,
    /// Fractional loss magnitude, positive for a loss (VaR, ES, drawdown)
    LossFraction,
    /// Number of return periods
    Periods,
}

/// A named metric value.
///
/// NaN and infinite values are legitimate results for degenerate inputs (for
/// example a flat series has an undefined Sharpe ratio) and are kept as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricResult {
    /// Metric name
    pub name: String,
    /// Computed value; `null` in JSON when NaN or infinite
    pub value: f64,
    /// Interpretation of `value`
    pub unit: MetricUnit,
}

impl MetricResult {
    /// Create a new metric result.
    pub fn new(name: impl Into<String>, value: f64, unit: MetricUnit) -> Self {
        Self {
            name: name.into(),
            value,
            unit,
        }
    }

    /// Whether the value is a finite number rather than an undefined sentinel.
    pub fn is_defined(&self) -> bool {
        self.value.is_finite()
    }
}

/// API response wrapper for CLI output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response.
    pub fn err(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }
}
