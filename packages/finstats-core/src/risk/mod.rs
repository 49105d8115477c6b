//! Risk metrics.
//!
//! Provides standard deviation, Value at Risk, Expected Shortfall and drawdown
//! statistics over a single [`ReturnSeries`](crate::ReturnSeries).

mod drawdown;
mod var;

pub use drawdown::{losing_streak, max_drawdown, recovery_period};
pub(crate) use var::check_confidence;
pub use var::{
    expected_shortfall, parametric_var, standard_deviation, value_at_risk, DEFAULT_DDOF,
};
