//! Performance metrics.
//!
//! Alpha, Beta, Sharpe, Sortino, Calmar, Jensen's alpha and related ratios, plus return summaries.

mod ratios;
mod returns;

pub(crate) use ratios::check_periods;
pub use ratios::{
    alpha, beta, calmar_ratio, correlation, downside_deviation, information_ratio,
    jensen_alpha, sharpe_ratio, sortino_ratio, DEFAULT_TARGET_RETURN,
};
pub use returns::{
    best_return, cumulative_return, geometric_mean_return, mean_return, positive_share,
    worst_return,
};
