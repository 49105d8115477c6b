//! Finstats CLI - Command line interface for return statistics.
//!
//! Reads `date,value` CSV files and prints JSON for downstream reporting.

use clap::{Parser, Subcommand};
use finstats_core::{
    indexed::{dated_index, to_index},
    loader::{load_series, ValueKind},
    performance,
    report::StatsReport,
    risk,
    seasonality::{analyze, monthly_returns_table, GroupBy},
    ApiResponse, ReturnSeries, StatsConfig,
};
use serde::Serialize;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "finstats")]
#[command(about = "Performance and risk statistics for price and return series")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.finstats/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat input values as periodic returns instead of prices
    #[arg(long, global = true)]
    returns: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full statistics report of an asset against a benchmark
    Report {
        /// Asset CSV file
        #[arg(short, long)]
        asset: PathBuf,
        /// Benchmark CSV file
        #[arg(short, long)]
        benchmark: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Tail-risk metrics of a single series
    Risk {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Mean and standard deviation of returns by calendar bucket
    Seasonality {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,
        /// Calendar bucket: month, quarter or weekday
        #[arg(short, long, default_value = "month")]
        group_by: GroupBy,
    },
    /// Compounded returns by year and month
    Monthly {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Growth index starting at a base level
    Index {
        /// Input CSV file
        #[arg(short, long)]
        input: PathBuf,
        /// Starting level (overrides config)
        #[arg(long)]
        base: Option<f64>,
    },
    /// Show the effective configuration, or write it to the config file
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(clap::Args, Default)]
struct Overrides {
    /// Confidence level for VaR and ES (0.95 = 95%)
    #[arg(long)]
    confidence: Option<f64>,
    /// Return periods per year (252 daily, 12 monthly)
    #[arg(long)]
    periods_per_year: Option<u32>,
    /// Annual risk-free rate (0.02 = 2%)
    #[arg(long)]
    risk_free: Option<f64>,
    /// Target return for the Sortino ratio
    #[arg(long)]
    target_return: Option<f64>,
}

impl Overrides {
    fn apply(&self, mut config: StatsConfig) -> StatsConfig {
        if let Some(c) = self.confidence {
            config.confidence = c;
        }
        if let Some(p) = self.periods_per_year {
            config.periods_per_year = p;
        }
        if let Some(rf) = self.risk_free {
            config.annual_risk_free = rf;
        }
        if let Some(t) = self.target_return {
            config.target_return = t;
        }
        config
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let kind = if cli.returns {
        ValueKind::Returns
    } else {
        ValueKind::Prices
    };
    let config_path = cli.config.unwrap_or_else(StatsConfig::default_path);

    let output = match run(cli.command, &config_path, kind) {
        Ok(value) => to_json(&ApiResponse::ok(value)),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            to_json(&ApiResponse::<()>::err(e.to_string()))
        }
    };

    println!("{}", output);
}

fn run(
    command: Commands,
    config_path: &Path,
    kind: ValueKind,
) -> finstats_core::Result<serde_json::Value> {
    let config = StatsConfig::load(config_path)?;

    match command {
        Commands::Report {
            asset,
            benchmark,
            overrides,
        } => {
            let config = overrides.apply(config);
            let asset = load_series(&asset, kind)?;
            let benchmark = load_series(&benchmark, kind)?;
            let report = StatsReport::compute(&asset, &benchmark, &config)?;
            Ok(serde_json::to_value(report)?)
        }
        Commands::Risk { input, overrides } => {
            let config = overrides.apply(config);
            config.validate()?;
            let series = load_series(&input, kind)?;
            handle_risk(&series, &config)
        }
        Commands::Seasonality { input, group_by } => {
            let series = load_series(&input, kind)?;
            Ok(serde_json::to_value(analyze(&series, group_by))?)
        }
        Commands::Monthly { input } => {
            let series = load_series(&input, kind)?;
            Ok(serde_json::to_value(monthly_returns_table(&series))?)
        }
        Commands::Index { input, base } => {
            let series = load_series(&input, kind)?;
            let base = base.unwrap_or(config.index_base);
            let points: Vec<_> = dated_index(&series, base)?
                .into_iter()
                .map(|(date, level)| json!({ "date": date, "level": level }))
                .collect();
            let last = to_index(&series, base)?.last().unwrap_or(base);
            Ok(json!({
                "base": base,
                "final": last,
                "points": points,
            }))
        }
        Commands::Config { save, overrides } => {
            let config = overrides.apply(config);
            config.validate()?;
            if save {
                config.save(config_path)?;
                tracing::info!(path = %config_path.display(), "saved config");
            }
            Ok(json!({
                "path": config_path,
                "config": config,
            }))
        }
    }
}

fn handle_risk(series: &ReturnSeries, config: &StatsConfig) -> finstats_core::Result<serde_json::Value> {
    let c = config.confidence;
    Ok(json!({
        "observations": series.len(),
        "confidence": c,
        "standard_deviation": risk::standard_deviation(series, config.ddof)?,
        "value_at_risk": risk::value_at_risk(series, c)?,
        "parametric_var": risk::parametric_var(series, c)?,
        "expected_shortfall": risk::expected_shortfall(series, c)?,
        "max_drawdown": risk::max_drawdown(series)?,
        "worst_return": performance::worst_return(series),
    }))
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!(r#"{{"ok":false,"error":"{}"}}"#, e))
}
