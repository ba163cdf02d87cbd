//! CLI definition and dispatch.

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::{JsonReportAdapter, STDOUT_PATH};
use crate::domain::analysis::{analyze_watchlist, RunOptions};
use crate::domain::analysis_config::{AnalysisConfig, CORRELATION_SECTION};
use crate::domain::config_validation::{data_range, validate_analysis_config, DATA_SECTION};
use crate::domain::error::StockwatchError;
use crate::domain::ohlcv::PriceSeries;
use crate::domain::pair::{analyze_pair, PairAnalysis};
use crate::domain::report::AnalysisReport;
use crate::domain::watchlist::{load_sector_map, Watchlist};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "stockwatch",
    about = "Momentum signals and correlation analysis for a stock watchlist"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze every security on the watchlist
    Analyze {
        #[arg(short, long)]
        config: PathBuf,
        /// Report path; `-` for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file and its watchlist
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List securities with data files
    ListSymbols {
        #[arg(long)]
        data_dir: PathBuf,
    },
    /// Rolling correlation, breakdowns and beta for two securities
    Pair {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        first: String,
        #[arg(long)]
        second: String,
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        threshold: Option<f64>,
        /// Output path; `-` for stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Analyze {
            config,
            output,
            data_dir,
        } => run_analyze(&config, output.as_deref(), data_dir.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { data_dir } => run_list_symbols(&data_dir),
        Command::Pair {
            config,
            first,
            second,
            window,
            threshold,
            output,
            data_dir,
        } => run_pair(
            &config,
            &first,
            &second,
            window,
            threshold,
            output.as_deref(),
            data_dir.as_deref(),
        ),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, StockwatchError> {
    FileConfigAdapter::from_file(path)
}

/// `--data-dir` if given, else `[data] dir`.
pub fn resolve_data_dir(
    data_dir_override: Option<&Path>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, StockwatchError> {
    if let Some(dir) = data_dir_override {
        return Ok(dir.to_path_buf());
    }
    config
        .get_string(DATA_SECTION, "dir")
        .filter(|s| !s.trim().is_empty())
        .map(|s| PathBuf::from(s.trim()))
        .ok_or_else(|| StockwatchError::ConfigMissing {
            section: DATA_SECTION.to_string(),
            key: "dir".to_string(),
        })
}

pub fn build_run_options(config: &dyn ConfigPort, analysis: &AnalysisConfig) -> RunOptions {
    let apply_lookback = config.get_bool(CORRELATION_SECTION, "apply_lookback", false);
    RunOptions {
        sectors: load_sector_map(config),
        correlation_lookback: apply_lookback.then_some(analysis.lookback_period),
    }
}

/// Validate the config, then analyze its watchlist against `data_port`.
///
/// Fails with `NoData` when no security could be analyzed.
pub fn run_analyze_pipeline(
    data_port: &dyn DataPort,
    config: &dyn ConfigPort,
    now: NaiveDateTime,
) -> Result<AnalysisReport, StockwatchError> {
    validate_analysis_config(config)?;
    let analysis = AnalysisConfig::from_config(config);
    let watchlist = Watchlist::from_config(config)?;
    let (start_date, end_date) = data_range(config, now.date())?;
    let options = build_run_options(config, &analysis);

    let codes = watchlist.all_symbols();
    info!(
        securities = codes.len(),
        start = %start_date,
        end = %end_date,
        "analyzing watchlist"
    );

    let report = analyze_watchlist(
        data_port, &codes, start_date, end_date, &analysis, &options, now,
    );
    if report.stocks_analyzed == 0 {
        return Err(StockwatchError::NoData {
            code: "all".to_string(),
        });
    }
    Ok(report)
}

fn run_analyze(
    config_path: &Path,
    output_path: Option<&Path>,
    data_dir_override: Option<&Path>,
) -> Result<(), StockwatchError> {
    info!(path = %config_path.display(), "loading config");
    let config = load_config(config_path)?;
    let data_dir = resolve_data_dir(data_dir_override, &config)?;
    let data_port = CsvAdapter::new(data_dir);

    let report = run_analyze_pipeline(&data_port, &config, Local::now().naive_local())?;
    for skipped in &report.skipped {
        warn!(code = %skipped.code, reason = %skipped.reason, "skipped");
    }

    let output = output_target(output_path);
    JsonReportAdapter::new().write(&report, &output)?;

    info!(
        analyzed = report.stocks_analyzed,
        sentiment = ?report.summary.market_sentiment,
        output = %output,
        "analysis complete"
    );
    Ok(())
}

fn output_target(output_path: Option<&Path>) -> String {
    output_path
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| STDOUT_PATH.to_string())
}

fn run_validate(config_path: &Path) -> Result<(), StockwatchError> {
    info!(path = %config_path.display(), "validating config");
    let config = load_config(config_path)?;

    validate_analysis_config(&config)?;
    let watchlist = Watchlist::from_config(&config)?;
    let (start_date, end_date) = data_range(&config, Local::now().date_naive())?;
    let sectors = load_sector_map(&config);

    for (category, codes) in &watchlist.categories {
        eprintln!("  {}: {}", category, codes.join(", "));
    }
    eprintln!(
        "{} securities in {} categories, {} sector mappings, data {} to {}",
        watchlist.count(),
        watchlist.categories.len(),
        sectors.len(),
        start_date,
        end_date
    );
    eprintln!("Configuration is valid.");
    Ok(())
}

fn run_list_symbols(data_dir: &Path) -> Result<(), StockwatchError> {
    let data_port = CsvAdapter::new(data_dir.to_path_buf());
    let symbols = data_port.list_symbols()?;

    if symbols.is_empty() {
        eprintln!("No symbols found in {}", data_dir.display());
        return Ok(());
    }

    for symbol in &symbols {
        match data_port.get_data_range(symbol) {
            Ok(Some((first, last, bars))) => {
                println!("{}\t{}\t{}\t{}", symbol, first, last, bars)
            }
            Ok(None) => println!("{}\t-\t-\t0", symbol),
            Err(e) => warn!(code = %symbol, error = %e, "unreadable data file"),
        }
    }
    eprintln!("{} symbols found", symbols.len());
    Ok(())
}

/// Fetch one security for a pair request; a security without data is unknown.
fn fetch_series(
    data_port: &dyn DataPort,
    code: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<PriceSeries, StockwatchError> {
    let code = code.trim().to_uppercase();
    let bars = match data_port.fetch_ohlcv(&code, start_date, end_date) {
        Ok(bars) if !bars.is_empty() => bars,
        Ok(_) | Err(StockwatchError::NoData { .. }) => {
            return Err(StockwatchError::UnknownSecurity { code });
        }
        Err(e) => return Err(e),
    };
    PriceSeries::new(code, bars)
}

pub fn run_pair_pipeline(
    data_port: &dyn DataPort,
    config: &dyn ConfigPort,
    first: &str,
    second: &str,
    window: Option<usize>,
    threshold: Option<f64>,
    today: NaiveDate,
) -> Result<PairAnalysis, StockwatchError> {
    validate_analysis_config(config)?;
    let analysis = AnalysisConfig::from_config(config);
    let (start_date, end_date) = data_range(config, today)?;

    let window = window.unwrap_or(analysis.rolling_window);
    if window < 2 {
        return Err(StockwatchError::ConfigInvalid {
            section: CORRELATION_SECTION.to_string(),
            key: "window".to_string(),
            reason: "window must be at least 2".to_string(),
        });
    }
    let threshold = threshold.unwrap_or(analysis.breakdown_threshold);

    let a = fetch_series(data_port, first, start_date, end_date)?;
    let b = fetch_series(data_port, second, start_date, end_date)?;
    Ok(analyze_pair(&a, &b, window, threshold))
}

fn run_pair(
    config_path: &Path,
    first: &str,
    second: &str,
    window: Option<usize>,
    threshold: Option<f64>,
    output_path: Option<&Path>,
    data_dir_override: Option<&Path>,
) -> Result<(), StockwatchError> {
    let config = load_config(config_path)?;
    let data_dir = resolve_data_dir(data_dir_override, &config)?;
    let data_port = CsvAdapter::new(data_dir);

    let pair = run_pair_pipeline(
        &data_port,
        &config,
        first,
        second,
        window,
        threshold,
        Local::now().date_naive(),
    )?;

    let output = output_target(output_path);
    JsonReportAdapter::new().write_pair(&pair, &output)?;
    info!(
        first = %pair.first,
        second = %pair.second,
        breakdowns = pair.breakdowns.len(),
        output = %output,
        "pair analysis complete"
    );
    Ok(())
}
