//! End-to-end analysis pipeline.
//!
//! Raw bars are validated into [`PriceSeries`] one security at a time; a
//! security that fails validation is recorded as skipped and the batch goes
//! on. Valid series run through momentum analysis individually and through
//! the correlation engine together, then the report assembler merges both.

use crate::domain::analysis_config::AnalysisConfig;
use crate::domain::correlation::analyze_sector_correlation;
use crate::domain::correlation_report::generate_correlation_report;
use crate::domain::momentum::{analyze_momentum, MomentumResult};
use crate::domain::ohlcv::{OhlcvBar, PriceSeries};
use crate::domain::report::{assemble_report, AnalysisReport, SkippedSecurity, ANALYSIS_TIME_FORMAT};
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Options that shape a run beyond [`AnalysisConfig`].
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// code -> sector name for within-sector correlation.
    pub sectors: BTreeMap<String, String>,
    /// Hand only the most recent `lookback + 1` bars to the correlation engine.
    pub correlation_lookback: Option<usize>,
}

/// Fetch bars for every code. Fetch failures become skipped entries.
pub fn fetch_bars(
    data_port: &dyn DataPort,
    codes: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> (BTreeMap<String, Vec<OhlcvBar>>, Vec<SkippedSecurity>) {
    let mut fetched = BTreeMap::new();
    let mut skipped = Vec::new();

    for code in codes {
        match data_port.fetch_ohlcv(code, start_date, end_date) {
            Ok(bars) => {
                debug!(code = %code, bars = bars.len(), "fetched bars");
                fetched.insert(code.clone(), bars);
            }
            Err(e) => {
                warn!(code = %code, error = %e, "skipping security");
                skipped.push(SkippedSecurity {
                    code: code.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    (fetched, skipped)
}

/// Validate raw bars into series, in code order. Empty and malformed inputs
/// are skipped.
pub fn prepare_series(
    raw: BTreeMap<String, Vec<OhlcvBar>>,
) -> (Vec<PriceSeries>, Vec<SkippedSecurity>) {
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for (code, bars) in raw {
        if bars.is_empty() {
            warn!(code = %code, "skipping security: no bars in range");
            skipped.push(SkippedSecurity {
                reason: format!("no data for {}", code),
                code,
            });
            continue;
        }

        match PriceSeries::new(code.clone(), bars) {
            Ok(s) => series.push(s),
            Err(e) => {
                warn!(code = %code, error = %e, "skipping security");
                skipped.push(SkippedSecurity {
                    code,
                    reason: e.to_string(),
                });
            }
        }
    }

    (series, skipped)
}

pub fn run_momentum(
    series: &[PriceSeries],
    config: &AnalysisConfig,
) -> BTreeMap<String, MomentumResult> {
    series
        .iter()
        .map(|s| {
            let result = analyze_momentum(s, config);
            info!(
                code = %s.code(),
                signal = %result.signals.overall_signal,
                strength = result.signals.strength,
                "momentum analysis complete"
            );
            (s.code().to_string(), result)
        })
        .collect()
}

/// Run every analysis over validated series and assemble the report.
pub fn run_analysis(
    series: &[PriceSeries],
    skipped: Vec<SkippedSecurity>,
    config: &AnalysisConfig,
    options: &RunOptions,
    now: NaiveDateTime,
) -> AnalysisReport {
    info!(
        securities = series.len(),
        skipped = skipped.len(),
        "running analysis"
    );

    let momentum = run_momentum(series, config);

    let windowed: Vec<PriceSeries> = match options.correlation_lookback {
        Some(lookback) => series.iter().map(|s| s.tail(lookback + 1)).collect(),
        None => series.to_vec(),
    };
    let refs: Vec<&PriceSeries> = windowed.iter().collect();
    let correlation =
        generate_correlation_report(&refs, config, &now.format(ANALYSIS_TIME_FORMAT).to_string());
    info!(
        pairs = correlation.highly_correlated_pairs.len(),
        diversification = correlation.diversification_score,
        "correlation analysis complete"
    );

    let sectors = analyze_sector_correlation(&windowed, &options.sectors);
    debug!(sectors = sectors.len(), "sector analysis complete");

    let latest_prices = series
        .iter()
        .filter_map(|s| s.latest_close().map(|p| (s.code().to_string(), p)))
        .collect();

    assemble_report(momentum, correlation, sectors, latest_prices, skipped, now)
}

/// Fetch, validate and analyze `codes` from a data port.
pub fn analyze_watchlist(
    data_port: &dyn DataPort,
    codes: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
    config: &AnalysisConfig,
    options: &RunOptions,
    now: NaiveDateTime,
) -> AnalysisReport {
    let (raw, mut skipped) = fetch_bars(data_port, codes, start_date, end_date);
    let (series, invalid) = prepare_series(raw);
    skipped.extend(invalid);
    skipped.sort_by(|a, b| a.code.cmp(&b.code));

    run_analysis(&series, skipped, config, options, now)
}
