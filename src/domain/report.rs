//! Final report assembly.
//!
//! A pure merge of per-security momentum results and the correlation report
//! into one [`AnalysisReport`]; nothing is recomputed here except counts and
//! the market sentiment verdict.

use crate::domain::correlation::SectorCorrelation;
use crate::domain::correlation_report::CorrelationReport;
use crate::domain::momentum::MomentumResult;
use crate::domain::signal::Signal;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const ANALYSIS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketSentiment {
    Bullish,
    Bearish,
    Neutral,
}

impl MarketSentiment {
    pub fn from_counts(buy: usize, sell: usize) -> Self {
        match buy.cmp(&sell) {
            std::cmp::Ordering::Greater => MarketSentiment::Bullish,
            std::cmp::Ordering::Less => MarketSentiment::Bearish,
            std::cmp::Ordering::Equal => MarketSentiment::Neutral,
        }
    }
}

/// A security left out of the analysis and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedSecurity {
    pub code: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MomentumSummary {
    pub buy_signals: usize,
    pub sell_signals: usize,
    pub neutral_signals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationSummary {
    pub high_correlation_pairs: usize,
    pub average_correlation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_stocks: usize,
    pub analysis_time: String,
    pub momentum_summary: MomentumSummary,
    pub correlation_summary: CorrelationSummary,
    pub market_sentiment: MarketSentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub timestamp: String,
    pub stocks_analyzed: usize,
    pub momentum_results: BTreeMap<String, MomentumResult>,
    pub correlation_results: CorrelationReport,
    pub sector_analysis: BTreeMap<String, SectorCorrelation>,
    pub latest_prices: BTreeMap<String, f64>,
    pub skipped: Vec<SkippedSecurity>,
    pub summary: PortfolioSummary,
}

pub fn summarize_momentum<'a>(results: impl IntoIterator<Item = &'a MomentumResult>) -> MomentumSummary {
    results
        .into_iter()
        .fold(MomentumSummary::default(), |mut acc, r| {
            match r.signals.overall_signal {
                Signal::Buy => acc.buy_signals += 1,
                Signal::Sell => acc.sell_signals += 1,
                Signal::Neutral => acc.neutral_signals += 1,
            }
            acc
        })
}

/// Merge analysis results into a report stamped with `now`.
pub fn assemble_report(
    momentum_results: BTreeMap<String, MomentumResult>,
    correlation_results: CorrelationReport,
    sector_analysis: BTreeMap<String, SectorCorrelation>,
    latest_prices: BTreeMap<String, f64>,
    skipped: Vec<SkippedSecurity>,
    now: NaiveDateTime,
) -> AnalysisReport {
    let momentum_summary = summarize_momentum(momentum_results.values());
    let market_sentiment =
        MarketSentiment::from_counts(momentum_summary.buy_signals, momentum_summary.sell_signals);

    let summary = PortfolioSummary {
        total_stocks: momentum_results.len(),
        analysis_time: now.format(ANALYSIS_TIME_FORMAT).to_string(),
        momentum_summary,
        correlation_summary: CorrelationSummary {
            high_correlation_pairs: correlation_results.highly_correlated_pairs.len(),
            average_correlation: correlation_results.portfolio_average_correlation,
        },
        market_sentiment,
    };

    AnalysisReport {
        timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
        stocks_analyzed: momentum_results.len(),
        momentum_results,
        correlation_results,
        sector_analysis,
        latest_prices,
        skipped,
        summary,
    }
}
