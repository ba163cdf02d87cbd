//! Configuration validation.
//!
//! Checks raw config values before a run. Unset keys are valid (defaults
//! apply); set keys must be in range.

use crate::domain::analysis_config::{AnalysisConfig, CORRELATION_SECTION, MOMENTUM_SECTION};
use crate::domain::error::StockwatchError;
use crate::ports::config_port::ConfigPort;
use chrono::{Duration, NaiveDate};

pub const DATA_SECTION: &str = "data";

/// History fetched when `[data] start_date` is unset, counted back from the end date.
pub const DEFAULT_HISTORY_DAYS: i64 = 183;

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    validate_periods(config)?;
    validate_orderings(config)?;
    validate_bb_std(config)?;
    validate_correlation_thresholds(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> StockwatchError {
    StockwatchError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_periods(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    let d = AnalysisConfig::default();
    let checks: [(&str, &str, usize, i64); 12] = [
        (MOMENTUM_SECTION, "rsi_period", d.rsi_period, 1),
        (MOMENTUM_SECTION, "macd_fast", d.macd_fast, 1),
        (MOMENTUM_SECTION, "macd_slow", d.macd_slow, 1),
        (MOMENTUM_SECTION, "macd_signal", d.macd_signal, 1),
        (MOMENTUM_SECTION, "sma_short", d.sma_short, 1),
        (MOMENTUM_SECTION, "sma_long", d.sma_long, 1),
        (MOMENTUM_SECTION, "bb_period", d.bb_period, 1),
        (MOMENTUM_SECTION, "stoch_k", d.stoch_k, 1),
        (MOMENTUM_SECTION, "stoch_d", d.stoch_d, 1),
        (MOMENTUM_SECTION, "williams_period", d.williams_period, 1),
        (CORRELATION_SECTION, "rolling_window", d.rolling_window, 2),
        (CORRELATION_SECTION, "lookback_period", d.lookback_period, 2),
    ];

    for (section, key, default, minimum) in checks {
        if config.get_int(section, key, default as i64) < minimum {
            return Err(invalid(
                section,
                key,
                &format!("{} must be at least {}", key, minimum),
            ));
        }
    }

    if config.get_int(CORRELATION_SECTION, "max_reported_pairs", d.max_reported_pairs as i64) < 0 {
        return Err(invalid(
            CORRELATION_SECTION,
            "max_reported_pairs",
            "max_reported_pairs must be non-negative",
        ));
    }
    Ok(())
}

fn validate_orderings(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    let cfg = AnalysisConfig::from_config(config);
    if cfg.macd_fast >= cfg.macd_slow {
        return Err(invalid(
            MOMENTUM_SECTION,
            "macd_fast",
            "macd_fast must be less than macd_slow",
        ));
    }
    if cfg.sma_short >= cfg.sma_long {
        return Err(invalid(
            MOMENTUM_SECTION,
            "sma_short",
            "sma_short must be less than sma_long",
        ));
    }
    Ok(())
}

fn validate_bb_std(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    let value = config.get_double(MOMENTUM_SECTION, "bb_std", 2.0);
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(MOMENTUM_SECTION, "bb_std", "bb_std must be positive"));
    }
    Ok(())
}

fn validate_correlation_thresholds(config: &dyn ConfigPort) -> Result<(), StockwatchError> {
    let d = AnalysisConfig::default();
    for (key, default) in [
        ("min_correlation", d.min_correlation),
        ("strong_correlation", d.strong_correlation),
    ] {
        let value = config.get_double(CORRELATION_SECTION, key, default);
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(
                CORRELATION_SECTION,
                key,
                &format!("{} must be between 0 and 1", key),
            ));
        }
    }

    let breakdown = config.get_double(CORRELATION_SECTION, "breakdown_threshold", d.breakdown_threshold);
    if !(breakdown > 0.0 && breakdown <= 2.0) {
        return Err(invalid(
            CORRELATION_SECTION,
            "breakdown_threshold",
            "breakdown_threshold must be in (0, 2]",
        ));
    }
    Ok(())
}

fn parse_date(value: &str, key: &str) -> Result<NaiveDate, StockwatchError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        invalid(
            DATA_SECTION,
            key,
            &format!("invalid {} format, expected YYYY-MM-DD", key),
        )
    })
}

/// `[data] start_date` / `end_date`, defaulting to the last
/// [`DEFAULT_HISTORY_DAYS`] days up to `today`. The range must not be inverted.
pub fn data_range(
    config: &dyn ConfigPort,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate), StockwatchError> {
    let end_date = match config.get_string(DATA_SECTION, "end_date") {
        Some(s) => parse_date(&s, "end_date")?,
        None => today,
    };
    let start_date = match config.get_string(DATA_SECTION, "start_date") {
        Some(s) => parse_date(&s, "start_date")?,
        None => end_date - Duration::days(DEFAULT_HISTORY_DAYS),
    };

    if start_date > end_date {
        return Err(invalid(
            DATA_SECTION,
            "start_date",
            "start_date must not be after end_date",
        ));
    }
    Ok((start_date, end_date))
}
