//! Immutable analysis parameters.
//!
//! Built once from configuration (or [`Default`]) and passed by reference to
//! every engine function.

use crate::ports::config_port::ConfigPort;

pub const MOMENTUM_SECTION: &str = "momentum";
pub const CORRELATION_SECTION: &str = "correlation";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub sma_short: usize,
    pub sma_long: usize,
    pub bb_period: usize,
    pub bb_std: f64,
    pub stoch_k: usize,
    pub stoch_d: usize,
    pub williams_period: usize,
    pub rolling_window: usize,
    pub min_correlation: f64,
    pub lookback_period: usize,
    pub breakdown_threshold: f64,
    pub strong_correlation: f64,
    pub max_reported_pairs: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            sma_short: 20,
            sma_long: 50,
            bb_period: 20,
            bb_std: 2.0,
            stoch_k: 14,
            stoch_d: 3,
            williams_period: 14,
            rolling_window: 30,
            min_correlation: 0.5,
            lookback_period: 60,
            breakdown_threshold: 0.3,
            strong_correlation: 0.8,
            max_reported_pairs: 10,
        }
    }
}

impl AnalysisConfig {
    /// Read `[momentum]` and `[correlation]`, falling back to defaults for unset keys.
    ///
    /// Negative integers fall back too; range checks live in `config_validation`.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let d = Self::default();
        let m = MOMENTUM_SECTION;
        let c = CORRELATION_SECTION;

        let period = |section: &str, key: &str, default: usize| -> usize {
            usize::try_from(config.get_int(section, key, default as i64)).unwrap_or(default)
        };

        Self {
            rsi_period: period(m, "rsi_period", d.rsi_period),
            macd_fast: period(m, "macd_fast", d.macd_fast),
            macd_slow: period(m, "macd_slow", d.macd_slow),
            macd_signal: period(m, "macd_signal", d.macd_signal),
            sma_short: period(m, "sma_short", d.sma_short),
            sma_long: period(m, "sma_long", d.sma_long),
            bb_period: period(m, "bb_period", d.bb_period),
            bb_std: config.get_double(m, "bb_std", d.bb_std),
            stoch_k: period(m, "stoch_k", d.stoch_k),
            stoch_d: period(m, "stoch_d", d.stoch_d),
            williams_period: period(m, "williams_period", d.williams_period),
            rolling_window: period(c, "rolling_window", d.rolling_window),
            min_correlation: config.get_double(c, "min_correlation", d.min_correlation),
            lookback_period: period(c, "lookback_period", d.lookback_period),
            breakdown_threshold: config.get_double(c, "breakdown_threshold", d.breakdown_threshold),
            strong_correlation: config.get_double(c, "strong_correlation", d.strong_correlation),
            max_reported_pairs: period(c, "max_reported_pairs", d.max_reported_pairs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.rsi_period, 14);
        assert_eq!((cfg.macd_fast, cfg.macd_slow, cfg.macd_signal), (12, 26, 9));
        assert_eq!((cfg.sma_short, cfg.sma_long), (20, 50));
        assert_eq!(cfg.bb_period, 20);
        assert!((cfg.bb_std - 2.0).abs() < f64::EPSILON);
        assert_eq!(cfg.rolling_window, 30);
        assert!((cfg.min_correlation - 0.5).abs() < f64::EPSILON);
        assert_eq!(cfg.lookback_period, 60);
        assert_eq!(cfg.max_reported_pairs, 10);
    }

    #[test]
    fn empty_config_yields_defaults() {
        let adapter = FileConfigAdapter::from_string("[momentum]\n").unwrap();
        assert_eq!(AnalysisConfig::from_config(&adapter), AnalysisConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let ini = "[momentum]\nrsi_period = 7\nbb_std = 2.5\n\n[correlation]\nmin_correlation = 0.7\nrolling_window = 10\n";
        let adapter = FileConfigAdapter::from_string(ini).unwrap();
        let cfg = AnalysisConfig::from_config(&adapter);

        assert_eq!(cfg.rsi_period, 7);
        assert!((cfg.bb_std - 2.5).abs() < f64::EPSILON);
        assert!((cfg.min_correlation - 0.7).abs() < f64::EPSILON);
        assert_eq!(cfg.rolling_window, 10);
        assert_eq!(cfg.macd_slow, 26);
    }

    #[test]
    fn negative_period_falls_back() {
        let adapter = FileConfigAdapter::from_string("[momentum]\nsma_short = -5\n").unwrap();
        assert_eq!(AnalysisConfig::from_config(&adapter).sma_short, 20);
    }
}
