//! Integration tests for the analysis pipeline.
//!
//! Tests cover:
//! - Full pipeline with a mock data port, including per-security isolation
//! - Momentum signals on trending series
//! - Correlation report properties (anti-correlation, ordering, ranges)
//! - Sector analysis and lookback windowing
//! - JSON report output through the report port

mod common;

use common::*;
use stockwatch::adapters::json_report_adapter::JsonReportAdapter;
use stockwatch::domain::analysis::{analyze_watchlist, run_analysis, RunOptions};
use stockwatch::domain::analysis_config::AnalysisConfig;
use stockwatch::domain::correlation::{
    correlation_matrix, diversification_score, find_highly_correlated_pairs, PairStrength,
};
use stockwatch::domain::ohlcv::PriceSeries;
use stockwatch::domain::report::MarketSentiment;
use stockwatch::domain::signal::Signal;
use stockwatch::ports::report_port::ReportPort;

fn now() -> chrono::NaiveDateTime {
    date(2024, 7, 1).and_hms_opt(18, 0, 0).unwrap()
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

mod full_pipeline {
    use super::*;

    #[test]
    fn pipeline_with_mock_data_port() {
        let port = MockDataPort::new()
            .with_bars("UP", bars_from_closes("UP", "2024-01-01", &trending_closes(90, 100.0, 0.01)))
            .with_bars("DOWN", bars_from_closes("DOWN", "2024-01-01", &trending_closes(90, 100.0, -0.01)))
            .with_bars("FLAT", bars_from_closes("FLAT", "2024-01-01", &noisy_closes(90, 7)));

        let report = analyze_watchlist(
            &port,
            &codes(&["UP", "DOWN", "FLAT"]),
            date(2024, 1, 1),
            date(2024, 12, 31),
            &AnalysisConfig::default(),
            &RunOptions::default(),
            now(),
        );

        assert_eq!(report.stocks_analyzed, 3);
        let keys: Vec<&String> = report.momentum_results.keys().collect();
        assert_eq!(keys, vec!["DOWN", "FLAT", "UP"]);

        let up = &report.momentum_results["UP"];
        assert_eq!(up.signals.rsi, Signal::Sell);
        assert_eq!(up.signals.ma, Signal::Buy);
        assert!(up.indicators.rsi.unwrap() > 70.0);

        let down = &report.momentum_results["DOWN"];
        assert_eq!(down.signals.rsi, Signal::Buy);
        assert_eq!(down.signals.ma, Signal::Sell);

        let counts = &report.summary.momentum_summary;
        assert_eq!(counts.buy_signals + counts.sell_signals + counts.neutral_signals, 3);
        assert_eq!(report.latest_prices.len(), 3);
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn failing_securities_are_skipped_not_fatal() {
        let mut duplicated = bars_from_closes("DUP", "2024-01-01", &noisy_closes(40, 3));
        duplicated[10].date = duplicated[9].date;

        let port = MockDataPort::new()
            .with_bars("GOOD", bars_from_closes("GOOD", "2024-01-01", &noisy_closes(60, 1)))
            .with_bars("DUP", duplicated)
            .with_bars("EMPTY", Vec::new())
            .with_error("ERR", "connection reset");

        let report = analyze_watchlist(
            &port,
            &codes(&["GOOD", "DUP", "EMPTY", "ERR", "MISSING"]),
            date(2024, 1, 1),
            date(2024, 12, 31),
            &AnalysisConfig::default(),
            &RunOptions::default(),
            now(),
        );

        assert_eq!(report.stocks_analyzed, 1);
        assert_eq!(report.summary.total_stocks, 1);
        let skipped: Vec<&str> = report.skipped.iter().map(|s| s.code.as_str()).collect();
        assert_eq!(skipped, vec!["DUP", "EMPTY", "ERR", "MISSING"]);
        assert!(report.skipped[2].reason.contains("connection reset"));
        assert_eq!(report.correlation_results.stocks_analyzed, vec!["GOOD"]);
    }

    #[test]
    fn date_range_filters_bars() {
        let port = MockDataPort::new()
            .with_bars("AAA", bars_from_closes("AAA", "2024-01-01", &noisy_closes(60, 5)));

        let report = analyze_watchlist(
            &port,
            &codes(&["AAA"]),
            date(2024, 1, 1),
            date(2024, 1, 10),
            &AnalysisConfig::default(),
            &RunOptions::default(),
            now(),
        );

        let aaa = &report.momentum_results["AAA"];
        assert!(aaa.indicators.rsi.is_none());
        assert_eq!(aaa.signals.overall_signal, Signal::Neutral);
    }

    #[test]
    fn sentiment_follows_majority() {
        let series = vec![
            series("A", &trending_closes(80, 50.0, 0.01)),
            series("B", &trending_closes(80, 60.0, 0.012)),
            series("C", &trending_closes(80, 70.0, -0.01)),
        ];
        let report = run_analysis(&series, Vec::new(), &AnalysisConfig::default(), &RunOptions::default(), now());

        let counts = &report.summary.momentum_summary;
        let expected = MarketSentiment::from_counts(counts.buy_signals, counts.sell_signals);
        assert_eq!(report.summary.market_sentiment, expected);
    }
}

mod correlation_properties {
    use super::*;

    #[test]
    fn anti_correlated_pair_is_strong_minus_one() {
        let a = series("A", &zigzag_closes(60, 0.015, false));
        let b = series("B", &zigzag_closes(60, 0.015, true));
        let matrix = correlation_matrix(&[&a, &b]);

        let pairs = find_highly_correlated_pairs(&matrix, 0.5, 0.8);
        assert_eq!(pairs.len(), 1);
        assert!((pairs[0].correlation + 1.0).abs() < 1e-9);
        assert_eq!(pairs[0].strength, PairStrength::Strong);
    }

    #[test]
    fn pair_ordering_is_deterministic() {
        let series: Vec<PriceSeries> = (0..5)
            .map(|i| series(&format!("S{i}"), &noisy_closes(80, i)))
            .collect();
        let refs: Vec<&PriceSeries> = series.iter().collect();
        let matrix = correlation_matrix(&refs);

        let first = find_highly_correlated_pairs(&matrix, 0.0, 0.8);
        let second = find_highly_correlated_pairs(&matrix, 0.0, 0.8);
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);
        for w in first.windows(2) {
            assert!(w[0].correlation.abs() >= w[1].correlation.abs());
        }
    }

    #[test]
    fn pairs_respect_threshold() {
        let series: Vec<PriceSeries> = (0..4)
            .map(|i| series(&format!("S{i}"), &noisy_closes(60, 100 + i)))
            .collect();
        let refs: Vec<&PriceSeries> = series.iter().collect();
        let matrix = correlation_matrix(&refs);

        for pair in find_highly_correlated_pairs(&matrix, 0.3, 0.8) {
            assert!(pair.correlation.abs() >= 0.3);
            assert_ne!(pair.stock1, pair.stock2);
        }
    }

    #[test]
    fn diversification_in_unit_interval() {
        let series: Vec<PriceSeries> = (0..4)
            .map(|i| series(&format!("S{i}"), &noisy_closes(60, 40 + i)))
            .collect();
        let refs: Vec<&PriceSeries> = series.iter().collect();
        let score = diversification_score(&correlation_matrix(&refs));
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn report_with_sectors_and_lookback() {
        let series = vec![
            series("AAPL", &zigzag_closes(120, 0.01, false)),
            series("MSFT", &zigzag_closes(120, 0.01, false)),
            series("JPM", &noisy_closes(120, 9)),
        ];
        let options = RunOptions {
            sectors: [
                ("AAPL".to_string(), "Technology".to_string()),
                ("MSFT".to_string(), "Technology".to_string()),
                ("JPM".to_string(), "Financials".to_string()),
            ]
            .into(),
            correlation_lookback: Some(60),
        };

        let report = run_analysis(&series, Vec::new(), &AnalysisConfig::default(), &options, now());

        assert_eq!(report.sector_analysis.len(), 1);
        let tech = &report.sector_analysis["Technology"];
        assert_eq!(tech.stock_count, 2);
        assert_eq!(tech.average_correlation, Some(1.0));
        assert!(report.summary.correlation_summary.high_correlation_pairs >= 1);
        assert_eq!(
            report.correlation_results.highly_correlated_pairs[0].stock1,
            "AAPL"
        );
    }
}

mod report_output {
    use super::*;

    #[test]
    fn json_report_written_through_port() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        let series = vec![
            series("AAA", &noisy_closes(70, 1)),
            series("BBB", &noisy_closes(70, 2)),
        ];
        let report = run_analysis(&series, Vec::new(), &AnalysisConfig::default(), &RunOptions::default(), now());

        let adapter = JsonReportAdapter::new();
        adapter.write(&report, path.to_str().unwrap()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["stocks_analyzed"], 2);
        assert_eq!(json["timestamp"], "2024-07-01T18:00:00");
        assert!(json["momentum_results"]["AAA"]["signals"]["overall_signal"].is_string());
        assert!(json["correlation_results"]["correlation_matrix"]["AAA"]["BBB"].is_number());
        assert_eq!(json["correlation_results"]["correlation_matrix"]["AAA"]["AAA"], 1.0);
        assert!(json["summary"]["momentum_summary"]["buy_signals"].is_number());
    }
}
