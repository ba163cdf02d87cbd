//! JSON report adapter implementing ReportPort.
//!
//! Writes watchlist reports and pair analyses as pretty-printed JSON. An
//! output path of `-` writes to stdout.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::domain::error::StockwatchError;
use crate::domain::pair::PairAnalysis;
use crate::domain::report::AnalysisReport;
use serde::Serialize;
use crate::ports::report_port::ReportPort;

pub const STDOUT_PATH: &str = "-";

pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }

    pub fn render<T: Serialize>(value: &T) -> Result<String, StockwatchError> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    fn emit(json: &str, output_path: &str) -> Result<(), StockwatchError> {
        if output_path == STDOUT_PATH {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
            return Ok(());
        }

        let path = Path::new(output_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;

        Ok(())
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &AnalysisReport, output_path: &str) -> Result<(), StockwatchError> {
        Self::emit(&Self::render(report)?, output_path)
    }

    fn write_pair(&self, pair: &PairAnalysis, output_path: &str) -> Result<(), StockwatchError> {
        Self::emit(&Self::render(pair)?, output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis_config::AnalysisConfig;
    use crate::domain::correlation_report::generate_correlation_report;
    use crate::domain::report::assemble_report;
    use chrono::NaiveDate;
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    fn empty_report() -> AnalysisReport {
        let now = NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assemble_report(
            BTreeMap::new(),
            generate_correlation_report(&[], &AnalysisConfig::default(), "2024-06-30 09:00:00"),
            BTreeMap::new(),
            [("AAPL".to_string(), 190.5)].into(),
            Vec::new(),
            now,
        )
    }

    #[test]
    fn writes_pretty_json_and_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("report.json");
        let adapter = JsonReportAdapter::new();

        adapter
            .write(&empty_report(), path.to_str().unwrap())
            .unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains('\n'));
        let json: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(json["stocks_analyzed"], 0);
        assert_eq!(json["latest_prices"]["AAPL"], 190.5);
        assert_eq!(json["summary"]["market_sentiment"], "NEUTRAL");
        assert!(json["correlation_results"]["portfolio_average_correlation"].is_null());
    }

    #[test]
    fn render_matches_written_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");
        let report = empty_report();

        JsonReportAdapter::default()
            .write(&report, path.to_str().unwrap())
            .unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            JsonReportAdapter::render(&report).unwrap()
        );
    }

    #[test]
    fn writes_pair_analysis() {
        use crate::domain::correlation::{CorrelationBreakdown, RollingPoint};

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairs").join("aapl_msft.json");
        let day = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
        let pair = PairAnalysis {
            first: "AAPL".into(),
            second: "MSFT".into(),
            window: 30,
            breakdown_threshold: 0.3,
            latest_correlation: Some(0.42),
            beta: Some(1.1),
            breakdowns: vec![CorrelationBreakdown {
                date: day,
                correlation_change: 0.35,
                new_correlation: 0.42,
            }],
            rolling_correlation: vec![RollingPoint {
                date: day,
                correlation: Some(0.42),
            }],
        };

        JsonReportAdapter::new()
            .write_pair(&pair, path.to_str().unwrap())
            .unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["first"], "AAPL");
        assert_eq!(json["window"], 30);
        assert_eq!(json["breakdowns"][0]["date"], "2024-06-28");
        assert_eq!(json["breakdowns"][0]["correlation_change"], 0.35);
        assert_eq!(json["rolling_correlation"][0]["correlation"], 0.42);
    }
}
