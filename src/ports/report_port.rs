//! Report output port trait.

use crate::domain::error::StockwatchError;
use crate::domain::pair::PairAnalysis;
use crate::domain::report::AnalysisReport;

/// Port for handing finished results to their consumer.
pub trait ReportPort {
    fn write(&self, report: &AnalysisReport, output_path: &str) -> Result<(), StockwatchError>;

    fn write_pair(&self, pair: &PairAnalysis, output_path: &str) -> Result<(), StockwatchError>;
}
