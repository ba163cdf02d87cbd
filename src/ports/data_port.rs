//! Market data access port trait.

use crate::domain::error::StockwatchError;
use crate::domain::ohlcv::OhlcvBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Daily bars for `code` with `start_date <= date <= end_date`, oldest first.
    fn fetch_ohlcv(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<OhlcvBar>, StockwatchError>;

    fn list_symbols(&self) -> Result<Vec<String>, StockwatchError>;

    /// First date, last date and bar count, or `None` if the source has no bars.
    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StockwatchError>;
}
