//! Domain error types.

/// Top-level error type for stockwatch.
///
/// Analytics in [`crate::domain`] are total over their inputs and report
/// insufficient or degenerate data as "no value" rather than as an error.
/// These variants cover the shell (config, data files, output) and contract
/// violations.
#[derive(Debug, thiserror::Error)]
pub enum StockwatchError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error("malformed price series for {code}: {reason}")]
    MalformedSeries { code: String, reason: String },

    #[error("unknown security: {code}")]
    UnknownSecurity { code: String },

    #[error("correlation matrix shape mismatch: {codes} codes, {rows} rows")]
    MatrixShape { codes: usize, rows: usize },

    #[error("watchlist error: {0}")]
    Watchlist(#[from] crate::domain::watchlist::WatchlistError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockwatchError> for std::process::ExitCode {
    fn from(err: &StockwatchError) -> Self {
        let code: u8 = match err {
            StockwatchError::Io(_) | StockwatchError::Json(_) => 1,
            StockwatchError::ConfigParse { .. }
            | StockwatchError::ConfigMissing { .. }
            | StockwatchError::ConfigInvalid { .. }
            | StockwatchError::Watchlist(_) => 2,
            StockwatchError::DataSource { .. } => 3,
            StockwatchError::MalformedSeries { .. }
            | StockwatchError::UnknownSecurity { .. }
            | StockwatchError::MatrixShape { .. } => 4,
            StockwatchError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
