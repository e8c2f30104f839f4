//! Domain error types.

/// Top-level error type for stocksviz.
#[derive(Debug, thiserror::Error)]
pub enum StocksvizError {
    #[error("no dataset found for company {symbol}")]
    NotFound { symbol: String },

    #[error("data unavailable: {what}")]
    DataUnavailable { what: String },

    #[error("macro data could not be loaded: {source}")]
    MacroLoad {
        #[source]
        source: Box<StocksvizError>,
    },

    #[error("malformed row in {file} at line {line}: {reason}")]
    MalformedRow {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("export failed: {reason}")]
    Export { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StocksvizError {
    pub fn macro_load(inner: StocksvizError) -> Self {
        StocksvizError::MacroLoad {
            source: Box::new(inner),
        }
    }
}

impl From<&StocksvizError> for std::process::ExitCode {
    fn from(err: &StocksvizError) -> Self {
        let code: u8 = match err {
            StocksvizError::Io(_) | StocksvizError::Export { .. } => 1,
            StocksvizError::ConfigParse { .. } | StocksvizError::ConfigInvalid { .. } => 2,
            StocksvizError::NotFound { .. } => 3,
            StocksvizError::DataUnavailable { .. } | StocksvizError::MacroLoad { .. } => 4,
            StocksvizError::MalformedRow { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
