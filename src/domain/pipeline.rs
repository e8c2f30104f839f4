//! End-to-end preparation: catalog load → clean + derive → macro merge.
//!
//! Each stage takes its predecessor's output by reference and returns a new
//! value; nothing is cached between runs. A failure anywhere yields an
//! error, never a partially enriched table.

use crate::domain::engine::clean_and_derive;
use crate::domain::error::StocksvizError;
use crate::domain::merge::merge;
use crate::domain::price::RawPriceRecord;
use crate::domain::table::PreparedTable;
use crate::ports::catalog_port::CompanyCatalog;
use crate::ports::macro_port::MacroSource;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

pub const SYNTHETIC_LABEL: &str = "synthetic";

/// What the caller asked to look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Company(String),
    Synthetic,
}

/// A dataset ready for display. `notice` is set when the rows stand in for
/// something that failed.
#[derive(Debug)]
pub enum Dataset {
    /// Cleaned, enriched and merged with macro data.
    Prepared {
        table: PreparedTable,
        notice: Option<StocksvizError>,
    },
    /// Unprocessed rows.
    Raw {
        label: String,
        rows: Vec<RawPriceRecord>,
        notice: Option<StocksvizError>,
    },
}

impl Dataset {
    pub fn is_prepared(&self) -> bool {
        matches!(self, Dataset::Prepared { .. })
    }

    pub fn is_fallback(&self) -> bool {
        self.notice().is_some()
    }

    pub fn notice(&self) -> Option<&StocksvizError> {
        match self {
            Dataset::Prepared { notice, .. } | Dataset::Raw { notice, .. } => notice.as_ref(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Dataset::Prepared { table, .. } => table.symbol(),
            Dataset::Raw { label, .. } => label,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Dataset::Prepared { table, .. } => table.len(),
            Dataset::Raw { rows, .. } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Load `symbol` from the catalog and prepare it.
pub fn prepare(
    catalog: &dyn CompanyCatalog,
    macro_source: &dyn MacroSource,
    symbol: &str,
) -> Result<PreparedTable, StocksvizError> {
    let raw = catalog.load(symbol)?;
    prepare_rows(symbol, &raw, macro_source)
}

/// Prepare rows that were already loaded for `symbol`.
pub fn prepare_rows(
    symbol: &str,
    raw: &[RawPriceRecord],
    macro_source: &dyn MacroSource,
) -> Result<PreparedTable, StocksvizError> {
    let macro_rows = macro_source
        .load_macro()
        .map_err(StocksvizError::macro_load)?;
    info!(symbol, rows = macro_rows.len(), "loaded macro data");

    let (enriched, report) = clean_and_derive(raw);
    info!(
        symbol,
        input = report.input_rows,
        after_missing = report.after_missing,
        after_non_positive = report.after_non_positive,
        after_price_check = report.after_price_check,
        "cleaned price data"
    );
    if report.dropped() > 0 {
        debug!(symbol, dropped = report.dropped(), "dropped rows during cleaning");
    }

    let rows = merge(Some(enriched.as_slice()), Some(macro_rows.as_slice()))
        .map_err(StocksvizError::macro_load)?;
    info!(symbol, rows = rows.len(), "merged macro data");

    Ok(PreparedTable::new(symbol, rows))
}

/// Resolve a selection into something displayable.
///
/// A company that cannot be loaded is replaced by the synthetic series, which
/// is still preprocessed. A failed preprocessing step falls back to the
/// unprocessed rows. Fallbacks carry the error that caused them. With no
/// company selected the synthetic series is returned as is.
pub fn load_dataset(
    catalog: &dyn CompanyCatalog,
    macro_source: &dyn MacroSource,
    selection: &Selection,
    enable_preprocessing: bool,
    today: NaiveDate,
) -> Result<Dataset, StocksvizError> {
    let symbol = match selection {
        Selection::Synthetic => {
            return Ok(Dataset::Raw {
                label: SYNTHETIC_LABEL.to_string(),
                rows: catalog.load_synthetic(today)?,
                notice: None,
            });
        }
        Selection::Company(symbol) => symbol,
    };

    let (label, raw, notice) = match catalog.load(symbol) {
        Ok(rows) => (symbol.as_str(), rows, None),
        Err(e) => {
            warn!(symbol = %symbol, error = %e, "company data unavailable, using synthetic series");
            (SYNTHETIC_LABEL, catalog.load_synthetic(today)?, Some(e))
        }
    };

    if !enable_preprocessing {
        return Ok(Dataset::Raw {
            label: label.to_string(),
            rows: raw,
            notice,
        });
    }

    match prepare_rows(label, &raw, macro_source) {
        Ok(table) => Ok(Dataset::Prepared { table, notice }),
        Err(e) => {
            warn!(label, error = %e, "preprocessing failed, using raw data");
            Ok(Dataset::Raw {
                label: label.to_string(),
                rows: raw,
                notice: Some(notice.unwrap_or(e)),
            })
        }
    }
}
