//! Price cleaning rules.
//!
//! Applied in order, each step feeding the next:
//! 1. drop rows missing `date` or `close`
//! 2. missing `open`/`high`/`low` take the row's `close`
//! 3. missing `volume` becomes 0
//! 4. drop rows with `close <= 0`
//! 5. drop rows where `high` is below any of `low`, `open`, `close`
//!
//! Surviving rows are returned in ascending date order.

use crate::domain::price::{PriceRecord, RawPriceRecord};

/// Row counts after each cleaning step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub after_missing: usize,
    pub after_non_positive: usize,
    pub after_price_check: usize,
}

impl CleaningReport {
    pub fn dropped(&self) -> usize {
        self.input_rows - self.after_price_check
    }
}

pub fn clean(rows: &[RawPriceRecord]) -> (Vec<PriceRecord>, CleaningReport) {
    let mut report = CleaningReport {
        input_rows: rows.len(),
        ..CleaningReport::default()
    };

    let filled: Vec<PriceRecord> = rows
        .iter()
        .filter_map(|raw| {
            let date = raw.date?;
            let close = raw.close?;
            Some(PriceRecord {
                date,
                open: raw.open.unwrap_or(close),
                high: raw.high.unwrap_or(close),
                low: raw.low.unwrap_or(close),
                close,
                volume: raw.volume.unwrap_or(0.0),
            })
        })
        .collect();
    report.after_missing = filled.len();

    let positive: Vec<PriceRecord> = filled.into_iter().filter(|r| r.close > 0.0).collect();
    report.after_non_positive = positive.len();

    let mut cleaned: Vec<PriceRecord> = positive.into_iter().filter(|r| r.is_consistent()).collect();
    report.after_price_check = cleaned.len();

    cleaned.sort_by_key(|r| r.date);
    (cleaned, report)
}
