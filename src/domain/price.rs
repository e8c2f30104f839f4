//! Daily price records, before and after cleaning.

use chrono::NaiveDate;

/// One row of a company dataset as loaded from its source.
///
/// Every field may be missing; the cleaning stage decides what survives.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawPriceRecord {
    pub date: Option<NaiveDate>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

/// A cleaned trading day: every field present, `close > 0`,
/// `high >= max(open, low, close)`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRecord {
    pub fn is_consistent(&self) -> bool {
        self.high >= self.low && self.high >= self.open && self.high >= self.close
    }
}

/// Anything positioned on the calendar, used by the time window filter.
pub trait Dated {
    fn date(&self) -> Option<NaiveDate>;
}

impl Dated for RawPriceRecord {
    fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

impl Dated for PriceRecord {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.date)
    }
}
