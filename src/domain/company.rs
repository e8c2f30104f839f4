//! Company listings and per-company dataset facts.

use crate::domain::price::RawPriceRecord;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompanyListing {
    pub symbol: String,
    pub display_name: String,
}

impl CompanyListing {
    /// Listings are named after their symbol until a richer name source exists.
    pub fn from_symbol(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            display_name: symbol.clone(),
            symbol,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyInfo {
    pub symbol: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub total_days: usize,
    pub columns: Vec<String>,
}

impl CompanyInfo {
    pub fn from_rows(symbol: &str, rows: &[RawPriceRecord], columns: Vec<String>) -> Self {
        let dates = rows.iter().filter_map(|r| r.date);
        Self {
            symbol: symbol.to_string(),
            start_date: dates.clone().min(),
            end_date: dates.max(),
            total_days: rows.len(),
            columns,
        }
    }
}
