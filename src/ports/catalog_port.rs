//! Company dataset access port.

use crate::domain::company::{CompanyInfo, CompanyListing};
use crate::domain::error::StocksvizError;
use crate::domain::price::RawPriceRecord;
use chrono::NaiveDate;

pub trait CompanyCatalog {
    /// Every available company, sorted by symbol. A missing backing store
    /// is an empty catalog, not an error.
    fn list_companies(&self) -> Result<Vec<CompanyListing>, StocksvizError>;

    /// Rows for `symbol` in ascending date order; `NotFound` when the
    /// company has no dataset.
    fn load(&self, symbol: &str) -> Result<Vec<RawPriceRecord>, StocksvizError>;

    fn company_info(&self, symbol: &str) -> Result<CompanyInfo, StocksvizError>;

    /// The built-in synthetic series, dated on consecutive days ending `today`.
    fn load_synthetic(&self, today: NaiveDate) -> Result<Vec<RawPriceRecord>, StocksvizError>;
}
