//! Output port for tables handed to the display layer.

use crate::domain::error::StocksvizError;
use crate::domain::price::RawPriceRecord;
use crate::domain::table::PreparedTable;

pub trait TableSink {
    fn write_prepared(&mut self, table: &PreparedTable) -> Result<(), StocksvizError>;

    fn write_raw(&mut self, rows: &[RawPriceRecord]) -> Result<(), StocksvizError>;
}
