//! Macroeconomic data access port.

use crate::domain::error::StocksvizError;
use crate::domain::macro_data::MacroRecord;

pub trait MacroSource {
    fn load_macro(&self) -> Result<Vec<MacroRecord>, StocksvizError>;
}
