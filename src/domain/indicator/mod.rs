//! Technical indicator kernels.
//!
//! Each kernel maps a date-ordered close series onto a series of the same
//! length, with `None` wherever the trailing lookback is not yet available:
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: one optional value per input row

pub mod rolling;
pub mod sma;
pub mod returns;
pub mod stddev;
pub mod rsi;
pub mod bollinger;

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    DailyReturn,
    PriceChange,
    Volatility(usize),
    Stddev(usize),
    Rsi(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<Option<f64>>,
}

impl IndicatorSeries {
    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied().flatten()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::DailyReturn => write!(f, "RETURN"),
            IndicatorType::PriceChange => write!(f, "CHANGE"),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
            IndicatorType::Stddev(period) => write!(f, "STDDEV({})", period),
            IndicatorType::Rsi(period) => write!(f, "RSI({})", period),
        }
    }
}
