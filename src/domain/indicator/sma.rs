//! Simple moving average of closing prices.
//!
//! SMA(n)[i] = mean(C[i-n+1..=i]); the first n-1 rows have no value.

use crate::domain::indicator::rolling::{rolling, RollingWindow};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_sma(closes: &[f64], period: usize) -> IndicatorSeries {
    let values: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values: rolling(&values, period, RollingWindow::mean),
    }
}
