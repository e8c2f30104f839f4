//! Rolling sample standard deviation (n - 1 denominator).
//!
//! STDDEV(n)[i] = sqrt(sum((C[i-j] - SMA(n)[i])^2 for j in 0..n) / (n - 1))
//! VOLATILITY(n) is the same statistic over daily returns; a window that
//! still contains the undefined first return has no value.

use crate::domain::indicator::rolling::{rolling, RollingWindow};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_stddev(closes: &[f64], period: usize) -> IndicatorSeries {
    let values: Vec<Option<f64>> = closes.iter().copied().map(Some).collect();
    IndicatorSeries {
        indicator_type: IndicatorType::Stddev(period),
        values: rolling(&values, period, RollingWindow::sample_std_dev),
    }
}

pub fn calculate_volatility(returns: &IndicatorSeries, period: usize) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::Volatility(period),
        values: rolling(&returns.values, period, RollingWindow::sample_std_dev),
    }
}
