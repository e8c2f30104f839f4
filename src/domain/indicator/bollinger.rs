//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is the sample standard deviation (divides by N-1), the same
//! convention as VOLATILITY.
//!
//! Default parameters: period=20, multiplier=2.0
//! Warmup: first (period-1) rows have no band.

use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::stddev::calculate_stddev;

pub const DEFAULT_PERIOD: usize = 20;
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBand {
    pub middle: f64,
    pub std_dev: f64,
    pub upper: f64,
    pub lower: f64,
}

pub fn calculate_bollinger(closes: &[f64], period: usize, multiplier: f64) -> Vec<Option<BollingerBand>> {
    let middle = calculate_sma(closes, period);
    let spread = calculate_stddev(closes, period);

    middle
        .values
        .iter()
        .zip(&spread.values)
        .map(|(&middle, &std_dev)| {
            let (middle, std_dev) = (middle?, std_dev?);
            Some(BollingerBand {
                middle,
                std_dev,
                upper: middle + multiplier * std_dev,
                lower: middle - multiplier * std_dev,
            })
        })
        .collect()
}
