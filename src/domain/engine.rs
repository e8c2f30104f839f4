//! Indicator derivation over a cleaned price series.
//!
//! Pure and deterministic: the same rows always produce the same enriched
//! rows. Missing lookback is an absent value, never an error.

use std::fmt;

use crate::domain::cleaning::{clean, CleaningReport};
use crate::domain::indicator::bollinger::{self, calculate_bollinger};
use crate::domain::indicator::returns::{calculate_daily_return, calculate_price_change};
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::stddev::calculate_volatility;
use crate::domain::price::{Dated, PriceRecord, RawPriceRecord};
use chrono::NaiveDate;

pub const FAST_MA_PERIOD: usize = 5;
pub const SLOW_MA_PERIOD: usize = 20;
pub const LONG_MA_PERIOD: usize = 50;
pub const VOLATILITY_PERIOD: usize = 20;
pub const RSI_PERIOD: usize = 14;

/// Moving average crossover signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
}

impl Signal {
    /// `Buy` when the fast average is strictly above the slow one. A missing
    /// average compares false, which yields `Sell`.
    pub fn from_crossover(fast: Option<f64>, slow: Option<f64>) -> Self {
        match (fast, slow) {
            (Some(f), Some(s)) if f > s => Signal::Buy,
            _ => Signal::Sell,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "Buy"),
            Signal::Sell => write!(f, "Sell"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Indicators {
    pub ma_5: Option<f64>,
    pub ma_20: Option<f64>,
    pub ma_50: Option<f64>,
    pub signal: Signal,
    pub daily_return: Option<f64>,
    pub price_change: Option<f64>,
    pub volatility: Option<f64>,
    pub rsi: Option<f64>,
    pub bb_middle: Option<f64>,
    pub bb_std_dev: Option<f64>,
    pub bb_upper: Option<f64>,
    pub bb_lower: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub price: PriceRecord,
    pub indicators: Indicators,
}

impl Dated for EnrichedRow {
    fn date(&self) -> Option<NaiveDate> {
        Some(self.price.date)
    }
}

/// Derive every indicator for an already cleaned, date-ordered series.
pub fn derive_indicators(rows: &[PriceRecord]) -> Vec<EnrichedRow> {
    let closes: Vec<f64> = rows.iter().map(|r| r.close).collect();

    let ma_5 = calculate_sma(&closes, FAST_MA_PERIOD);
    let ma_20 = calculate_sma(&closes, SLOW_MA_PERIOD);
    let ma_50 = calculate_sma(&closes, LONG_MA_PERIOD);
    let daily_return = calculate_daily_return(&closes);
    let price_change = calculate_price_change(&closes);
    let volatility = calculate_volatility(&daily_return, VOLATILITY_PERIOD);
    let rsi = calculate_rsi(&closes, RSI_PERIOD);
    let bands = calculate_bollinger(
        &closes,
        bollinger::DEFAULT_PERIOD,
        bollinger::DEFAULT_MULTIPLIER,
    );

    rows.iter()
        .enumerate()
        .map(|(i, price)| {
            let band = bands[i];
            EnrichedRow {
                price: price.clone(),
                indicators: Indicators {
                    ma_5: ma_5.get(i),
                    ma_20: ma_20.get(i),
                    ma_50: ma_50.get(i),
                    signal: Signal::from_crossover(ma_5.get(i), ma_20.get(i)),
                    daily_return: daily_return.get(i),
                    price_change: price_change.get(i),
                    volatility: volatility.get(i),
                    rsi: rsi.get(i),
                    bb_middle: band.map(|b| b.middle),
                    bb_std_dev: band.map(|b| b.std_dev),
                    bb_upper: band.map(|b| b.upper),
                    bb_lower: band.map(|b| b.lower),
                },
            }
        })
        .collect()
}

/// Cleaning stage followed by derivation.
pub fn clean_and_derive(raw: &[RawPriceRecord]) -> (Vec<EnrichedRow>, CleaningReport) {
    let (cleaned, report) = clean(raw);
    (derive_indicators(&cleaned), report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(closes: &[f64]) -> Vec<PriceRecord> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceRecord {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn signal_crossover() {
        assert_eq!(Signal::from_crossover(Some(2.0), Some(1.0)), Signal::Buy);
        assert_eq!(Signal::from_crossover(Some(1.0), Some(1.0)), Signal::Sell);
        assert_eq!(Signal::from_crossover(Some(1.0), Some(2.0)), Signal::Sell);
        assert_eq!(Signal::from_crossover(None, Some(2.0)), Signal::Sell);
        assert_eq!(Signal::from_crossover(Some(2.0), None), Signal::Sell);
    }

    #[test]
    fn signal_display() {
        assert_eq!(Signal::Buy.to_string(), "Buy");
        assert_eq!(Signal::Sell.to_string(), "Sell");
    }

    #[test]
    fn constant_close_series() {
        let rows = derive_indicators(&series(&[100.0; 25]));

        let day20 = &rows[19].indicators;
        assert_eq!(day20.ma_20, Some(100.0));
        assert_eq!(day20.bb_middle, Some(100.0));
        assert_eq!(day20.bb_std_dev, Some(0.0));
        assert_eq!(day20.rsi, Some(50.0));
        assert_eq!(day20.volatility, None);

        let day21 = &rows[20].indicators;
        assert_eq!(day21.volatility, Some(0.0));
        assert_eq!(day21.signal, Signal::Sell);
    }

    #[test]
    fn first_row_has_no_change() {
        let rows = derive_indicators(&series(&[100.0, 110.0]));
        assert_eq!(rows[0].indicators.daily_return, None);
        assert_eq!(rows[0].indicators.price_change, None);
        assert_relative_eq!(rows[1].indicators.daily_return.unwrap(), 0.1, epsilon = 1e-12);
        assert_relative_eq!(rows[1].indicators.price_change.unwrap(), 10.0);
    }

    #[test]
    fn long_average_needs_fifty_rows() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
        let rows = derive_indicators(&series(&closes));

        assert!(rows[48].indicators.ma_50.is_none());
        // mean of 100..=149
        assert_relative_eq!(rows[49].indicators.ma_50.unwrap(), 124.5, epsilon = 1e-9);
    }

    #[test]
    fn rising_series_signals_buy_once_both_averages_exist() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let rows = derive_indicators(&series(&closes));

        assert_eq!(rows[18].indicators.signal, Signal::Sell);
        assert_eq!(rows[19].indicators.signal, Signal::Buy);
        assert_eq!(rows[29].indicators.signal, Signal::Buy);
    }

    #[test]
    fn clean_and_derive_drops_bad_rows_first() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let raw: Vec<RawPriceRecord> = [10.0, -5.0, 11.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| RawPriceRecord {
                date: Some(start + chrono::Duration::days(i as i64)),
                close: Some(close),
                ..RawPriceRecord::default()
            })
            .collect();

        let (rows, report) = clean_and_derive(&raw);

        assert_eq!(rows.len(), 2);
        assert_eq!(report.dropped(), 1);
        assert_relative_eq!(rows[1].indicators.price_change.unwrap(), 1.0);
    }

    #[test]
    fn empty_series() {
        assert!(derive_indicators(&[]).is_empty());
    }
}
