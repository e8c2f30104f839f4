//! Day-over-day change of the close.
//!
//! CHANGE[i] = C[i] - C[i-1]
//! RETURN[i] = (C[i] - C[i-1]) / C[i-1]
//! Both are undefined on the first row.

use crate::domain::indicator::{IndicatorSeries, IndicatorType};

pub fn calculate_price_change(closes: &[f64]) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::PriceChange,
        values: deltas(closes, |prev, cur| cur - prev),
    }
}

pub fn calculate_daily_return(closes: &[f64]) -> IndicatorSeries {
    IndicatorSeries {
        indicator_type: IndicatorType::DailyReturn,
        values: deltas(closes, |prev, cur| (cur - prev) / prev),
    }
}

fn deltas(closes: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<Option<f64>> {
    let mut values = Vec::with_capacity(closes.len());
    if !closes.is_empty() {
        values.push(None);
    }
    values.extend(closes.windows(2).map(|w| Some(f(w[0], w[1]))));
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn price_change_basic() {
        let series = calculate_price_change(&[100.0, 105.0, 102.0]);
        assert_eq!(series.values.len(), 3);
        assert_eq!(series.get(0), None);
        assert_relative_eq!(series.get(1).unwrap(), 5.0);
        assert_relative_eq!(series.get(2).unwrap(), -3.0);
    }

    #[test]
    fn daily_return_basic() {
        let series = calculate_daily_return(&[100.0, 110.0, 99.0]);
        assert_eq!(series.get(0), None);
        assert_relative_eq!(series.get(1).unwrap(), 0.10, epsilon = 1e-12);
        assert_relative_eq!(series.get(2).unwrap(), -0.10, epsilon = 1e-12);
    }

    #[test]
    fn single_row_has_no_change() {
        let series = calculate_daily_return(&[100.0]);
        assert_eq!(series.values, vec![None]);
    }

    #[test]
    fn empty_input() {
        assert!(calculate_price_change(&[]).values.is_empty());
    }
}
