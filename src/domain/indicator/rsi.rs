//! RSI (Relative Strength Index) over simple rolling means.
//!
//! delta[i] = C[i] - C[i-1]; the first row has no delta and counts as
//! neither gain nor loss.
//! gain[i] = mean(max(delta, 0)) and loss[i] = mean(max(-delta, 0)) over
//! the trailing n rows.
//!
//! Formula: RSI = 100 - (100 / (1 + gain / loss))
//! If loss == 0 and gain > 0: RSI = 100
//! If loss == 0 and gain == 0: RSI = 50 (flat window, no signal)
//!
//! Warmup: first n-1 rows have no value.

use crate::domain::indicator::rolling::{rolling, RollingWindow};
use crate::domain::indicator::{IndicatorSeries, IndicatorType};

/// Value reported for a window with no movement at all.
pub const NEUTRAL_RSI: f64 = 50.0;

pub fn calculate_rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut gains: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    let mut losses: Vec<Option<f64>> = Vec::with_capacity(closes.len());

    for i in 0..closes.len() {
        let change = if i == 0 {
            0.0
        } else {
            closes[i] - closes[i - 1]
        };
        gains.push(Some(if change > 0.0 { change } else { 0.0 }));
        losses.push(Some(if change < 0.0 { -change } else { 0.0 }));
    }

    let avg_gain = rolling(&gains, period, RollingWindow::mean);
    let avg_loss = rolling(&losses, period, RollingWindow::mean);

    let values = avg_gain
        .into_iter()
        .zip(avg_loss)
        .map(|(gain, loss)| Some(rsi_from_averages(gain?, loss?)))
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

fn rsi_from_averages(gain: f64, loss: f64) -> f64 {
    // sliding sums can leave a vanishing residue instead of an exact zero
    let tolerance = 1e-12 * (1.0 + gain.abs().max(loss.abs()));
    let gain = if gain < tolerance { 0.0 } else { gain };
    let loss = if loss < tolerance { 0.0 } else { loss };

    if loss == 0.0 {
        if gain == 0.0 { NEUTRAL_RSI } else { 100.0 }
    } else {
        100.0 - (100.0 / (1.0 + gain / loss))
    }
}
