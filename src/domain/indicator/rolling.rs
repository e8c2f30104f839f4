//! Trailing fixed-size window over an ordered series.
//!
//! Keeps a running sum and sum of squares so mean and sample standard
//! deviation are O(1) per step. Sums are taken relative to a shift value
//! and rebuilt from the buffer once per window length, which bounds the
//! floating drift of long add/subtract chains to a single window.
//!
//! A statistic exists only when the window is full and holds no missing
//! values.

use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct RollingWindow {
    period: usize,
    buf: VecDeque<Option<f64>>,
    shift: f64,
    sum: f64,
    sum_sq: f64,
    missing: usize,
    since_resync: usize,
}

impl RollingWindow {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            buf: VecDeque::with_capacity(period + 1),
            shift: 0.0,
            sum: 0.0,
            sum_sq: 0.0,
            missing: 0,
            since_resync: 0,
        }
    }

    pub fn push(&mut self, value: Option<f64>) {
        if self.period == 0 {
            return;
        }

        if self.buf.len() == self.period {
            match self.buf.pop_front().flatten() {
                Some(old) => {
                    let d = old - self.shift;
                    self.sum -= d;
                    self.sum_sq -= d * d;
                }
                None => self.missing -= 1,
            }
        }

        match value {
            Some(v) => {
                let d = v - self.shift;
                self.sum += d;
                self.sum_sq += d * d;
            }
            None => self.missing += 1,
        }
        self.buf.push_back(value);

        self.since_resync += 1;
        if self.since_resync >= self.period {
            self.resync();
        }
    }

    /// Re-centre on the newest defined value and recompute the sums exactly.
    fn resync(&mut self) {
        if let Some(latest) = self.buf.iter().rev().find_map(|v| *v) {
            self.shift = latest;
        }
        self.sum = 0.0;
        self.sum_sq = 0.0;
        for d in self.buf.iter().flatten().map(|v| v - self.shift) {
            self.sum += d;
            self.sum_sq += d * d;
        }
        self.since_resync = 0;
    }

    pub fn is_full(&self) -> bool {
        self.period > 0 && self.buf.len() == self.period && self.missing == 0
    }

    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.shift + self.sum / self.period as f64)
    }

    /// Sample standard deviation (n - 1 denominator).
    pub fn sample_std_dev(&self) -> Option<f64> {
        if !self.is_full() || self.period < 2 {
            return None;
        }
        let n = self.period as f64;
        let variance = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
        Some(variance.max(0.0).sqrt())
    }
}

/// Apply `stat` to every trailing window of `values`.
pub fn rolling<F>(values: &[Option<f64>], period: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&RollingWindow) -> Option<f64>,
{
    let mut window = RollingWindow::new(period);
    values
        .iter()
        .map(|v| {
            window.push(*v);
            stat(&window)
        })
        .collect()
}
