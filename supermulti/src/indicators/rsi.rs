//! RSI (Relative Strength Index) indicator

use crate::indicators::{collect_series, ensure_period, is_zero, Indicator, Series};
use crate::Result;

/// Wilder RSI.
///
/// Average gain/loss start as the mean of the first `period` differences,
/// then follow `avg = (avg * (period - 1) + current) / period`.
#[derive(Debug, Clone)]
pub struct RSI {
    period: usize,
    prev_value: Option<f64>,
    diffs_seen: usize,
    avg_gain: f64,
    avg_loss: f64,
    last_value: Option<f64>,
}

impl RSI {
    /// Create new RSI indicator
    pub fn new(period: usize) -> Result<Self> {
        ensure_period("RSI", period, 2)?;
        Ok(Self {
            period,
            prev_value: None,
            diffs_seen: 0,
            avg_gain: 0.0,
            avg_loss: 0.0,
            last_value: None,
        })
    }

    /// Get RSI period
    pub fn period(&self) -> usize {
        self.period
    }

    fn current(&self) -> f64 {
        let total = self.avg_gain + self.avg_loss;
        if is_zero(total) {
            0.0
        } else {
            100.0 * (self.avg_gain / total)
        }
    }
}

impl Indicator for RSI {
    type Input = f64;

    fn name(&self) -> &str {
        "RSI"
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn update(&mut self, value: f64) {
        let Some(prev) = self.prev_value.replace(value) else {
            return;
        };
        let diff = value - prev;
        let n = self.period as f64;

        if self.diffs_seen < self.period {
            if diff < 0.0 {
                self.avg_loss -= diff;
            } else {
                self.avg_gain += diff;
            }
            self.diffs_seen += 1;
            if self.diffs_seen == self.period {
                self.avg_loss /= n;
                self.avg_gain /= n;
                self.last_value = Some(self.current());
            }
            return;
        }

        self.avg_loss *= n - 1.0;
        self.avg_gain *= n - 1.0;
        if diff < 0.0 {
            self.avg_loss -= diff;
        } else {
            self.avg_gain += diff;
        }
        self.avg_loss /= n;
        self.avg_gain /= n;
        self.last_value = Some(self.current());
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }
}

/// Calculate RSI from a series of values
pub fn calculate_rsi(values: &[f64], period: usize) -> Result<Series> {
    let mut rsi = RSI::new(period)?;
    Ok(collect_series(&mut rsi, values.iter().copied()))
}
