//! EMA (Exponential Moving Average) indicator

use crate::indicators::{collect_series, ensure_period, Indicator, Series};
use crate::Result;

/// EMA seeded with the simple average of the first `period` inputs,
/// then smoothed with k = 2 / (period + 1).
#[derive(Debug, Clone)]
pub struct EMA {
    period: usize,
    k: f64,
    seen: usize,
    seed_total: f64,
    last_value: Option<f64>,
}

impl EMA {
    /// Create new EMA indicator
    pub fn new(period: usize) -> Result<Self> {
        ensure_period("EMA", period, 2)?;
        Ok(Self::with_period(period))
    }

    /// Callers validate `period >= 1` themselves (MACD signal line).
    pub(crate) fn with_period(period: usize) -> Self {
        Self {
            period,
            k: 2.0 / (period + 1) as f64,
            seen: 0,
            seed_total: 0.0,
            last_value: None,
        }
    }

    /// Get EMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for EMA {
    type Input = f64;

    fn name(&self) -> &str {
        "EMA"
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn update(&mut self, value: f64) {
        match self.last_value {
            Some(prev) => self.last_value = Some((value - prev) * self.k + prev),
            None => {
                self.seed_total += value;
                self.seen += 1;
                if self.seen == self.period {
                    self.last_value = Some(self.seed_total / self.period as f64);
                }
            }
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }
}

/// Calculate EMA from a series of values
pub fn calculate_ema(values: &[f64], period: usize) -> Result<Series> {
    let mut ema = EMA::new(period)?;
    Ok(collect_series(&mut ema, values.iter().copied()))
}
