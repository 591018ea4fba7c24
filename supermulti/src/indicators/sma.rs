//! SMA (Simple Moving Average) indicator

use crate::indicators::{collect_series, ensure_period, Indicator, Series};
use crate::Result;
use std::collections::VecDeque;

/// Simple moving average over a running total.
///
/// The total is updated in the reference order (add the new value, emit,
/// then drop the trailing value) so results match bit for bit.
#[derive(Debug, Clone)]
pub struct SMA {
    period: usize,
    window: VecDeque<f64>,
    total: f64,
    last_value: Option<f64>,
}

impl SMA {
    /// Create new SMA indicator
    pub fn new(period: usize) -> Result<Self> {
        ensure_period("SMA", period, 2)?;
        Ok(Self {
            period,
            window: VecDeque::with_capacity(period),
            total: 0.0,
            last_value: None,
        })
    }

    /// Get SMA period
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for SMA {
    type Input = f64;

    fn name(&self) -> &str {
        "SMA"
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn update(&mut self, value: f64) {
        self.total += value;
        self.window.push_back(value);
        if self.window.len() == self.period {
            self.last_value = Some(self.total / self.period as f64);
            if let Some(trailing) = self.window.pop_front() {
                self.total -= trailing;
            }
        }
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }
}

/// Calculate SMA from a series of values
pub fn calculate_sma(values: &[f64], period: usize) -> Result<Series> {
    let mut sma = SMA::new(period)?;
    Ok(collect_series(&mut sma, values.iter().copied()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sma_values() {
        let series = calculate_sma(&[1.0, 2.0, 3.0, 4.0, 5.0], 3).unwrap();
        assert_eq!(series, vec![None, None, Some(2.0), Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_sma_not_ready_before_period() {
        let mut sma = SMA::new(10).unwrap();
        assert_eq!(sma.name(), "SMA");
        assert_eq!(sma.period(), 10);
        for i in 0..9 {
            sma.update(100.0 + i as f64);
        }
        assert!(!sma.is_ready());
        sma.update(200.0);
        assert!(sma.is_ready());
    }

    #[test]
    fn test_sma_rejects_short_period() {
        assert!(SMA::new(1).is_err());
        assert!(calculate_sma(&[1.0], 0).is_err());
    }
}
