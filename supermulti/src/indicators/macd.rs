//! MACD (Moving Average Convergence Divergence) indicator

use crate::error::StrategyError;
use crate::indicators::{ensure_period, Indicator, EMA};
use crate::Result;

/// MACD line, signal line and histogram for one candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MACDOutput {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// MACD indicator.
///
/// The fast EMA is seeded on the `fast` closes ending where the slow EMA
/// becomes ready, so both lines start on the same candle. Periods are
/// swapped when `slow < fast`.
#[derive(Debug, Clone)]
pub struct MACD {
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
    update_count: usize,
    fast: EMA,
    slow: EMA,
    signal: EMA,
    last_output: Option<MACDOutput>,
}

impl MACD {
    /// Create new MACD indicator
    pub fn new(fast_period: usize, slow_period: usize, signal_period: usize) -> Result<Self> {
        ensure_period("MACD", fast_period, 2)?;
        ensure_period("MACD", slow_period, 2)?;
        if signal_period < 1 {
            return Err(StrategyError::invalid("MACD", "signal period must be at least 1").into());
        }
        let (fast_period, slow_period) = if slow_period < fast_period {
            (slow_period, fast_period)
        } else {
            (fast_period, slow_period)
        };
        Ok(Self {
            fast_period,
            slow_period,
            signal_period,
            update_count: 0,
            fast: EMA::with_period(fast_period),
            slow: EMA::with_period(slow_period),
            signal: EMA::with_period(signal_period),
            last_output: None,
        })
    }

    /// Get MACD line value
    pub fn macd(&self) -> Option<f64> {
        self.last_output.map(|o| o.macd)
    }

    /// Get signal line value
    pub fn signal(&self) -> Option<f64> {
        self.last_output.map(|o| o.signal)
    }

    /// Get histogram value (MACD - Signal)
    pub fn histogram(&self) -> Option<f64> {
        self.last_output.map(|o| o.histogram)
    }

    pub fn output(&self) -> Option<MACDOutput> {
        self.last_output
    }
}

impl Indicator for MACD {
    type Input = f64;

    fn name(&self) -> &str {
        "MACD"
    }

    fn lookback(&self) -> usize {
        (self.slow_period - 1) + (self.signal_period - 1)
    }

    fn update(&mut self, value: f64) {
        self.update_count += 1;
        self.slow.update(value);
        if self.update_count > self.slow_period - self.fast_period {
            self.fast.update(value);
        }
        let (Some(fast), Some(slow)) = (self.fast.value(), self.slow.value()) else {
            return;
        };
        let line = fast - slow;
        self.signal.update(line);
        if let Some(signal) = self.signal.value() {
            self.last_output = Some(MACDOutput {
                macd: line,
                signal,
                histogram: line - signal,
            });
        }
    }

    fn value(&self) -> Option<f64> {
        self.macd()
    }
}

/// MACD columns aligned with the input
#[derive(Debug, Clone, PartialEq)]
pub struct MACDSeries {
    pub macd: Vec<Option<f64>>,
    pub signal: Vec<Option<f64>>,
    pub histogram: Vec<Option<f64>>,
}

/// Calculate MACD from a series of values
pub fn calculate_macd(
    values: &[f64],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MACDSeries> {
    let mut macd = MACD::new(fast_period, slow_period, signal_period)?;
    let mut out = MACDSeries {
        macd: Vec::with_capacity(values.len()),
        signal: Vec::with_capacity(values.len()),
        histogram: Vec::with_capacity(values.len()),
    };
    for &value in values {
        macd.update(value);
        out.macd.push(macd.macd());
        out.signal.push(macd.signal());
        out.histogram.push(macd.histogram());
    }
    Ok(out)
}
