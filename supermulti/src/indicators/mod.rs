//! Technical indicators module
//!
//! Streaming indicators that reproduce the reference TA library (TA-Lib,
//! default compatibility) value for value. Every indicator reports `None`
//! until its lookback window is filled; batch helpers return a [`Series`]
//! aligned 1:1 with their input.

pub mod adaptive;
pub mod channel;
pub mod directional;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sar;
pub mod sma;

pub use adaptive::*;
pub use channel::*;
pub use directional::*;
pub use ema::*;
pub use macd::*;
pub use rsi::*;
pub use sar::*;
pub use sma::*;

use crate::data::Candle;
use crate::error::StrategyError;

/// Per-candle indicator values; `None` marks candles inside the warm-up window
pub type Series = Vec<Option<f64>>;

/// Indicator trait for all indicators
pub trait Indicator {
    /// Value fed on each candle
    type Input: Copy;

    /// Get the name of the indicator
    fn name(&self) -> &str;

    /// Number of inputs consumed before the first value is produced
    fn lookback(&self) -> usize;

    /// Update indicator with new value
    fn update(&mut self, input: Self::Input);

    /// Get current indicator value
    fn value(&self) -> Option<f64>;

    /// Check if indicator is ready (has enough data)
    fn is_ready(&self) -> bool {
        self.value().is_some()
    }
}

/// High/low/close triple consumed by range based indicators
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hlc {
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl From<&Candle> for Hlc {
    fn from(candle: &Candle) -> Self {
        Self {
            high: candle.high,
            low: candle.low,
            close: candle.close,
        }
    }
}

/// Feed every input through `indicator`, collecting the value after each step
pub fn collect_series<I, It>(indicator: &mut I, inputs: It) -> Series
where
    I: Indicator,
    It: IntoIterator<Item = I::Input>,
{
    inputs
        .into_iter()
        .map(|input| {
            indicator.update(input);
            indicator.value()
        })
        .collect()
}

/// Reference library zero test: |v| below 1e-8 counts as zero
pub(crate) fn is_zero(value: f64) -> bool {
    -0.000_000_01 < value && value < 0.000_000_01
}

pub(crate) fn ensure_period(
    indicator: &'static str,
    period: usize,
    min: usize,
) -> Result<(), StrategyError> {
    if period < min {
        return Err(StrategyError::invalid(
            indicator,
            format!("period {} is below the minimum of {}", period, min),
        ));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::data::Candle;
    use chrono::{Duration, TimeZone, Utc};

    /// Candles from (high, low, close) triples, one minute apart
    pub fn hlc_candles(data: &[(f64, f64, f64)]) -> Vec<Candle> {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        data.iter()
            .enumerate()
            .map(|(i, &(high, low, close))| {
                Candle::new(base + Duration::minutes(i as i64), close, high, low, close, 1000.0)
            })
            .collect()
    }

    pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
        assert!(
            (actual - expected).abs() < epsilon,
            "actual={actual}, expected={expected}, epsilon={epsilon}"
        );
    }
}
