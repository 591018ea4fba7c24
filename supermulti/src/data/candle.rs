//! OHLCV candle data structures

use crate::error::StrategyError;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// OHLCV candle data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// Candle open time
    pub timestamp: DateTime<Utc>,
    /// Opening price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Volume
    pub volume: f64,
}

impl Candle {
    /// Create a new candle
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// Pass-through information about the analysed pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairMetadata {
    /// Trading pair (e.g., "BTC/USDT")
    pub pair: String,
    /// Timeframe (e.g., "5m", "1h", "1d")
    pub timeframe: String,
}

impl PairMetadata {
    pub fn new(pair: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            pair: pair.into(),
            timeframe: timeframe.into(),
        }
    }
}

/// Fail on the first candle whose timestamp does not follow its predecessor
pub fn ensure_ordered(candles: &[Candle]) -> Result<(), StrategyError> {
    match candles
        .windows(2)
        .position(|pair| pair[1].timestamp <= pair[0].timestamp)
    {
        Some(index) => Err(StrategyError::UnorderedCandles { index: index + 1 }),
        None => Ok(()),
    }
}
