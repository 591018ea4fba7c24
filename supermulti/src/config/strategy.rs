//! Strategy configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Strategy configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Timeframe (e.g., "5m", "1h", "1d")
    pub timeframe: String,
    /// Minimum ROI keyed by minutes since entry (e.g., 10 -> 0.003 = 0.3%)
    pub minimal_roi: BTreeMap<u32, f64>,
    /// Stop loss (e.g., -0.10 = -10%)
    pub stoploss: f64,
    /// Trailing stop enabled
    pub trailing_stop: bool,
    /// Trailing stop positive
    pub trailing_stop_positive: f64,
    /// Trailing stop offset
    pub trailing_stop_positive_offset: f64,
    /// Only trail once the offset is reached
    pub trailing_only_offset_is_reached: bool,
    /// Act on exit_long signals
    pub use_exit_signal: bool,
    /// Only honour exit signals while the trade is in profit
    pub exit_profit_only: bool,
    /// Keep the trade open past ROI while the entry signal persists
    pub ignore_roi_if_entry_signal: bool,
    /// Ignore entry signals older than this many minutes
    pub ignore_buying_expired_candle_after: u32,
    /// Startup candle count
    pub startup_candle_count: usize,
    /// Short selling allowed
    pub can_short: bool,
}

impl StrategyConfig {
    /// ROI target after `minutes` in the trade; `None` before the first threshold
    pub fn minimal_roi_at(&self, minutes: u32) -> Option<f64> {
        self.minimal_roi
            .range(..=minutes)
            .next_back()
            .map(|(_, roi)| *roi)
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            timeframe: "5m".to_string(),
            minimal_roi: BTreeMap::from([(0, 0.001), (10, 0.003), (30, 0.005), (60, 0.01)]),
            stoploss: -0.10,
            trailing_stop: false,
            trailing_stop_positive: 0.01,
            trailing_stop_positive_offset: 0.02,
            trailing_only_offset_is_reached: true,
            use_exit_signal: true,
            exit_profit_only: true,
            ignore_roi_if_entry_signal: true,
            ignore_buying_expired_candle_after: 1,
            startup_candle_count: 20,
            can_short: false,
        }
    }
}
