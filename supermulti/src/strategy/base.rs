//! Base strategy trait

use crate::config::StrategyConfig;
use crate::data::{ensure_ordered, Candle, PairMetadata};
use crate::strategy::{AnalyzedFrame, IndicatorFrame, SignalColumn};
use crate::Result;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Base trait for candle-driven strategies
pub trait Strategy {
    /// Get strategy name
    fn name(&self) -> &str;

    /// Static settings (timeframe, ROI, stoploss, trailing, exit behaviour)
    fn settings(&self) -> &StrategyConfig;

    /// Compute the indicator catalog for a candle sequence
    fn populate_indicators(&self, candles: &[Candle], metadata: &PairMetadata) -> Result<IndicatorFrame>;

    fn populate_entry_trend(&self, candles: &[Candle], indicators: &IndicatorFrame) -> SignalColumn;

    fn populate_exit_trend(&self, candles: &[Candle], indicators: &IndicatorFrame) -> SignalColumn;

    /// Full pass: indicators, then entry and exit columns
    fn analyze<'a>(&self, candles: &'a [Candle], metadata: &PairMetadata) -> Result<AnalyzedFrame<'a>> {
        ensure_ordered(candles)?;
        let indicators = self.populate_indicators(candles, metadata)?;
        let enter_long = self.populate_entry_trend(candles, &indicators);
        let exit_long = self.populate_exit_trend(candles, &indicators);
        debug!(
            strategy = self.name(),
            pair = %metadata.pair,
            candles = candles.len(),
            entries = enter_long.fired().count(),
            exits = exit_long.fired().count(),
            "Analyzed candles"
        );
        Ok(AnalyzedFrame {
            candles,
            metadata: metadata.clone(),
            indicators,
            enter_long,
            exit_long,
        })
    }

    /// Leverage multiplier for a new trade
    fn leverage(
        &self,
        _pair: &str,
        _current_time: DateTime<Utc>,
        _current_rate: f64,
        _proposed_leverage: f64,
    ) -> f64 {
        1.0
    }
}
