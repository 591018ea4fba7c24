//! Indicator catalog and analyzed output frame

use crate::data::{Candle, PairMetadata};
use crate::indicators::{
    calculate_channel, calculate_directional, calculate_jma, calculate_macd, calculate_rsi,
    calculate_sar, calculate_sma, Series,
};
use crate::params::IndicatorParams;
use crate::strategy::SignalColumn;
use crate::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Named column of an analyzed candle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    Open,
    High,
    Low,
    Close,
    Volume,
    Jma,
    Hband,
    Lband,
    Upward,
    Downward,
    RangeFilter,
    Adx,
    PlusDi,
    MinusDi,
    Sar,
    Rsi,
    Macd,
    MacdSignal,
    MacdHist,
    SmaVolume,
}

impl Column {
    /// Columns produced by the indicator engine
    pub const INDICATORS: [Column; 15] = [
        Column::Jma,
        Column::Hband,
        Column::Lband,
        Column::Upward,
        Column::Downward,
        Column::RangeFilter,
        Column::Adx,
        Column::PlusDi,
        Column::MinusDi,
        Column::Sar,
        Column::Rsi,
        Column::Macd,
        Column::MacdSignal,
        Column::MacdHist,
        Column::SmaVolume,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Column::Open => "open",
            Column::High => "high",
            Column::Low => "low",
            Column::Close => "close",
            Column::Volume => "volume",
            Column::Jma => "jma",
            Column::Hband => "hband",
            Column::Lband => "lband",
            Column::Upward => "upward",
            Column::Downward => "downward",
            Column::RangeFilter => "range_filter",
            Column::Adx => "adx",
            Column::PlusDi => "plus_di",
            Column::MinusDi => "minus_di",
            Column::Sar => "sar",
            Column::Rsi => "rsi",
            Column::Macd => "macd",
            Column::MacdSignal => "macd_signal",
            Column::MacdHist => "macd_hist",
            Column::SmaVolume => "sma_volume",
        }
    }

    /// Read this column for one candle; indicator columns come from `frame`
    pub fn value_at(&self, candles: &[Candle], frame: &IndicatorFrame, index: usize) -> Option<f64> {
        let candle = candles.get(index)?;
        match self {
            Column::Open => Some(candle.open),
            Column::High => Some(candle.high),
            Column::Low => Some(candle.low),
            Column::Close => Some(candle.close),
            Column::Volume => Some(candle.volume),
            indicator => frame.value(*indicator, index),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Every indicator series for one candle sequence, aligned 1:1 with the candles
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    len: usize,
    jma: Series,
    hband: Series,
    lband: Series,
    upward: Series,
    downward: Series,
    range_filter: Series,
    adx: Series,
    plus_di: Series,
    minus_di: Series,
    sar: Series,
    rsi: Series,
    macd: Series,
    macd_signal: Series,
    macd_hist: Series,
    sma_volume: Series,
}

impl IndicatorFrame {
    /// Compute the full catalog
    pub fn compute(candles: &[Candle], params: &IndicatorParams) -> Result<Self> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();

        let channel = calculate_channel(candles, params.channel_period)?;
        let directional = calculate_directional(candles, params.adx_length)?;
        let macd = calculate_macd(&closes, params.macd_fast, params.macd_slow, params.macd_signal)?;

        Ok(IndicatorFrame {
            len: candles.len(),
            jma: calculate_jma(&closes, params.jma_length, params.jma_phase, params.jma_power)?,
            hband: channel.hband,
            lband: channel.lband,
            upward: channel.upward,
            downward: channel.downward,
            range_filter: channel.width,
            adx: directional.adx,
            plus_di: directional.plus_di,
            minus_di: directional.minus_di,
            sar: calculate_sar(
                candles,
                params.sar_start,
                params.sar_increment,
                params.sar_maximum,
            )?,
            rsi: calculate_rsi(&closes, params.rsi_length)?,
            macd: macd.macd,
            macd_signal: macd.signal,
            macd_hist: macd.histogram,
            sma_volume: calculate_sma(&volumes, params.sma_volume_length)?,
        })
    }

    /// Construct every indicator once, failing on out-of-domain settings
    pub fn check_params(params: &IndicatorParams) -> Result<()> {
        Self::compute(&[], params).map(|_| ())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Series for an indicator column; `None` for raw candle columns
    pub fn series(&self, column: Column) -> Option<&Series> {
        let series = match column {
            Column::Jma => &self.jma,
            Column::Hband => &self.hband,
            Column::Lband => &self.lband,
            Column::Upward => &self.upward,
            Column::Downward => &self.downward,
            Column::RangeFilter => &self.range_filter,
            Column::Adx => &self.adx,
            Column::PlusDi => &self.plus_di,
            Column::MinusDi => &self.minus_di,
            Column::Sar => &self.sar,
            Column::Rsi => &self.rsi,
            Column::Macd => &self.macd,
            Column::MacdSignal => &self.macd_signal,
            Column::MacdHist => &self.macd_hist,
            Column::SmaVolume => &self.sma_volume,
            Column::Open | Column::High | Column::Low | Column::Close | Column::Volume => {
                return None
            }
        };
        Some(series)
    }

    pub fn value(&self, column: Column, index: usize) -> Option<f64> {
        self.series(column)?.get(index).copied().flatten()
    }

    /// First index where every indicator column is computable
    pub fn warmup(&self) -> Option<usize> {
        (0..self.len).find(|&i| Column::INDICATORS.iter().all(|c| self.value(*c, i).is_some()))
    }
}

/// Candles augmented with indicators and signal columns
#[derive(Debug, Clone)]
pub struct AnalyzedFrame<'a> {
    pub candles: &'a [Candle],
    pub metadata: PairMetadata,
    pub indicators: IndicatorFrame,
    pub enter_long: SignalColumn,
    pub exit_long: SignalColumn,
}

/// One exported row of an [`AnalyzedFrame`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedRow {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub jma: Option<f64>,
    pub hband: Option<f64>,
    pub lband: Option<f64>,
    pub upward: Option<f64>,
    pub downward: Option<f64>,
    pub range_filter: Option<f64>,
    pub adx: Option<f64>,
    pub plus_di: Option<f64>,
    pub minus_di: Option<f64>,
    pub sar: Option<f64>,
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub macd_signal: Option<f64>,
    pub macd_hist: Option<f64>,
    pub sma_volume: Option<f64>,
    pub enter_long: Option<u8>,
    pub exit_long: Option<u8>,
}

impl AnalyzedFrame<'_> {
    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last_candle(&self) -> Option<&Candle> {
        self.candles.last()
    }

    /// Entry flag of the most recent candle
    pub fn last_entry(&self) -> Option<bool> {
        self.enter_long.last()
    }

    pub fn row(&self, index: usize) -> Option<AnalyzedRow> {
        let candle = self.candles.get(index)?;
        let ind = |column| self.indicators.value(column, index);
        Some(AnalyzedRow {
            timestamp: candle.timestamp,
            open: candle.open,
            high: candle.high,
            low: candle.low,
            close: candle.close,
            volume: candle.volume,
            jma: ind(Column::Jma),
            hband: ind(Column::Hband),
            lband: ind(Column::Lband),
            upward: ind(Column::Upward),
            downward: ind(Column::Downward),
            range_filter: ind(Column::RangeFilter),
            adx: ind(Column::Adx),
            plus_di: ind(Column::PlusDi),
            minus_di: ind(Column::MinusDi),
            sar: ind(Column::Sar),
            rsi: ind(Column::Rsi),
            macd: ind(Column::Macd),
            macd_signal: ind(Column::MacdSignal),
            macd_hist: ind(Column::MacdHist),
            sma_volume: ind(Column::SmaVolume),
            enter_long: self.enter_long.flag(index),
            exit_long: self.exit_long.flag(index),
        })
    }

    pub fn rows(&self) -> Vec<AnalyzedRow> {
        (0..self.len()).filter_map(|i| self.row(i)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::hlc_candles;
    use crate::params::StrategyParams;
    use crate::strategy::Variant;

    fn rising(n: usize) -> Vec<Candle> {
        let data: Vec<(f64, f64, f64)> = (0..n)
            .map(|i| {
                let close = 100.0 + i as f64;
                (close + 1.0, close - 1.0, close)
            })
            .collect();
        hlc_candles(&data)
    }

    #[test]
    fn test_columns_align_with_candles() {
        let params = StrategyParams::defaults(Variant::RangeBreakout).unwrap();
        let candles = rising(60);
        let frame = IndicatorFrame::compute(&candles, &params.indicators).unwrap();
        assert_eq!(frame.len(), 60);
        for column in Column::INDICATORS {
            assert_eq!(frame.series(column).map(Vec::len), Some(60), "{}", column);
        }
        assert!(frame.series(Column::Close).is_none());
    }

    #[test]
    fn test_warmup_follows_longest_lookback() {
        let params = StrategyParams::defaults(Variant::RangeBreakout).unwrap();
        let frame = IndicatorFrame::compute(&rising(60), &params.indicators).unwrap();
        // MACD 12/26/9 is the slowest column: (26 - 1) + (9 - 1)
        assert_eq!(frame.warmup(), Some(33));
        assert!(frame.value(Column::MacdHist, 32).is_none());

        let params = StrategyParams::defaults(Variant::Protected).unwrap();
        let frame = IndicatorFrame::compute(&rising(60), &params.indicators).unwrap();
        // channel period 20 outlasts MACD 5/8/5 here
        assert_eq!(frame.warmup(), Some(19));
    }

    #[test]
    fn test_short_input_is_never_computable() {
        let params = StrategyParams::defaults(Variant::Protected).unwrap();
        let frame = IndicatorFrame::compute(&rising(5), &params.indicators).unwrap();
        assert_eq!(frame.warmup(), None);
        assert!(frame.series(Column::Adx).unwrap().iter().all(Option::is_none));
    }

    #[test]
    fn test_range_filter_is_band_width() {
        let params = StrategyParams::defaults(Variant::RangeBreakout).unwrap();
        let frame = IndicatorFrame::compute(&rising(30), &params.indicators).unwrap();
        let i = 25;
        let width = frame.value(Column::Hband, i).unwrap() - frame.value(Column::Lband, i).unwrap();
        assert_eq!(frame.value(Column::RangeFilter, i), Some(width));
    }

    #[test]
    fn test_candle_columns_read_through() {
        let params = StrategyParams::defaults(Variant::RangeBreakout).unwrap();
        let candles = rising(3);
        let frame = IndicatorFrame::compute(&candles, &params.indicators).unwrap();
        assert_eq!(Column::High.value_at(&candles, &frame, 2), Some(103.0));
        assert_eq!(Column::Close.value_at(&candles, &frame, 3), None);
    }
}
