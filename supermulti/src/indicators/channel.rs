//! Channel bands: rolling high/low envelope around close

use crate::data::Candle;
use crate::error::StrategyError;
use crate::indicators::{ensure_period, Hlc, Indicator, Series};
use crate::Result;
use ta::indicators::{Maximum, Minimum};
use ta::Next;

/// Channel band values for one candle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelOutput {
    /// Highest high of the window
    pub hband: f64,
    /// Lowest low of the window
    pub lband: f64,
    /// hband - close
    pub upward: f64,
    /// close - lband
    pub downward: f64,
}

impl ChannelOutput {
    /// Band width (hband - lband)
    pub fn width(&self) -> f64 {
        self.hband - self.lband
    }
}

/// Rolling maximum of `high` and minimum of `low`, window including the current candle
#[derive(Debug)]
pub struct ChannelBands {
    upper: Maximum,
    lower: Minimum,
    period: usize,
    update_count: usize,
    last_output: Option<ChannelOutput>,
}

impl ChannelBands {
    /// Create new channel over `period` candles
    pub fn new(period: usize) -> Result<Self> {
        ensure_period("ChannelBands", period, 2)?;
        let invalid = |_| StrategyError::invalid("ChannelBands", format!("period {}", period));
        Ok(Self {
            upper: Maximum::new(period).map_err(invalid)?,
            lower: Minimum::new(period).map_err(invalid)?,
            period,
            update_count: 0,
            last_output: None,
        })
    }

    pub fn output(&self) -> Option<ChannelOutput> {
        self.last_output
    }
}

impl Indicator for ChannelBands {
    type Input = Hlc;

    fn name(&self) -> &str {
        "ChannelBands"
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn update(&mut self, bar: Hlc) {
        let hband = self.upper.next(bar.high);
        let lband = self.lower.next(bar.low);
        self.update_count += 1;
        if self.update_count >= self.period {
            self.last_output = Some(ChannelOutput {
                hband,
                lband,
                upward: hband - bar.close,
                downward: bar.close - lband,
            });
        }
    }

    /// Upper band
    fn value(&self) -> Option<f64> {
        self.last_output.map(|o| o.hband)
    }
}

/// Column-wise channel values
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSeries {
    pub hband: Series,
    pub lband: Series,
    pub upward: Series,
    pub downward: Series,
    pub width: Series,
}

/// Calculate channel bands over a candle sequence
pub fn calculate_channel(candles: &[Candle], period: usize) -> Result<ChannelSeries> {
    let mut channel = ChannelBands::new(period)?;
    let outputs: Vec<Option<ChannelOutput>> = candles
        .iter()
        .map(|candle| {
            channel.update(Hlc::from(candle));
            channel.output()
        })
        .collect();
    let column = |f: fn(&ChannelOutput) -> f64| -> Series {
        outputs.iter().map(|o| o.as_ref().map(f)).collect()
    };
    Ok(ChannelSeries {
        hband: column(|o| o.hband),
        lband: column(|o| o.lband),
        upward: column(|o| o.upward),
        downward: column(|o| o.downward),
        width: column(ChannelOutput::width),
    })
}
