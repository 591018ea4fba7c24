//! ADX: Average Directional Index with its +DI / -DI components (Wilder).
//!
//! Steps:
//! 1. +DM / -DM and true range from consecutive candles
//! 2. Sum the first `period - 1` values, then Wilder smooth
//!    (`s = s - s / period + current`)
//! 3. +DI = 100 * +DM / TR, -DI = 100 * -DM / TR (0 when TR is zero)
//! 4. DX = 100 * |(-DI) - (+DI)| / (+DI + -DI)
//! 5. ADX starts as the mean of the first `period` DX values, then
//!    `adx = (adx * (period - 1) + dx) / period`
//!
//! DI values exist from candle `period`, ADX from candle `2 * period - 1`.

use crate::data::Candle;
use crate::indicators::{ensure_period, is_zero, Hlc, Indicator, Series};
use crate::Result;

#[derive(Debug, Clone)]
pub struct DirectionalMovement {
    period: usize,
    prev: Option<Hlc>,
    diffs_seen: usize,
    plus_dm: f64,
    minus_dm: f64,
    true_range: f64,
    di: Option<(f64, f64)>,
    dx_sum: f64,
    adx: Option<f64>,
}

impl DirectionalMovement {
    pub fn new(period: usize) -> Result<Self> {
        ensure_period("ADX", period, 2)?;
        Ok(Self {
            period,
            prev: None,
            diffs_seen: 0,
            plus_dm: 0.0,
            minus_dm: 0.0,
            true_range: 0.0,
            di: None,
            dx_sum: 0.0,
            adx: None,
        })
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// +DI of the last candle
    pub fn plus_di(&self) -> Option<f64> {
        self.di.map(|(plus, _)| plus)
    }

    /// -DI of the last candle
    pub fn minus_di(&self) -> Option<f64> {
        self.di.map(|(_, minus)| minus)
    }

    /// (+DI, -DI) from the smoothed sums, `None` when TR rounds to zero
    fn directional_indexes(&self) -> Option<(f64, f64)> {
        if is_zero(self.true_range) {
            return None;
        }
        Some((
            100.0 * (self.plus_dm / self.true_range),
            100.0 * (self.minus_dm / self.true_range),
        ))
    }
}

fn true_range(bar: Hlc, prev_close: f64) -> f64 {
    let mut range = bar.high - bar.low;
    let up = (bar.high - prev_close).abs();
    if up > range {
        range = up;
    }
    let down = (bar.low - prev_close).abs();
    if down > range {
        range = down;
    }
    range
}

impl Indicator for DirectionalMovement {
    type Input = Hlc;

    fn name(&self) -> &str {
        "ADX"
    }

    fn lookback(&self) -> usize {
        2 * self.period - 1
    }

    fn update(&mut self, bar: Hlc) {
        let Some(prev) = self.prev.replace(bar) else {
            return;
        };
        let n = self.period as f64;
        let diff_plus = bar.high - prev.high;
        let diff_minus = prev.low - bar.low;
        let tr = true_range(bar, prev.close);
        self.diffs_seen += 1;

        if self.diffs_seen < self.period {
            if diff_minus > 0.0 && diff_plus < diff_minus {
                self.minus_dm += diff_minus;
            } else if diff_plus > 0.0 && diff_plus > diff_minus {
                self.plus_dm += diff_plus;
            }
            self.true_range += tr;
            return;
        }

        self.minus_dm -= self.minus_dm / n;
        self.plus_dm -= self.plus_dm / n;
        if diff_minus > 0.0 && diff_plus < diff_minus {
            self.minus_dm += diff_minus;
        } else if diff_plus > 0.0 && diff_plus > diff_minus {
            self.plus_dm += diff_plus;
        }
        self.true_range = self.true_range - self.true_range / n + tr;

        let indexes = self.directional_indexes();
        self.di = Some(indexes.unwrap_or((0.0, 0.0)));

        let dx = indexes.and_then(|(plus, minus)| {
            let sum = plus + minus;
            (!is_zero(sum)).then(|| 100.0 * ((minus - plus).abs() / sum))
        });

        // DX samples `period ..= 2 * period - 1` seed the ADX; a bar without
        // a DX still counts toward the seed window.
        if self.diffs_seen < 2 * self.period - 1 {
            if let Some(dx) = dx {
                self.dx_sum += dx;
            }
        } else if self.diffs_seen == 2 * self.period - 1 {
            if let Some(dx) = dx {
                self.dx_sum += dx;
            }
            self.adx = Some(self.dx_sum / n);
        } else if let (Some(adx), Some(dx)) = (self.adx, dx) {
            self.adx = Some((adx * (n - 1.0) + dx) / n);
        }
    }

    /// ADX of the last candle
    fn value(&self) -> Option<f64> {
        self.adx
    }
}

/// ADX, +DI and -DI columns
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalSeries {
    pub adx: Series,
    pub plus_di: Series,
    pub minus_di: Series,
}

/// Calculate ADX / +DI / -DI over a candle sequence
pub fn calculate_directional(candles: &[Candle], period: usize) -> Result<DirectionalSeries> {
    let mut dm = DirectionalMovement::new(period)?;
    let mut out = DirectionalSeries {
        adx: Vec::with_capacity(candles.len()),
        plus_di: Vec::with_capacity(candles.len()),
        minus_di: Vec::with_capacity(candles.len()),
    };
    for candle in candles {
        dm.update(Hlc::from(candle));
        out.adx.push(dm.value());
        out.plus_di.push(dm.plus_di());
        out.minus_di.push(dm.minus_di());
    }
    Ok(out)
}
