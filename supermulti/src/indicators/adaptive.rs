//! Adaptive moving average ("JMA" in strategy columns)
//!
//! `jma = ema + (close - ema) * (1 - phase / 100) ^ power`
//!
//! Phase 100 collapses to the plain EMA, phase 0 returns the close, negative
//! phases overshoot the close. `power` is an integer exponent.

use crate::error::StrategyError;
use crate::indicators::{collect_series, Indicator, Series, EMA};
use crate::Result;

#[derive(Debug, Clone)]
pub struct AdaptiveMovingAverage {
    length: usize,
    phase: i32,
    power: u32,
    damping: f64,
    ema: EMA,
    last_value: Option<f64>,
}

impl AdaptiveMovingAverage {
    pub fn new(length: usize, phase: i32, power: u32) -> Result<Self> {
        let ema = EMA::new(length)?;
        if !(-100..=100).contains(&phase) {
            return Err(StrategyError::invalid("JMA", format!("phase {} outside -100..=100", phase)).into());
        }
        if power == 0 {
            return Err(StrategyError::invalid("JMA", "power must be a positive integer").into());
        }
        let exponent = i32::try_from(power)
            .map_err(|_| StrategyError::invalid("JMA", format!("power {} too large", power)))?;
        let damping = (1.0 - f64::from(phase) / 100.0).powi(exponent);
        Ok(Self {
            length,
            phase,
            power,
            damping,
            ema,
            last_value: None,
        })
    }

    pub fn phase(&self) -> i32 {
        self.phase
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    /// Weight applied to the close's deviation from the EMA
    pub fn damping(&self) -> f64 {
        self.damping
    }
}

impl Indicator for AdaptiveMovingAverage {
    type Input = f64;

    fn name(&self) -> &str {
        "JMA"
    }

    fn lookback(&self) -> usize {
        self.length - 1
    }

    fn update(&mut self, close: f64) {
        self.ema.update(close);
        self.last_value = self
            .ema
            .value()
            .map(|ema| ema + (close - ema) * self.damping);
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }
}

/// Calculate the adaptive moving average of `closes`
pub fn calculate_jma(closes: &[f64], length: usize, phase: i32, power: u32) -> Result<Series> {
    let mut jma = AdaptiveMovingAverage::new(length, phase, power)?;
    Ok(collect_series(&mut jma, closes.iter().copied()))
}
