//! Parabolic SAR (stop and reverse)

use crate::data::Candle;
use crate::error::StrategyError;
use crate::indicators::{collect_series, Hlc, Indicator, Series};
use crate::Result;

/// Parabolic SAR with separate initial acceleration and step.
///
/// Direction is taken from the first two candles: a positive -DM starts the
/// series short, anything else starts it long. Acceleration start and step
/// above `maximum` are capped to it.
#[derive(Debug, Clone)]
pub struct ParabolicSAR {
    start: f64,
    increment: f64,
    maximum: f64,
    first: Option<Hlc>,
    state: Option<SarState>,
    last_value: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
struct SarState {
    is_long: bool,
    af: f64,
    ep: f64,
    sar: f64,
    new_high: f64,
    new_low: f64,
}

impl ParabolicSAR {
    pub fn new(start: f64, increment: f64, maximum: f64) -> Result<Self> {
        for (label, value) in [("start", start), ("increment", increment), ("maximum", maximum)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StrategyError::invalid(
                    "SAR",
                    format!("acceleration {} must be positive, got {}", label, value),
                )
                .into());
            }
        }
        Ok(Self {
            start: start.min(maximum),
            increment: increment.min(maximum),
            maximum,
            first: None,
            state: None,
            last_value: None,
        })
    }

    /// Whether the stop currently trails a long move
    pub fn is_long(&self) -> Option<bool> {
        self.state.map(|s| s.is_long)
    }

    fn initial_state(&self, first: Hlc, second: Hlc) -> SarState {
        let diff_plus = second.high - first.high;
        let diff_minus = first.low - second.low;
        let minus_dm = if diff_minus > 0.0 && diff_plus < diff_minus {
            diff_minus
        } else {
            0.0
        };
        let is_long = minus_dm <= 0.0;
        let (ep, sar) = if is_long {
            (second.high, first.low)
        } else {
            (second.low, first.high)
        };
        SarState {
            is_long,
            af: self.start,
            ep,
            sar,
            new_high: second.high,
            new_low: second.low,
        }
    }

    /// Advance one candle, returning the stop that applies to it
    fn step(&self, s: &mut SarState, bar: Hlc) -> f64 {
        let prev_low = s.new_low;
        let prev_high = s.new_high;
        s.new_low = bar.low;
        s.new_high = bar.high;

        if s.is_long {
            if s.new_low <= s.sar {
                // reverse to short
                s.is_long = false;
                s.sar = s.ep.max(prev_high).max(s.new_high);
                let output = s.sar;
                s.af = self.start;
                s.ep = s.new_low;
                s.sar += s.af * (s.ep - s.sar);
                s.sar = s.sar.max(prev_high).max(s.new_high);
                output
            } else {
                let output = s.sar;
                if s.new_high > s.ep {
                    s.ep = s.new_high;
                    s.af = (s.af + self.increment).min(self.maximum);
                }
                s.sar += s.af * (s.ep - s.sar);
                s.sar = s.sar.min(prev_low).min(s.new_low);
                output
            }
        } else if s.new_high >= s.sar {
            // reverse to long
            s.is_long = true;
            s.sar = s.ep.min(prev_low).min(s.new_low);
            let output = s.sar;
            s.af = self.start;
            s.ep = s.new_high;
            s.sar += s.af * (s.ep - s.sar);
            s.sar = s.sar.min(prev_low).min(s.new_low);
            output
        } else {
            let output = s.sar;
            if s.new_low < s.ep {
                s.ep = s.new_low;
                s.af = (s.af + self.increment).min(self.maximum);
            }
            s.sar += s.af * (s.ep - s.sar);
            s.sar = s.sar.max(prev_high).max(s.new_high);
            output
        }
    }
}

impl Indicator for ParabolicSAR {
    type Input = Hlc;

    fn name(&self) -> &str {
        "SAR"
    }

    fn lookback(&self) -> usize {
        1
    }

    fn update(&mut self, bar: Hlc) {
        let mut state = match (self.state, self.first) {
            (Some(state), _) => state,
            (None, Some(first)) => self.initial_state(first, bar),
            (None, None) => {
                self.first = Some(bar);
                return;
            }
        };
        self.last_value = Some(self.step(&mut state, bar));
        self.state = Some(state);
    }

    fn value(&self) -> Option<f64> {
        self.last_value
    }
}

/// Calculate parabolic SAR over a candle sequence
pub fn calculate_sar(candles: &[Candle], start: f64, increment: f64, maximum: f64) -> Result<Series> {
    let mut sar = ParabolicSAR::new(start, increment, maximum)?;
    Ok(collect_series(&mut sar, candles.iter().map(Hlc::from)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::test_support::{assert_approx, hlc_candles};

    #[test]
    fn test_sar_uptrend_values() {
        let candles = hlc_candles(&[
            (10.0, 9.0, 9.5),
            (11.0, 10.0, 10.5),
            (12.0, 11.0, 11.5),
            (13.0, 12.0, 12.5),
        ]);
        let series = calculate_sar(&candles, 0.02, 0.02, 0.2).unwrap();

        assert_eq!(series[0], None);
        assert_eq!(series[1], Some(9.0));
        assert_approx(series[2].unwrap(), 9.04, 1e-12);
        assert_approx(series[3].unwrap(), 9.04 + 0.04 * (12.0 - 9.04), 1e-12);
    }

    #[test]
    fn test_sar_starts_short_on_falling_lows() {
        let candles = hlc_candles(&[
            (10.0, 9.0, 9.5),
            (9.5, 8.0, 8.2),
            (9.0, 7.5, 7.8),
            (8.5, 7.0, 7.2),
        ]);
        let mut sar = ParabolicSAR::new(0.02, 0.02, 0.2).unwrap();
        let series = collect_series(&mut sar, candles.iter().map(Hlc::from));

        assert_eq!(series[1], Some(10.0));
        assert_eq!(sar.is_long(), Some(false));
        for (candle, value) in candles.iter().zip(&series).skip(1) {
            assert!(value.unwrap() > candle.high);
        }
    }

    #[test]
    fn test_sar_reverses_when_price_crosses_stop() {
        let mut bars = vec![(10.0, 9.0, 9.5), (11.0, 10.0, 10.8), (12.0, 11.0, 11.8)];
        bars.push((11.0, 8.0, 8.5));
        let mut sar = ParabolicSAR::new(0.02, 0.02, 0.2).unwrap();
        let series = collect_series(&mut sar, hlc_candles(&bars).iter().map(Hlc::from));

        assert_eq!(sar.is_long(), Some(false));
        // the reversal candle reports the prior extreme point
        assert_eq!(series[3], Some(12.0));
    }

    #[test]
    fn test_sar_start_capped_at_maximum() {
        let candles = hlc_candles(&[
            (10.0, 9.0, 9.5),
            (11.0, 10.0, 10.5),
            (12.5, 11.0, 12.0),
            (13.0, 12.5, 12.8),
        ]);
        let capped = calculate_sar(&candles, 0.25, 0.02, 0.2).unwrap();
        let explicit = calculate_sar(&candles, 0.2, 0.02, 0.2).unwrap();
        assert_eq!(capped, explicit);
    }

    #[test]
    fn test_sar_rejects_non_positive_acceleration() {
        assert!(ParabolicSAR::new(-0.02, 0.02, 0.2).is_err());
        assert!(ParabolicSAR::new(0.02, f64::NAN, 0.2).is_err());
        assert!(ParabolicSAR::new(0.0, 0.02, 0.2).is_err());
        assert!(ParabolicSAR::new(0.02, 0.0, 0.2).is_err());
        assert!(ParabolicSAR::new(0.02, 0.02, 0.0).is_err());

        let candles = hlc_candles(&[(10.0, 9.0, 9.5), (11.0, 10.0, 10.5)]);
        assert!(calculate_sar(&candles, 0.0, 0.0, 0.0).is_err());
    }
}
