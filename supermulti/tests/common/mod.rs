//! Synthetic candle fixtures shared by the integration tests

#![allow(dead_code)]

use chrono::{Duration, TimeZone, Utc};
use supermulti::data::Candle;

fn build(rows: impl Iterator<Item = (f64, f64, f64, f64)>) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    rows.enumerate()
        .map(|(i, (high, low, close, volume))| {
            Candle::new(
                start + Duration::minutes(5 * i as i64),
                close,
                high,
                low,
                close,
                volume,
            )
        })
        .collect()
}

/// Baseline volume with a 3x spike on every fifth candle
pub fn spiky_volume(i: usize) -> f64 {
    if i % 5 == 4 {
        3000.0
    } else {
        1000.0
    }
}

/// Close grows 1% per candle; each low holds just under the previous close
pub fn accelerating_uptrend(n: usize) -> Vec<Candle> {
    let close = |i: usize| 100.0 * 1.01_f64.powi(i as i32);
    build((0..n).map(|i| {
        let prev = close(i.saturating_sub(1));
        (close(i) * 1.002, prev * 0.998, close(i), spiky_volume(i))
    }))
}

/// Close falls faster every candle; each high holds just over the previous close
pub fn accelerating_downtrend(n: usize) -> Vec<Candle> {
    let close = |i: usize| 200.0 - 0.015 * (i * i) as f64;
    build((0..n).map(|i| {
        let prev = close(i.saturating_sub(1));
        (prev * 1.002, close(i) * 0.998, close(i), spiky_volume(i))
    }))
}

/// Constant price, spiky volume
pub fn flat(n: usize) -> Vec<Candle> {
    build((0..n).map(|i| (100.0, 100.0, 100.0, spiky_volume(i))))
}

/// Slow drift down under a fast oscillation
pub fn choppy_decline(n: usize) -> Vec<Candle> {
    build((0..n).map(|i| {
        let close = 100.0 - 0.05 * i as f64 + 2.0 * (i as f64).sin();
        (close + 0.5, close - 0.5, close, 1000.0)
    }))
}
