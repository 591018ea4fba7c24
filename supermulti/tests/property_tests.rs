//! Property tests for indicator and signal invariants.
//!
//! Uses proptest to verify:
//! 1. Alignment: every column has one value per candle
//! 2. Determinism: identical inputs give identical outputs
//! 3. Conjunction soundness: a fired signal has every predicate true
//! 4. Warm-up: inputs shorter than a lookback are never computable
//! 5. Adaptive MA identities at phase 100 and phase 0

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;
use supermulti::data::{Candle, PairMetadata};
use supermulti::indicators::{
    calculate_channel, calculate_directional, calculate_ema, calculate_jma, calculate_rsi,
    calculate_sma,
};
use supermulti::strategy::{Column, Strategy as _, SuperMultiStrategy, Variant};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_candles(min: usize, max: usize) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec((-0.03..0.03_f64, 0.0..0.02_f64, 500.0..5000.0_f64), min..max).prop_map(
        |steps| {
            let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut close = 100.0;
            steps
                .into_iter()
                .enumerate()
                .map(|(i, (change, spread, volume))| {
                    let open = close;
                    close *= 1.0 + change;
                    let high = open.max(close) * (1.0 + spread);
                    let low = open.min(close) * (1.0 - spread);
                    Candle::new(start + Duration::minutes(i as i64), open, high, low, close, volume)
                })
                .collect()
        },
    )
}

fn arb_variant() -> impl Strategy<Value = Variant> {
    prop_oneof![Just(Variant::RangeBreakout), Just(Variant::Protected)]
}

fn metadata() -> PairMetadata {
    PairMetadata::new("ETH/USDT", "5m")
}

// ── 1-3. Frame invariants ────────────────────────────────────────────

proptest! {
    #[test]
    fn columns_align_with_candles(candles in arb_candles(1, 120), variant in arb_variant()) {
        let strategy = SuperMultiStrategy::new(variant).unwrap();
        let frame = strategy.analyze(&candles, &metadata()).unwrap();
        prop_assert_eq!(frame.enter_long.len(), candles.len());
        prop_assert_eq!(frame.exit_long.len(), candles.len());
        for column in Column::INDICATORS {
            prop_assert_eq!(frame.indicators.series(column).unwrap().len(), candles.len());
        }
    }

    #[test]
    fn analysis_is_deterministic(candles in arb_candles(30, 120), variant in arb_variant()) {
        let strategy = SuperMultiStrategy::new(variant).unwrap();
        let a = strategy.analyze(&candles, &metadata()).unwrap();
        let b = strategy.analyze(&candles, &metadata()).unwrap();
        prop_assert_eq!(a.indicators, b.indicators);
        prop_assert_eq!(a.enter_long, b.enter_long);
        prop_assert_eq!(a.exit_long, b.exit_long);
    }

    /// A signal fires only when every member predicate is true.
    #[test]
    fn fired_signal_has_every_predicate_true(candles in arb_candles(40, 150), variant in arb_variant()) {
        let strategy = SuperMultiStrategy::new(variant).unwrap();
        let frame = strategy.analyze(&candles, &metadata()).unwrap();
        for (column, set) in [
            (&frame.enter_long, strategy.entry_predicates()),
            (&frame.exit_long, strategy.exit_predicates()),
        ] {
            for i in 0..candles.len() {
                let each = set.evaluate_each(&candles, &frame.indicators, i);
                match column.get(i) {
                    Some(true) => prop_assert!(each.iter().all(|(_, v)| *v == Some(true))),
                    Some(false) => {
                        prop_assert!(each.iter().all(|(_, v)| v.is_some()));
                        prop_assert!(each.iter().any(|(_, v)| *v == Some(false)));
                    }
                    None => prop_assert!(each.iter().any(|(_, v)| v.is_none())),
                }
            }
        }
    }
}

// ── 4. Warm-up ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn short_input_is_never_computable(candles in arb_candles(1, 20), period in 20usize..40) {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        prop_assert!(calculate_sma(&closes, period).unwrap().iter().all(Option::is_none));
        prop_assert!(calculate_ema(&closes, period).unwrap().iter().all(Option::is_none));
        prop_assert!(calculate_rsi(&closes, period).unwrap().iter().all(Option::is_none));
        let channel = calculate_channel(&candles, period).unwrap();
        prop_assert!(channel.hband.iter().all(Option::is_none));
        let directional = calculate_directional(&candles, period / 2 + 1).unwrap();
        prop_assert!(directional.adx.iter().all(Option::is_none));
    }

    #[test]
    fn rsi_stays_in_range(candles in arb_candles(20, 120), period in 2usize..20) {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        for value in calculate_rsi(&closes, period).unwrap().into_iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }
}

// ── 5. Adaptive moving average ───────────────────────────────────────

proptest! {
    #[test]
    fn full_phase_equals_ema(candles in arb_candles(10, 80), length in 2usize..10, power in 1u32..6) {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let jma = calculate_jma(&closes, length, 100, power).unwrap();
        let ema = calculate_ema(&closes, length).unwrap();
        prop_assert_eq!(jma, ema);
    }

    #[test]
    fn zero_phase_tracks_close(candles in arb_candles(10, 80), length in 2usize..10, power in 1u32..6) {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let jma = calculate_jma(&closes, length, 0, power).unwrap();
        for (value, close) in jma.iter().zip(&closes) {
            if let Some(value) = value {
                prop_assert!((value - close).abs() <= 1e-9 * close.abs());
            }
        }
    }
}
