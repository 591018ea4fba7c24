//! Example: analyze a synthetic trending market with the configured variant
//!
//! Reads `SUPERMULTI_VARIANT`, `SUPERMULTI_PAIR` and `SUPERMULTI_PARAMS_FILE`
//! (optionally from `.env`) and prints the candles that fired a signal.

use chrono::{Duration, TimeZone, Utc};
use supermulti::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn synthetic_candles(count: usize) -> Vec<Candle> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut close = 100.0_f64;
    (0..count)
        .map(|i| {
            let open = close;
            // trend up for two thirds of the run, then roll over
            let drift = if i < count * 2 / 3 { 0.008 } else { -0.006 };
            close *= 1.0 + drift + 0.004 * (i as f64 * 0.9).sin();
            let volume = if i % 7 == 6 { 4200.0 } else { 1000.0 + 50.0 * (i % 5) as f64 };
            Candle::new(
                start + Duration::minutes(5 * i as i64),
                open,
                open.max(close) * 1.002,
                open.min(close) * 0.998,
                close,
                volume,
            )
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let env = EnvConfig::from_env()?;
    let strategy = SuperMultiStrategy::from_env_config(&env)?;
    info!("Running {} on {} {}", strategy.name(), env.pair, env.timeframe);

    let candles = synthetic_candles(200);
    let metadata = PairMetadata::new(env.pair.clone(), env.timeframe.clone());
    let frame = strategy.analyze(&candles, &metadata)?;

    let signalled: Vec<AnalyzedRow> = frame
        .rows()
        .into_iter()
        .filter(|row| row.enter_long == Some(1) || row.exit_long == Some(1))
        .collect();
    println!("{}", serde_json::to_string_pretty(&signalled)?);

    info!(
        "Warm-up ends at candle {:?}; {} entries, {} exits",
        frame.indicators.warmup(),
        frame.enter_long.fired().count(),
        frame.exit_long.fired().count()
    );

    let history: TradeHistory = [
        ClosedTrade::new(Utc::now() - Duration::hours(5), 0.012),
        ClosedTrade::new(Utc::now() - Duration::minutes(12), -0.008),
    ]
    .into_iter()
    .collect();
    match strategy.protection_verdict(&history, Utc::now()) {
        ProtectionVerdict::Allowed => info!("Protections allow new entries"),
        ProtectionVerdict::Blocked(reason) => info!("Protections block new entries: {}", reason),
    }
    info!(
        "Enter now: {}",
        strategy.should_enter_trade(&frame, &history, Utc::now())
    );

    Ok(())
}
