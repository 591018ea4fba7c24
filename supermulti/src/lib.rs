//! SuperMulti: a JMA / range-filter / ADX / SAR trading strategy core
//!
//! This crate implements the strategy side of a freqtrade-style bot. It does
//! not execute orders; it turns candles into indicator columns and entry/exit
//! flags, and gates entries behind drawdown and trade-frequency protections.
//!
//! # Features
//!
//! - **Indicators**: adaptive moving average (JMA), channel bands, ADX/DI,
//!   parabolic SAR, RSI, MACD and volume SMA with reference TA semantics
//! - **Signals**: declarative predicate sets combined by conjunction
//! - **Parameters**: hyperopt declarations kept apart from bound values
//! - **Protections**: drawdown, loss streak, cooldown and daily trade limits
//!   evaluated against an injected trade ledger
//!
//! # Example
//!
//! ```no_run
//! use supermulti::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let candles: Vec<Candle> = Vec::new();
//!     let strategy = SuperMultiStrategy::new(Variant::Protected)?;
//!     let frame = strategy.analyze(&candles, &PairMetadata::new("BTC/USDT", "5m"))?;
//!     let ledger = TradeHistory::default();
//!     if strategy.should_enter_trade(&frame, &ledger, chrono::Utc::now()) {
//!         println!("enter long");
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod indicators;
pub mod params;
pub mod protection;
pub mod strategy;

// Re-export commonly used types
pub mod prelude {
    pub use crate::config::*;
    pub use crate::data::*;
    pub use crate::error::*;
    pub use crate::indicators::*;
    pub use crate::params::*;
    pub use crate::protection::*;
    pub use crate::strategy::*;

    pub use anyhow::{Context, Result};
}

/// Result type alias
pub type Result<T, E = anyhow::Error> = anyhow::Result<T, E>;
