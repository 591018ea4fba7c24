//! Data module
//!
//! OHLCV candles and the pair metadata passed through analysis untouched.

pub mod candle;

pub use candle::*;
