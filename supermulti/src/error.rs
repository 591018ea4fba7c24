//! Strategy error types
//!
//! Library functions return [`crate::Result`]; the variants below are the
//! failures callers may want to match on after `downcast_ref`.

use thiserror::Error;

/// Domain errors raised while binding parameters or computing indicators
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    /// An indicator was asked to run with a value outside its domain
    #[error("invalid {indicator} parameter: {reason}")]
    InvalidParameter {
        indicator: &'static str,
        reason: String,
    },

    /// Override names a parameter the variant does not declare
    #[error("unknown parameter '{0}'")]
    UnknownParameter(String),

    /// Override value falls outside the declared range
    #[error("parameter '{name}' = {value} is outside [{low}, {high}]")]
    ParameterOutOfBounds {
        name: String,
        value: String,
        low: String,
        high: String,
    },

    /// Override value has the wrong type (or is not one of the categories)
    #[error("parameter '{name}' expects {expected}")]
    ParameterKind { name: String, expected: String },

    /// Candle timestamps must be strictly increasing
    #[error("candle {index} is not newer than the candle before it")]
    UnorderedCandles { index: usize },

    /// Unrecognised strategy variant name
    #[error("unknown strategy variant '{0}'")]
    UnknownVariant(String),
}

impl StrategyError {
    pub(crate) fn invalid(indicator: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            indicator,
            reason: reason.into(),
        }
    }
}
