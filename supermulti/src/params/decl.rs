//! Optimizer-facing parameter declarations

use crate::error::StrategyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hyperopt space a parameter belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterSpace {
    Buy,
    Sell,
    Protection,
    Roi,
    Stoploss,
    Trailing,
}

/// Concrete value supplied for one parameter
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Decimal(f64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{}", v),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Decimal(v) => write!(f, "{}", v),
        }
    }
}

/// Type and search range of a parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ParamKind {
    Int { low: i64, high: i64, default: i64 },
    Decimal { low: f64, high: f64, default: f64 },
    Categorical { options: Vec<ParamValue>, default: ParamValue },
}

/// Declaration of one tunable parameter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDecl {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: ParamKind,
    pub space: ParameterSpace,
}

impl ParameterDecl {
    pub fn int(name: &'static str, low: i64, high: i64, default: i64, space: ParameterSpace) -> Self {
        Self {
            name,
            kind: ParamKind::Int { low, high, default },
            space,
        }
    }

    pub fn decimal(name: &'static str, low: f64, high: f64, default: f64, space: ParameterSpace) -> Self {
        Self {
            name,
            kind: ParamKind::Decimal { low, high, default },
            space,
        }
    }

    pub fn categorical(
        name: &'static str,
        options: Vec<ParamValue>,
        default: ParamValue,
        space: ParameterSpace,
    ) -> Self {
        Self {
            name,
            kind: ParamKind::Categorical { options, default },
            space,
        }
    }

    pub fn default_value(&self) -> ParamValue {
        match &self.kind {
            ParamKind::Int { default, .. } => ParamValue::Int(*default),
            ParamKind::Decimal { default, .. } => ParamValue::Decimal(*default),
            ParamKind::Categorical { default, .. } => *default,
        }
    }

    /// Validate a supplied value against this declaration.
    ///
    /// Integers are accepted for decimal parameters; nothing is clamped.
    pub fn check(&self, value: ParamValue) -> Result<ParamValue, StrategyError> {
        match (&self.kind, value) {
            (ParamKind::Int { low, high, .. }, ParamValue::Int(v)) => {
                if v < *low || v > *high {
                    return Err(self.out_of_bounds(value, low, high));
                }
                Ok(value)
            }
            (ParamKind::Decimal { .. }, ParamValue::Int(v)) => {
                self.check(ParamValue::Decimal(v as f64))
            }
            (ParamKind::Decimal { low, high, .. }, ParamValue::Decimal(v)) => {
                if !(*low..=*high).contains(&v) {
                    return Err(self.out_of_bounds(value, low, high));
                }
                Ok(value)
            }
            (ParamKind::Categorical { options, .. }, v) if options.contains(&v) => Ok(v),
            (ParamKind::Categorical { options, .. }, _) => Err(StrategyError::ParameterKind {
                name: self.name.to_string(),
                expected: format!(
                    "one of [{}]",
                    options.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
                ),
            }),
            (ParamKind::Int { .. }, _) => Err(self.wrong_kind("an integer")),
            (ParamKind::Decimal { .. }, _) => Err(self.wrong_kind("a decimal")),
        }
    }

    fn out_of_bounds(&self, value: ParamValue, low: &dyn fmt::Display, high: &dyn fmt::Display) -> StrategyError {
        StrategyError::ParameterOutOfBounds {
            name: self.name.to_string(),
            value: value.to_string(),
            low: low.to_string(),
            high: high.to_string(),
        }
    }

    fn wrong_kind(&self, expected: &str) -> StrategyError {
        StrategyError::ParameterKind {
            name: self.name.to_string(),
            expected: expected.to_string(),
        }
    }
}
