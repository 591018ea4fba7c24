//! Strategy variants and their predicate sets

use crate::error::StrategyError;
use crate::params::{declarations, ParameterDecl, SignalParams};
use crate::strategy::{Column, Condition, Operand, Predicate, PredicateSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use Column::*;
use Operand::{Column as Col, Const, Previous, Scaled};

/// Which SuperMulti rule set to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Channel breakout with mirrored exit, no protections
    RangeBreakout,
    /// Trend entry gated by entry protections, ROI/stoploss tunable
    Protected,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::RangeBreakout, Variant::Protected];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::RangeBreakout => "range_breakout",
            Variant::Protected => "protected",
        }
    }

    pub fn has_protections(&self) -> bool {
        matches!(self, Variant::Protected)
    }

    pub fn declarations(&self) -> Vec<ParameterDecl> {
        declarations(*self)
    }

    pub fn entry_predicates(&self, signals: &SignalParams) -> PredicateSet {
        let predicates = match self {
            Variant::RangeBreakout => vec![
                Predicate::single("trend", Condition::above(Col(Close), Col(Jma))),
                Predicate::new(
                    "breakout",
                    vec![
                        Condition::above(Col(High), Previous(Hband)),
                        Condition::above(Col(Upward), Const(0.0)),
                    ],
                ),
                Predicate::new(
                    "strength",
                    vec![
                        Condition::above(Col(PlusDi), Col(MinusDi)),
                        Condition::above(Col(Adx), Const(signals.adx_threshold)),
                    ],
                ),
                Predicate::single("sar", Condition::below(Col(Sar), Col(Close))),
                Predicate::single(
                    "rsi",
                    Condition::above(Col(Rsi), Const(signals.rsi_entry_centerline)),
                ),
                Predicate::single("momentum", Condition::above(Col(MacdHist), Const(0.0))),
                volume(signals),
            ],
            Variant::Protected => vec![
                Predicate::single("trend", Condition::above(Col(Close), Col(Jma))),
                Predicate::single(
                    "strength",
                    Condition::above(Col(Adx), Const(signals.adx_threshold)),
                ),
                Predicate::single(
                    "rsi",
                    Condition::above(Col(Rsi), Const(signals.rsi_entry_centerline)),
                ),
                Predicate::single("sar", Condition::below(Col(Sar), Col(Close))),
                Predicate::single("momentum", Condition::above(Col(MacdHist), Const(0.0))),
                volume(signals),
            ],
        };
        PredicateSet::new("enter_long", predicates)
    }

    /// Exit conditions, written to `exit_long` for both variants
    pub fn exit_predicates(&self, signals: &SignalParams) -> PredicateSet {
        let predicates = match self {
            Variant::RangeBreakout => vec![
                Predicate::single("trend", Condition::below(Col(Close), Col(Jma))),
                Predicate::new(
                    "breakdown",
                    vec![
                        Condition::below(Col(Low), Previous(Lband)),
                        Condition::above(Col(Downward), Const(0.0)),
                    ],
                ),
                Predicate::new(
                    "strength",
                    vec![
                        Condition::below(Col(PlusDi), Col(MinusDi)),
                        Condition::above(Col(Adx), Const(signals.adx_threshold)),
                    ],
                ),
                Predicate::single("sar", Condition::above(Col(Sar), Col(Close))),
                Predicate::single(
                    "rsi",
                    Condition::below(Col(Rsi), Const(signals.rsi_exit_centerline)),
                ),
                Predicate::single("momentum", Condition::below(Col(MacdHist), Const(0.0))),
                volume(signals),
            ],
            Variant::Protected => vec![
                Predicate::single("trend", Condition::below(Col(Close), Col(Jma))),
                Predicate::single(
                    "strength",
                    Condition::below(Col(Adx), Const(signals.adx_threshold)),
                ),
                Predicate::single(
                    "rsi",
                    Condition::below(Col(Rsi), Const(signals.rsi_exit_centerline)),
                ),
                Predicate::single("momentum", Condition::below(Col(Macd), Col(MacdSignal))),
            ],
        };
        PredicateSet::new("exit_long", predicates)
    }
}

fn volume(signals: &SignalParams) -> Predicate {
    Predicate::single(
        "volume",
        Condition::above(Col(Volume), Scaled(SmaVolume, signals.volume_factor)),
    )
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "range_breakout" | "v1" | "hyper" => Ok(Variant::RangeBreakout),
            "protected" | "v2" | "old" => Ok(Variant::Protected),
            other => Err(StrategyError::UnknownVariant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::StrategyParams;

    #[test]
    fn test_predicate_counts() {
        let v1 = StrategyParams::defaults(Variant::RangeBreakout).unwrap();
        assert_eq!(Variant::RangeBreakout.entry_predicates(&v1.signals).len(), 7);
        assert_eq!(Variant::RangeBreakout.exit_predicates(&v1.signals).len(), 7);

        let v2 = StrategyParams::defaults(Variant::Protected).unwrap();
        assert_eq!(Variant::Protected.entry_predicates(&v2.signals).len(), 6);
        assert_eq!(Variant::Protected.exit_predicates(&v2.signals).len(), 4);
    }

    #[test]
    fn test_thresholds_flow_into_predicates() {
        let mut signals = StrategyParams::defaults(Variant::Protected).unwrap().signals;
        signals.rsi_exit_centerline = 42.0;
        let exit = Variant::Protected.exit_predicates(&signals);
        let rsi = exit.predicates.iter().find(|p| p.label == "rsi").unwrap();
        assert_eq!(rsi.conditions[0].to_string(), "rsi < 42");
    }

    #[test]
    fn test_exit_column_name() {
        let signals = StrategyParams::defaults(Variant::RangeBreakout).unwrap().signals;
        assert_eq!(Variant::RangeBreakout.exit_predicates(&signals).name, "exit_long");
    }

    #[test]
    fn test_parse() {
        assert_eq!("range_breakout".parse::<Variant>(), Ok(Variant::RangeBreakout));
        assert_eq!("V2".parse::<Variant>(), Ok(Variant::Protected));
        assert_eq!(
            "martingale".parse::<Variant>(),
            Err(StrategyError::UnknownVariant("martingale".to_string()))
        );
        for variant in Variant::ALL {
            assert_eq!(variant.to_string().parse::<Variant>(), Ok(variant));
        }
    }
}
