//! Bound parameter values

use super::catalog::declarations;
use super::decl::{ParamValue, ParameterDecl, ParameterSpace};
use crate::config::{ProtectionConfig, StrategyConfig};
use crate::error::StrategyError;
use crate::strategy::Variant;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Periods and settings consumed by the indicator engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorParams {
    pub jma_length: usize,
    pub jma_phase: i32,
    pub jma_power: u32,
    pub channel_period: usize,
    pub adx_length: usize,
    pub sar_start: f64,
    pub sar_increment: f64,
    pub sar_maximum: f64,
    pub rsi_length: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub sma_volume_length: usize,
}

/// Thresholds consumed by the signal predicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    pub adx_threshold: f64,
    pub rsi_entry_centerline: f64,
    pub rsi_exit_centerline: f64,
    pub volume_factor: f64,
    /// Declared for the optimizer; no predicate reads it
    pub range_multiplier: f64,
}

/// Every parameter of one variant, bound and typed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyParams {
    pub variant: Variant,
    pub indicators: IndicatorParams,
    pub signals: SignalParams,
    pub protection: Option<ProtectionConfig>,
    pub settings: StrategyConfig,
}

impl StrategyParams {
    pub fn defaults(variant: Variant) -> Result<Self> {
        Self::bind(variant, &BTreeMap::new())
    }

    /// Bind `overrides` on top of the declared defaults.
    ///
    /// Unknown names, out-of-range values and wrong kinds are rejected.
    pub fn bind(variant: Variant, overrides: &BTreeMap<String, ParamValue>) -> Result<Self> {
        let decls = declarations(variant);
        let mut values: BTreeMap<&'static str, ParamValue> =
            decls.iter().map(|d| (d.name, d.default_value())).collect();

        for (name, value) in overrides {
            let decl = find(&decls, name)?;
            values.insert(decl.name, decl.check(*value)?);
        }

        Self::from_values(variant, &Bound(&values))
    }

    fn from_values(variant: Variant, b: &Bound<'_>) -> Result<Self> {
        let indicators = IndicatorParams {
            jma_length: b.period("jma_length")?,
            jma_phase: b.narrow("jma_phase")?,
            jma_power: b.narrow("jma_power")?,
            channel_period: b.period("range_filter_sampling_period")?,
            adx_length: b.period("adx_length")?,
            sar_start: b.decimal("sar_start")?,
            sar_increment: b.decimal("sar_increment")?,
            sar_maximum: b.decimal("sar_maximum")?,
            rsi_length: b.period("rsi_length")?,
            macd_fast: b.period("macd_fast_length")?,
            macd_slow: b.period("macd_slow_length")?,
            macd_signal: b.period("macd_signal_smoothing")?,
            sma_volume_length: b.period("sma_volume_length")?,
        };

        let (rsi_entry_centerline, rsi_exit_centerline) = match variant {
            Variant::RangeBreakout => {
                let obos = b.decimal("rsi_obos")?;
                (obos, obos)
            }
            Variant::Protected => (
                b.decimal("rsi_centerline")?,
                b.decimal("sell_rsi_centerline")?,
            ),
        };

        let signals = SignalParams {
            adx_threshold: b.decimal("adx_threshold")?,
            rsi_entry_centerline,
            rsi_exit_centerline,
            volume_factor: b.decimal("volume_factor")?,
            range_multiplier: b.decimal("range_multiplier")?,
        };

        let (protection, settings) = match variant {
            Variant::RangeBreakout => (None, StrategyConfig::default()),
            Variant::Protected => {
                let protection = ProtectionConfig {
                    max_drawdown: b.decimal("max_drawdown")?,
                    stop_consecutive_losses: b.narrow("stop_consecutive_losses")?,
                    cooldown_period: b.narrow("cooldown_period")?,
                    max_daily_trades: b.narrow("max_daily_trades")?,
                };
                let settings = StrategyConfig {
                    minimal_roi: BTreeMap::from([
                        (0, b.decimal("roi_0")?),
                        (10, b.decimal("roi_10")?),
                        (30, b.decimal("roi_30")?),
                        (60, b.decimal("roi_60")?),
                    ]),
                    stoploss: b.decimal("stoploss_opt")?,
                    trailing_stop: b.flag("trailing_stop_opt")?,
                    trailing_stop_positive: b.decimal("trailing_stop_positive_opt")?,
                    trailing_stop_positive_offset: b.decimal("trailing_stop_positive_offset_opt")?,
                    trailing_only_offset_is_reached: b
                        .flag("trailing_only_offset_is_reached_opt")?,
                    ..StrategyConfig::default()
                };
                (Some(protection), settings)
            }
        };

        Ok(StrategyParams {
            variant,
            indicators,
            signals,
            protection,
            settings,
        })
    }
}

fn find<'d>(decls: &'d [ParameterDecl], name: &str) -> Result<&'d ParameterDecl, StrategyError> {
    decls
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| StrategyError::UnknownParameter(name.to_string()))
}

/// Typed view over a complete value map
struct Bound<'a>(&'a BTreeMap<&'static str, ParamValue>);

impl Bound<'_> {
    fn get(&self, name: &str) -> Result<ParamValue, StrategyError> {
        self.0
            .get(name)
            .copied()
            .ok_or_else(|| StrategyError::UnknownParameter(name.to_string()))
    }

    fn int(&self, name: &str) -> Result<i64, StrategyError> {
        match self.get(name)? {
            ParamValue::Int(v) => Ok(v),
            _ => Err(kind_error(name, "an integer")),
        }
    }

    fn decimal(&self, name: &str) -> Result<f64, StrategyError> {
        match self.get(name)? {
            ParamValue::Decimal(v) => Ok(v),
            ParamValue::Int(v) => Ok(v as f64),
            ParamValue::Bool(_) => Err(kind_error(name, "a decimal")),
        }
    }

    fn flag(&self, name: &str) -> Result<bool, StrategyError> {
        match self.get(name)? {
            ParamValue::Bool(v) => Ok(v),
            _ => Err(kind_error(name, "a boolean")),
        }
    }

    fn narrow<T: TryFrom<i64>>(&self, name: &str) -> Result<T, StrategyError> {
        let raw = self.int(name)?;
        T::try_from(raw).map_err(|_| kind_error(name, "an integer in range"))
    }

    fn period(&self, name: &str) -> Result<usize, StrategyError> {
        self.narrow(name)
    }
}

fn kind_error(name: &str, expected: &str) -> StrategyError {
    StrategyError::ParameterKind {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct HyperoptFile {
    params: BTreeMap<ParameterSpace, BTreeMap<String, ParamValue>>,
}

/// Flatten a hyperopt result document (`{"params": {space: {name: value}}}`).
///
/// ROI, stoploss and trailing entries use freqtrade's own keys (`"10"`,
/// `"stoploss"`, `"trailing_stop"`) and are renamed to their declarations.
pub fn parse_overrides(json: &str) -> Result<BTreeMap<String, ParamValue>> {
    let file: HyperoptFile =
        serde_json::from_str(json).context("Failed to parse hyperopt parameters")?;
    Ok(file
        .params
        .into_iter()
        .flat_map(|(space, values)| {
            values
                .into_iter()
                .map(move |(key, value)| (declared_name(space, key), value))
        })
        .collect())
}

fn declared_name(space: ParameterSpace, key: String) -> String {
    match space {
        ParameterSpace::Roi if key.parse::<u32>().is_ok() => format!("roi_{}", key),
        ParameterSpace::Stoploss if key == "stoploss" => "stoploss_opt".to_string(),
        ParameterSpace::Trailing if !key.ends_with("_opt") => format!("{}_opt", key),
        _ => key,
    }
}

pub fn load_overrides(path: &Path) -> Result<BTreeMap<String, ParamValue>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_overrides(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_breakout_defaults() {
        let params = StrategyParams::defaults(Variant::RangeBreakout).unwrap();
        assert_eq!(params.indicators.jma_length, 10);
        assert_eq!(params.indicators.jma_phase, 15);
        assert_eq!(params.indicators.jma_power, 2);
        assert_eq!(params.indicators.channel_period, 20);
        assert_eq!(
            (params.indicators.macd_fast, params.indicators.macd_slow, params.indicators.macd_signal),
            (12, 26, 9)
        );
        assert_eq!(params.indicators.sar_start, 0.02);
        assert_eq!(params.signals.rsi_entry_centerline, 50.0);
        assert_eq!(params.signals.rsi_exit_centerline, 50.0);
        assert!(params.protection.is_none());
        assert_eq!(params.settings, StrategyConfig::default());
    }

    #[test]
    fn test_protected_defaults() {
        let params = StrategyParams::defaults(Variant::Protected).unwrap();
        assert_eq!(
            (params.indicators.macd_fast, params.indicators.macd_slow, params.indicators.macd_signal),
            (5, 8, 5)
        );
        assert_eq!(params.indicators.sar_start, 0.25);
        assert_eq!(params.protection, Some(ProtectionConfig::default()));
        assert_eq!(params.settings.minimal_roi_at(15), Some(0.003));
        assert_eq!(params.settings.stoploss, -0.1);
        assert!(!params.settings.trailing_stop);
    }

    #[test]
    fn test_bind_overrides() {
        let overrides = BTreeMap::from([
            ("jma_length".to_string(), ParamValue::Int(14)),
            ("sell_rsi_centerline".to_string(), ParamValue::Int(40)),
            ("cooldown_period".to_string(), ParamValue::Int(10)),
            ("trailing_stop_opt".to_string(), ParamValue::Bool(true)),
            ("roi_60".to_string(), ParamValue::Decimal(0.02)),
        ]);
        let params = StrategyParams::bind(Variant::Protected, &overrides).unwrap();
        assert_eq!(params.indicators.jma_length, 14);
        assert_eq!(params.signals.rsi_exit_centerline, 40.0);
        assert_eq!(params.signals.rsi_entry_centerline, 50.0);
        assert_eq!(params.protection.unwrap().cooldown_period, 10);
        assert!(params.settings.trailing_stop);
        assert_eq!(params.settings.minimal_roi_at(90), Some(0.02));
    }

    #[test]
    fn test_bind_rejects_invalid() {
        let unknown = BTreeMap::from([("rsi_obos".to_string(), ParamValue::Int(50))]);
        let err = StrategyParams::bind(Variant::Protected, &unknown).unwrap_err();
        assert_eq!(
            err.downcast_ref::<StrategyError>(),
            Some(&StrategyError::UnknownParameter("rsi_obos".to_string()))
        );

        let out_of_range = BTreeMap::from([("jma_length".to_string(), ParamValue::Int(40))]);
        let err = StrategyParams::bind(Variant::RangeBreakout, &out_of_range).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StrategyError>(),
            Some(StrategyError::ParameterOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_parse_hyperopt_document() {
        let json = r#"{
            "strategy_name": "SuperMulti",
            "params": {
                "buy": {"jma_length": 12, "volume_factor": 1.8},
                "sell": {"sell_rsi_centerline": 45},
                "trailing": {"trailing_stop_opt": true}
            }
        }"#;
        let overrides = parse_overrides(json).unwrap();
        assert_eq!(overrides.len(), 4);
        assert_eq!(overrides["volume_factor"], ParamValue::Decimal(1.8));
        assert_eq!(overrides["trailing_stop_opt"], ParamValue::Bool(true));

        let params = StrategyParams::bind(Variant::Protected, &overrides).unwrap();
        assert_eq!(params.signals.volume_factor, 1.8);
    }

    #[test]
    fn test_parse_freqtrade_roi_and_stoploss_keys() {
        let json = r#"{
            "params": {
                "roi": {"0": 0.015, "10": 0.008, "30": 0.004, "60": 0.002},
                "stoploss": {"stoploss": -0.05},
                "trailing": {
                    "trailing_stop": true,
                    "trailing_stop_positive": 0.01,
                    "trailing_stop_positive_offset": 0.02,
                    "trailing_only_offset_is_reached": true
                }
            }
        }"#;
        let overrides = parse_overrides(json).unwrap();
        assert_eq!(overrides["roi_0"], ParamValue::Decimal(0.015));
        assert_eq!(overrides["stoploss_opt"], ParamValue::Decimal(-0.05));
        assert_eq!(overrides["trailing_stop_opt"], ParamValue::Bool(true));

        let params = StrategyParams::bind(Variant::Protected, &overrides).unwrap();
        assert_eq!(params.settings.minimal_roi_at(0), Some(0.015));
        assert_eq!(params.settings.minimal_roi_at(45), Some(0.004));
        assert_eq!(params.settings.stoploss, -0.05);
        assert!(params.settings.trailing_only_offset_is_reached);
    }

    #[test]
    fn test_parse_roi_threshold_without_declaration() {
        let overrides = parse_overrides(r#"{"params": {"roi": {"45": 0.01}}}"#).unwrap();
        let err = StrategyParams::bind(Variant::Protected, &overrides).unwrap_err();
        assert_eq!(
            err.downcast_ref::<StrategyError>(),
            Some(&StrategyError::UnknownParameter("roi_45".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_unknown_space() {
        assert!(parse_overrides(r#"{"params": {"lunar": {"x": 1}}}"#).is_err());
    }
}
