//! Parameter catalog per variant

use super::decl::{ParamValue, ParameterDecl, ParameterSpace};
use crate::strategy::Variant;

/// Defaults that differ between the variants' shared indicator parameters
struct IndicatorDefaults {
    sar_start: f64,
    macd_fast: i64,
    macd_slow: i64,
    macd_signal: i64,
}

fn indicator_decls(defaults: IndicatorDefaults) -> Vec<ParameterDecl> {
    use ParameterSpace::Buy;
    vec![
        ParameterDecl::int("jma_length", 5, 30, 10, Buy),
        ParameterDecl::int("jma_phase", -100, 100, 15, Buy),
        ParameterDecl::int("jma_power", 1, 5, 2, Buy),
        ParameterDecl::int("range_filter_sampling_period", 10, 50, 20, Buy),
        ParameterDecl::decimal("range_multiplier", 1.0, 2.0, 1.2, Buy),
        ParameterDecl::int("adx_length", 5, 30, 5, Buy),
        ParameterDecl::int("adx_threshold", 20, 40, 25, Buy),
        ParameterDecl::decimal("sar_start", 0.02, 0.5, defaults.sar_start, Buy),
        ParameterDecl::decimal("sar_increment", 0.01, 0.2, 0.02, Buy),
        ParameterDecl::decimal("sar_maximum", 0.1, 0.5, 0.2, Buy),
        ParameterDecl::int("rsi_length", 5, 30, 10, Buy),
        ParameterDecl::int("macd_fast_length", 5, 15, defaults.macd_fast, Buy),
        ParameterDecl::int("macd_slow_length", 5, 30, defaults.macd_slow, Buy),
        ParameterDecl::int("macd_signal_smoothing", 3, 10, defaults.macd_signal, Buy),
        ParameterDecl::decimal("volume_factor", 1.0, 2.0, 1.5, Buy),
        ParameterDecl::int("sma_volume_length", 5, 30, 10, Buy),
    ]
}

fn flag(name: &'static str, default: bool) -> ParameterDecl {
    ParameterDecl::categorical(
        name,
        vec![ParamValue::Bool(true), ParamValue::Bool(false)],
        ParamValue::Bool(default),
        ParameterSpace::Trailing,
    )
}

/// Every tunable parameter of `variant`, in declaration order
pub fn declarations(variant: Variant) -> Vec<ParameterDecl> {
    match variant {
        Variant::RangeBreakout => {
            let mut decls = indicator_decls(IndicatorDefaults {
                sar_start: 0.02,
                macd_fast: 12,
                macd_slow: 26,
                macd_signal: 9,
            });
            decls.push(ParameterDecl::int("rsi_obos", 30, 70, 50, ParameterSpace::Buy));
            decls
        }
        Variant::Protected => {
            use ParameterSpace::*;
            let mut decls = vec![
                ParameterDecl::decimal("roi_0", 0.001, 0.02, 0.001, Roi),
                ParameterDecl::decimal("roi_10", 0.001, 0.02, 0.003, Roi),
                ParameterDecl::decimal("roi_30", 0.001, 0.02, 0.005, Roi),
                ParameterDecl::decimal("roi_60", 0.001, 0.02, 0.01, Roi),
                ParameterDecl::decimal("stoploss_opt", -0.2, -0.01, -0.1, Stoploss),
                flag("trailing_stop_opt", false),
                ParameterDecl::decimal("trailing_stop_positive_opt", 0.001, 0.02, 0.01, Trailing),
                ParameterDecl::decimal(
                    "trailing_stop_positive_offset_opt",
                    0.001,
                    0.05,
                    0.02,
                    Trailing,
                ),
                flag("trailing_only_offset_is_reached_opt", true),
            ];
            decls.extend(indicator_decls(IndicatorDefaults {
                sar_start: 0.25,
                macd_fast: 5,
                macd_slow: 8,
                macd_signal: 5,
            }));
            decls.extend([
                ParameterDecl::int("rsi_centerline", 30, 70, 50, Buy),
                ParameterDecl::int("sell_rsi_centerline", 30, 70, 50, Sell),
                ParameterDecl::decimal("max_drawdown", -0.3, -0.05, -0.1, Protection),
                ParameterDecl::int("stop_consecutive_losses", 1, 5, 3, Protection),
                ParameterDecl::int("cooldown_period", 5, 60, 30, Protection),
                ParameterDecl::int("max_daily_trades", 1, 20, 5, Protection),
            ]);
            decls
        }
    }
}
