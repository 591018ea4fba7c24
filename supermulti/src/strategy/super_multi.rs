//! SuperMulti strategy: JMA trend, channel breakout, ADX/DI, SAR, RSI, MACD and volume

use crate::config::{EnvConfig, StrategyConfig};
use crate::data::{Candle, PairMetadata};
use crate::params::{load_overrides, ParamValue, ParameterDecl, StrategyParams};
use crate::protection::{ProtectionPolicy, ProtectionVerdict, TradeLedger};
use crate::strategy::{AnalyzedFrame, IndicatorFrame, PredicateSet, SignalColumn, Strategy, Variant};
use crate::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// SuperMulti strategy bound to one variant and parameter set
#[derive(Debug, Clone)]
pub struct SuperMultiStrategy {
    name: String,
    params: StrategyParams,
    entry: PredicateSet,
    exit: PredicateSet,
    policy: Option<ProtectionPolicy>,
}

impl SuperMultiStrategy {
    /// Create with the variant's default parameters
    pub fn new(variant: Variant) -> Result<Self> {
        Self::with_params(StrategyParams::defaults(variant)?)
    }

    /// Create from hyperopt overrides applied on top of the defaults
    pub fn from_overrides(variant: Variant, overrides: &BTreeMap<String, ParamValue>) -> Result<Self> {
        Self::with_params(StrategyParams::bind(variant, overrides)?)
    }

    /// Create from the environment selection, loading its parameter file if set
    pub fn from_env_config(env: &EnvConfig) -> Result<Self> {
        let overrides = match &env.params_file {
            Some(path) => load_overrides(path)?,
            None => BTreeMap::new(),
        };
        let mut strategy = Self::from_overrides(env.variant, &overrides)?;
        strategy.params.settings.timeframe = env.timeframe.clone();
        Ok(strategy)
    }

    pub fn with_params(params: StrategyParams) -> Result<Self> {
        IndicatorFrame::check_params(&params.indicators)?;
        let variant = params.variant;
        let entry = variant.entry_predicates(&params.signals);
        let exit = variant.exit_predicates(&params.signals);
        let policy = params.protection.clone().map(ProtectionPolicy::new);
        info!(
            "Created SuperMulti strategy: variant={}, entry predicates={}, exit predicates={}",
            variant,
            entry.len(),
            exit.len()
        );
        Ok(Self {
            name: format!("SuperMulti({})", variant),
            params,
            entry,
            exit,
            policy,
        })
    }

    pub fn variant(&self) -> Variant {
        self.params.variant
    }

    pub fn params(&self) -> &StrategyParams {
        &self.params
    }

    /// Tunable parameters of this variant, for an external optimizer
    pub fn declarations(&self) -> Vec<ParameterDecl> {
        self.variant().declarations()
    }

    pub fn entry_predicates(&self) -> &PredicateSet {
        &self.entry
    }

    pub fn exit_predicates(&self) -> &PredicateSet {
        &self.exit
    }

    pub fn protection_policy(&self) -> Option<&ProtectionPolicy> {
        self.policy.as_ref()
    }

    pub fn protection_verdict<L: TradeLedger + ?Sized>(&self, ledger: &L, now: DateTime<Utc>) -> ProtectionVerdict {
        match &self.policy {
            Some(policy) => policy.evaluate(ledger, now),
            None => ProtectionVerdict::Allowed,
        }
    }

    /// `true` when every protection passes; variants without protections always pass
    pub fn check_protections<L: TradeLedger + ?Sized>(&self, ledger: &L, now: DateTime<Utc>) -> bool {
        self.protection_verdict(ledger, now).is_allowed()
    }

    /// Protections allow an entry and the latest candle carries an entry signal
    pub fn should_enter_trade<L: TradeLedger + ?Sized>(
        &self,
        frame: &AnalyzedFrame<'_>,
        ledger: &L,
        now: DateTime<Utc>,
    ) -> bool {
        if !self.check_protections(ledger, now) {
            info!(pair = %frame.metadata.pair, "Cannot enter trade due to protections");
            return false;
        }
        let signal = frame.last_entry() == Some(true);
        if signal {
            info!(pair = %frame.metadata.pair, "Entering trade");
        }
        signal
    }
}

impl Strategy for SuperMultiStrategy {
    fn name(&self) -> &str {
        &self.name
    }

    fn settings(&self) -> &StrategyConfig {
        &self.params.settings
    }

    fn populate_indicators(&self, candles: &[Candle], metadata: &PairMetadata) -> Result<IndicatorFrame> {
        debug!(pair = %metadata.pair, candles = candles.len(), "Populating indicators");
        IndicatorFrame::compute(candles, &self.params.indicators)
    }

    fn populate_entry_trend(&self, candles: &[Candle], indicators: &IndicatorFrame) -> SignalColumn {
        let column = self.entry.evaluate_series(candles, indicators);
        for index in column.fired() {
            debug!(
                timestamp = %candles[index].timestamp,
                close = candles[index].close,
                "Entry signal"
            );
        }
        column
    }

    fn populate_exit_trend(&self, candles: &[Candle], indicators: &IndicatorFrame) -> SignalColumn {
        self.exit.evaluate_series(candles, indicators)
    }
}
