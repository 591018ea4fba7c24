//! Environment configuration

use crate::strategy::Variant;
use crate::Result;
use anyhow::Context;
use dotenv::dotenv;
use std::path::PathBuf;

/// Runtime selection of variant, pair and hyperopt parameter file
#[derive(Debug, Clone, PartialEq)]
pub struct EnvConfig {
    pub variant: Variant,
    pub pair: String,
    pub timeframe: String,
    pub params_file: Option<PathBuf>,
}

impl EnvConfig {
    /// Load from the process environment (and `.env` if present)
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let variant = match lookup("SUPERMULTI_VARIANT") {
            Some(raw) => raw
                .parse::<Variant>()
                .with_context(|| format!("SUPERMULTI_VARIANT={}", raw))?,
            None => Variant::Protected,
        };
        Ok(EnvConfig {
            variant,
            pair: lookup("SUPERMULTI_PAIR").unwrap_or_else(|| "BTC/USDT".to_string()),
            timeframe: lookup("SUPERMULTI_TIMEFRAME").unwrap_or_else(|| "5m".to_string()),
            params_file: lookup("SUPERMULTI_PARAMS_FILE").map(PathBuf::from),
        })
    }
}
