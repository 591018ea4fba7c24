//! Entry protection configuration

use serde::{Deserialize, Serialize};

/// Limits checked before acting on an entry signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProtectionConfig {
    /// Block entries once drawdown falls below this (e.g., -0.10 = -10%)
    pub max_drawdown: f64,
    /// Block entries after this many losing trades in a row
    pub stop_consecutive_losses: u32,
    /// Minutes to wait after a losing trade closes
    pub cooldown_period: u32,
    /// Maximum trades closed per calendar day
    pub max_daily_trades: u32,
}

impl Default for ProtectionConfig {
    fn default() -> Self {
        Self {
            max_drawdown: -0.10,
            stop_consecutive_losses: 3,
            cooldown_period: 30,
            max_daily_trades: 5,
        }
    }
}
