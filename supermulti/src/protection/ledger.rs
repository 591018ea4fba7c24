//! Trade ledger queries used by entry protections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A closed trade as seen by the protections
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub close_date: DateTime<Utc>,
    /// Profit ratio (e.g., -0.02 = -2%)
    pub close_profit: f64,
}

impl ClosedTrade {
    pub fn new(close_date: DateTime<Utc>, close_profit: f64) -> Self {
        Self {
            close_date,
            close_profit,
        }
    }

    pub fn is_loss(&self) -> bool {
        self.close_profit < 0.0
    }
}

/// Read-only view of the wallet and trade history.
///
/// Implemented by whatever owns the trades; the strategy never mutates it.
pub trait TradeLedger {
    /// Current drawdown as a non-positive ratio of peak equity
    fn drawdown(&self) -> f64;

    /// Losing trades in a row, counting back from the latest close
    fn consecutive_losses(&self) -> u32;

    fn last_closed_trade(&self) -> Option<ClosedTrade>;

    fn count_trades_closed_since(&self, since: DateTime<Utc>) -> usize;
}

impl<L: TradeLedger + ?Sized> TradeLedger for &L {
    fn drawdown(&self) -> f64 {
        (**self).drawdown()
    }

    fn consecutive_losses(&self) -> u32 {
        (**self).consecutive_losses()
    }

    fn last_closed_trade(&self) -> Option<ClosedTrade> {
        (**self).last_closed_trade()
    }

    fn count_trades_closed_since(&self, since: DateTime<Utc>) -> usize {
        (**self).count_trades_closed_since(since)
    }
}

/// In-memory ledger of closed trades, kept in close order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeHistory {
    trades: Vec<ClosedTrade>,
}

impl TradeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a closed trade, keeping the history ordered by close date
    pub fn record(&mut self, trade: ClosedTrade) {
        let at = self
            .trades
            .partition_point(|t| t.close_date <= trade.close_date);
        self.trades.insert(at, trade);
    }

    pub fn trades(&self) -> &[ClosedTrade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    /// Compounded equity after each trade, starting from 1.0
    pub fn equity_curve(&self) -> Vec<f64> {
        self.trades
            .iter()
            .scan(1.0, |equity, trade| {
                *equity *= 1.0 + trade.close_profit;
                Some(*equity)
            })
            .collect()
    }
}

impl FromIterator<ClosedTrade> for TradeHistory {
    fn from_iter<T: IntoIterator<Item = ClosedTrade>>(iter: T) -> Self {
        let mut history = TradeHistory::new();
        for trade in iter {
            history.record(trade);
        }
        history
    }
}

impl TradeLedger for TradeHistory {
    fn drawdown(&self) -> f64 {
        let mut peak = 1.0_f64;
        let mut current = 1.0_f64;
        for equity in self.equity_curve() {
            peak = peak.max(equity);
            current = equity;
        }
        if peak <= 0.0 {
            return 0.0;
        }
        (current - peak) / peak
    }

    fn consecutive_losses(&self) -> u32 {
        self.trades.iter().rev().take_while(|t| t.is_loss()).count() as u32
    }

    fn last_closed_trade(&self) -> Option<ClosedTrade> {
        self.trades.last().copied()
    }

    fn count_trades_closed_since(&self, since: DateTime<Utc>) -> usize {
        self.trades.iter().filter(|t| t.close_date >= since).count()
    }
}
