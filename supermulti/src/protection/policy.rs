//! Entry protection policy

use crate::config::ProtectionConfig;
use crate::protection::TradeLedger;
use chrono::{DateTime, Duration, Local, NaiveTime, TimeZone, Timelike, Utc};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Why an entry was blocked
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BlockReason {
    MaxDrawdown { drawdown: f64, limit: f64 },
    ConsecutiveLosses { count: u32, limit: u32 },
    Cooldown { elapsed_minutes: i64, cooldown_minutes: u32 },
    DailyTradeLimit { count: usize, limit: u32 },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::MaxDrawdown { drawdown, limit } => {
                write!(f, "max drawdown reached ({:.2}% < {:.2}%)", drawdown * 100.0, limit * 100.0)
            }
            BlockReason::ConsecutiveLosses { count, limit } => {
                write!(f, "{} consecutive losses (limit {})", count, limit)
            }
            BlockReason::Cooldown {
                elapsed_minutes,
                cooldown_minutes,
            } => write!(
                f,
                "cooldown active ({} of {} minutes since last loss)",
                elapsed_minutes, cooldown_minutes
            ),
            BlockReason::DailyTradeLimit { count, limit } => {
                write!(f, "{} trades closed today (limit {})", count, limit)
            }
        }
    }
}

/// Outcome of a protection check
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum ProtectionVerdict {
    Allowed,
    Blocked(BlockReason),
}

impl ProtectionVerdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ProtectionVerdict::Allowed)
    }

    pub fn reason(&self) -> Option<BlockReason> {
        match self {
            ProtectionVerdict::Allowed => None,
            ProtectionVerdict::Blocked(reason) => Some(*reason),
        }
    }
}

/// Sequential entry gate: drawdown, loss streak, cooldown, daily cap
#[derive(Debug, Clone, PartialEq)]
pub struct ProtectionPolicy {
    config: ProtectionConfig,
}

impl ProtectionPolicy {
    pub fn new(config: ProtectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProtectionConfig {
        &self.config
    }

    /// Evaluate the guards in order, stopping at the first that blocks.
    ///
    /// The daily cap counts trades closed since midnight on the process-local clock.
    pub fn evaluate<L: TradeLedger + ?Sized>(&self, ledger: &L, now: DateTime<Utc>) -> ProtectionVerdict {
        self.evaluate_in(ledger, now, &Local)
    }

    /// Like [`evaluate`](Self::evaluate), with the calendar day taken in `tz`
    pub fn evaluate_in<L, Tz>(&self, ledger: &L, now: DateTime<Utc>, tz: &Tz) -> ProtectionVerdict
    where
        L: TradeLedger + ?Sized,
        Tz: TimeZone,
    {
        let verdict = match self.first_block(ledger, now, tz) {
            Some(reason) => ProtectionVerdict::Blocked(reason),
            None => ProtectionVerdict::Allowed,
        };
        if let ProtectionVerdict::Blocked(reason) = verdict {
            info!("Entry blocked: {}", reason);
        }
        verdict
    }

    pub fn evaluate_now<L: TradeLedger + ?Sized>(&self, ledger: &L) -> ProtectionVerdict {
        self.evaluate(ledger, Utc::now())
    }

    pub fn check_protections<L: TradeLedger + ?Sized>(&self, ledger: &L, now: DateTime<Utc>) -> bool {
        self.evaluate(ledger, now).is_allowed()
    }

    pub fn check_protections_now<L: TradeLedger + ?Sized>(&self, ledger: &L) -> bool {
        self.check_protections(ledger, Utc::now())
    }

    fn first_block<L, Tz>(&self, ledger: &L, now: DateTime<Utc>, tz: &Tz) -> Option<BlockReason>
    where
        L: TradeLedger + ?Sized,
        Tz: TimeZone,
    {
        let drawdown = ledger.drawdown();
        if drawdown < self.config.max_drawdown {
            return Some(BlockReason::MaxDrawdown {
                drawdown,
                limit: self.config.max_drawdown,
            });
        }

        let losses = ledger.consecutive_losses();
        if losses >= self.config.stop_consecutive_losses {
            return Some(BlockReason::ConsecutiveLosses {
                count: losses,
                limit: self.config.stop_consecutive_losses,
            });
        }

        if let Some(last) = ledger.last_closed_trade().filter(|t| t.is_loss()) {
            let elapsed = now - last.close_date;
            if elapsed < Duration::minutes(i64::from(self.config.cooldown_period)) {
                return Some(BlockReason::Cooldown {
                    elapsed_minutes: elapsed.num_minutes(),
                    cooldown_minutes: self.config.cooldown_period,
                });
            }
        }

        let today = ledger.count_trades_closed_since(start_of_day(now, tz));
        if today >= self.config.max_daily_trades as usize {
            return Some(BlockReason::DailyTradeLimit {
                count: today,
                limit: self.config.max_daily_trades,
            });
        }

        None
    }
}

/// Midnight in `tz` of the calendar day containing `now`
pub fn start_of_day<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> DateTime<Utc> {
    let local = now.with_timezone(tz);
    let midnight = local.date_naive().and_time(NaiveTime::MIN);
    match tz.from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        // midnight skipped by a DST jump: step back by the local time of day
        None => {
            now - Duration::seconds(i64::from(local.num_seconds_from_midnight()))
                - Duration::nanoseconds(i64::from(local.nanosecond()))
        }
    }
}
