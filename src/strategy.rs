//! Allocation strategies mapping a funds pool to an ordered payment schedule.
//!
//! Each strategy is a pure function over `(accounts, available_funds,
//! as_of_date)`: no I/O, no input mutation, identical output for identical
//! input. The set of strategies is closed at compile time; name-based lookup
//! lives in the engine facade.

use crate::account::{validate_accounts, DebtAccount, PaymentScheduleEntry};
use crate::error::{EngineError, Result};
use crate::money::Money;
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::Serialize;

/// Accounts at or above this APR belong to the hybrid high-interest bucket.
fn high_rate_floor() -> Decimal {
    Decimal::new(15, 2) // 0.15
}

/// Accounts at or below this balance belong to the hybrid low-balance bucket.
fn low_balance_ceiling() -> Decimal {
    Decimal::new(1000, 0)
}

/// Share of the funds pool given to the hybrid high-interest bucket.
fn high_bucket_share() -> Decimal {
    Decimal::new(70, 2) // 0.70
}

/// A named allocation strategy.
///
/// Closed set: strategies are enumerated here and registered with the engine
/// at construction, so an unknown name can only arise from caller input,
/// never from a missing registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Highest interest rate first; minimizes total interest paid.
    Avalanche,

    /// Smallest balance first; clears whole debts fastest.
    Snowball,

    /// 70% of funds to high-interest debts, 30% to low-balance debts.
    Hybrid,
}

/// Name and human-readable description of a strategy, for UI display.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyDescriptor {
    /// Lookup name (lowercase)
    pub name: &'static str,

    /// One-line description
    pub description: &'static str,
}

impl Strategy {
    /// All registered strategies, in display order.
    pub const ALL: [Strategy; 3] = [Strategy::Avalanche, Strategy::Snowball, Strategy::Hybrid];

    /// The strategy's lookup name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
            Strategy::Hybrid => "hybrid",
        }
    }

    /// One-line description for UI display.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::Avalanche => {
                "Pays highest-interest debts first to minimize total interest paid"
            }
            Strategy::Snowball => "Pays smallest balances first to clear whole debts fastest",
            Strategy::Hybrid => {
                "Splits funds 70/30 between high-interest and low-balance debts"
            }
        }
    }

    /// Name and description bundled for `list_strategies`.
    pub fn descriptor(&self) -> StrategyDescriptor {
        StrategyDescriptor {
            name: self.name(),
            description: self.description(),
        }
    }

    /// Distributes `available_funds` across `accounts`, producing an ordered
    /// payment schedule.
    ///
    /// Negative funds or a negative account balance fail with
    /// [`EngineError::InvalidInput`] before any allocation work. Zero funds
    /// or an empty account list yield an empty schedule.
    ///
    /// The sum of scheduled amounts never exceeds `available_funds`, and no
    /// entry targets an account with a zero balance.
    pub fn allocate(
        &self,
        accounts: &[DebtAccount],
        available_funds: Money,
        as_of_date: NaiveDate,
    ) -> Result<Vec<PaymentScheduleEntry>> {
        if available_funds.is_negative() {
            return Err(EngineError::invalid_input(format!(
                "negative available funds {}",
                available_funds
            )));
        }
        validate_accounts(accounts)?;

        if available_funds.is_zero() || accounts.is_empty() {
            return Ok(Vec::new());
        }

        let schedule = match self {
            Strategy::Avalanche => {
                let mut ordered: Vec<&DebtAccount> = accounts.iter().collect();
                ordered.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));

                let mut schedule = Vec::new();
                allocate_greedy(&ordered, available_funds, as_of_date, &mut schedule);
                schedule
            }
            Strategy::Snowball => {
                let mut ordered: Vec<&DebtAccount> = accounts.iter().collect();
                ordered.sort_by(|a, b| a.current_balance.cmp(&b.current_balance));

                let mut schedule = Vec::new();
                allocate_greedy(&ordered, available_funds, as_of_date, &mut schedule);
                schedule
            }
            Strategy::Hybrid => {
                let mut high: Vec<&DebtAccount> = accounts
                    .iter()
                    .filter(|a| a.interest_rate >= high_rate_floor())
                    .collect();
                high.sort_by(|a, b| b.interest_rate.cmp(&a.interest_rate));

                let mut low: Vec<&DebtAccount> = accounts
                    .iter()
                    .filter(|a| a.current_balance.as_decimal() <= low_balance_ceiling())
                    .collect();
                low.sort_by(|a, b| a.current_balance.cmp(&b.current_balance));

                // The 70% share is rounded to the cent; the low bucket gets
                // the exact remainder so the split always totals the pool.
                let high_budget = available_funds.mul_rate(high_bucket_share());
                let low_budget = available_funds - high_budget;

                // An account in both buckets can receive one entry from
                // each run; the two allocations are intentionally kept
                // separate rather than merged.
                let mut schedule = Vec::new();
                allocate_greedy(&high, high_budget, as_of_date, &mut schedule);
                allocate_greedy(&low, low_budget, as_of_date, &mut schedule);
                schedule
            }
        };

        debug!(
            "{}: allocated {} of {} across {} entries",
            self.name(),
            schedule.iter().map(|e| e.amount).sum::<Money>(),
            available_funds,
            schedule.len()
        );

        Ok(schedule)
    }
}

/// Greedy allocation over an already-ordered account list.
///
/// Pays `min(remaining, balance)` to each account in turn, skipping
/// non-positive payments and stopping once the budget is exhausted.
/// Priorities continue from whatever is already in `schedule`, so multiple
/// runs (hybrid) produce one consistently numbered schedule.
fn allocate_greedy(
    ordered: &[&DebtAccount],
    budget: Money,
    as_of_date: NaiveDate,
    schedule: &mut Vec<PaymentScheduleEntry>,
) {
    let mut remaining = budget;

    for account in ordered {
        if !remaining.is_positive() {
            break;
        }

        let payment = remaining.min(account.current_balance);
        if !payment.is_positive() {
            continue;
        }

        schedule.push(PaymentScheduleEntry {
            account_id: account.account_id.clone(),
            amount: payment,
            date: as_of_date,
            priority: schedule.len() as u32 + 1,
        });
        remaining -= payment;
    }
}
