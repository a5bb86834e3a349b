//! Engine facade: strategy registry, allocation dispatch, and projections.
//!
//! The registry is built once from the closed [`Strategy`] set and is
//! read-only afterwards, so one engine value can be shared freely across
//! concurrent callers without synchronization.

use crate::account::{DebtAccount, PaymentScheduleEntry};
use crate::error::{EngineError, Result};
use crate::money::Money;
use crate::projection::{self, ProjectionResult};
use crate::strategy::{Strategy, StrategyDescriptor};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;

/// The debt repayment optimization engine.
///
/// Dispatches allocation requests to a named strategy and exposes the
/// payoff projection calculator. Holds no mutable state.
pub struct OptimizerEngine {
    /// Strategies keyed by lowercase name.
    registry: HashMap<&'static str, Strategy>,
}

impl OptimizerEngine {
    /// Creates an engine with every known strategy registered.
    pub fn new() -> Self {
        let registry = Strategy::ALL.iter().map(|s| (s.name(), *s)).collect();
        OptimizerEngine { registry }
    }

    /// Lists the registered strategies for UI display, in a fixed order.
    pub fn list_strategies(&self) -> Vec<StrategyDescriptor> {
        Strategy::ALL.iter().map(Strategy::descriptor).collect()
    }

    /// Allocates `available_funds` across `accounts` using the named
    /// strategy.
    ///
    /// Strategy names are matched case-insensitively. An unregistered name
    /// fails with [`EngineError::UnknownStrategy`]; no fallback strategy is
    /// substituted.
    pub fn optimize(
        &self,
        strategy_name: &str,
        accounts: &[DebtAccount],
        available_funds: Money,
        as_of_date: NaiveDate,
    ) -> Result<Vec<PaymentScheduleEntry>> {
        let normalized = strategy_name.trim().to_lowercase();
        let strategy =
            self.registry
                .get(normalized.as_str())
                .ok_or_else(|| EngineError::UnknownStrategy {
                    name: strategy_name.to_string(),
                })?;

        debug!(
            "optimize: strategy={} accounts={} funds={}",
            strategy.name(),
            accounts.len(),
            available_funds
        );

        strategy.allocate(accounts, available_funds, as_of_date)
    }

    /// Projects the payoff horizon and interest saved by applying
    /// `schedule` monthly against `accounts`.
    pub fn project(
        &self,
        accounts: &[DebtAccount],
        schedule: &[PaymentScheduleEntry],
    ) -> Result<ProjectionResult> {
        projection::project(accounts, schedule)
    }
}

impl Default for OptimizerEngine {
    fn default() -> Self {
        Self::new()
    }
}
