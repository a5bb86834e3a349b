//! Month-by-month payoff simulation and minimum-payment baseline.
//!
//! The simulation treats the supplied schedule as recurring every month:
//! each simulated month accrues one month of interest on every open
//! balance, then applies the schedule's payments in priority order. The
//! baseline assumes each account is paid exactly its contractual minimum
//! until amortized; the difference between the two total outlays is the
//! interest saved by following the schedule.

use crate::account::{validate_accounts, DebtAccount, PaymentScheduleEntry};
use crate::error::{EngineError, Result};
use crate::money::Money;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// Hard cap on the simulated horizon (50 years). A schedule whose payments
/// never outrun interest accrual would otherwise loop forever.
pub const MAX_PROJECTION_MONTHS: u32 = 600;

/// Outcome of a payoff projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionResult {
    /// Baseline (minimum-payments-only) outlay minus the projected outlay.
    pub total_interest_saved: Money,

    /// Months until every balance reaches zero.
    pub months_to_payoff: u32,

    /// Total paid across all accounts over the projected horizon.
    pub total_payments: Money,
}

fn monthly_rate(annual: Decimal) -> Decimal {
    annual / Decimal::from(12)
}

/// Projects the payoff horizon and interest saved by applying `schedule`
/// monthly, versus paying only each account's minimum payment.
///
/// Fails with [`EngineError::NonAmortizingMinimumPayment`] when any open
/// account's minimum payment does not exceed its monthly interest (the
/// baseline never converges), and with
/// [`EngineError::PayoffHorizonExceeded`] when the simulation itself has
/// not paid everything off within [`MAX_PROJECTION_MONTHS`].
pub fn project(
    accounts: &[DebtAccount],
    schedule: &[PaymentScheduleEntry],
) -> Result<ProjectionResult> {
    validate_accounts(accounts)?;

    // Computed up front so a non-amortizing minimum fails fast, before any
    // simulation work.
    let baseline_total = baseline_cost(accounts)?;

    // Private working copy of the balances; inputs are never mutated.
    // Accounts already at zero need no payoff and are left out entirely.
    let mut remaining: HashMap<&str, Money> = accounts
        .iter()
        .filter(|a| a.current_balance.is_positive())
        .map(|a| (a.account_id.as_str(), a.current_balance))
        .collect();

    let mut months_to_payoff = 0u32;
    let mut total_payments = Money::ZERO;

    while remaining.values().any(|b| b.is_positive()) {
        months_to_payoff += 1;
        if months_to_payoff > MAX_PROJECTION_MONTHS {
            let remaining_balance: Money = remaining.values().copied().sum();
            return Err(EngineError::PayoffHorizonExceeded {
                months: MAX_PROJECTION_MONTHS,
                remaining_balance,
            });
        }

        // Interest first, rounded to the cent per account per month.
        for account in accounts {
            if let Some(balance) = remaining.get_mut(account.account_id.as_str()) {
                if balance.is_positive() {
                    let interest = balance.mul_rate(monthly_rate(account.interest_rate));
                    *balance += interest;
                }
            }
        }

        // Then the schedule, in priority order, each payment clamped to
        // what is still owed.
        for entry in schedule {
            if let Some(balance) = remaining.get_mut(entry.account_id.as_str()) {
                if balance.is_positive() {
                    let payment = entry.amount.min(*balance);
                    *balance -= payment;
                    total_payments += payment;
                }
            }
        }
    }

    let total_interest_saved = baseline_total - total_payments;

    debug!(
        "projection converged: {} months, {} paid, {} saved vs baseline {}",
        months_to_payoff, total_payments, total_interest_saved, baseline_total
    );

    Ok(ProjectionResult {
        total_interest_saved,
        months_to_payoff,
        total_payments,
    })
}

/// Closed-form cost of paying every account exactly its minimum payment.
///
/// Per account: `months = ceil(balance / (minimum_payment - monthly_interest))`,
/// `cost = minimum_payment * months`. Undefined when the minimum payment
/// does not exceed the monthly interest, which is surfaced as an error.
fn baseline_cost(accounts: &[DebtAccount]) -> Result<Money> {
    let mut baseline_total = Money::ZERO;

    for account in accounts {
        if !account.current_balance.is_positive() {
            continue;
        }

        let monthly_interest = account
            .current_balance
            .mul_rate(monthly_rate(account.interest_rate));

        if account.minimum_payment <= monthly_interest {
            return Err(EngineError::NonAmortizingMinimumPayment {
                account_id: account.account_id.clone(),
                minimum_payment: account.minimum_payment,
                monthly_interest,
            });
        }

        let net = (account.minimum_payment - monthly_interest).as_decimal();
        let months = (account.current_balance.as_decimal() / net)
            .ceil()
            .to_u32()
            .ok_or_else(|| {
                EngineError::invalid_account(
                    account.account_id.clone(),
                    "baseline payoff months out of range",
                )
            })?;

        baseline_total += account.minimum_payment.times(months);
    }

    Ok(baseline_total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn account(id: &str, balance: &str, apr: &str, minimum: &str) -> DebtAccount {
        DebtAccount {
            account_id: id.to_string(),
            creditor_id: format!("cred-{}", id),
            current_balance: money(balance),
            interest_rate: Decimal::from_str(apr).unwrap(),
            minimum_payment: money(minimum),
            due_date: None,
        }
    }

    fn entry(id: &str, amount: &str) -> PaymentScheduleEntry {
        PaymentScheduleEntry {
            account_id: id.to_string(),
            amount: money(amount),
            date: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
            priority: 1,
        }
    }

    #[test]
    fn test_baseline_closed_form() {
        // 1% monthly interest on 1200 is 12; 110 - 12 = 98 net, and
        // ceil(1200 / 98) = 13 months at 110 each.
        let accounts = vec![account("A", "1200", "0.12", "110")];
        assert_eq!(baseline_cost(&accounts).unwrap(), money("1430"));
    }

    #[test]
    fn test_projection_beats_baseline() {
        let accounts = vec![account("A", "1200", "0.12", "110")];
        let schedule = vec![entry("A", "200")];

        let result = project(&accounts, &schedule).unwrap();

        assert_eq!(result.months_to_payoff, 7);
        assert_eq!(result.total_payments, money("1243.85"));
        assert_eq!(result.total_interest_saved, money("186.15"));
        assert!(result.total_payments < money("1430"));
    }

    #[test]
    fn test_final_payment_clamped_to_balance() {
        // Zero interest, so four flat payments then a 10.00 remainder.
        let accounts = vec![account("A", "130", "0", "30")];
        let schedule = vec![entry("A", "30")];

        let result = project(&accounts, &schedule).unwrap();

        assert_eq!(result.months_to_payoff, 5);
        assert_eq!(result.total_payments, money("130"));
    }

    #[test]
    fn test_multiple_accounts_tracked_independently() {
        let accounts = vec![
            account("A", "300", "0", "50"),
            account("B", "100", "0", "50"),
        ];
        let schedule = vec![entry("A", "100"), entry("B", "50")];

        let result = project(&accounts, &schedule).unwrap();

        // B clears in 2 months, A in 3; the horizon is the slowest account.
        assert_eq!(result.months_to_payoff, 3);
        assert_eq!(result.total_payments, money("400"));
    }

    #[test]
    fn test_non_amortizing_minimum_fails_fast() {
        // Monthly interest is exactly 12; a 12 minimum never amortizes.
        let accounts = vec![account("A", "1200", "0.12", "12")];
        let schedule = vec![entry("A", "200")];

        let err = project(&accounts, &schedule).unwrap_err();
        match err {
            EngineError::NonAmortizingMinimumPayment {
                account_id,
                minimum_payment,
                monthly_interest,
            } => {
                assert_eq!(account_id, "A");
                assert_eq!(minimum_payment, money("12"));
                assert_eq!(monthly_interest, money("12"));
            }
            other => panic!("Expected NonAmortizingMinimumPayment, got {:?}", other),
        }
    }

    #[test]
    fn test_horizon_cap_on_stalled_schedule() {
        // The scheduled payment exactly matches monthly interest, so the
        // balance never shrinks.
        let accounts = vec![account("A", "1000", "0.12", "50")];
        let schedule = vec![entry("A", "10")];

        let err = project(&accounts, &schedule).unwrap_err();
        match err {
            EngineError::PayoffHorizonExceeded {
                months,
                remaining_balance,
            } => {
                assert_eq!(months, MAX_PROJECTION_MONTHS);
                assert_eq!(remaining_balance, money("1000"));
            }
            other => panic!("Expected PayoffHorizonExceeded, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_schedule_with_open_balance_hits_cap() {
        let accounts = vec![account("A", "100", "0", "25")];

        let err = project(&accounts, &[]).unwrap_err();
        assert!(matches!(err, EngineError::PayoffHorizonExceeded { .. }));
    }

    #[test]
    fn test_empty_accounts_give_zero_result() {
        let result = project(&[], &[]).unwrap();

        assert_eq!(result.months_to_payoff, 0);
        assert_eq!(result.total_payments, Money::ZERO);
        assert_eq!(result.total_interest_saved, Money::ZERO);
    }

    #[test]
    fn test_zero_balance_account_is_skipped() {
        // A zero balance must neither trip the non-amortizing check
        // (interest 0, minimum 0) nor extend the horizon.
        let accounts = vec![
            account("paid-off", "0", "0.29", "0"),
            account("open", "100", "0", "25"),
        ];
        let schedule = vec![entry("open", "50")];

        let result = project(&accounts, &schedule).unwrap();
        assert_eq!(result.months_to_payoff, 2);
    }

    #[test]
    fn test_entry_for_unknown_account_is_ignored() {
        let accounts = vec![account("A", "100", "0", "25")];
        let schedule = vec![entry("ghost", "500"), entry("A", "50")];

        let result = project(&accounts, &schedule).unwrap();
        assert_eq!(result.months_to_payoff, 2);
        assert_eq!(result.total_payments, money("100"));
    }

    #[test]
    fn test_inputs_not_mutated() {
        let accounts = vec![account("A", "1200", "0.12", "110")];
        let schedule = vec![entry("A", "200")];
        let accounts_before = accounts.clone();
        let schedule_before = schedule.clone();

        project(&accounts, &schedule).unwrap();

        assert_eq!(accounts, accounts_before);
        assert_eq!(schedule, schedule_before);
    }
}
