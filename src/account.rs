//! Debt account snapshots and planned payments.
//!
//! A `DebtAccount` is an immutable snapshot of one creditor balance at
//! allocation time. The engine never mutates it; projections work on a
//! private copy of the balances.

use crate::error::{EngineError, Result};
use crate::money::Money;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A snapshot of one creditor balance at allocation time.
///
/// Identifiers are opaque to the engine. `minimum_payment` is only used by
/// the projection baseline, never by allocation; `due_date` is informational.
#[derive(Debug, Clone, PartialEq)]
pub struct DebtAccount {
    /// Opaque account identifier.
    pub account_id: String,

    /// Opaque creditor identifier.
    pub creditor_id: String,

    /// Outstanding balance. Non-negative.
    pub current_balance: Money,

    /// Annual nominal interest rate as a fraction (0.1999 = 19.99% APR).
    pub interest_rate: Decimal,

    /// Contractual minimum monthly payment.
    pub minimum_payment: Money,

    /// Next payment due date, if known.
    pub due_date: Option<NaiveDate>,
}

/// One planned payment produced by an allocation strategy.
///
/// All entries of one schedule share the same `date` (the `as_of_date`
/// passed to the strategy). `priority` is the 1-based order in which the
/// caller should execute payments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentScheduleEntry {
    /// Target debt account.
    pub account_id: String,

    /// Payment amount. Always positive and at most the account's balance
    /// at decision time.
    pub amount: Money,

    /// The allocation date.
    pub date: NaiveDate,

    /// 1-based rank reflecting allocation order.
    pub priority: u32,
}

/// Raw account row as read from CSV.
///
/// Uses string-based parsing for the monetary and date fields so malformed
/// rows can be skipped with a warning rather than aborting the whole file.
#[derive(Debug, Deserialize)]
pub struct AccountRecord {
    /// Account identifier
    pub account_id: String,

    /// Creditor identifier
    pub creditor_id: String,

    /// Outstanding balance
    pub current_balance: String,

    /// Annual rate as a decimal fraction
    pub interest_rate: String,

    /// Minimum monthly payment
    pub minimum_payment: String,

    /// Due date in `YYYY-MM-DD` form (may be empty)
    pub due_date: Option<String>,
}

impl AccountRecord {
    /// Parses the raw CSV record into a typed `DebtAccount`.
    ///
    /// Returns `None` if any field fails to parse.
    pub fn parse(&self) -> Option<DebtAccount> {
        let current_balance = Money::from_str(self.current_balance.trim()).ok()?;
        let interest_rate = Decimal::from_str(self.interest_rate.trim()).ok()?;
        let minimum_payment = Money::from_str(self.minimum_payment.trim()).ok()?;

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?),
        };

        Some(DebtAccount {
            account_id: self.account_id.trim().to_string(),
            creditor_id: self.creditor_id.trim().to_string(),
            current_balance,
            interest_rate,
            minimum_payment,
            due_date,
        })
    }
}

/// Validates account snapshots before any allocation or projection work.
///
/// A negative balance indicates a caller bug and is rejected outright
/// rather than skipped.
pub fn validate_accounts(accounts: &[DebtAccount]) -> Result<()> {
    for account in accounts {
        if account.current_balance.is_negative() {
            return Err(EngineError::invalid_account(
                account.account_id.clone(),
                format!("negative balance {}", account.current_balance),
            ));
        }
        if account.interest_rate.is_sign_negative() {
            return Err(EngineError::invalid_account(
                account.account_id.clone(),
                format!("negative interest rate {}", account.interest_rate),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(balance: &str, rate: &str, minimum: &str, due: Option<&str>) -> AccountRecord {
        AccountRecord {
            account_id: "acct-1".to_string(),
            creditor_id: "cred-1".to_string(),
            current_balance: balance.to_string(),
            interest_rate: rate.to_string(),
            minimum_payment: minimum.to_string(),
            due_date: due.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_parse_full_record() {
        let parsed = record("1200.00", "0.1999", "35.00", Some("2026-09-15"))
            .parse()
            .unwrap();

        assert_eq!(parsed.account_id, "acct-1");
        assert_eq!(parsed.creditor_id, "cred-1");
        assert_eq!(parsed.current_balance.to_string(), "1200.00");
        assert_eq!(parsed.interest_rate.to_string(), "0.1999");
        assert_eq!(parsed.minimum_payment.to_string(), "35.00");
        assert_eq!(
            parsed.due_date,
            Some(NaiveDate::from_ymd_opt(2026, 9, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_missing_due_date() {
        let parsed = record("500", "0.05", "25", None).parse().unwrap();
        assert_eq!(parsed.due_date, None);

        let parsed = record("500", "0.05", "25", Some("")).parse().unwrap();
        assert_eq!(parsed.due_date, None);
    }

    #[test]
    fn test_parse_handles_whitespace() {
        let parsed = record(" 500.5 ", " 0.05 ", " 25 ", Some(" 2026-01-01 "))
            .parse()
            .unwrap();
        assert_eq!(parsed.current_balance.to_string(), "500.50");
    }

    #[test]
    fn test_parse_rejects_malformed_fields() {
        assert!(record("abc", "0.05", "25", None).parse().is_none());
        assert!(record("500", "five", "25", None).parse().is_none());
        assert!(record("500", "0.05", "??", None).parse().is_none());
        assert!(record("500", "0.05", "25", Some("15/09/2026")).parse().is_none());
    }

    #[test]
    fn test_validate_rejects_negative_balance() {
        let mut account = record("500", "0.05", "25", None).parse().unwrap();
        account.current_balance = Money::from_str("-1").unwrap();

        let err = validate_accounts(&[account]).unwrap_err();
        match err {
            EngineError::InvalidInput { account_id, .. } => {
                assert_eq!(account_id.as_deref(), Some("acct-1"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_accepts_zero_balance() {
        let mut account = record("0", "0.05", "25", None).parse().unwrap();
        account.current_balance = Money::ZERO;
        assert!(validate_accounts(&[account]).is_ok());
    }
}
