//! Error types for the repayment engine.

use crate::money::Money;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors that can occur during allocation or projection.
///
/// Variants carry the offending account id and computed values where they
/// exist, so callers can log or display the failure without re-deriving it.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Caller supplied data the engine cannot allocate against,
    /// e.g. negative available funds or a negative account balance.
    #[error("Invalid input: {message}")]
    InvalidInput {
        /// The account the bad value belongs to, if any.
        account_id: Option<String>,
        message: String,
    },

    /// No strategy is registered under the requested name.
    #[error("Unknown strategy '{name}'")]
    UnknownStrategy { name: String },

    /// An account's minimum payment does not exceed its monthly interest,
    /// so the minimum-payment baseline never amortizes.
    #[error(
        "Account {account_id} cannot be paid off: minimum payment {minimum_payment} \
         does not exceed monthly interest {monthly_interest}"
    )]
    NonAmortizingMinimumPayment {
        account_id: String,
        minimum_payment: Money,
        monthly_interest: Money,
    },

    /// The payoff simulation did not converge within the horizon cap.
    #[error("Payoff not reached within {months} months; {remaining_balance} still outstanding")]
    PayoffHorizonExceeded {
        months: u32,
        remaining_balance: Money,
    },

    /// Invalid command line invocation
    #[error("{0}\nUsage: repayment-engine [--project] <accounts.csv> <strategy> <available-funds> [as-of-date]\n       repayment-engine --strategies")]
    Usage(String),
}

impl EngineError {
    /// Convenience constructor for `InvalidInput` without an account context.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            account_id: None,
            message: message.into(),
        }
    }

    /// Convenience constructor for `InvalidInput` tied to one account.
    pub fn invalid_account(account_id: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            account_id: Some(account_id.into()),
            message: message.into(),
        }
    }
}
