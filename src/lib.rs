//! # Repayment Engine
//!
//! The debt repayment optimization core of a round-up savings application:
//! given a pool of accumulated round-up funds and a set of debt account
//! snapshots, it decides how to distribute the funds (avalanche, snowball,
//! or hybrid strategy) and projects the long-run outcome of repeating that
//! allocation monthly.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: monetary values held at 2 decimal places
//!   via `rust_decimal`, rounded half-even
//! - **Pure computation**: no I/O, no ambient state; snapshots in,
//!   schedules and projections out
//! - **Closed strategy set**: strategies are enumerated at compile time and
//!   looked up by name through an immutable registry
//! - **Fail-fast errors**: bad input, unknown strategies, and
//!   non-converging projections surface as distinct error variants
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use repayment_engine::{DebtAccount, Money, OptimizerEngine};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let accounts = vec![DebtAccount {
//!     account_id: "card-1".into(),
//!     creditor_id: "bank-a".into(),
//!     current_balance: Money::from_str("1200").unwrap(),
//!     interest_rate: Decimal::from_str("0.1999").unwrap(),
//!     minimum_payment: Money::from_str("35").unwrap(),
//!     due_date: None,
//! }];
//!
//! let engine = OptimizerEngine::new();
//! let as_of = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
//! let schedule = engine
//!     .optimize("avalanche", &accounts, Money::from_str("150").unwrap(), as_of)
//!     .unwrap();
//! let projection = engine.project(&accounts, &schedule).unwrap();
//! assert!(projection.total_interest_saved.is_positive());
//! ```

pub mod account;
pub mod engine;
pub mod error;
pub mod money;
pub mod projection;
pub mod strategy;

pub use account::{AccountRecord, DebtAccount, PaymentScheduleEntry};
pub use engine::OptimizerEngine;
pub use error::{EngineError, Result};
pub use money::Money;
pub use projection::{ProjectionResult, MAX_PROJECTION_MONTHS};
pub use strategy::{Strategy, StrategyDescriptor};
