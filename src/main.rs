//! Repayment Engine CLI
//!
//! Loads debt account snapshots from CSV, runs an allocation strategy over
//! an available funds pool, and prints the payment schedule (or, with
//! `--project`, the payoff projection) as CSV.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- accounts.csv avalanche 150.00 2026-08-01 > schedule.csv
//! cargo run -- --project accounts.csv hybrid 150.00 2026-08-01
//! cargo run -- --strategies
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use chrono::{Local, NaiveDate};
use csv::{ReaderBuilder, Trim};
use log::warn;
use repayment_engine::{
    AccountRecord, DebtAccount, EngineError, Money, OptimizerEngine, PaymentScheduleEntry,
    ProjectionResult, Result,
};
use std::env;
use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::process;
use std::str::FromStr;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    if args.first().map(String::as_str) == Some("--strategies") {
        return write_strategies(io::stdout().lock());
    }

    let project = args.first().map(String::as_str) == Some("--project");
    if project {
        args.remove(0);
    }

    if args.len() < 3 {
        return Err(EngineError::Usage("Missing arguments".to_string()));
    }

    let input_path = &args[0];
    let strategy_name = &args[1];
    let available_funds = Money::from_str(&args[2])
        .map_err(|_| EngineError::Usage(format!("Invalid funds amount '{}'", args[2])))?;
    let as_of_date = match args.get(3) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| EngineError::Usage(format!("Invalid as-of-date '{}'", s)))?,
        None => Local::now().date_naive(),
    };

    let file = File::open(input_path)?;
    let accounts = load_accounts(BufReader::new(file))?;

    let engine = OptimizerEngine::new();
    let schedule = engine.optimize(strategy_name, &accounts, available_funds, as_of_date)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    if project {
        let result = engine.project(&accounts, &schedule)?;
        write_projection(handle, &result)
    } else {
        write_schedule(handle, &schedule)
    }
}

/// Reads account snapshots from a CSV reader.
///
/// Records are read one at a time; invalid rows are logged at warn level
/// and skipped.
fn load_accounts<R: Read>(reader: R) -> Result<Vec<DebtAccount>> {
    let mut csv_reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut accounts = Vec::new();
    for (row_idx, result) in csv_reader.deserialize::<AccountRecord>().enumerate() {
        let row_num = row_idx + 2; // 1-indexed, accounting for header row

        match result {
            Ok(record) => match record.parse() {
                Some(account) => accounts.push(account),
                None => warn!("Row {}: Failed to parse account record", row_num),
            },
            Err(e) => warn!("Row {}: CSV parse error: {}", row_num, e),
        }
    }

    Ok(accounts)
}

/// Writes the payment schedule as CSV in priority order.
fn write_schedule<W: Write>(writer: W, schedule: &[PaymentScheduleEntry]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["account_id", "amount", "date", "priority"])?;
    for entry in schedule {
        csv_writer.write_record([
            entry.account_id.clone(),
            entry.amount.to_string(),
            entry.date.to_string(),
            entry.priority.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the projection result as a single CSV row.
fn write_projection<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["months_to_payoff", "total_payments", "total_interest_saved"])?;
    csv_writer.write_record([
        result.months_to_payoff.to_string(),
        result.total_payments.to_string(),
        result.total_interest_saved.to_string(),
    ])?;

    csv_writer.flush()?;
    Ok(())
}

/// Writes the registered strategies as CSV for UI display.
fn write_strategies<W: Write>(writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["name", "description"])?;
    for descriptor in OptimizerEngine::new().list_strategies() {
        csv_writer.write_record([descriptor.name, descriptor.description])?;
    }

    csv_writer.flush()?;
    Ok(())
}
