//! Read-side reports over posted journal entries.
//!
//! Every report here is a pure fold: it takes a slice of
//! [`JournalEntry`](jangbu_core::JournalEntry) values plus an
//! [`AccountRegistry`](jangbu_core::AccountRegistry) and produces a plain
//! value, no storage access and no mutation. Three reports are provided:
//!
//! - [`profit_loss`] signs each profit-and-loss line by the normal polarity
//!   of its account category and derives gross, operating and net profit.
//! - [`fund_balances`] tables debit and credit totals per account, usually
//!   restricted to the cash and bank accounts.
//! - [`account_ledger`] lists one account's movements in date order with a
//!   running credit-normal balance.
//!
//! # Examples
//!
//! ```
//! use jangbu_core::{AccountRegistry, JournalEntry, JournalLine, NaiveDate};
//! use jangbu_reports::profit_loss;
//! use rust_decimal_macros::dec;
//!
//! let registry = AccountRegistry::standard();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let entries = vec![JournalEntry::new(date)
//!     .with_line(JournalLine::debit("1020", dec!(11000)))
//!     .with_line(JournalLine::credit("4100", dec!(10000)))
//!     .with_line(JournalLine::credit("2100", dec!(1000)))];
//!
//! let report = profit_loss(&entries, &registry);
//! assert_eq!(report.sales, dec!(10000));
//! assert_eq!(report.net_profit(), dec!(10000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod balances;
pub mod ledger;
pub mod profit_loss;

pub use balances::{fund_balances, AccountFilter, BalanceReport, BalanceRow};
pub use ledger::{account_ledger, LedgerRow, RunningLedger};
pub use profit_loss::{profit_loss, PlLabel, PlRow, ProfitLoss};
