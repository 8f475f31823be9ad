//! Core types for jangbu
//!
//! This crate provides the fundamental types used throughout the jangbu project:
//!
//! - [`Account`], [`AccountCode`], [`AccountRegistry`] - The chart of accounts and
//!   the category classifier
//! - [`Category`], [`Polarity`] - Reporting categories and the debit/credit axis
//! - [`JournalLine`], [`JournalEntry`] - Posted lines and the slips that hold them
//! - [`Trade`], [`TradeItem`] - Sales/purchase input as the entry screens collect it
//! - [`vat_for`] - VAT derivation for taxable, zero-rated, and exempt supplies
//!
//! # Example
//!
//! ```
//! use jangbu_core::{AccountRegistry, Category, JournalEntry, JournalLine, NaiveDate};
//! use rust_decimal_macros::dec;
//!
//! let registry = AccountRegistry::standard();
//! assert_eq!(registry.classify("4100"), Category::Sales);
//! assert_eq!(registry.classify("5190"), Category::CostOfSales);
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let entry = JournalEntry::new(date)
//!     .with_line(JournalLine::debit("1020", dec!(11000)))
//!     .with_line(JournalLine::credit("4100", dec!(10000)))
//!     .with_line(JournalLine::credit("2100", dec!(1000)));
//!
//! assert!(entry.is_balanced());
//! assert_eq!(entry.debit_total(), dec!(11000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod account;
pub mod journal;
pub mod trade;
pub mod vat;

pub use account::{Account, AccountCode, AccountRegistry, Category, Polarity, RegistryError};
pub use journal::{EntryId, JournalEntry, JournalLine};
pub use trade::{Trade, TradeItem, TradeKind};
pub use vat::{vat_for, vat_rate, VatType};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
