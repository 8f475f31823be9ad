//! jangbu validation rules.
//!
//! This crate implements the checks an entry must pass before it may be
//! committed:
//!
//! - The balance invariant: debit and credit totals agree exactly
//! - Draft sanity: at least one line, every line with an account code and a
//!   positive amount
//!
//! Both checks are local and synchronous. A failed check blocks the commit
//! path with nothing persisted; the error carries both totals so the caller
//! can show the discrepancy instead of guessing which side is wrong.
//!
//! # Example
//!
//! ```
//! use jangbu_core::{JournalEntry, JournalLine, NaiveDate};
//! use jangbu_validate::validate_balance;
//! use rust_decimal_macros::dec;
//!
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let entry = JournalEntry::new(date)
//!     .with_line(JournalLine::debit("1110", dec!(100000)))
//!     .with_line(JournalLine::credit("2100", dec!(90000)));
//!
//! let err = validate_balance(&entry).unwrap_err();
//! assert_eq!(err.debit_total, dec!(100000));
//! assert_eq!(err.credit_total, dec!(90000));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rust_decimal::Decimal;
use thiserror::Error;

use jangbu_core::JournalEntry;

/// The balance invariant failed: debit and credit totals differ.
///
/// Carries both totals; the system never guesses which side is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("entry does not balance: debits {debit_total}, credits {credit_total}")]
pub struct ImbalanceError {
    /// Sum of the debit lines.
    pub debit_total: Decimal,
    /// Sum of the credit lines.
    pub credit_total: Decimal,
}

impl ImbalanceError {
    /// Signed difference, debits minus credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.debit_total - self.credit_total
    }
}

/// Errors that reject an entry at the pre-commit gate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// The entry has no lines at all.
    #[error("entry has no lines")]
    NoLines,

    /// A line has a blank account code.
    #[error("line {index} has no account code")]
    BlankAccountCode {
        /// Zero-based index of the offending line.
        index: usize,
    },

    /// A line has a zero or negative amount.
    #[error("line {index} has a non-positive amount: {amount}")]
    NonPositiveAmount {
        /// Zero-based index of the offending line.
        index: usize,
        /// The offending amount.
        amount: Decimal,
    },

    /// The balance invariant failed.
    #[error(transparent)]
    Unbalanced(#[from] ImbalanceError),
}

/// Check the balance invariant: debit total equals credit total, exactly.
///
/// Amounts are whole currency units, so equality is exact; there is no
/// tolerance band.
///
/// # Errors
///
/// Returns an [`ImbalanceError`] carrying both totals when they differ.
pub fn validate_balance(entry: &JournalEntry) -> Result<(), ImbalanceError> {
    let debit_total = entry.debit_total();
    let credit_total = entry.credit_total();
    if debit_total == credit_total {
        Ok(())
    } else {
        Err(ImbalanceError {
            debit_total,
            credit_total,
        })
    }
}

/// Run the full pre-commit gate on an entry.
///
/// Checks, in order: the entry has lines; every line names an account and
/// carries a positive amount; the balance invariant holds. The save path
/// must call this for every entry, whether derived by the posting engine or
/// authored line by line on a free-form journal screen.
///
/// # Errors
///
/// Returns the first failing check as an [`EntryError`].
pub fn validate_entry(entry: &JournalEntry) -> Result<(), EntryError> {
    if entry.lines.is_empty() {
        return Err(EntryError::NoLines);
    }
    for (index, line) in entry.lines.iter().enumerate() {
        if line.account_code.is_blank() {
            return Err(EntryError::BlankAccountCode { index });
        }
        if line.amount <= Decimal::ZERO {
            return Err(EntryError::NonPositiveAmount {
                index,
                amount: line.amount,
            });
        }
    }
    validate_balance(entry)?;
    Ok(())
}
