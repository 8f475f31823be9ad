//! Journal entries and their debit/credit lines.
//!
//! A [`JournalEntry`] is the unit of posting: a dated slip holding one or
//! more [`JournalLine`]s. The entry is only acceptable when its debit and
//! credit totals agree; checking that is the validator's job, but the
//! totals themselves are derived here because every screen that shows an
//! entry also shows them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::{AccountCode, Polarity};

/// Identifier assigned to a persisted entry by the journal store.
pub type EntryId = u64;

/// One debit or credit against a single account.
///
/// Amounts are non-negative by convention; the side is carried by
/// [`Polarity`], not by sign. Zero-amount lines say nothing and are elided
/// by producers.
///
/// # Examples
///
/// ```
/// use jangbu_core::{JournalLine, Polarity};
/// use rust_decimal_macros::dec;
///
/// let line = JournalLine::debit("1020", dec!(11000)).with_remark("trade proceeds");
/// assert_eq!(line.polarity, Polarity::Debit);
/// assert_eq!(line.signed_amount(), dec!(11000));
/// assert_eq!(JournalLine::credit("4100", dec!(11000)).signed_amount(), dec!(-11000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account the line posts against.
    pub account_code: AccountCode,
    /// Side of the ledger.
    pub polarity: Polarity,
    /// Non-negative monetary amount.
    pub amount: Decimal,
    /// Free-form annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl JournalLine {
    /// Create a line.
    #[must_use]
    pub fn new(account_code: impl Into<AccountCode>, polarity: Polarity, amount: Decimal) -> Self {
        Self {
            account_code: account_code.into(),
            polarity,
            amount,
            remark: None,
        }
    }

    /// Create a debit line.
    #[must_use]
    pub fn debit(account_code: impl Into<AccountCode>, amount: Decimal) -> Self {
        Self::new(account_code, Polarity::Debit, amount)
    }

    /// Create a credit line.
    #[must_use]
    pub fn credit(account_code: impl Into<AccountCode>, amount: Decimal) -> Self {
        Self::new(account_code, Polarity::Credit, amount)
    }

    /// Set the annotation.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Bookkeeping weight: debits count positive, credits negative.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        match self.polarity {
            Polarity::Debit => self.amount,
            Polarity::Credit => -self.amount,
        }
    }

    /// True when the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl fmt::Display for JournalLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.polarity, self.account_code, self.amount)
    }
}

/// A dated journal slip.
///
/// `id` is `None` for drafts and assigned by the store on commit; an edit
/// round-trips as a draft carrying the original id, and the store replaces
/// the whole entry. `entry_no` is the human-facing slip number and may be
/// empty until numbering assigns one.
///
/// # Examples
///
/// ```
/// use jangbu_core::{JournalEntry, JournalLine, NaiveDate};
/// use rust_decimal_macros::dec;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let entry = JournalEntry::new(date)
///     .with_line(JournalLine::debit("1010", dec!(5000)))
///     .with_line(JournalLine::credit("4100", dec!(5000)));
///
/// assert!(entry.is_balanced());
/// assert_eq!(entry.debit_total(), dec!(5000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Store-assigned identifier; `None` for drafts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    /// Slip number; empty until assigned.
    #[serde(default)]
    pub entry_no: String,
    /// Posting date.
    pub date: NaiveDate,
    /// Identifier of the counterparty, when the entry stems from a trade.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_id: Option<u64>,
    /// Counterparty display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Free-form annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Debit and credit lines.
    #[serde(default)]
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Create an empty draft for the given date.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: None,
            entry_no: String::new(),
            date,
            counterparty_id: None,
            counterparty: None,
            remark: None,
            lines: Vec::new(),
        }
    }

    /// Set the store identifier, marking this draft as an edit.
    #[must_use]
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the slip number.
    #[must_use]
    pub fn with_entry_no(mut self, entry_no: impl Into<String>) -> Self {
        self.entry_no = entry_no.into();
        self
    }

    /// Set the counterparty identifier.
    #[must_use]
    pub fn with_counterparty_id(mut self, counterparty_id: u64) -> Self {
        self.counterparty_id = Some(counterparty_id);
        self
    }

    /// Set the counterparty display name.
    #[must_use]
    pub fn with_counterparty(mut self, counterparty: impl Into<String>) -> Self {
        self.counterparty = Some(counterparty.into());
        self
    }

    /// Set the annotation.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Append a line.
    #[must_use]
    pub fn with_line(mut self, line: JournalLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Replace all lines.
    #[must_use]
    pub fn with_lines(mut self, lines: Vec<JournalLine>) -> Self {
        self.lines = lines;
        self
    }

    /// Sum of amounts on the given side.
    #[must_use]
    pub fn polarity_total(&self, polarity: Polarity) -> Decimal {
        self.lines
            .iter()
            .filter(|line| line.polarity == polarity)
            .map(|line| line.amount)
            .sum()
    }

    /// Sum of debit amounts.
    #[must_use]
    pub fn debit_total(&self) -> Decimal {
        self.polarity_total(Polarity::Debit)
    }

    /// Sum of credit amounts.
    #[must_use]
    pub fn credit_total(&self) -> Decimal {
        self.polarity_total(Polarity::Credit)
    }

    /// True when debit and credit totals agree exactly.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.debit_total() == self.credit_total()
    }

    /// True for a draft that has never been committed.
    #[must_use]
    pub const fn is_draft(&self) -> bool {
        self.id.is_none()
    }
}
