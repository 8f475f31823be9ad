//! jangbu posting engine.
//!
//! This crate turns a [`Trade`] into the balanced set of journal lines that
//! records it:
//! - Trade input validation (amounts, required accounts)
//! - Line derivation for sales and purchases, with zero-amount lines elided
//! - Draft entry assembly for the commit path
//!
//! # Derivation
//!
//! A sales trade books the proceeds against the settlement account and
//! splits the credit side into revenue and collected VAT, with any fee
//! withheld as an expense:
//!
//! ```text
//! SALES  supply 10000, VAT 1000, fee 300, counter 1020, revenue 4100
//!   DEBIT  1020 10700   trade proceeds
//!   CREDIT 4100 10000   sales
//!   CREDIT 2100  1000   VAT collected
//!   DEBIT  5120   300   fee
//! ```
//!
//! A purchase mirrors it: cost, deductible VAT, and fee are debited, and the
//! settlement account is credited for the full amount paid. Both shapes
//! balance by construction; lines are re-derived in full whenever the trade
//! changes, never patched.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use jangbu_core::{AccountCode, JournalEntry, JournalLine, Trade, TradeKind};

/// The fixed accounts the engine posts derived lines against.
///
/// Injected rather than global so a chart with different code conventions
/// can redirect the VAT and fee postings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingAccounts {
    /// Liability account collecting output VAT on sales.
    pub vat_output: AccountCode,
    /// Receivable account for deductible input VAT on purchases.
    pub vat_input: AccountCode,
    /// Expense account for transaction fees.
    pub fees: AccountCode,
}

impl PostingAccounts {
    /// Create a posting account set.
    #[must_use]
    pub fn new(
        vat_output: impl Into<AccountCode>,
        vat_input: impl Into<AccountCode>,
        fees: impl Into<AccountCode>,
    ) -> Self {
        Self {
            vat_output: vat_output.into(),
            vat_input: vat_input.into(),
            fees: fees.into(),
        }
    }

    /// The codes used by the standard chart.
    #[must_use]
    pub fn standard() -> Self {
        Self::new("2100", "1350", "5120")
    }
}

/// Monetary fields of a trade, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmountField {
    /// The supply amount.
    Supply,
    /// The VAT amount.
    Vat,
    /// The fee amount.
    Fee,
}

impl AmountField {
    /// Field name for messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Supply => "supply amount",
            Self::Vat => "VAT amount",
            Self::Fee => "fee amount",
        }
    }
}

impl fmt::Display for AmountField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that reject a trade before any lines are derived.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TradeError {
    /// A monetary field is negative.
    #[error("{field} must not be negative, got {amount}")]
    NegativeAmount {
        /// Which field was negative.
        field: AmountField,
        /// The offending value.
        amount: Decimal,
    },

    /// The supply amount is missing or zero.
    #[error("trade has no supply amount")]
    MissingSupplyAmount,

    /// No settlement account was chosen.
    #[error("trade has no settlement account")]
    MissingCounterAccount,

    /// A sales trade has no revenue account.
    #[error("sales trade has no revenue account")]
    MissingRevenueAccount,

    /// A purchase trade has no expense account.
    #[error("purchase trade has no expense account")]
    MissingExpenseAccount,

    /// The fee on a sales trade exceeds what the trade brings in, which
    /// would require a negative proceeds line.
    #[error("fee {fee} exceeds trade proceeds {proceeds}")]
    FeeExceedsProceeds {
        /// The fee amount.
        fee: Decimal,
        /// Supply plus VAT, the most a fee can consume.
        proceeds: Decimal,
    },
}

fn require_non_negative(field: AmountField, amount: Decimal) -> Result<(), TradeError> {
    if amount < Decimal::ZERO {
        return Err(TradeError::NegativeAmount { field, amount });
    }
    Ok(())
}

fn require_account(
    account: Option<&AccountCode>,
    missing: TradeError,
) -> Result<AccountCode, TradeError> {
    match account {
        Some(code) if !code.is_blank() => Ok(code.clone()),
        _ => Err(missing),
    }
}

/// Derive the journal lines recording a trade.
///
/// Validation comes first and nothing is derived for a rejected trade.
/// Zero-amount lines (no VAT, no fee) are elided, so the result has two to
/// four lines. The debit and credit sums of the result are always equal.
///
/// # Errors
///
/// Returns a [`TradeError`] for negative amounts, a missing or zero supply
/// amount, missing required accounts, or a sales fee exceeding the proceeds.
///
/// # Examples
///
/// ```
/// use jangbu_core::{NaiveDate, Trade};
/// use jangbu_posting::{build_lines, PostingAccounts};
/// use rust_decimal_macros::dec;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let trade = Trade::sales(date)
///     .with_supply_amount(dec!(10000))
///     .with_counter_account("1020")
///     .with_revenue_account("4100");
///
/// let lines = build_lines(&trade, &PostingAccounts::standard())?;
/// assert_eq!(lines.len(), 3);
/// assert_eq!(lines[0].account_code, "1020");
/// assert_eq!(lines[0].amount, dec!(11000));
/// # Ok::<(), jangbu_posting::TradeError>(())
/// ```
pub fn build_lines(
    trade: &Trade,
    accounts: &PostingAccounts,
) -> Result<Vec<JournalLine>, TradeError> {
    require_non_negative(AmountField::Supply, trade.supply_amount)?;
    require_non_negative(AmountField::Vat, trade.vat_amount)?;
    require_non_negative(AmountField::Fee, trade.fee_amount)?;
    if trade.supply_amount.is_zero() {
        return Err(TradeError::MissingSupplyAmount);
    }

    let counter = require_account(
        trade.counter_account.as_ref(),
        TradeError::MissingCounterAccount,
    )?;

    let supply = trade.supply_amount;
    let vat = trade.vat_amount;
    let fee = trade.fee_amount;

    let mut lines = match trade.kind {
        TradeKind::Sales => {
            let revenue = require_account(
                trade.revenue_account.as_ref(),
                TradeError::MissingRevenueAccount,
            )?;
            let proceeds = supply + vat;
            if fee > proceeds {
                return Err(TradeError::FeeExceedsProceeds { fee, proceeds });
            }
            vec![
                JournalLine::debit(counter, proceeds - fee).with_remark("trade proceeds"),
                JournalLine::credit(revenue, supply).with_remark("sales"),
                JournalLine::credit(accounts.vat_output.clone(), vat).with_remark("VAT collected"),
                JournalLine::debit(accounts.fees.clone(), fee).with_remark("fee"),
            ]
        }
        TradeKind::Purchase => {
            let expense = require_account(
                trade.expense_account.as_ref(),
                TradeError::MissingExpenseAccount,
            )?;
            vec![
                JournalLine::debit(expense, supply).with_remark("purchase/expense"),
                JournalLine::debit(accounts.vat_input.clone(), vat).with_remark("VAT paid"),
                JournalLine::debit(accounts.fees.clone(), fee).with_remark("fee"),
                JournalLine::credit(counter, supply + vat + fee).with_remark("payment/payable"),
            ]
        }
    };

    lines.retain(|line| !line.is_zero());
    Ok(lines)
}

/// Derive a draft journal entry recording a trade.
///
/// Wraps [`build_lines`] and carries the trade's date, counterparty, and
/// remark onto the slip. The draft has no id; when it replaces an earlier
/// posting of the same trade, the caller attaches the existing entry id
/// before committing.
///
/// # Errors
///
/// Same as [`build_lines`].
pub fn derive_entry(trade: &Trade, accounts: &PostingAccounts) -> Result<JournalEntry, TradeError> {
    let lines = build_lines(trade, accounts)?;
    let mut entry = JournalEntry::new(trade.date).with_lines(lines);
    entry.counterparty_id = trade.counterparty_id;
    entry.counterparty = trade.counterparty.clone();
    entry.remark = trade.remark.clone();
    Ok(entry)
}
