//! Running ledger for a single account.
//!
//! Lists every line posted to one account in date order, with a running
//! balance after each movement. The balance is credit-normal: credits grow
//! it and debits shrink it, which reads naturally for liability accounts
//! such as notes payable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use jangbu_core::{AccountCode, AccountRegistry, JournalEntry, NaiveDate, Polarity};

/// One movement on the account, with the balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// Posting date of the entry the line came from.
    pub date: NaiveDate,
    /// Entry number of the source entry.
    pub entry_no: String,
    /// Counterparty of the source entry, when recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Remark of the line itself. Header remarks are not substituted for
    /// lines keyed without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Debit amount, zero when the movement was a credit.
    pub debit: Decimal,
    /// Credit amount, zero when the movement was a debit.
    pub credit: Decimal,
    /// Running credit-normal balance after this movement.
    pub balance: Decimal,
}

/// Date-ordered ledger of one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningLedger {
    /// The account the ledger covers.
    pub account_code: AccountCode,
    /// Registry display name, when the account is declared.
    pub account_name: Option<String>,
    /// Movements in date order, ties kept in posting order.
    pub rows: Vec<LedgerRow>,
}

impl RunningLedger {
    /// Sum of debit movements.
    #[must_use]
    pub fn debit_total(&self) -> Decimal {
        self.rows.iter().map(|row| row.debit).sum()
    }

    /// Sum of credit movements.
    #[must_use]
    pub fn credit_total(&self) -> Decimal {
        self.rows.iter().map(|row| row.credit).sum()
    }

    /// Closing credit-normal balance: credits less debits.
    #[must_use]
    pub fn closing_balance(&self) -> Decimal {
        self.credit_total() - self.debit_total()
    }

    /// Number of movements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the account was never posted to.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the running ledger of one account from a set of entries.
///
/// Entries are sorted by date before folding; entries sharing a date keep
/// their input order, so same-day movements land in posting order. The
/// closing balance of the last row equals [`RunningLedger::closing_balance`].
///
/// # Examples
///
/// ```
/// use jangbu_core::{AccountRegistry, JournalEntry, JournalLine, NaiveDate};
/// use jangbu_reports::account_ledger;
/// use rust_decimal_macros::dec;
///
/// let registry = AccountRegistry::standard();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let entries = vec![JournalEntry::new(date)
///     .with_line(JournalLine::debit("5100", dec!(40_000)))
///     .with_line(JournalLine::credit("2110", dec!(40_000)))];
///
/// let ledger = account_ledger(&entries, "2110", &registry);
/// assert_eq!(ledger.rows.len(), 1);
/// assert_eq!(ledger.closing_balance(), dec!(40_000));
/// ```
#[must_use]
pub fn account_ledger(
    entries: &[JournalEntry],
    account: impl Into<AccountCode>,
    registry: &AccountRegistry,
) -> RunningLedger {
    let account_code: AccountCode = account.into();
    let account_name = registry.name(account_code.as_str()).map(ToOwned::to_owned);

    let mut ordered: Vec<&JournalEntry> = entries.iter().collect();
    ordered.sort_by_key(|entry| entry.date);

    let mut rows = Vec::new();
    let mut balance = Decimal::ZERO;
    for entry in ordered {
        for line in &entry.lines {
            if line.account_code != account_code {
                continue;
            }
            let (debit, credit) = match line.polarity {
                Polarity::Debit => (line.amount, Decimal::ZERO),
                Polarity::Credit => (Decimal::ZERO, line.amount),
            };
            balance += credit - debit;
            rows.push(LedgerRow {
                date: entry.date,
                entry_no: entry.entry_no.clone(),
                counterparty: entry.counterparty.clone(),
                remark: line.remark.clone(),
                debit,
                credit,
                balance,
            });
        }
    }

    RunningLedger {
        account_code,
        account_name,
        rows,
    }
}
