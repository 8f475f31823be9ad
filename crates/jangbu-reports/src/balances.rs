//! Per-account balance tables.
//!
//! Groups journal lines by account and accumulates debit and credit totals
//! independently. The shape serves the fund/cash position screen, which
//! restricts the table to the cash and bank accounts, and an unrestricted
//! variant that tables every account seen.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use jangbu_core::{AccountCode, AccountRegistry, JournalEntry, Polarity};

/// Which accounts a balance table covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountFilter {
    /// Every account that appears in the entries.
    All,
    /// Only the listed accounts.
    Only(BTreeSet<AccountCode>),
}

impl AccountFilter {
    /// Restrict to the listed accounts.
    pub fn only<I, C>(codes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<AccountCode>,
    {
        Self::Only(codes.into_iter().map(Into::into).collect())
    }

    /// The cash and bank accounts of the standard chart.
    #[must_use]
    pub fn standard_cash() -> Self {
        Self::only(["1010", "1020", "1030"])
    }

    /// True when the filter admits the account.
    #[must_use]
    pub fn matches(&self, code: &AccountCode) -> bool {
        match self {
            Self::All => true,
            Self::Only(codes) => codes.contains(code),
        }
    }
}

/// Accumulated totals for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceRow {
    /// Account code.
    pub account_code: AccountCode,
    /// Registry display name, when the account is declared.
    pub account_name: Option<String>,
    /// Sum of debit amounts.
    pub debit_total: Decimal,
    /// Sum of credit amounts.
    pub credit_total: Decimal,
    /// Asset-normal balance: debits less credits.
    pub balance: Decimal,
}

/// A sparse balance table, one row per account actually used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceReport {
    /// Rows in ascending account-code order.
    pub rows: Vec<BalanceRow>,
}

impl BalanceReport {
    /// Row for an account, if it appeared.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&BalanceRow> {
        let code = code.trim();
        self.rows.iter().find(|row| row.account_code == *code)
    }

    /// Footer total: the sum of the row balances.
    #[must_use]
    pub fn total_balance(&self) -> Decimal {
        self.rows.iter().map(|row| row.balance).sum()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no account matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Fold entries into a balance table for the accounts the filter admits.
///
/// The table is sparse: accounts never posted to do not appear, even when
/// the filter names them. Blank account codes are skipped. Rows come out in
/// ascending code order regardless of posting order.
///
/// # Examples
///
/// ```
/// use jangbu_core::{AccountRegistry, JournalEntry, JournalLine, NaiveDate};
/// use jangbu_reports::{fund_balances, AccountFilter};
/// use rust_decimal_macros::dec;
///
/// let registry = AccountRegistry::standard();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let entries = vec![JournalEntry::new(date)
///     .with_line(JournalLine::debit("1020", dec!(11000)))
///     .with_line(JournalLine::credit("4100", dec!(10000)))
///     .with_line(JournalLine::credit("2100", dec!(1000)))];
///
/// let report = fund_balances(&entries, &AccountFilter::standard_cash(), &registry);
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.rows[0].balance, dec!(11000));
/// assert_eq!(report.total_balance(), dec!(11000));
/// ```
#[must_use]
pub fn fund_balances(
    entries: &[JournalEntry],
    filter: &AccountFilter,
    registry: &AccountRegistry,
) -> BalanceReport {
    let mut totals: BTreeMap<AccountCode, (Decimal, Decimal)> = BTreeMap::new();
    for entry in entries {
        for line in &entry.lines {
            if line.account_code.is_blank() || !filter.matches(&line.account_code) {
                continue;
            }
            let slot = totals.entry(line.account_code.clone()).or_default();
            match line.polarity {
                Polarity::Debit => slot.0 += line.amount,
                Polarity::Credit => slot.1 += line.amount,
            }
        }
    }

    let rows = totals
        .into_iter()
        .map(|(code, (debit_total, credit_total))| {
            let account_name = registry.name(code.as_str()).map(ToOwned::to_owned);
            BalanceRow {
                account_code: code,
                account_name,
                debit_total,
                credit_total,
                balance: debit_total - credit_total,
            }
        })
        .collect();
    BalanceReport { rows }
}
