//! Account codes, categories, and the classification registry.
//!
//! Accounts are identified by short numeric codes (`"1010"`, `"4100"`).
//! The [`AccountRegistry`] maps codes to declared [`Account`] entries and
//! classifies any code into a reporting [`Category`], falling back to a
//! prefix convention for codes that were never registered.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Which side of the ledger a line posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Polarity {
    /// Left side: increases assets and expenses.
    Debit,
    /// Right side: increases liabilities, equity, and income.
    Credit,
}

impl Polarity {
    /// The opposite side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Debit => Self::Credit,
            Self::Credit => Self::Debit,
        }
    }

    /// Canonical tag, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debit => "DEBIT",
            Self::Credit => "CREDIT",
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reporting category of an account.
///
/// The five profit-and-loss categories feed the income statement; `Asset`,
/// `Liability`, and `Equity` are balance-sheet categories. `Other` is the
/// fallback for codes outside the registry and the prefix convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Operating revenue.
    #[serde(rename = "SALES")]
    Sales,
    /// Cost of goods sold.
    #[serde(rename = "COGS")]
    CostOfSales,
    /// Selling and administrative expenses.
    #[serde(rename = "SGNA")]
    SellingAdmin,
    /// Income outside the main trading activity.
    #[serde(rename = "NON_OP_INCOME")]
    NonOperatingIncome,
    /// Expenses outside the main trading activity.
    #[serde(rename = "NON_OP_EXPENSE")]
    NonOperatingExpense,
    /// Balance-sheet asset.
    #[serde(rename = "ASSET")]
    Asset,
    /// Balance-sheet liability.
    #[serde(rename = "LIABILITY")]
    Liability,
    /// Owner's equity.
    #[serde(rename = "EQUITY")]
    Equity,
    /// Unclassifiable.
    #[serde(rename = "OTHER")]
    Other,
}

impl Category {
    /// Canonical tag, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "SALES",
            Self::CostOfSales => "COGS",
            Self::SellingAdmin => "SGNA",
            Self::NonOperatingIncome => "NON_OP_INCOME",
            Self::NonOperatingExpense => "NON_OP_EXPENSE",
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Other => "OTHER",
        }
    }

    /// The side on which accounts of this category normally grow.
    ///
    /// Income, liability, and equity accounts are credit-normal; expense and
    /// asset accounts are debit-normal. `Other` has no normal side.
    #[must_use]
    pub const fn normal_polarity(self) -> Option<Polarity> {
        match self {
            Self::Sales | Self::NonOperatingIncome | Self::Liability | Self::Equity => {
                Some(Polarity::Credit)
            }
            Self::CostOfSales | Self::SellingAdmin | Self::NonOperatingExpense | Self::Asset => {
                Some(Polarity::Debit)
            }
            Self::Other => None,
        }
    }

    /// True for the income categories of the profit-and-loss statement.
    #[must_use]
    pub const fn is_income(self) -> bool {
        matches!(self, Self::Sales | Self::NonOperatingIncome)
    }

    /// True for the expense categories of the profit-and-loss statement.
    #[must_use]
    pub const fn is_expense(self) -> bool {
        matches!(
            self,
            Self::CostOfSales | Self::SellingAdmin | Self::NonOperatingExpense
        )
    }

    /// True for any category that appears on the profit-and-loss statement.
    #[must_use]
    pub const fn is_profit_loss(self) -> bool {
        self.is_income() || self.is_expense()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chart-of-accounts code.
///
/// Codes are short digit strings; surrounding whitespace is trimmed on
/// construction. A blank code is representable (lines arriving from
/// data-entry screens may carry one) and classifies as [`Category::Other`].
///
/// # Examples
///
/// ```
/// use jangbu_core::AccountCode;
///
/// let code = AccountCode::new(" 1010 ");
/// assert_eq!(code, "1010");
/// assert!(!code.is_blank());
/// ```
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(from = "String")]
pub struct AccountCode(String);

impl AccountCode {
    /// Create a code, trimming surrounding whitespace.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        Self(code.trim().to_owned())
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the code carries no usable content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for AccountCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<String> for AccountCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl Borrow<str> for AccountCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for AccountCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AccountCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared chart-of-accounts entry.
///
/// # Examples
///
/// ```
/// use jangbu_core::{Account, Category, Polarity};
///
/// let cash = Account::new("1010", "Cash", Category::Asset)
///     .with_default_polarity(Polarity::Debit);
/// assert_eq!(cash.code, "1010");
/// assert_eq!(cash.category, Category::Asset);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account code.
    pub code: AccountCode,
    /// Display name.
    pub name: String,
    /// Declared reporting category.
    pub category: Category,
    /// Data-entry hint: the side this account is usually posted on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_polarity: Option<Polarity>,
}

impl Account {
    /// Create an account with no default polarity.
    #[must_use]
    pub fn new(code: impl Into<AccountCode>, name: impl Into<String>, category: Category) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            category,
            default_polarity: None,
        }
    }

    /// Set the data-entry polarity hint.
    #[must_use]
    pub fn with_default_polarity(mut self, polarity: Polarity) -> Self {
        self.default_polarity = Some(polarity);
        self
    }
}

/// Code prefixes with a conventional category, for codes outside the registry.
const CATEGORY_PREFIXES: [(&str, Category); 7] = [
    ("41", Category::Sales),
    ("51", Category::CostOfSales),
    ("52", Category::SellingAdmin),
    ("71", Category::NonOperatingIncome),
    ("72", Category::NonOperatingExpense),
    ("10", Category::Asset),
    ("21", Category::Liability),
];

/// An immutable account table with classification.
///
/// Classification consults the registry first, so an explicitly declared
/// account is never misclassified by the coarse prefix rule; undeclared
/// codes fall back to the longest matching prefix, then to
/// [`Category::Other`].
///
/// # Examples
///
/// ```
/// use jangbu_core::{Account, AccountRegistry, Category};
///
/// let registry = AccountRegistry::new([
///     // A deposit received is a liability even though 41xx reads as sales.
///     Account::new("4150", "Deposits received", Category::Liability),
/// ])?;
///
/// assert_eq!(registry.classify("4150"), Category::Liability);
/// assert_eq!(registry.classify("4101"), Category::Sales);
/// assert_eq!(registry.classify("9999"), Category::Other);
/// # Ok::<(), jangbu_core::RegistryError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRegistry {
    accounts: BTreeMap<AccountCode, Account>,
}

impl AccountRegistry {
    /// Build a registry from declared accounts.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateCode`] if two accounts share a code.
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Result<Self, RegistryError> {
        let mut map = BTreeMap::new();
        for account in accounts {
            let code = account.code.clone();
            if map.insert(code.clone(), account).is_some() {
                return Err(RegistryError::DuplicateCode(code));
            }
        }
        Ok(Self { accounts: map })
    }

    /// The standard chart used by the bookkeeping screens.
    #[must_use]
    pub fn standard() -> Self {
        let mut accounts = BTreeMap::new();
        for account in [
            Account::new("1010", "Cash", Category::Asset)
                .with_default_polarity(Polarity::Debit),
            Account::new("1020", "Ordinary deposits", Category::Asset)
                .with_default_polarity(Polarity::Debit),
            Account::new("1030", "Checking deposits", Category::Asset)
                .with_default_polarity(Polarity::Debit),
            Account::new("2110", "Notes payable", Category::Liability)
                .with_default_polarity(Polarity::Credit),
            Account::new("4100", "Merchandise sales", Category::Sales)
                .with_default_polarity(Polarity::Credit),
            Account::new("5100", "Cost of goods sold", Category::CostOfSales)
                .with_default_polarity(Polarity::Debit),
            Account::new("5200", "Selling and admin expenses", Category::SellingAdmin)
                .with_default_polarity(Polarity::Debit),
            Account::new("7100", "Non-operating income", Category::NonOperatingIncome)
                .with_default_polarity(Polarity::Credit),
            Account::new("7200", "Non-operating expenses", Category::NonOperatingExpense)
                .with_default_polarity(Polarity::Debit),
        ] {
            accounts.insert(account.code.clone(), account);
        }
        Self { accounts }
    }

    /// Classify a code into its reporting category.
    ///
    /// Exact registry entries win; otherwise the longest matching prefix
    /// from the conventional table decides; blank or unknown codes are
    /// [`Category::Other`].
    #[must_use]
    pub fn classify(&self, code: &str) -> Category {
        let code = code.trim();
        if code.is_empty() {
            return Category::Other;
        }
        if let Some(account) = self.accounts.get(code) {
            return account.category;
        }
        CATEGORY_PREFIXES
            .iter()
            .filter(|(prefix, _)| code.starts_with(prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map_or(Category::Other, |&(_, category)| category)
    }

    /// Look up a declared account.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Account> {
        self.accounts.get(code.trim())
    }

    /// Display name of a declared account.
    #[must_use]
    pub fn name(&self, code: &str) -> Option<&str> {
        self.get(code).map(|account| account.name.as_str())
    }

    /// Data-entry polarity hint of a declared account.
    #[must_use]
    pub fn default_polarity(&self, code: &str) -> Option<Polarity> {
        self.get(code).and_then(|account| account.default_polarity)
    }

    /// True if the code is declared.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.accounts.contains_key(code.trim())
    }

    /// Declared accounts in code order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Number of declared accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// True when no accounts are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Errors from building an [`AccountRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Two accounts in the input share a code.
    #[error("duplicate account code {0}")]
    DuplicateCode(AccountCode),
}
