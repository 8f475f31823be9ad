//! Profit-and-loss aggregation.
//!
//! Folds journal lines into the five profit-and-loss categories and derives
//! the gross, operating, and net profit lines from them. Accumulation is
//! signed by each category's normal polarity: a credit on a sales account
//! adds, a debit (a return, say) subtracts, and expenses mirror that.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use jangbu_core::{AccountRegistry, Category, JournalEntry};

/// Accumulated profit-and-loss figures.
///
/// Category fields hold natural magnitudes: `cost_of_sales` grows as costs
/// are booked and is positive for a normal business. Presentation signs
/// (expenses shown negative) are applied by [`ProfitLoss::rows`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLoss {
    /// Operating revenue.
    pub sales: Decimal,
    /// Cost of goods sold.
    pub cost_of_sales: Decimal,
    /// Selling and administrative expenses.
    pub selling_admin: Decimal,
    /// Income outside the main trading activity.
    pub non_operating_income: Decimal,
    /// Expenses outside the main trading activity.
    pub non_operating_expense: Decimal,
}

impl ProfitLoss {
    /// Sales less cost of sales.
    #[must_use]
    pub fn gross_profit(&self) -> Decimal {
        self.sales - self.cost_of_sales
    }

    /// Gross profit less selling and administrative expenses.
    #[must_use]
    pub fn operating_profit(&self) -> Decimal {
        self.gross_profit() - self.selling_admin
    }

    /// Operating profit adjusted by the non-operating categories.
    #[must_use]
    pub fn net_profit(&self) -> Decimal {
        self.operating_profit() + self.non_operating_income - self.non_operating_expense
    }

    /// The eight statement rows in presentation order.
    ///
    /// Expense rows are negated for presentation, so a row list reads the
    /// way the statement prints: revenue positive, costs negative, each
    /// subtotal the sum of the rows above it.
    #[must_use]
    pub fn rows(&self) -> [PlRow; 8] {
        [
            PlRow::new(PlLabel::Sales, self.sales),
            PlRow::new(PlLabel::CostOfSales, -self.cost_of_sales),
            PlRow::new(PlLabel::GrossProfit, self.gross_profit()),
            PlRow::new(PlLabel::SellingAdmin, -self.selling_admin),
            PlRow::new(PlLabel::OperatingProfit, self.operating_profit()),
            PlRow::new(PlLabel::NonOperatingIncome, self.non_operating_income),
            PlRow::new(PlLabel::NonOperatingExpense, -self.non_operating_expense),
            PlRow::new(PlLabel::NetProfit, self.net_profit()),
        ]
    }
}

/// Label of a profit-and-loss statement row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlLabel {
    /// Operating revenue.
    #[serde(rename = "SALES")]
    Sales,
    /// Cost of goods sold.
    #[serde(rename = "COGS")]
    CostOfSales,
    /// Sales less cost of sales.
    #[serde(rename = "GROSS_PROFIT")]
    GrossProfit,
    /// Selling and administrative expenses.
    #[serde(rename = "SGNA")]
    SellingAdmin,
    /// Gross profit less selling and admin.
    #[serde(rename = "OPERATING_PROFIT")]
    OperatingProfit,
    /// Income outside the main trading activity.
    #[serde(rename = "NON_OP_INCOME")]
    NonOperatingIncome,
    /// Expenses outside the main trading activity.
    #[serde(rename = "NON_OP_EXPENSE")]
    NonOperatingExpense,
    /// The bottom line.
    #[serde(rename = "NET_PROFIT")]
    NetProfit,
}

impl PlLabel {
    /// Canonical tag, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "SALES",
            Self::CostOfSales => "COGS",
            Self::GrossProfit => "GROSS_PROFIT",
            Self::SellingAdmin => "SGNA",
            Self::OperatingProfit => "OPERATING_PROFIT",
            Self::NonOperatingIncome => "NON_OP_INCOME",
            Self::NonOperatingExpense => "NON_OP_EXPENSE",
            Self::NetProfit => "NET_PROFIT",
        }
    }

    /// Human-readable row title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Sales => "Sales",
            Self::CostOfSales => "Cost of goods sold",
            Self::GrossProfit => "Gross profit",
            Self::SellingAdmin => "Selling and admin expenses",
            Self::OperatingProfit => "Operating profit",
            Self::NonOperatingIncome => "Non-operating income",
            Self::NonOperatingExpense => "Non-operating expenses",
            Self::NetProfit => "Net profit",
        }
    }

    /// True for the derived subtotal rows, which statements set off
    /// typographically.
    #[must_use]
    pub const fn is_subtotal(self) -> bool {
        matches!(
            self,
            Self::GrossProfit | Self::OperatingProfit | Self::NetProfit
        )
    }
}

impl fmt::Display for PlLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One labeled row of the profit-and-loss statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlRow {
    /// Row label.
    pub label: PlLabel,
    /// Presentation amount, signs applied.
    pub amount: Decimal,
}

impl PlRow {
    /// Create a row.
    #[must_use]
    pub const fn new(label: PlLabel, amount: Decimal) -> Self {
        Self { label, amount }
    }
}

/// Fold entries into a profit-and-loss report.
///
/// Lines on balance-sheet or unclassifiable accounts contribute nothing;
/// blank account codes are skipped outright. An empty entry set yields an
/// all-zero report.
///
/// # Examples
///
/// ```
/// use jangbu_core::{AccountRegistry, JournalEntry, JournalLine, NaiveDate};
/// use jangbu_reports::profit_loss;
/// use rust_decimal_macros::dec;
///
/// let registry = AccountRegistry::standard();
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let entries = vec![JournalEntry::new(date)
///     .with_line(JournalLine::debit("1020", dec!(11000)))
///     .with_line(JournalLine::credit("4100", dec!(10000)))
///     .with_line(JournalLine::credit("2100", dec!(1000)))];
///
/// let report = profit_loss(&entries, &registry);
/// assert_eq!(report.sales, dec!(10000));
/// assert_eq!(report.net_profit(), dec!(10000));
/// ```
#[must_use]
pub fn profit_loss(entries: &[JournalEntry], registry: &AccountRegistry) -> ProfitLoss {
    let mut report = ProfitLoss::default();
    for entry in entries {
        for line in &entry.lines {
            if line.account_code.is_blank() {
                continue;
            }
            let category = registry.classify(line.account_code.as_str());
            let bucket = match category {
                Category::Sales => &mut report.sales,
                Category::CostOfSales => &mut report.cost_of_sales,
                Category::SellingAdmin => &mut report.selling_admin,
                Category::NonOperatingIncome => &mut report.non_operating_income,
                Category::NonOperatingExpense => &mut report.non_operating_expense,
                Category::Asset | Category::Liability | Category::Equity | Category::Other => {
                    continue
                }
            };
            // Lines on the category's normal side add; contra lines subtract.
            if Some(line.polarity) == category.normal_polarity() {
                *bucket += line.amount;
            } else {
                *bucket -= line.amount;
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use jangbu_core::JournalLine;
    use rust_decimal_macros::dec;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn entry(lines: Vec<JournalLine>) -> JournalEntry {
        JournalEntry::new(date(2024, 3, 15)).with_lines(lines)
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let report = profit_loss(&[], &AccountRegistry::standard());
        assert_eq!(report, ProfitLoss::default());
        assert_eq!(report.net_profit(), dec!(0));
    }

    #[test]
    fn test_sales_and_costs_accumulate() {
        let registry = AccountRegistry::standard();
        let entries = vec![
            entry(vec![
                JournalLine::debit("1020", dec!(100_000)),
                JournalLine::credit("4100", dec!(100_000)),
            ]),
            entry(vec![
                JournalLine::debit("5100", dec!(40_000)),
                JournalLine::credit("1010", dec!(40_000)),
            ]),
            entry(vec![
                JournalLine::debit("5200", dec!(25_000)),
                JournalLine::credit("1010", dec!(25_000)),
            ]),
        ];

        let report = profit_loss(&entries, &registry);
        assert_eq!(report.sales, dec!(100_000));
        assert_eq!(report.cost_of_sales, dec!(40_000));
        assert_eq!(report.selling_admin, dec!(25_000));
        assert_eq!(report.gross_profit(), dec!(60_000));
        assert_eq!(report.operating_profit(), dec!(35_000));
        assert_eq!(report.net_profit(), dec!(35_000));
    }

    #[test]
    fn test_contra_lines_subtract() {
        // A debit on a sales account (a return) reduces sales; a credit on
        // an expense account (a rebate) reduces the expense.
        let registry = AccountRegistry::standard();
        let entries = vec![
            entry(vec![
                JournalLine::debit("1020", dec!(50_000)),
                JournalLine::credit("4100", dec!(50_000)),
            ]),
            entry(vec![
                JournalLine::debit("4100", dec!(5_000)),
                JournalLine::credit("1020", dec!(5_000)),
            ]),
            entry(vec![
                JournalLine::debit("5100", dec!(20_000)),
                JournalLine::credit("1010", dec!(20_000)),
            ]),
            entry(vec![
                JournalLine::debit("1010", dec!(3_000)),
                JournalLine::credit("5100", dec!(3_000)),
            ]),
        ];

        let report = profit_loss(&entries, &registry);
        assert_eq!(report.sales, dec!(45_000));
        assert_eq!(report.cost_of_sales, dec!(17_000));
    }

    #[test]
    fn test_non_operating_categories() {
        let registry = AccountRegistry::standard();
        let entries = vec![
            entry(vec![
                JournalLine::debit("1010", dec!(8_000)),
                JournalLine::credit("7100", dec!(8_000)),
            ]),
            entry(vec![
                JournalLine::debit("7200", dec!(2_500)),
                JournalLine::credit("1010", dec!(2_500)),
            ]),
        ];

        let report = profit_loss(&entries, &registry);
        assert_eq!(report.non_operating_income, dec!(8_000));
        assert_eq!(report.non_operating_expense, dec!(2_500));
        assert_eq!(report.net_profit(), dec!(5_500));
    }

    #[test]
    fn test_balance_sheet_lines_ignored() {
        let registry = AccountRegistry::standard();
        let entries = vec![entry(vec![
            JournalLine::debit("1010", dec!(70_000)),
            JournalLine::credit("2110", dec!(70_000)),
        ])];

        assert_eq!(profit_loss(&entries, &registry), ProfitLoss::default());
    }

    #[test]
    fn test_blank_codes_skipped() {
        let registry = AccountRegistry::standard();
        let entries = vec![entry(vec![
            JournalLine::debit("", dec!(9_999)),
            JournalLine::credit("4100", dec!(9_999)),
        ])];

        let report = profit_loss(&entries, &registry);
        assert_eq!(report.sales, dec!(9_999));
    }

    #[test]
    fn test_prefix_classified_lines_counted() {
        // 5120 is not in the standard registry; the 51 prefix books it as
        // cost of sales.
        let registry = AccountRegistry::standard();
        let entries = vec![entry(vec![
            JournalLine::debit("5120", dec!(300)),
            JournalLine::credit("1010", dec!(300)),
        ])];

        let report = profit_loss(&entries, &registry);
        assert_eq!(report.cost_of_sales, dec!(300));
    }

    #[test]
    fn test_rows_presentation() {
        let report = ProfitLoss {
            sales: dec!(100_000),
            cost_of_sales: dec!(40_000),
            selling_admin: dec!(25_000),
            non_operating_income: dec!(8_000),
            non_operating_expense: dec!(2_500),
        };

        let rows = report.rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], PlRow::new(PlLabel::Sales, dec!(100_000)));
        assert_eq!(rows[1], PlRow::new(PlLabel::CostOfSales, dec!(-40_000)));
        assert_eq!(rows[2], PlRow::new(PlLabel::GrossProfit, dec!(60_000)));
        assert_eq!(rows[3], PlRow::new(PlLabel::SellingAdmin, dec!(-25_000)));
        assert_eq!(rows[4], PlRow::new(PlLabel::OperatingProfit, dec!(35_000)));
        assert_eq!(
            rows[5],
            PlRow::new(PlLabel::NonOperatingIncome, dec!(8_000))
        );
        assert_eq!(
            rows[6],
            PlRow::new(PlLabel::NonOperatingExpense, dec!(-2_500))
        );
        assert_eq!(rows[7], PlRow::new(PlLabel::NetProfit, dec!(40_500)));
    }

    #[test]
    fn test_subtotal_rows_marked() {
        assert!(PlLabel::GrossProfit.is_subtotal());
        assert!(PlLabel::OperatingProfit.is_subtotal());
        assert!(PlLabel::NetProfit.is_subtotal());
        assert!(!PlLabel::Sales.is_subtotal());
        assert!(!PlLabel::CostOfSales.is_subtotal());
    }

    #[test]
    fn test_titles() {
        assert_eq!(PlLabel::CostOfSales.title(), "Cost of goods sold");
        assert_eq!(format!("{}", PlLabel::NetProfit), "Net profit");
    }
}
