//! Property-based tests for the report folds.
//!
//! Books are generated through the posting engine so every entry balances;
//! the properties check that the reports preserve that identity.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use jangbu_core::{AccountRegistry, JournalEntry, Trade};
use jangbu_posting::{derive_entry, PostingAccounts};
use jangbu_reports::{account_ledger, fund_balances, profit_loss, AccountFilter};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

prop_compose! {
    fn arb_trade()(
        is_sales: bool,
        supply in 1i64..10_000_000,
        fee in 0i64..10_000,
        month in 1u32..=12,
        day in 1u32..=28,
    ) -> Trade {
        let when = date(2024, month, day);
        let supply = Decimal::from(supply);
        let fee = Decimal::from(fee);
        if is_sales {
            let trade = Trade::sales(when)
                .with_counter_account("1020")
                .with_revenue_account("4100")
                .with_supply_amount(supply);
            // A deducted fee may not exceed the proceeds.
            let capped = fee.min(supply + trade.vat_amount);
            trade.with_fee_amount(capped)
        } else {
            Trade::purchase(when)
                .with_counter_account("2110")
                .with_expense_account("5100")
                .with_supply_amount(supply)
                .with_fee_amount(fee)
        }
    }
}

fn arb_book() -> impl Strategy<Value = Vec<JournalEntry>> {
    let accounts = PostingAccounts::standard();
    prop::collection::vec(arb_trade(), 0..40).prop_map(move |trades| {
        trades
            .iter()
            .map(|trade| derive_entry(trade, &accounts).unwrap())
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Balanced entries net to zero across the unfiltered balance table.
    #[test]
    fn prop_unfiltered_balances_net_to_zero(book in arb_book()) {
        let registry = AccountRegistry::standard();
        let table = fund_balances(&book, &AccountFilter::All, &registry);
        prop_assert_eq!(table.total_balance(), Decimal::ZERO);
    }

    /// A filtered table is a row subset of the unfiltered one.
    #[test]
    fn prop_filter_selects_subset(book in arb_book()) {
        let registry = AccountRegistry::standard();
        let all = fund_balances(&book, &AccountFilter::All, &registry);
        let cash = fund_balances(&book, &AccountFilter::standard_cash(), &registry);

        for row in &cash.rows {
            let full = all.get(row.account_code.as_str());
            prop_assert_eq!(full, Some(row));
        }
    }

    /// The running ledger of an account reconciles with its balance row.
    #[test]
    fn prop_ledger_reconciles_with_balance_table(book in arb_book()) {
        let registry = AccountRegistry::standard();
        let table = fund_balances(&book, &AccountFilter::All, &registry);

        for code in ["1020", "2110", "4100", "5100"] {
            let ledger = account_ledger(&book, code, &registry);
            match table.get(code) {
                Some(row) => {
                    prop_assert_eq!(ledger.debit_total(), row.debit_total);
                    prop_assert_eq!(ledger.credit_total(), row.credit_total);
                    prop_assert_eq!(ledger.closing_balance(), -row.balance);
                }
                None => prop_assert!(ledger.is_empty()),
            }
        }
    }

    /// Running balances step by exactly the movement amount.
    #[test]
    fn prop_running_balance_steps_match_movements(book in arb_book()) {
        let registry = AccountRegistry::standard();
        let ledger = account_ledger(&book, "2110", &registry);

        let mut previous = Decimal::ZERO;
        for row in &ledger.rows {
            prop_assert_eq!(row.balance - previous, row.credit - row.debit);
            previous = row.balance;
        }
        prop_assert_eq!(previous, ledger.closing_balance());
    }

    /// Profit rows always obey the three subtotal identities.
    #[test]
    fn prop_profit_subtotals_consistent(book in arb_book()) {
        let registry = AccountRegistry::standard();
        let report = profit_loss(&book, &registry);

        prop_assert_eq!(report.gross_profit(), report.sales - report.cost_of_sales);
        prop_assert_eq!(
            report.operating_profit(),
            report.gross_profit() - report.selling_admin
        );
        prop_assert_eq!(
            report.net_profit(),
            report.operating_profit() + report.non_operating_income
                - report.non_operating_expense
        );
    }
}
