//! Property-based tests for the posting engine.
//!
//! The central invariant: every line set the engine derives balances, with
//! no zero or negative lines, whatever the trade looked like.

use chrono::NaiveDate;
use jangbu_core::{JournalLine, Polarity, Trade, TradeKind, VatType};
use jangbu_posting::{build_lines, PostingAccounts};
use proptest::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2020u32..2026u32, 1u32..13u32, 1u32..29u32)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y as i32, m, d).unwrap())
}

fn arb_kind() -> impl Strategy<Value = TradeKind> {
    prop_oneof![Just(TradeKind::Sales), Just(TradeKind::Purchase)]
}

fn arb_vat_type() -> impl Strategy<Value = VatType> {
    prop_oneof![
        Just(VatType::Taxable),
        Just(VatType::ZeroRated),
        Just(VatType::Exempt),
    ]
}

/// A trade that passes input validation: positive supply, derived VAT, and
/// a fee a sales trade can absorb.
fn arb_valid_trade() -> impl Strategy<Value = Trade> {
    (
        arb_kind(),
        arb_date(),
        arb_vat_type(),
        1i64..100_000_000i64,
        0i64..1_000_000i64,
    )
        .prop_map(|(kind, date, vat_type, supply, fee)| {
            let supply = Decimal::from(supply);
            let trade = Trade::new(kind, date)
                .with_vat_type(vat_type)
                .with_supply_amount(supply)
                .with_counter_account("1020")
                .with_revenue_account("4100")
                .with_expense_account("5100");
            // Cap the fee at the proceeds so sales trades stay valid.
            let fee = Decimal::from(fee).min(supply + trade.vat_amount);
            trade.with_fee_amount(fee)
        })
}

fn debit_total(lines: &[JournalLine]) -> Decimal {
    lines
        .iter()
        .filter(|l| l.polarity == Polarity::Debit)
        .map(|l| l.amount)
        .sum()
}

fn credit_total(lines: &[JournalLine]) -> Decimal {
    lines
        .iter()
        .filter(|l| l.polarity == Polarity::Credit)
        .map(|l| l.amount)
        .sum()
}

// ============================================================================
// Balance-by-construction
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Derived lines always balance exactly
    #[test]
    fn prop_lines_balance(trade in arb_valid_trade()) {
        let lines = build_lines(&trade, &PostingAccounts::standard()).unwrap();
        prop_assert_eq!(debit_total(&lines), credit_total(&lines));
    }

    /// No derived line is zero or negative
    #[test]
    fn prop_lines_positive(trade in arb_valid_trade()) {
        let lines = build_lines(&trade, &PostingAccounts::standard()).unwrap();
        for line in &lines {
            prop_assert!(line.amount > Decimal::ZERO, "line {} not positive", line);
        }
    }

    /// Elision leaves between two and four lines
    #[test]
    fn prop_line_count_bounds(trade in arb_valid_trade()) {
        let lines = build_lines(&trade, &PostingAccounts::standard()).unwrap();
        prop_assert!(lines.len() >= 2 && lines.len() <= 4, "{} lines", lines.len());
    }

    /// The VAT line exists exactly when the trade carries VAT
    #[test]
    fn prop_vat_line_iff_vat(trade in arb_valid_trade()) {
        let accounts = PostingAccounts::standard();
        let lines = build_lines(&trade, &accounts).unwrap();
        let vat_account = match trade.kind {
            TradeKind::Sales => &accounts.vat_output,
            TradeKind::Purchase => &accounts.vat_input,
        };
        let has_vat_line = lines.iter().any(|l| &l.account_code == vat_account);
        prop_assert_eq!(has_vat_line, !trade.vat_amount.is_zero());
    }

    /// The settlement line carries the trade's cash value
    #[test]
    fn prop_counter_line_is_total(trade in arb_valid_trade()) {
        let lines = build_lines(&trade, &PostingAccounts::standard()).unwrap();
        let counter_amount: Decimal = lines
            .iter()
            .filter(|l| l.account_code == "1020")
            .map(|l| l.amount)
            .sum();
        prop_assert_eq!(counter_amount, trade.total_amount());
    }
}
