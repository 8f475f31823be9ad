//! End-to-end flow: trade capture, derivation, the posting gate, and the
//! reports over the stored book.
//!
//! This walks the same path the bookkeeping screens walk: fill in a trade,
//! derive its entry, post it, reload it for editing, re-derive and re-post,
//! then read the book back through the report folds.

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use jangbu_core::{AccountRegistry, JournalEntry, JournalLine, Trade};
use jangbu_posting::{derive_entry, PostingAccounts};
use jangbu_reports::{account_ledger, fund_balances, profit_loss, AccountFilter};
use jangbu_store::{post_entry, JournalStore, MemoryJournal, PostError};
use jangbu_validate::EntryError;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// ==== Capture, post, report ====

#[test]
fn test_sale_flows_from_trade_to_reports() {
    let accounts = PostingAccounts::standard();
    let registry = AccountRegistry::standard();
    let mut store = MemoryJournal::new();

    let sale = Trade::sales(date(2024, 3, 5))
        .with_counterparty("Hana Trading")
        .with_counter_account("1020")
        .with_revenue_account("4100")
        .with_supply_amount(dec!(200_000));

    let entry = derive_entry(&sale, &accounts).unwrap();
    let id = post_entry(&mut store, entry).unwrap();
    assert_eq!(id, 1);

    let book = store.entries();
    let pl = profit_loss(&book, &registry);
    assert_eq!(pl.sales, dec!(200_000));

    let cash = fund_balances(&book, &AccountFilter::standard_cash(), &registry);
    assert_eq!(cash.get("1020").unwrap().balance, dec!(220_000));
}

#[test]
fn test_purchase_on_credit_shows_in_note_ledger() {
    let accounts = PostingAccounts::standard();
    let registry = AccountRegistry::standard();
    let mut store = MemoryJournal::new();

    let purchase = Trade::purchase(date(2024, 3, 8))
        .with_counterparty("Daejin Supply")
        .with_counter_account("2110")
        .with_expense_account("5100")
        .with_supply_amount(dec!(90_000));
    post_entry(&mut store, derive_entry(&purchase, &accounts).unwrap()).unwrap();

    let settlement = JournalEntry::new(date(2024, 3, 20))
        .with_line(JournalLine::debit("2110", dec!(40_000)))
        .with_line(JournalLine::credit("1020", dec!(40_000)));
    post_entry(&mut store, settlement).unwrap();

    let ledger = account_ledger(&store.entries(), "2110", &registry);
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.rows[0].counterparty.as_deref(), Some("Daejin Supply"));
    assert_eq!(ledger.closing_balance(), dec!(59_000));
}

// ==== Edit and re-post ====

#[test]
fn test_edited_trade_replaces_its_entry() {
    let accounts = PostingAccounts::standard();
    let registry = AccountRegistry::standard();
    let mut store = MemoryJournal::new();

    let mut trade = Trade::sales(date(2024, 3, 5))
        .with_counter_account("1020")
        .with_revenue_account("4100")
        .with_supply_amount(dec!(200_000));
    let id = post_entry(&mut store, derive_entry(&trade, &accounts).unwrap()).unwrap();

    // The user corrects the amount; the whole line set re-derives and the
    // posted entry is replaced, not duplicated.
    trade = trade.with_supply_amount(dec!(150_000));
    let edited = derive_entry(&trade, &accounts).unwrap().with_id(id);
    let replaced_id = post_entry(&mut store, edited).unwrap();

    assert_eq!(replaced_id, id);
    assert_eq!(store.len(), 1);
    let pl = profit_loss(&store.entries(), &registry);
    assert_eq!(pl.sales, dec!(150_000));
}

#[test]
fn test_rejected_edit_leaves_book_unchanged() {
    let accounts = PostingAccounts::standard();
    let mut store = MemoryJournal::new();

    let sale = Trade::sales(date(2024, 3, 5))
        .with_counter_account("1020")
        .with_revenue_account("4100")
        .with_supply_amount(dec!(200_000));
    let id = post_entry(&mut store, derive_entry(&sale, &accounts).unwrap()).unwrap();
    let before = store.entries();

    // A hand-mangled edit that no longer balances is rejected whole.
    let mut broken = derive_entry(&sale, &accounts).unwrap().with_id(id);
    broken.lines[0].amount = dec!(1);
    let err = post_entry(&mut store, broken).unwrap_err();

    assert!(matches!(err, PostError::Invalid(EntryError::Unbalanced(_))));
    assert_eq!(store.entries(), before);
}

// ==== Snapshot and reload ====

#[test]
fn test_reloaded_book_reports_identically() {
    let accounts = PostingAccounts::standard();
    let registry = AccountRegistry::standard();
    let mut store = MemoryJournal::new();

    for (day, supply) in [(5, dec!(200_000)), (12, dec!(50_000))] {
        let sale = Trade::sales(date(2024, 3, day))
            .with_counter_account("1020")
            .with_revenue_account("4100")
            .with_supply_amount(supply);
        post_entry(&mut store, derive_entry(&sale, &accounts).unwrap()).unwrap();
    }

    let snapshot = serde_json::to_string(&store).unwrap();
    let reloaded: MemoryJournal = serde_json::from_str(&snapshot).unwrap();

    assert_eq!(
        profit_loss(&reloaded.entries(), &registry),
        profit_loss(&store.entries(), &registry)
    );
    assert_eq!(reloaded.entries(), store.entries());
}
