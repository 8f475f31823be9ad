//! Commercial trades: the input the posting engine turns into journal lines.
//!
//! A [`Trade`] captures one sales or purchase transaction the way the entry
//! screens collect it: header amounts (supply, VAT, fee), the settlement
//! account, the revenue or expense account, and optionally itemized
//! [`TradeItem`] rows that roll up into the header.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::account::AccountCode;
use crate::vat::{vat_for, VatType};

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeKind {
    /// We sell: proceeds come in, revenue is credited.
    Sales,
    /// We buy: an expense is debited, payment goes out.
    Purchase,
}

impl TradeKind {
    /// Canonical tag, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sales => "SALES",
            Self::Purchase => "PURCHASE",
        }
    }

    /// True for the sales direction.
    #[must_use]
    pub const fn is_sales(self) -> bool {
        matches!(self, Self::Sales)
    }
}

impl fmt::Display for TradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One itemized row of a trade.
///
/// # Examples
///
/// ```
/// use jangbu_core::{TradeItem, VatType};
/// use rust_decimal_macros::dec;
///
/// let item = TradeItem::new("Gadget", dec!(3), dec!(2500));
/// assert_eq!(item.supply_amount(), dec!(7500));
/// assert_eq!(item.vat_amount(VatType::Taxable), dec!(750));
/// assert_eq!(item.total_amount(VatType::Taxable), dec!(8250));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeItem {
    /// Item description.
    pub item_name: String,
    /// Quantity sold or bought.
    pub quantity: Decimal,
    /// Price per unit, excluding VAT.
    pub unit_price: Decimal,
    /// Free-form annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

impl TradeItem {
    /// Create an item row.
    #[must_use]
    pub fn new(item_name: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            item_name: item_name.into(),
            quantity,
            unit_price,
            remark: None,
        }
    }

    /// Set the annotation.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Supply amount: quantity times unit price.
    #[must_use]
    pub fn supply_amount(&self) -> Decimal {
        self.quantity * self.unit_price
    }

    /// VAT on this item alone, rounded per item.
    #[must_use]
    pub fn vat_amount(&self, vat_type: VatType) -> Decimal {
        vat_for(vat_type, self.supply_amount())
    }

    /// Supply plus VAT.
    #[must_use]
    pub fn total_amount(&self, vat_type: VatType) -> Decimal {
        self.supply_amount() + self.vat_amount(vat_type)
    }
}

/// A sales or purchase transaction as entered.
///
/// Setting the supply amount or the VAT treatment re-derives `vat_amount`
/// through the calculator, the same way the entry form recomputes the VAT
/// field on every edit; [`Trade::with_vat_amount`] overrides the derived
/// value for hand-corrected slips.
///
/// # Examples
///
/// ```
/// use jangbu_core::{NaiveDate, Trade, VatType};
/// use rust_decimal_macros::dec;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let trade = Trade::sales(date)
///     .with_supply_amount(dec!(10000))
///     .with_counter_account("1020")
///     .with_revenue_account("4100");
///
/// assert_eq!(trade.vat_amount, dec!(1000));
/// assert_eq!(trade.total_amount(), dec!(11000));
///
/// let exempt = trade.with_vat_type(VatType::Exempt);
/// assert_eq!(exempt.vat_amount, dec!(0));
/// assert_eq!(exempt.total_amount(), dec!(10000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Sales or purchase.
    pub kind: TradeKind,
    /// Trade date, which the derived entry inherits.
    pub date: NaiveDate,
    /// VAT treatment of the supply.
    pub vat_type: VatType,
    /// Amount of the supply, excluding VAT.
    #[serde(default)]
    pub supply_amount: Decimal,
    /// VAT amount; derived from the supply unless hand-entered.
    #[serde(default)]
    pub vat_amount: Decimal,
    /// Fee withheld from the proceeds (sales) or added to the cost (purchase).
    #[serde(default)]
    pub fee_amount: Decimal,
    /// Settlement account: cash, bank, receivable, or payable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_account: Option<AccountCode>,
    /// Revenue account, required for sales.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revenue_account: Option<AccountCode>,
    /// Expense account, required for purchases.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_account: Option<AccountCode>,
    /// Identifier of the counterparty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty_id: Option<u64>,
    /// Counterparty display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,
    /// Free-form annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// Itemized rows, when the trade was entered line by line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<TradeItem>,
}

impl Trade {
    /// Create a trade with zero amounts and taxable VAT treatment.
    #[must_use]
    pub fn new(kind: TradeKind, date: NaiveDate) -> Self {
        Self {
            kind,
            date,
            vat_type: VatType::Taxable,
            supply_amount: Decimal::ZERO,
            vat_amount: Decimal::ZERO,
            fee_amount: Decimal::ZERO,
            counter_account: None,
            revenue_account: None,
            expense_account: None,
            counterparty_id: None,
            counterparty: None,
            remark: None,
            items: Vec::new(),
        }
    }

    /// Create a sales trade.
    #[must_use]
    pub fn sales(date: NaiveDate) -> Self {
        Self::new(TradeKind::Sales, date)
    }

    /// Create a purchase trade.
    #[must_use]
    pub fn purchase(date: NaiveDate) -> Self {
        Self::new(TradeKind::Purchase, date)
    }

    /// Set the supply amount and re-derive the VAT from it.
    #[must_use]
    pub fn with_supply_amount(mut self, supply_amount: Decimal) -> Self {
        self.supply_amount = supply_amount;
        self.vat_amount = vat_for(self.vat_type, supply_amount);
        self
    }

    /// Set the VAT treatment and re-derive the VAT amount.
    #[must_use]
    pub fn with_vat_type(mut self, vat_type: VatType) -> Self {
        self.vat_type = vat_type;
        self.vat_amount = vat_for(vat_type, self.supply_amount);
        self
    }

    /// Override the derived VAT amount.
    #[must_use]
    pub fn with_vat_amount(mut self, vat_amount: Decimal) -> Self {
        self.vat_amount = vat_amount;
        self
    }

    /// Set the fee amount.
    #[must_use]
    pub fn with_fee_amount(mut self, fee_amount: Decimal) -> Self {
        self.fee_amount = fee_amount;
        self
    }

    /// Set the settlement account.
    #[must_use]
    pub fn with_counter_account(mut self, account: impl Into<AccountCode>) -> Self {
        self.counter_account = Some(account.into());
        self
    }

    /// Set the revenue account.
    #[must_use]
    pub fn with_revenue_account(mut self, account: impl Into<AccountCode>) -> Self {
        self.revenue_account = Some(account.into());
        self
    }

    /// Set the expense account.
    #[must_use]
    pub fn with_expense_account(mut self, account: impl Into<AccountCode>) -> Self {
        self.expense_account = Some(account.into());
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

    /// Append an item row.
    #[must_use]
    pub fn with_item(mut self, item: TradeItem) -> Self {
        self.items.push(item);
        self
    }

    /// Replace the item rows.
    #[must_use]
    pub fn with_items(mut self, items: Vec<TradeItem>) -> Self {
        self.items = items;
        self
    }

    /// Sum of the items' supply amounts.
    #[must_use]
    pub fn items_supply_total(&self) -> Decimal {
        self.items.iter().map(TradeItem::supply_amount).sum()
    }

    /// Sum of the items' VAT amounts, each rounded per item.
    #[must_use]
    pub fn items_vat_total(&self) -> Decimal {
        self.items
            .iter()
            .map(|item| item.vat_amount(self.vat_type))
            .sum()
    }

    /// Replace the header supply and VAT amounts with the item totals.
    ///
    /// Per-item VAT is rounded before summing, so the header VAT of an
    /// itemized trade can differ from VAT computed on the summed supply.
    pub fn roll_up_items(&mut self) {
        self.supply_amount = self.items_supply_total();
        self.vat_amount = self.items_vat_total();
    }

    /// Cash value of the trade.
    ///
    /// Sales receive `supply + vat - fee` (the fee is withheld from the
    /// proceeds); purchases pay `supply + vat + fee` (the fee is part of the
    /// cost).
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        match self.kind {
            TradeKind::Sales => self.supply_amount + self.vat_amount - self.fee_amount,
            TradeKind::Purchase => self.supply_amount + self.vat_amount + self.fee_amount,
        }
    }
}
