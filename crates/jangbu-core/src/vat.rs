//! Value-added tax arithmetic.
//!
//! Amounts are whole currency units, so VAT rounds to integer values. The
//! half-up rounding matches the slip arithmetic of the bookkeeping screens
//! this engine serves.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// VAT treatment of a supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VatType {
    /// Standard-rated: VAT applies at the statutory rate.
    Taxable,
    /// Zero-rated: in scope for VAT, at a rate of zero.
    ZeroRated,
    /// Exempt: out of scope, no VAT.
    Exempt,
}

impl VatType {
    /// Canonical tag, as serialized.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Taxable => "TAXABLE",
            Self::ZeroRated => "ZERO_RATED",
            Self::Exempt => "EXEMPT",
        }
    }
}

impl fmt::Display for VatType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The statutory VAT rate for taxable supplies (10%).
#[must_use]
pub fn vat_rate() -> Decimal {
    Decimal::new(1, 1)
}

/// VAT due on a base amount.
///
/// Taxable supplies pay 10% rounded half-up to the whole currency unit;
/// zero-rated and exempt supplies pay nothing.
///
/// # Panics
///
/// Panics on a negative base. Amounts are validated non-negative before any
/// derivation, so a negative base here is a caller bug, not bad input.
///
/// # Examples
///
/// ```
/// use jangbu_core::{vat_for, VatType};
/// use rust_decimal_macros::dec;
///
/// assert_eq!(vat_for(VatType::Taxable, dec!(10000)), dec!(1000));
/// assert_eq!(vat_for(VatType::Taxable, dec!(5)), dec!(1)); // 0.5 rounds up
/// assert_eq!(vat_for(VatType::ZeroRated, dec!(10000)), dec!(0));
/// assert_eq!(vat_for(VatType::Exempt, dec!(10000)), dec!(0));
/// ```
#[must_use]
pub fn vat_for(vat_type: VatType, base: Decimal) -> Decimal {
    assert!(
        base >= Decimal::ZERO,
        "VAT base must be non-negative, got {base}"
    );
    match vat_type {
        VatType::Taxable => {
            (base * vat_rate()).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        }
        VatType::ZeroRated | VatType::Exempt => Decimal::ZERO,
    }
}
