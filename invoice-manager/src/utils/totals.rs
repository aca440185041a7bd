//! Subtotal, discount amount and grand total for a set of product lines.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::ProductLine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

impl InvoiceTotals {
    /// Two-decimal view for display; internal arithmetic stays exact.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: self.subtotal.round_dp(2),
            discount_amount: self.discount_amount.round_dp(2),
            total: self.total.round_dp(2),
        }
    }
}

/// `subtotal = Σ(rate*quantity)`, `discount = subtotal * d/100`,
/// `total = subtotal - discount`. No rounding here.
pub fn calculate(lines: &[ProductLine], discount_percentage: Decimal) -> InvoiceTotals {
    let subtotal: Decimal = lines.iter().map(ProductLine::amount).sum();
    let discount_amount = subtotal * discount_percentage / Decimal::ONE_HUNDRED;
    let total = subtotal - discount_amount;

    InvoiceTotals {
        subtotal,
        discount_amount,
        total,
    }
}
