//! Pricing engine: turns a draft's item list into a [`PricingBreakdown`].
//!
//! Everything here is a pure function over its arguments. All amounts are in
//! the currency's minor units (integers), so identical inputs always produce
//! bit-identical output and no fractional cents ever reach the display layer.
//!
//! Rates are expressed in basis points (1 bps = 0.01%) to keep the arithmetic
//! integral; products are rounded half-up to the nearest minor unit.

use serde::{Deserialize, Serialize};

use crate::model::OrderItem;

/// Rates and thresholds the engine applies. One instance per deployment;
/// [`PricingConfig::default`] matches the production configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Total garment quantity at or above which the bulk discount applies.
    pub bulk_threshold_qty: u32,
    /// Bulk discount as basis points of the subtotal.
    pub bulk_discount_bps: u32,
    /// Rush surcharge as basis points of the subtotal.
    pub rush_surcharge_bps: u32,
    /// Weekend surcharge as basis points of the subtotal.
    pub weekend_surcharge_bps: u32,
    /// Tax rate as basis points of (subtotal - discount + surcharges).
    pub tax_bps: u32,
    /// ISO 4217 code, informational only; the engine is single-currency.
    pub currency: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            bulk_threshold_qty: 10,
            bulk_discount_bps: 1000,
            rush_surcharge_bps: 1500,
            weekend_surcharge_bps: 500,
            tax_bps: 1800,
            currency: "UGX".to_string(),
        }
    }
}

/// Caller-selected order modifiers. Both surcharges may apply at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingModifiers {
    pub rush: bool,
    pub weekend: bool,
}

/// Whether and how the bulk discount applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDiscount {
    pub applied: bool,
    pub percent_bps: u32,
    pub amount: i64,
}

/// The fully itemised result of [`compute_total`]. Always derived, never
/// persisted on its own; the backend recomputes its own copy at submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingBreakdown {
    pub subtotal: i64,
    pub bulk_discount: BulkDiscount,
    pub rush_surcharge: i64,
    pub weekend_surcharge: i64,
    pub tax_amount: i64,
    pub total_amount: i64,
    pub currency: String,
}

impl PricingBreakdown {
    /// The all-zero breakdown returned for an empty item list.
    pub fn zero(currency: impl Into<String>) -> Self {
        Self {
            subtotal: 0,
            bulk_discount: BulkDiscount::default(),
            rush_surcharge: 0,
            weekend_surcharge: 0,
            tax_amount: 0,
            total_amount: 0,
            currency: currency.into(),
        }
    }
}

/// `amount * bps / 10_000`, rounded half-up. i128 intermediate so large
/// subtotals cannot overflow.
fn apply_bps(amount: i64, bps: u32) -> i64 {
    let product = i128::from(amount) * i128::from(bps);
    ((product + 5_000) / 10_000) as i64
}

/// Computes the full pricing breakdown for an item list.
///
/// - subtotal = Σ unit_price × quantity
/// - bulk discount: `bulk_discount_bps` of subtotal once total quantity
///   reaches `bulk_threshold_qty`; computed before surcharges
/// - rush and weekend surcharges: each a share of the subtotal, independent,
///   and they stack
/// - tax = `tax_bps` of (subtotal − discount + surcharges)
/// - total = subtotal − discount + surcharges + tax
///
/// An empty item list yields [`PricingBreakdown::zero`], not an error.
///
/// Adding a priced item never decreases the total, with one deliberate
/// exception: an item that pushes the quantity across `bulk_threshold_qty`
/// switches the whole subtotal to discounted pricing, which can bring the
/// total down. The discount wins over strict monotonicity because it is in
/// the customer's favor; the backend prices the same way.
pub fn compute_total(
    items: &[OrderItem],
    modifiers: &PricingModifiers,
    config: &PricingConfig,
) -> PricingBreakdown {
    if items.is_empty() {
        return PricingBreakdown::zero(config.currency.clone());
    }

    let subtotal: i64 = items.iter().map(OrderItem::line_total).sum();
    let total_quantity: u32 = items.iter().map(|i| i.quantity).sum();

    let bulk_discount = if total_quantity >= config.bulk_threshold_qty {
        BulkDiscount {
            applied: true,
            percent_bps: config.bulk_discount_bps,
            amount: apply_bps(subtotal, config.bulk_discount_bps),
        }
    } else {
        BulkDiscount::default()
    };

    let rush_surcharge = if modifiers.rush {
        apply_bps(subtotal, config.rush_surcharge_bps)
    } else {
        0
    };
    let weekend_surcharge = if modifiers.weekend {
        apply_bps(subtotal, config.weekend_surcharge_bps)
    } else {
        0
    };

    let taxable = subtotal - bulk_discount.amount + rush_surcharge + weekend_surcharge;
    let tax_amount = apply_bps(taxable, config.tax_bps);

    PricingBreakdown {
        subtotal,
        bulk_discount,
        rush_surcharge,
        weekend_surcharge,
        tax_amount,
        total_amount: taxable + tax_amount,
        currency: config.currency.clone(),
    }
}
