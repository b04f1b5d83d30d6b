//! Price arithmetic for plan cards and checkout summaries.
//!
//! All amounts are [`Decimal`] in the single display currency. Nothing here
//! rounds except [`monthly_equivalent`] and [`savings_percent`], which exist
//! purely for display; [`display_amount`] truncates.

use rust_decimal::{Decimal, RoundingStrategy};

use super::{
    discount::DiscountCode,
    models::{BillingCycle, PlanDefinition},
};

const MONTHS_PER_YEAR: i64 = 12;

/// Returns the price charged per billing period on `cycle`.
///
/// The annual price is the plan's flat yearly total, not twelve monthly
/// payments.
///
/// # Examples
///
/// ```
/// use plan_change::{BillingCycle, PlanCatalog, Tier, pricing::price_for};
/// use rust_decimal::Decimal;
///
/// let catalog = PlanCatalog::default();
/// let plus = catalog.plan(Tier::Plus).unwrap();
/// assert_eq!(price_for(plus, BillingCycle::Monthly), Decimal::from(19));
/// assert_eq!(price_for(plus, BillingCycle::Annual), Decimal::from(190));
/// ```
#[must_use]
pub fn price_for(plan: &PlanDefinition, cycle: BillingCycle) -> Decimal {
    match cycle {
        BillingCycle::Monthly => plan.monthly_price,
        BillingCycle::Annual => plan.annual_price,
    }
}

/// Returns how much a year on the annual cycle saves over twelve monthly
/// payments. Free plans save nothing.
///
/// Arithmetic saturates at the bounds of `Decimal`; prices in a validated
/// [`PlanCatalog`](crate::PlanCatalog) never get there.
#[must_use]
pub fn annual_savings(plan: &PlanDefinition) -> Decimal {
    if plan.is_free() {
        return Decimal::ZERO;
    }
    yearly_at_monthly(plan).saturating_sub(plan.annual_price)
}

fn yearly_at_monthly(plan: &PlanDefinition) -> Decimal {
    plan.monthly_price.saturating_mul(Decimal::from(MONTHS_PER_YEAR))
}

/// Returns the annual savings as a whole-number percentage of twelve monthly
/// payments, rounded half away from zero.
#[must_use]
pub fn savings_percent(plan: &PlanDefinition) -> Decimal {
    if plan.is_free() {
        return Decimal::ZERO;
    }
    annual_savings(plan)
        .checked_div(yearly_at_monthly(plan))
        .map_or(Decimal::ZERO, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Returns the effective per-month cost on `cycle`, rounded to cents.
#[must_use]
pub fn monthly_equivalent(plan: &PlanDefinition, cycle: BillingCycle) -> Decimal {
    match cycle {
        BillingCycle::Monthly => plan.monthly_price,
        BillingCycle::Annual => (plan.annual_price / Decimal::from(MONTHS_PER_YEAR))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    }
}

/// Applies a percentage discount to `price`.
///
/// Returns `price` unchanged when `discount` is `None`.
///
/// # Examples
///
/// ```
/// use plan_change::{DiscountCode, Tier, pricing::discounted_price};
/// use rust_decimal::Decimal;
///
/// let code = DiscountCode::new("SAVE20", Decimal::from(20), vec![Tier::Plus]);
/// assert_eq!(discounted_price(Decimal::from(100), Some(&code)), Decimal::from(80));
/// assert_eq!(discounted_price(Decimal::from(100), None), Decimal::from(100));
/// ```
#[must_use]
pub fn discounted_price(price: Decimal, discount: Option<&DiscountCode>) -> Decimal {
    price.saturating_sub(discount_amount(price, discount))
}

/// Returns the amount a discount takes off `price` (zero with no discount).
#[must_use]
pub fn discount_amount(price: Decimal, discount: Option<&DiscountCode>) -> Decimal {
    discount.map_or(Decimal::ZERO, |d| {
        (price / Decimal::ONE_HUNDRED).saturating_mul(d.percentage)
    })
}

/// Formats an amount for display: truncated (not rounded) to cents, with a
/// `.00` suffix dropped.
///
/// ```
/// use plan_change::pricing::display_amount;
/// use rust_decimal::Decimal;
///
/// assert_eq!(display_amount(Decimal::from(19)), "$19");
/// assert_eq!(display_amount(Decimal::new(395, 1)), "$39.50");
/// assert_eq!(display_amount(Decimal::new(158_333, 4)), "$15.83");
/// ```
#[must_use]
pub fn display_amount(amount: Decimal) -> String {
    let truncated = amount.trunc_with_scale(2);
    if truncated.fract().is_zero() {
        format!("${}", truncated.trunc())
    } else {
        format!("${truncated:.2}")
    }
}
