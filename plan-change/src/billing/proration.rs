//! Proration estimate and renewal dates.
//!
//! The estimate is a placeholder for display only. It assumes exactly half
//! of the current billing period remains, whatever the real elapsed time is;
//! the amount actually charged comes from the payment provider at checkout.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

use super::models::{BillingCycle, PlanDefinition};
use crate::error::{BillingError, Result};

/// Fraction of the current period assumed unused when a plan changes.
#[must_use]
pub fn assumed_unused_fraction() -> Decimal {
    Decimal::new(5, 1)
}

/// Estimates the charge for switching from `current` to `requested` now.
///
/// Computes `max(requested.monthly - current.monthly * 0.5, 0)`: the new
/// monthly price less a credit for the assumed unused half of the current
/// month. Downgrades therefore usually estimate to zero.
///
/// # Examples
///
/// ```
/// use plan_change::{PlanCatalog, Tier, proration::estimate_proration};
/// use rust_decimal::Decimal;
///
/// let catalog = PlanCatalog::default();
/// let plus = catalog.plan(Tier::Plus).unwrap();
/// let pro = catalog.plan(Tier::Pro).unwrap();
///
/// // 49 - 19 * 0.5
/// assert_eq!(estimate_proration(plus, pro), Decimal::new(395, 1));
/// ```
#[must_use]
pub fn estimate_proration(current: &PlanDefinition, requested: &PlanDefinition) -> Decimal {
    let credit = current.monthly_price.saturating_mul(assumed_unused_fraction());
    requested.monthly_price.saturating_sub(credit).max(Decimal::ZERO)
}

/// Returns the renewal date one billing period after `from`.
///
/// Days past the end of the target month clamp to its last day, so a monthly
/// plan renewing on January 31 renews next on February 28 (or 29).
///
/// # Errors
///
/// Returns [`BillingError::DateOutOfRange`] if the result is beyond the
/// range chrono can represent.
pub fn next_billing_date(from: NaiveDate, cycle: BillingCycle) -> Result<NaiveDate> {
    let months = match cycle {
        BillingCycle::Monthly => Months::new(1),
        BillingCycle::Annual => Months::new(12),
    };

    from.checked_add_months(months).ok_or_else(|| {
        BillingError::DateOutOfRange(format!(
            "cannot advance {from} by one {}",
            cycle.interval_display()
        ))
    })
}
