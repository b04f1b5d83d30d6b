//! Plan-change classification and quoting.
//!
//! [`PlanChangeCalculator::quote`] is the entry point the pricing page calls
//! when a subscriber clicks an upgrade or downgrade button. It combines the
//! price, discount, savings, proration and feature-delta helpers into one
//! [`ChangeQuote`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{
    catalog::PlanCatalog,
    discount::DiscountTable,
    models::{
        BillingCycle, ChangeDirection, PlanChangeRequest, PlanDefinition, Subscriber, Tier,
        UsageCategory,
    },
    pricing, proration,
};
use crate::{config::BillingConfig, error::Result};

/// Classifies a move between tiers by ordinal rank.
///
/// Anything that is not a strict rank increase is a downgrade. Equal tiers
/// never reach this point through [`PlanChangeRequest::new`].
#[must_use]
pub const fn classify_change(current: Tier, requested: Tier) -> ChangeDirection {
    if requested.rank() > current.rank() {
        ChangeDirection::Upgrade
    } else {
        ChangeDirection::Downgrade
    }
}

/// Change to one usage cap. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitChange {
    /// Category whose cap differs.
    pub category: UsageCategory,
    /// Cap on the current plan.
    pub from: Option<u32>,
    /// Cap on the requested plan.
    pub to: Option<u32>,
}

/// What a subscriber gains and loses by switching plans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDelta {
    /// Features included on the requested plan but not the current one.
    pub gained: Vec<String>,
    /// Features included on the current plan but not the requested one.
    pub lost: Vec<String>,
    /// Usage caps that differ between the plans.
    pub limit_changes: Vec<LimitChange>,
}

impl FeatureDelta {
    /// Returns `true` if the plans offer the same features and caps.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gained.is_empty() && self.lost.is_empty() && self.limit_changes.is_empty()
    }
}

/// Compares two plans feature by feature.
///
/// Features are identified by name and listed in the order the owning plan
/// lists them. Limit changes cover every category capped by either plan.
#[must_use]
pub fn feature_delta(current: &PlanDefinition, requested: &PlanDefinition) -> FeatureDelta {
    let included = |plan: &PlanDefinition| {
        plan.features.iter().filter(|f| f.included).map(|f| f.name.clone()).collect::<Vec<_>>()
    };

    let gained = included(requested).into_iter().filter(|name| !current.includes(name)).collect();
    let lost = included(current).into_iter().filter(|name| !requested.includes(name)).collect();

    let mut categories: Vec<UsageCategory> =
        current.limits.keys().chain(requested.limits.keys()).copied().collect();
    categories.sort_unstable();
    categories.dedup();

    let limit_changes = categories
        .into_iter()
        .filter_map(|category| {
            let from = current.limit(category);
            let to = requested.limit(category);
            (from != to).then_some(LimitChange { category, from, to })
        })
        .collect();

    FeatureDelta { gained, lost, limit_changes }
}

/// When a plan change takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "date", rename_all = "snake_case")]
pub enum EffectiveDate {
    /// Applied as soon as checkout completes.
    Immediately,
    /// Applied at the subscriber's next renewal.
    NextBillingDate(NaiveDate),
    /// Applied at the end of the current period; the renewal date is unknown.
    EndOfCurrentPeriod,
}

/// Schedules a change: upgrades apply now, downgrades at renewal.
#[must_use]
pub fn effective_date(direction: ChangeDirection, subscriber: &Subscriber) -> EffectiveDate {
    match (direction, subscriber.next_billing_date) {
        (ChangeDirection::Upgrade, _) => EffectiveDate::Immediately,
        (ChangeDirection::Downgrade, Some(date)) => EffectiveDate::NextBillingDate(date),
        (ChangeDirection::Downgrade, None) => EffectiveDate::EndOfCurrentPeriod,
    }
}

/// Discount accepted for a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedDiscount {
    /// Code as configured.
    pub code: String,
    /// Percentage off.
    pub percentage: Decimal,
    /// Amount taken off the list price.
    pub amount_off: Decimal,
}

/// Priced, labelled description of a plan change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeQuote {
    /// The request being quoted.
    pub request: PlanChangeRequest,
    /// Upgrade or downgrade.
    pub direction: ChangeDirection,
    /// Display name of the requested plan.
    pub plan_name: String,
    /// Billing cycle of the requested plan.
    pub cycle: BillingCycle,
    /// Requested plan price for one period on `cycle`.
    pub list_price: Decimal,
    /// Discount applied to `list_price`, if any.
    pub discount: Option<AppliedDiscount>,
    /// `list_price` after the discount.
    pub price_due: Decimal,
    /// Savings of the annual cycle over monthly; only set for annual quotes.
    pub annual_savings: Option<Decimal>,
    /// Estimated immediate charge; only set for upgrades.
    pub prorated_charge: Option<Decimal>,
    /// Features and caps gained or lost.
    pub feature_delta: FeatureDelta,
    /// When the change applies.
    pub effective: EffectiveDate,
}

/// Prices plan changes against a plan catalog and discount table.
///
/// The calculator holds only immutable tables, so one instance can serve
/// every request.
///
/// # Examples
///
/// ```
/// use plan_change::{
///     BillingCycle, ChangeDirection, PlanChangeCalculator, Subscriber, Tier,
/// };
/// use rust_decimal::Decimal;
///
/// # fn example() -> plan_change::Result<()> {
/// let calculator = PlanChangeCalculator::default();
/// let subscriber = Subscriber::new(Tier::Plus, BillingCycle::Monthly);
///
/// let quote = calculator.quote(&subscriber, Tier::Pro, BillingCycle::Monthly, Some("SAVE20"))?;
/// assert_eq!(quote.direction, ChangeDirection::Upgrade);
/// assert_eq!(quote.price_due, Decimal::new(392, 1));
/// assert_eq!(quote.prorated_charge, Some(Decimal::new(395, 1)));
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanChangeCalculator {
    catalog: PlanCatalog,
    discounts: DiscountTable,
}

impl PlanChangeCalculator {
    /// Creates a calculator over already-validated tables.
    #[must_use]
    pub const fn new(catalog: PlanCatalog, discounts: DiscountTable) -> Self {
        Self { catalog, discounts }
    }

    /// Creates a calculator from loaded configuration.
    #[must_use]
    pub fn from_config(config: BillingConfig) -> Self {
        let (catalog, discounts) = config.into_parts();
        Self::new(catalog, discounts)
    }

    /// Returns the plan catalog.
    #[must_use]
    pub const fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }

    /// Returns the discount table.
    #[must_use]
    pub const fn discounts(&self) -> &DiscountTable {
        &self.discounts
    }

    /// Quotes moving `subscriber` to `requested` on `cycle`.
    ///
    /// A blank discount code is treated as no code.
    ///
    /// # Errors
    ///
    /// - [`BillingError::NoChange`](crate::BillingError::NoChange) if
    ///   `requested` is the current tier
    /// - [`BillingError::PlanNotFound`](crate::BillingError::PlanNotFound) if
    ///   either tier is missing from the catalog
    /// - [`BillingError::InvalidDiscountCode`](crate::BillingError::InvalidDiscountCode)
    ///   or [`BillingError::IneligibleDiscountCode`](crate::BillingError::IneligibleDiscountCode)
    ///   if the code is not accepted for `requested`
    #[instrument(skip(self), fields(current = %subscriber.tier))]
    pub fn quote(
        &self,
        subscriber: &Subscriber,
        requested: Tier,
        cycle: BillingCycle,
        discount_code: Option<&str>,
    ) -> Result<ChangeQuote> {
        let request = PlanChangeRequest::new(subscriber, requested, cycle)?;
        let current_plan = self.catalog.plan(request.current)?;
        let requested_plan = self.catalog.plan(request.requested)?;

        let direction = classify_change(request.current, request.requested);

        let code = match discount_code.filter(|c| !c.is_empty()) {
            Some(input) => Some(self.discounts.apply(input, requested)?),
            None => None,
        };

        let list_price = pricing::price_for(requested_plan, cycle);
        let price_due = pricing::discounted_price(list_price, code);
        let discount = code.map(|c| AppliedDiscount {
            code: c.code.clone(),
            percentage: c.percentage,
            amount_off: pricing::discount_amount(list_price, Some(c)),
        });

        let annual_savings =
            (cycle == BillingCycle::Annual).then(|| pricing::annual_savings(requested_plan));
        let prorated_charge = (direction == ChangeDirection::Upgrade)
            .then(|| proration::estimate_proration(current_plan, requested_plan));

        debug!(
            direction = %direction,
            list_price = %list_price,
            price_due = %price_due,
            "plan change quoted"
        );

        Ok(ChangeQuote {
            request,
            direction,
            plan_name: requested_plan.name.clone(),
            cycle,
            list_price,
            discount,
            price_due,
            annual_savings,
            prorated_charge,
            feature_delta: feature_delta(current_plan, requested_plan),
            effective: effective_date(direction, subscriber),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{DiscountCode, MAX_PRICE};
    use crate::error::BillingError;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ========================================================================
    // Classification Tests
    // ========================================================================

    #[test]
    fn test_classify_upgrade() {
        assert_eq!(classify_change(Tier::Free, Tier::Pro), ChangeDirection::Upgrade);
        assert_eq!(classify_change(Tier::Pro, Tier::Premium), ChangeDirection::Upgrade);
    }

    #[test]
    fn test_classify_downgrade() {
        assert_eq!(classify_change(Tier::Pro, Tier::Free), ChangeDirection::Downgrade);
        assert_eq!(classify_change(Tier::Premium, Tier::Plus), ChangeDirection::Downgrade);
    }

    #[test]
    fn test_classify_equal_rank_falls_to_downgrade() {
        assert_eq!(classify_change(Tier::Plus, Tier::Plus), ChangeDirection::Downgrade);
    }

    // ========================================================================
    // Feature Delta Tests
    // ========================================================================

    #[test]
    fn test_feature_delta_downgrade_lists_lost_features() {
        let catalog = PlanCatalog::default();
        let premium = catalog.plan(Tier::Premium).unwrap();
        let plus = catalog.plan(Tier::Plus).unwrap();

        let delta = feature_delta(premium, plus);
        assert!(delta.gained.is_empty());
        assert_eq!(delta.lost, vec!["Resume analytics", "Priority support", "1:1 career coaching"]);
    }

    #[test]
    fn test_feature_delta_upgrade_lists_gained_features() {
        let catalog = PlanCatalog::default();
        let delta =
            feature_delta(catalog.plan(Tier::Free).unwrap(), catalog.plan(Tier::Plus).unwrap());
        assert_eq!(delta.gained, vec!["AI cover letters"]);
        assert!(delta.lost.is_empty());
    }

    #[test]
    fn test_feature_delta_limit_changes() {
        let catalog = PlanCatalog::default();
        let delta =
            feature_delta(catalog.plan(Tier::Plus).unwrap(), catalog.plan(Tier::Pro).unwrap());

        assert!(delta.limit_changes.contains(&LimitChange {
            category: UsageCategory::Applications,
            from: Some(50),
            to: None,
        }));
        assert!(delta.limit_changes.contains(&LimitChange {
            category: UsageCategory::Resumes,
            from: Some(5),
            to: Some(20),
        }));
    }

    #[test]
    fn test_feature_delta_same_plan_is_empty() {
        let catalog = PlanCatalog::default();
        let pro = catalog.plan(Tier::Pro).unwrap();
        assert!(feature_delta(pro, pro).is_empty());
    }

    // ========================================================================
    // Scheduling Tests
    // ========================================================================

    #[test]
    fn test_upgrade_is_immediate() {
        let subscriber =
            Subscriber::new(Tier::Plus, BillingCycle::Monthly)
                .with_next_billing_date(date(2026, 11, 1));
        assert_eq!(
            effective_date(ChangeDirection::Upgrade, &subscriber),
            EffectiveDate::Immediately
        );
    }

    #[test]
    fn test_downgrade_waits_for_renewal() {
        let subscriber =
            Subscriber::new(Tier::Pro, BillingCycle::Monthly)
                .with_next_billing_date(date(2026, 11, 1));
        assert_eq!(
            effective_date(ChangeDirection::Downgrade, &subscriber),
            EffectiveDate::NextBillingDate(date(2026, 11, 1))
        );

        let unknown = Subscriber::new(Tier::Pro, BillingCycle::Monthly);
        assert_eq!(
            effective_date(ChangeDirection::Downgrade, &unknown),
            EffectiveDate::EndOfCurrentPeriod
        );
    }

    // ========================================================================
    // Quote Tests
    // ========================================================================

    #[test]
    fn test_quote_upgrade_monthly() {
        let calculator = PlanChangeCalculator::default();
        let subscriber = Subscriber::new(Tier::Plus, BillingCycle::Monthly);

        let quote = calculator.quote(&subscriber, Tier::Pro, BillingCycle::Monthly, None).unwrap();
        assert_eq!(quote.direction, ChangeDirection::Upgrade);
        assert_eq!(quote.plan_name, "Pro");
        assert_eq!(quote.list_price, Decimal::from(49));
        assert_eq!(quote.price_due, Decimal::from(49));
        assert_eq!(quote.discount, None);
        assert_eq!(quote.annual_savings, None);
        assert_eq!(quote.prorated_charge, Some(Decimal::new(395, 1)));
        assert_eq!(quote.effective, EffectiveDate::Immediately);
    }

    #[test]
    fn test_quote_upgrade_annual_with_discount() {
        let calculator = PlanChangeCalculator::default();
        let subscriber = Subscriber::new(Tier::Free, BillingCycle::Monthly);

        let quote = calculator
            .quote(&subscriber, Tier::Plus, BillingCycle::Annual, Some("firstmonth50"))
            .unwrap();
        assert_eq!(quote.list_price, Decimal::from(190));
        assert_eq!(quote.price_due, Decimal::from(95));
        assert_eq!(quote.annual_savings, Some(Decimal::from(38)));
        let discount = quote.discount.unwrap();
        assert_eq!(discount.code, "FIRSTMONTH50");
        assert_eq!(discount.amount_off, Decimal::from(95));
    }

    #[test]
    fn test_quote_downgrade_has_no_proration() {
        let calculator = PlanChangeCalculator::default();
        let subscriber = Subscriber::new(Tier::Premium, BillingCycle::Annual)
            .with_next_billing_date(date(2027, 3, 1));

        let quote = calculator.quote(&subscriber, Tier::Plus, BillingCycle::Annual, None).unwrap();
        assert!(quote.request.is_downgrade);
        assert_eq!(quote.direction, ChangeDirection::Downgrade);
        assert_eq!(quote.prorated_charge, None);
        assert_eq!(quote.effective, EffectiveDate::NextBillingDate(date(2027, 3, 1)));
        assert!(!quote.feature_delta.lost.is_empty());
    }

    #[test]
    fn test_quote_rejects_ineligible_code() {
        let calculator = PlanChangeCalculator::default();
        let subscriber = Subscriber::new(Tier::Free, BillingCycle::Monthly);

        let err = calculator
            .quote(&subscriber, Tier::Pro, BillingCycle::Monthly, Some("FIRSTMONTH50"))
            .unwrap_err();
        assert!(err.is_discount_rejection());
    }

    #[test]
    fn test_quote_blank_code_is_ignored() {
        let calculator = PlanChangeCalculator::default();
        let subscriber = Subscriber::new(Tier::Free, BillingCycle::Monthly);

        let quote =
            calculator.quote(&subscriber, Tier::Pro, BillingCycle::Monthly, Some("")).unwrap();
        assert_eq!(quote.discount, None);
    }

    #[test]
    fn test_quote_same_tier_rejected() {
        let calculator = PlanChangeCalculator::default();
        let subscriber = Subscriber::new(Tier::Pro, BillingCycle::Monthly);

        let err = calculator.quote(&subscriber, Tier::Pro, BillingCycle::Annual, None).unwrap_err();
        assert_eq!(err, BillingError::NoChange(Tier::Pro));
    }

    #[test]
    fn test_quote_at_price_ceiling_with_full_discount() {
        let plans = PlanCatalog::default()
            .iter()
            .cloned()
            .map(|mut plan| {
                if plan.tier == Tier::Plus {
                    plan.monthly_price = MAX_PRICE;
                    plan.annual_price = MAX_PRICE;
                }
                plan
            })
            .collect();
        let calculator = PlanChangeCalculator::new(
            PlanCatalog::new(plans).unwrap(),
            DiscountTable::new(vec![DiscountCode::new(
                "ALL",
                Decimal::ONE_HUNDRED,
                vec![Tier::Plus],
            )])
            .unwrap(),
        );
        let subscriber = Subscriber::new(Tier::Free, BillingCycle::Monthly);

        let quote =
            calculator.quote(&subscriber, Tier::Plus, BillingCycle::Annual, Some("ALL")).unwrap();
        assert_eq!(quote.list_price, MAX_PRICE);
        assert_eq!(quote.price_due, Decimal::ZERO);
        assert_eq!(quote.prorated_charge, Some(MAX_PRICE));
        assert_eq!(quote.annual_savings, Some(MAX_PRICE * Decimal::from(11)));
    }

    #[test]
    fn test_quote_serializes_effective_date() {
        let calculator = PlanChangeCalculator::default();
        let subscriber = Subscriber::new(Tier::Pro, BillingCycle::Monthly)
            .with_next_billing_date(date(2026, 11, 16));

        let quote = calculator.quote(&subscriber, Tier::Free, BillingCycle::Monthly, None).unwrap();
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["direction"], "downgrade");
        assert_eq!(json["effective"]["type"], "next_billing_date");
        assert_eq!(json["effective"]["date"], "2026-11-16");
    }
}
