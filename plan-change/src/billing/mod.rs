//! Subscription plan-change pricing.
//!
//! This module provides the plan catalog, discount codes, price arithmetic,
//! the proration estimate and the plan-change quote that ties them together.

pub mod catalog;
pub mod change;
pub mod discount;
pub mod models;
pub mod pricing;
pub mod proration;

#[cfg(test)]
mod tests;

pub use catalog::{MAX_PRICE, PlanCatalog};
pub use change::{
    AppliedDiscount, ChangeQuote, EffectiveDate, FeatureDelta, LimitChange, PlanChangeCalculator,
    classify_change, effective_date, feature_delta,
};
pub use discount::{DiscountCode, DiscountTable};
pub use models::{
    BillingCycle, ChangeDirection, PlanChangeRequest, PlanDefinition, PlanFeature, Subscriber,
    Tier, UsageCategory,
};
pub use pricing::{
    annual_savings, discounted_price, display_amount, monthly_equivalent, price_for,
    savings_percent,
};
pub use proration::{estimate_proration, next_billing_date};
