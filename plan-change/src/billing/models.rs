//! Plan data models.
//!
//! Defines the closed set of subscription tiers, billing cycles, plan
//! definitions and the subscriber/request values the calculator works on.

use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillingError, Result};

/// Subscription tier.
///
/// Tiers are totally ordered: `Free < Plus < Pro < Premium`. The derived
/// [`Ord`] follows declaration order and agrees with [`Tier::rank`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Free tier.
    Free,
    /// Entry paid tier.
    Plus,
    /// Professional tier.
    Pro,
    /// Top tier.
    Premium,
}

impl Tier {
    /// All tiers in rank order.
    pub const ALL: [Self; 4] = [Self::Free, Self::Plus, Self::Pro, Self::Premium];

    /// Returns the ordinal rank of this tier. Higher rank = more features.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Free => 0,
            Self::Plus => 1,
            Self::Pro => 2,
            Self::Premium => 3,
        }
    }

    /// Returns `true` for every tier except [`Tier::Free`].
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }

    /// Returns the lowercase identifier used in configuration and URLs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Plus => "plus",
            Self::Pro => "pro",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tier| tier.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| BillingError::UnknownTier(s.to_owned()))
    }
}

/// Billing frequency.
///
/// Each cycle has its own independently configured price; an annual price is
/// not derived from the monthly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    /// Billed every month.
    #[default]
    Monthly,
    /// Billed once a year.
    Annual,
}

impl BillingCycle {
    /// Returns human-readable interval description.
    #[must_use]
    pub const fn interval_display(self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Annual => "year",
        }
    }

    /// Returns the lowercase identifier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Annual => "annual",
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BillingCycle {
    type Err = BillingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "annual" | "annually" | "yearly" | "year" => Ok(Self::Annual),
            _ => Err(BillingError::UnknownBillingCycle(s.to_owned())),
        }
    }
}

/// Usage category a plan may cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageCategory {
    /// Stored resumes.
    Resumes,
    /// Stored cover letters.
    CoverLetters,
    /// Tracked job applications per month.
    Applications,
    /// AI generation credits per month.
    AiCredits,
}

impl UsageCategory {
    /// Returns the snake-case identifier used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resumes => "resumes",
            Self::CoverLetters => "cover_letters",
            Self::Applications => "applications",
            Self::AiCredits => "ai_credits",
        }
    }
}

impl fmt::Display for UsageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Feature row shown on a plan card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanFeature {
    /// Display name; also the identity used when comparing plans.
    pub name: String,
    /// Whether the plan includes the feature (excluded rows render struck out).
    pub included: bool,
}

impl PlanFeature {
    /// Creates a feature row.
    #[must_use]
    pub fn new(name: impl Into<String>, included: bool) -> Self {
        Self { name: name.into(), included }
    }
}

/// Static definition of one subscription plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanDefinition {
    /// Tier this plan sells.
    pub tier: Tier,
    /// Display name.
    pub name: String,
    /// Price per month on the monthly cycle.
    pub monthly_price: Decimal,
    /// Flat price per year on the annual cycle.
    pub annual_price: Decimal,
    /// Ordered feature rows.
    #[serde(default)]
    pub features: Vec<PlanFeature>,
    /// Usage caps by category. A missing category is unlimited.
    #[serde(default)]
    pub limits: BTreeMap<UsageCategory, u32>,
    /// Call-to-action button text.
    #[serde(default)]
    pub cta: String,
}

impl PlanDefinition {
    /// Returns the cap for a category, `None` meaning unlimited.
    #[must_use]
    pub fn limit(&self, category: UsageCategory) -> Option<u32> {
        self.limits.get(&category).copied()
    }

    /// Returns `true` if the plan has an included feature with this name.
    #[must_use]
    pub fn includes(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f.included && f.name == feature)
    }

    /// Returns `true` if the plan costs nothing on either cycle.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.monthly_price.is_zero()
    }
}

/// Current subscription of the signed-in account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Current tier.
    pub tier: Tier,
    /// Current billing cycle.
    pub cycle: BillingCycle,
    /// Next renewal date, when the billing backend reported one.
    #[serde(default)]
    pub next_billing_date: Option<NaiveDate>,
}

impl Subscriber {
    /// Creates a subscriber with no known renewal date.
    #[must_use]
    pub const fn new(tier: Tier, cycle: BillingCycle) -> Self {
        Self { tier, cycle, next_billing_date: None }
    }

    /// Sets the next renewal date.
    #[must_use]
    pub const fn with_next_billing_date(mut self, date: NaiveDate) -> Self {
        self.next_billing_date = Some(date);
        self
    }
}

/// Direction of a plan change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    /// Moving to a higher-ranked tier.
    Upgrade,
    /// Moving to a lower-ranked tier.
    Downgrade,
}

impl ChangeDirection {
    /// Returns the lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upgrade => "upgrade",
            Self::Downgrade => "downgrade",
        }
    }
}

impl fmt::Display for ChangeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A requested move from the current tier to another one.
///
/// Deserializing re-derives `is_downgrade` from the tiers and rejects a
/// request for the current tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RequestedChange")]
pub struct PlanChangeRequest {
    /// Tier the subscriber is on.
    pub current: Tier,
    /// Tier the subscriber asked for.
    pub requested: Tier,
    /// Billing cycle of the requested plan.
    pub cycle: BillingCycle,
    /// `true` when the requested tier ranks below the current one.
    pub is_downgrade: bool,
}

#[derive(Deserialize)]
struct RequestedChange {
    current: Tier,
    requested: Tier,
    cycle: BillingCycle,
}

impl TryFrom<RequestedChange> for PlanChangeRequest {
    type Error = BillingError;

    fn try_from(raw: RequestedChange) -> Result<Self> {
        let subscriber = Subscriber::new(raw.current, BillingCycle::default());
        Self::new(&subscriber, raw.requested, raw.cycle)
    }
}

impl PlanChangeRequest {
    /// Builds a request for `subscriber` to move to `requested` on `cycle`.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::NoChange`] if `requested` is the current tier.
    pub fn new(subscriber: &Subscriber, requested: Tier, cycle: BillingCycle) -> Result<Self> {
        if subscriber.tier == requested {
            return Err(BillingError::NoChange(requested));
        }
        Ok(Self {
            current: subscriber.tier,
            requested,
            cycle,
            is_downgrade: requested.rank() < subscriber.tier.rank(),
        })
    }

    /// Returns the classified direction of this request.
    #[must_use]
    pub const fn direction(&self) -> ChangeDirection {
        if self.is_downgrade { ChangeDirection::Downgrade } else { ChangeDirection::Upgrade }
    }
}
