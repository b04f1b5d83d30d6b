//! Plan catalog.
//!
//! The static table of plan definitions shown on the pricing page.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::models::{PlanDefinition, PlanFeature, Tier, UsageCategory};
use crate::error::{BillingError, Result};

const MONTHS_PER_YEAR: i64 = 12;

/// Largest price a plan may carry on either cycle.
///
/// Keeps every pricing and proration product far inside `Decimal` range.
pub const MAX_PRICE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Prices are whole cents.
const PRICE_SCALE: u32 = 2;

/// Plan definitions, ordered by tier rank.
///
/// Deserializing goes through [`PlanCatalog::new`], so a decoded catalog is
/// always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlanCatalog {
    plans: Vec<PlanDefinition>,
}

impl PlanCatalog {
    /// Builds a catalog after validating the definitions.
    ///
    /// Plans are stored in rank order regardless of input order.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ConfigError`] if:
    /// - a tier is defined more than once or not at all
    /// - a price is negative, above [`MAX_PRICE`] or has fractional cents
    /// - an annual price exceeds twelve monthly payments
    pub fn new(mut plans: Vec<PlanDefinition>) -> Result<Self> {
        plans.sort_by_key(|p| p.tier);
        let catalog = Self { plans };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validates the catalog. See [`PlanCatalog::new`].
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ConfigError`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        for tier in Tier::ALL {
            match self.plans.iter().filter(|p| p.tier == tier).count() {
                0 => {
                    return Err(BillingError::ConfigError(format!("no plan defined for {tier}")));
                }
                1 => {}
                n => {
                    return Err(BillingError::ConfigError(format!(
                        "tier {tier} is defined {n} times"
                    )));
                }
            }
        }

        for plan in &self.plans {
            for price in [plan.monthly_price, plan.annual_price] {
                validate_price(plan.tier, price)?;
            }
            let yearly_at_monthly =
                plan.monthly_price.checked_mul(Decimal::from(MONTHS_PER_YEAR)).ok_or_else(|| {
                    BillingError::ConfigError(format!(
                        "plan {} monthly price overflows a year of payments",
                        plan.tier
                    ))
                })?;
            if plan.annual_price > yearly_at_monthly {
                return Err(BillingError::ConfigError(format!(
                    "plan {} annual price {} exceeds twelve monthly payments",
                    plan.tier, plan.annual_price
                )));
            }
        }

        Ok(())
    }

    /// Returns the definition for `tier`.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::PlanNotFound`] if the catalog has no such plan.
    pub fn plan(&self, tier: Tier) -> Result<&PlanDefinition> {
        self.plans.iter().find(|p| p.tier == tier).ok_or(BillingError::PlanNotFound(tier))
    }

    /// Iterates plans in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &PlanDefinition> {
        self.plans.iter()
    }
}

fn validate_price(tier: Tier, price: Decimal) -> Result<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(BillingError::ConfigError(format!("plan {tier} has a negative price")));
    }
    if price > MAX_PRICE {
        return Err(BillingError::ConfigError(format!(
            "plan {tier} price {price} exceeds the maximum of {MAX_PRICE}"
        )));
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(BillingError::ConfigError(format!(
            "plan {tier} price {price} has fractional cents"
        )));
    }
    Ok(())
}

impl<'de> Deserialize<'de> for PlanCatalog {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let plans = Vec::<PlanDefinition>::deserialize(deserializer)?;
        Self::new(plans).map_err(serde::de::Error::custom)
    }
}

impl Default for PlanCatalog {
    /// The plans sold on the pricing page.
    fn default() -> Self {
        Self {
            plans: vec![
                builtin_plan(
                    Tier::Free,
                    "Free",
                    0,
                    0,
                    &[
                        ("Resume builder", true),
                        ("Application tracker", true),
                        ("AI cover letters", false),
                        ("Resume analytics", false),
                        ("Priority support", false),
                        ("1:1 career coaching", false),
                    ],
                    &[
                        (UsageCategory::Resumes, 1),
                        (UsageCategory::CoverLetters, 1),
                        (UsageCategory::Applications, 10),
                        (UsageCategory::AiCredits, 5),
                    ],
                    "Get started",
                ),
                builtin_plan(
                    Tier::Plus,
                    "Plus",
                    19,
                    190,
                    &[
                        ("Resume builder", true),
                        ("Application tracker", true),
                        ("AI cover letters", true),
                        ("Resume analytics", false),
                        ("Priority support", false),
                        ("1:1 career coaching", false),
                    ],
                    &[
                        (UsageCategory::Resumes, 5),
                        (UsageCategory::CoverLetters, 10),
                        (UsageCategory::Applications, 50),
                        (UsageCategory::AiCredits, 100),
                    ],
                    "Upgrade to Plus",
                ),
                builtin_plan(
                    Tier::Pro,
                    "Pro",
                    49,
                    490,
                    &[
                        ("Resume builder", true),
                        ("Application tracker", true),
                        ("AI cover letters", true),
                        ("Resume analytics", true),
                        ("Priority support", true),
                        ("1:1 career coaching", false),
                    ],
                    &[
                        (UsageCategory::Resumes, 20),
                        (UsageCategory::CoverLetters, 50),
                        (UsageCategory::AiCredits, 500),
                    ],
                    "Upgrade to Pro",
                ),
                builtin_plan(
                    Tier::Premium,
                    "Premium",
                    99,
                    990,
                    &[
                        ("Resume builder", true),
                        ("Application tracker", true),
                        ("AI cover letters", true),
                        ("Resume analytics", true),
                        ("Priority support", true),
                        ("1:1 career coaching", true),
                    ],
                    &[],
                    "Upgrade to Premium",
                ),
            ],
        }
    }
}

fn builtin_plan(
    tier: Tier,
    name: &str,
    monthly: i64,
    annual: i64,
    features: &[(&str, bool)],
    limits: &[(UsageCategory, u32)],
    cta: &str,
) -> PlanDefinition {
    PlanDefinition {
        tier,
        name: name.to_owned(),
        monthly_price: Decimal::from(monthly),
        annual_price: Decimal::from(annual),
        features: features
            .iter()
            .map(|&(name, included)| PlanFeature::new(name, included))
            .collect(),
        limits: limits.iter().copied().collect::<BTreeMap<_, _>>(),
        cta: cta.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        assert!(PlanCatalog::default().validate().is_ok());
    }

    #[test]
    fn test_default_catalog_prices() {
        let catalog = PlanCatalog::default();
        let prices: Vec<(Tier, Decimal, Decimal)> =
            catalog.iter().map(|p| (p.tier, p.monthly_price, p.annual_price)).collect();
        assert_eq!(
            prices,
            vec![
                (Tier::Free, Decimal::ZERO, Decimal::ZERO),
                (Tier::Plus, Decimal::from(19), Decimal::from(190)),
                (Tier::Pro, Decimal::from(49), Decimal::from(490)),
                (Tier::Premium, Decimal::from(99), Decimal::from(990)),
            ]
        );
    }

    #[test]
    fn test_plan_lookup() {
        let catalog = PlanCatalog::default();
        assert_eq!(catalog.plan(Tier::Pro).unwrap().name, "Pro");
    }

    #[test]
    fn test_new_sorts_by_rank() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans.reverse();
        let catalog = PlanCatalog::new(plans).unwrap();
        let tiers: Vec<Tier> = catalog.iter().map(|p| p.tier).collect();
        assert_eq!(tiers, Tier::ALL.to_vec());
    }

    #[test]
    fn test_missing_tier_rejected() {
        let plans: Vec<PlanDefinition> =
            PlanCatalog::default().iter().filter(|p| p.tier != Tier::Pro).cloned().collect();
        let err = PlanCatalog::new(plans).unwrap_err();
        assert_eq!(err, BillingError::ConfigError("no plan defined for pro".into()));
    }

    #[test]
    fn test_duplicate_tier_rejected() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans.push(plans[1].clone());
        assert!(PlanCatalog::new(plans).is_err());
    }

    #[test]
    fn test_annual_above_twelve_months_rejected() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans[1].annual_price = Decimal::from(229);
        assert!(matches!(PlanCatalog::new(plans).unwrap_err(), BillingError::ConfigError(_)));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans[2].monthly_price = Decimal::from(-1);
        assert!(PlanCatalog::new(plans).is_err());
    }

    #[test]
    fn test_price_above_ceiling_rejected() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans[1].monthly_price = MAX_PRICE + Decimal::ONE;
        let err = PlanCatalog::new(plans).unwrap_err();
        assert!(
            matches!(err, BillingError::ConfigError(msg) if msg.contains("exceeds the maximum"))
        );
    }

    #[test]
    fn test_near_max_decimal_price_rejected_without_overflow() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans[1].monthly_price = Decimal::MAX;
        plans[1].annual_price = Decimal::MAX;
        assert!(matches!(PlanCatalog::new(plans).unwrap_err(), BillingError::ConfigError(_)));
    }

    #[test]
    fn test_ceiling_price_accepted() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans[3].monthly_price = MAX_PRICE;
        plans[3].annual_price = MAX_PRICE;
        assert!(PlanCatalog::new(plans).is_ok());
    }

    #[test]
    fn test_fractional_cents_rejected() {
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans[1].monthly_price = Decimal::new(19_005, 3);
        assert!(PlanCatalog::new(plans).is_err());

        // Trailing zeros are whole cents.
        let mut plans: Vec<PlanDefinition> = PlanCatalog::default().iter().cloned().collect();
        plans[1].monthly_price = Decimal::new(19_000, 3);
        assert!(PlanCatalog::new(plans).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let catalog = PlanCatalog::default();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(serde_json::from_str::<PlanCatalog>(&json).unwrap(), catalog);

        let partial = serde_json::to_string(&catalog.iter().take(2).collect::<Vec<_>>()).unwrap();
        let err = serde_json::from_str::<PlanCatalog>(&partial).unwrap_err();
        assert!(err.to_string().contains("no plan defined for pro"));
    }

    #[test]
    fn test_unvalidated_catalog_reports_missing_plan() {
        let catalog = PlanCatalog { plans: Vec::new() };
        assert_eq!(catalog.plan(Tier::Plus).unwrap_err(), BillingError::PlanNotFound(Tier::Plus));
    }
}
