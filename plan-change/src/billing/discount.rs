//! Discount codes.
//!
//! Codes match case-insensitively but otherwise exactly: no trimming, no
//! prefix matching. A matched code must also list the requested tier.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, warn};

use super::models::Tier;
use crate::error::{BillingError, Result};

/// Percentage-off promotional code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode {
    /// Code as configured (canonical casing).
    pub code: String,
    /// Percentage off, in `(0, 100]`.
    pub percentage: Decimal,
    /// Tiers the code may be applied to.
    pub eligible_tiers: Vec<Tier>,
}

impl DiscountCode {
    /// Creates a discount code.
    #[must_use]
    pub fn new(code: impl Into<String>, percentage: Decimal, eligible_tiers: Vec<Tier>) -> Self {
        Self { code: code.into(), percentage, eligible_tiers }
    }

    /// Returns `true` if `input` names this code, ignoring ASCII case.
    #[must_use]
    pub fn matches(&self, input: &str) -> bool {
        self.code.eq_ignore_ascii_case(input)
    }

    /// Returns `true` if the code may be applied to `tier`.
    #[must_use]
    pub fn applies_to(&self, tier: Tier) -> bool {
        self.eligible_tiers.contains(&tier)
    }

    fn validate(&self) -> Result<()> {
        if self.code.is_empty() {
            return Err(BillingError::ConfigError("discount code cannot be empty".into()));
        }
        if self.percentage <= Decimal::ZERO || self.percentage > Decimal::ONE_HUNDRED {
            return Err(BillingError::ConfigError(format!(
                "discount {} percentage must be in (0, 100], got {}",
                self.code, self.percentage
            )));
        }
        if self.eligible_tiers.is_empty() {
            return Err(BillingError::ConfigError(format!(
                "discount {} must list at least one eligible tier",
                self.code
            )));
        }
        Ok(())
    }
}

/// Table of accepted discount codes.
///
/// Deserializing goes through [`DiscountTable::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiscountTable {
    codes: Vec<DiscountCode>,
}

impl Default for DiscountTable {
    /// The promotional codes offered on the pricing page.
    fn default() -> Self {
        Self {
            codes: vec![
                DiscountCode::new(
                    "SAVE20",
                    Decimal::from(20),
                    vec![Tier::Plus, Tier::Pro, Tier::Premium],
                ),
                DiscountCode::new("FIRSTMONTH50", Decimal::from(50), vec![Tier::Plus]),
            ],
        }
    }
}

impl<'de> Deserialize<'de> for DiscountTable {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let codes = Vec::<DiscountCode>::deserialize(deserializer)?;
        Self::new(codes).map_err(serde::de::Error::custom)
    }
}

impl DiscountTable {
    /// Builds a table after validating every code.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ConfigError`] if a code is empty, has a
    /// percentage outside `(0, 100]`, lists no tiers, or duplicates another
    /// code ignoring case.
    pub fn new(codes: Vec<DiscountCode>) -> Result<Self> {
        let table = Self { codes };
        table.validate()?;
        Ok(table)
    }

    /// Validates every code and checks codes are unique ignoring case.
    ///
    /// # Errors
    ///
    /// See [`DiscountTable::new`].
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.codes.len());
        for code in &self.codes {
            code.validate()?;
            if !seen.insert(code.code.to_ascii_uppercase()) {
                return Err(BillingError::ConfigError(format!(
                    "duplicate discount code {}",
                    code.code
                )));
            }
        }
        Ok(())
    }

    /// Looks up `input` and checks it is eligible for `tier`.
    ///
    /// # Errors
    ///
    /// - [`BillingError::InvalidDiscountCode`] if no code matches
    /// - [`BillingError::IneligibleDiscountCode`] if the code excludes `tier`
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_change::{DiscountTable, Tier};
    /// use rust_decimal::Decimal;
    ///
    /// let table = DiscountTable::default();
    /// let code = table.apply("save20", Tier::Plus).unwrap();
    /// assert_eq!(code.percentage, Decimal::from(20));
    /// assert!(table.apply("FIRSTMONTH50", Tier::Pro).is_err());
    /// ```
    pub fn apply(&self, input: &str, tier: Tier) -> Result<&DiscountCode> {
        let Some(code) = self.codes.iter().find(|c| c.matches(input)) else {
            warn!(tier = %tier, "discount code not recognised");
            return Err(BillingError::InvalidDiscountCode(input.to_owned()));
        };

        if !code.applies_to(tier) {
            warn!(code = %code.code, tier = %tier, "discount code not eligible for tier");
            return Err(BillingError::IneligibleDiscountCode { code: code.code.clone(), tier });
        }

        debug!(code = %code.code, percentage = %code.percentage, "discount code accepted");
        Ok(code)
    }

    /// Returns the configured codes.
    #[must_use]
    pub fn codes(&self) -> &[DiscountCode] {
        &self.codes
    }
}
