//! Billing configuration.
//!
//! Plan and discount tables can be replaced by a TOML document:
//!
//! ```toml
//! [[plans]]
//! tier = "plus"
//! name = "Plus"
//! monthly_price = 19
//! annual_price = 190
//! cta = "Upgrade to Plus"
//! features = [
//!     { name = "Resume builder", included = true },
//!     { name = "Priority support", included = false },
//! ]
//! limits = { resumes = 5, applications = 50 }
//!
//! [[discounts]]
//! code = "SAVE20"
//! percentage = 20
//! eligible_tiers = ["plus", "pro", "premium"]
//! ```
//!
//! Every tier must be defined. The `discounts` array is optional; leaving it
//! out disables discount codes.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::info;

use crate::{
    billing::{DiscountCode, DiscountTable, PlanCatalog, PlanDefinition},
    error::{BillingError, Result},
};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBillingConfig {
    plans: Vec<PlanDefinition>,
    #[serde(default)]
    discounts: Vec<DiscountCode>,
}

/// Validated plan catalog and discount table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BillingConfig {
    plans: PlanCatalog,
    discounts: DiscountTable,
}

impl BillingConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ConfigError`] if the document does not parse
    /// or the tables fail validation (see [`PlanCatalog::new`] and
    /// [`DiscountTable::new`]).
    ///
    /// # Examples
    ///
    /// ```
    /// use plan_change::BillingConfig;
    ///
    /// let toml = r#"
    ///     plans = [
    ///         { tier = "free", name = "Free", monthly_price = 0, annual_price = 0 },
    ///         { tier = "plus", name = "Plus", monthly_price = 15, annual_price = 150 },
    ///         { tier = "pro", name = "Pro", monthly_price = 40, annual_price = 400 },
    ///         { tier = "premium", name = "Premium", monthly_price = 80, annual_price = 800 },
    ///     ]
    /// "#;
    ///
    /// let config = BillingConfig::from_toml(toml).unwrap();
    /// assert!(config.discounts().codes().is_empty());
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let raw: RawBillingConfig = toml::from_str(toml_str)?;
        Ok(Self {
            plans: PlanCatalog::new(raw.plans)?,
            discounts: DiscountTable::new(raw.discounts)?,
        })
    }

    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`BillingError::ConfigError`] if the file cannot be read or
    /// fails [`BillingConfig::from_toml`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            BillingError::ConfigError(format!("cannot read {}: {e}", path.display()))
        })?;
        let config = Self::from_toml(&contents)?;
        info!(
            path = %path.display(),
            discount_codes = config.discounts.codes().len(),
            "billing configuration loaded"
        );
        Ok(config)
    }

    /// Returns the plan catalog.
    #[must_use]
    pub const fn plans(&self) -> &PlanCatalog {
        &self.plans
    }

    /// Returns the discount table.
    #[must_use]
    pub const fn discounts(&self) -> &DiscountTable {
        &self.discounts
    }

    /// Splits the configuration into its tables.
    #[must_use]
    pub fn into_parts(self) -> (PlanCatalog, DiscountTable) {
        (self.plans, self.discounts)
    }
}
