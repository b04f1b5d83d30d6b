//! Error types for the plan-change calculator.
//!
//! None of the calculator operations perform I/O, so every error here is a
//! value-level outcome meant to be rendered to the user (an inline message
//! next to a discount field, for instance) or reported when configuration is
//! loaded. All errors implement [`std::error::Error`] via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Discount Errors** ([`BillingError::InvalidDiscountCode`],
//!   [`BillingError::IneligibleDiscountCode`]): the code was not accepted
//! - **Lookup Errors** ([`BillingError::PlanNotFound`]): the plan table has no
//!   entry for a tier
//! - **Input Errors** ([`BillingError::UnknownTier`],
//!   [`BillingError::UnknownBillingCycle`], [`BillingError::NoChange`])
//! - **Configuration Errors** ([`BillingError::ConfigError`])
//!
//! # Examples
//!
//! ```
//! use plan_change::{DiscountTable, Tier};
//!
//! let table = DiscountTable::default();
//! let err = table.apply("FIRSTMONTH50", Tier::Pro).unwrap_err();
//! assert!(err.is_discount_rejection());
//! ```

use thiserror::Error;

use crate::billing::Tier;

/// Result type alias for calculator operations.
pub type Result<T> = std::result::Result<T, BillingError>;

/// Errors that can occur while pricing a plan change.
///
/// The messages are user-facing. Callers that only need to know whether a
/// discount code was refused should use [`BillingError::is_discount_rejection`]
/// rather than matching both discount variants.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillingError {
    /// The plan table has no definition for the tier.
    ///
    /// Only reachable through a malformed plan table; the built-in table and
    /// any validated [`BillingConfig`](crate::BillingConfig) define all tiers.
    #[error("No plan is defined for tier '{0}'")]
    PlanNotFound(Tier),

    /// No discount code matches the input.
    #[error("Invalid discount code: {0}")]
    InvalidDiscountCode(String),

    /// The discount code exists but does not apply to the requested tier.
    #[error("Discount code {code} cannot be applied to the {tier} plan")]
    IneligibleDiscountCode {
        /// The code as configured.
        code: String,
        /// The tier the code was applied to.
        tier: Tier,
    },

    /// Text could not be parsed as a tier.
    #[error("Unknown plan tier: {0}")]
    UnknownTier(String),

    /// Text could not be parsed as a billing cycle.
    #[error("Unknown billing cycle: {0} (expected 'monthly' or 'annual')")]
    UnknownBillingCycle(String),

    /// The requested tier is the subscriber's current tier.
    #[error("Requested plan is the current plan ({0})")]
    NoChange(Tier),

    /// Plan or discount configuration is malformed or inconsistent.
    #[error("Invalid billing configuration: {0}")]
    ConfigError(String),

    /// Calendar arithmetic left chrono's supported range.
    #[error("Date out of range: {0}")]
    DateOutOfRange(String),
}

impl BillingError {
    /// Returns `true` when the error means "this discount code was not accepted".
    ///
    /// Both unknown codes and codes that exclude the requested tier collapse
    /// into the same inline message in the pricing UI.
    #[must_use]
    pub const fn is_discount_rejection(&self) -> bool {
        matches!(self, Self::InvalidDiscountCode(_) | Self::IneligibleDiscountCode { .. })
    }
}

impl From<toml::de::Error> for BillingError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigError(err.message().to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = BillingError::PlanNotFound(Tier::Pro);
        assert_eq!(error.to_string(), "No plan is defined for tier 'pro'");
    }

    #[test]
    fn test_invalid_discount_code_display() {
        let error = BillingError::InvalidDiscountCode("BOGUS".into());
        assert_eq!(error.to_string(), "Invalid discount code: BOGUS");
    }

    #[test]
    fn test_ineligible_discount_code_display() {
        let error =
            BillingError::IneligibleDiscountCode { code: "FIRSTMONTH50".into(), tier: Tier::Pro };
        assert_eq!(
            error.to_string(),
            "Discount code FIRSTMONTH50 cannot be applied to the pro plan"
        );
    }

    #[test]
    fn test_no_change_display_covers_cycle_switch() {
        let error = BillingError::NoChange(Tier::Pro);
        assert_eq!(error.to_string(), "Requested plan is the current plan (pro)");
    }

    #[test]
    fn test_discount_rejection_grouping() {
        assert!(BillingError::InvalidDiscountCode("X".into()).is_discount_rejection());
        assert!(
            BillingError::IneligibleDiscountCode { code: "X".into(), tier: Tier::Free }
                .is_discount_rejection()
        );
        assert!(!BillingError::PlanNotFound(Tier::Free).is_discount_rejection());
        assert!(!BillingError::ConfigError("bad".into()).is_discount_rejection());
    }

    #[test]
    fn test_toml_error_conversion() {
        let err = toml::from_str::<toml::Table>("plans = [").unwrap_err();
        let error = BillingError::from(err);
        assert!(matches!(error, BillingError::ConfigError(_)));
    }
}
