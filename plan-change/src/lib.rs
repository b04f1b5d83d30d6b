//! Plan-Change: subscription pricing for the job-search product
//!
//! Computes everything the pricing page and the upgrade/downgrade dialog show
//! when a subscriber changes plan: the price for a billing cycle, annual
//! savings, discount codes, a proration estimate for upgrades and the
//! features gained or lost.
//!
//! Every operation is a pure, synchronous function over static plan and
//! discount tables. Nothing here talks to a payment provider; the amounts are
//! for display, and checkout charges whatever the provider computes.
//!
//! # Quick Start
//!
//! ```rust
//! use plan_change::{BillingCycle, PlanChangeCalculator, Subscriber, Tier, pricing};
//!
//! # fn example() -> plan_change::Result<()> {
//! let calculator = PlanChangeCalculator::default();
//! let subscriber = Subscriber::new(Tier::Plus, BillingCycle::Monthly);
//!
//! let quote = calculator.quote(&subscriber, Tier::Pro, BillingCycle::Annual, Some("SAVE20"))?;
//!
//! println!("{} ({})", quote.plan_name, quote.direction);
//! println!("Due: {}", pricing::display_amount(quote.price_due));
//! if let Some(charge) = quote.prorated_charge {
//!     println!("Estimated charge today: {}", pricing::display_amount(charge));
//! }
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Tiers
//!
//! Tiers are a closed, totally ordered set: `free < plus < pro < premium`.
//! A change is an upgrade exactly when the requested tier ranks higher.
//!
//! # Proration
//!
//! [`proration::estimate_proration`] assumes half of the current period is
//! unused. It is an estimate for display, not a billing calculation.
//!
//! # Module Organization
//!
//! - [`billing`]: plan catalog, discounts, pricing, proration and quotes
//! - [`config`]: TOML configuration for the plan and discount tables
//! - [`error`]: error types
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, BillingError>`](error::Result).
//! Discount rejections are ordinary values meant to be shown inline:
//!
//! ```rust
//! use plan_change::{BillingCycle, BillingError, PlanChangeCalculator, Subscriber, Tier};
//!
//! let calculator = PlanChangeCalculator::default();
//! let subscriber = Subscriber::new(Tier::Free, BillingCycle::Monthly);
//!
//! match calculator.quote(&subscriber, Tier::Pro, BillingCycle::Monthly, Some("FIRSTMONTH50")) {
//!     Ok(quote) => println!("Due: {}", quote.price_due),
//!     Err(e) if e.is_discount_rejection() => eprintln!("{e}"),
//!     Err(BillingError::PlanNotFound(tier)) => eprintln!("plan table is missing {tier}"),
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod billing;
pub mod config;
pub mod error;

pub use billing::{
    BillingCycle, ChangeDirection, ChangeQuote, DiscountCode, DiscountTable, PlanCatalog,
    PlanChangeCalculator, PlanChangeRequest, PlanDefinition, Subscriber, Tier, pricing, proration,
};
pub use config::BillingConfig;
pub use error::{BillingError, Result};
