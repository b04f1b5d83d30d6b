//! Command implementations.
//!
//! Each command renders to a `String` so the output can be tested without
//! capturing stdout.

use std::{fmt::Write as _, path::Path};

use anyhow::{Context, Result};
use plan_change::{
    BillingConfig, BillingCycle, PlanChangeCalculator, Subscriber,
    pricing::{annual_savings, display_amount, monthly_equivalent, price_for, savings_percent},
};
use tracing::debug;

use crate::cli::{PlansArgs, QuoteArgs};

/// Builds the calculator from `--config`, or the built-in tables.
pub fn load_calculator(config: Option<&Path>) -> Result<PlanChangeCalculator> {
    let config = match config {
        Some(path) => BillingConfig::from_path(path).with_context(|| {
            format!("failed to load billing configuration from {}", path.display())
        })?,
        None => {
            debug!("using built-in plan and discount tables");
            BillingConfig::default()
        }
    };
    Ok(PlanChangeCalculator::from_config(config))
}

/// Renders the plan list for one billing cycle.
pub fn plans(calculator: &PlanChangeCalculator, args: &PlansArgs) -> String {
    let mut out = String::new();
    for plan in calculator.catalog().iter() {
        let price = display_amount(price_for(plan, args.cycle));
        let _ = write!(
            out,
            "{:<8} {:<10} {}/{}",
            plan.tier,
            plan.name,
            price,
            args.cycle.interval_display()
        );
        if args.cycle == BillingCycle::Annual && !plan.is_free() {
            let _ = write!(
                out,
                "  ({}/month, save {} / {}%)",
                display_amount(monthly_equivalent(plan, args.cycle)),
                display_amount(annual_savings(plan)),
                savings_percent(plan)
            );
        }
        out.push('\n');
    }
    out
}

/// Renders a plan-change quote as pretty JSON.
pub fn quote(calculator: &PlanChangeCalculator, args: &QuoteArgs) -> Result<String> {
    let mut subscriber = Subscriber::new(args.current, args.cycle);
    if let Some(date) = args.next_billing {
        subscriber = subscriber.with_next_billing_date(date);
    }

    let quote = calculator.quote(
        &subscriber,
        args.target,
        args.target_cycle.unwrap_or(args.cycle),
        args.code.as_deref(),
    )?;

    serde_json::to_string_pretty(&quote).context("failed to serialize quote")
}

/// Validates a configuration file and summarizes it.
pub fn check_config(path: &Path) -> Result<String> {
    let config = BillingConfig::from_path(path)
        .with_context(|| format!("invalid billing configuration {}", path.display()))?;
    Ok(format!(
        "{}: {} plans, {} discount codes\n",
        path.display(),
        config.plans().iter().count(),
        config.discounts().codes().len()
    ))
}
