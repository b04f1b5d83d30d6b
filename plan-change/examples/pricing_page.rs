//! Pricing page example printing every plan card.
//!
//! Shows the values the pricing page renders for each billing cycle: price,
//! per-month equivalent, annual savings, features and the call to action.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example pricing_page
//! ```

#![allow(
    clippy::print_stdout,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use plan_change::{
    BillingCycle, PlanCatalog,
    pricing::{annual_savings, display_amount, monthly_equivalent, price_for, savings_percent},
};

fn main() {
    let catalog = PlanCatalog::default();

    for cycle in [BillingCycle::Monthly, BillingCycle::Annual] {
        println!("== Billed {} ==\n", cycle);

        for plan in catalog.iter() {
            println!(
                "{:<8} {}/{}",
                plan.name,
                display_amount(price_for(plan, cycle)),
                cycle.interval_display()
            );

            if cycle == BillingCycle::Annual && !plan.is_free() {
                println!(
                    "         {}/month billed annually, save {} ({}%)",
                    display_amount(monthly_equivalent(plan, cycle)),
                    display_amount(annual_savings(plan)),
                    savings_percent(plan)
                );
            }

            for feature in &plan.features {
                let mark = if feature.included { "✓" } else { "✗" };
                println!("         {} {}", mark, feature.name);
            }
            println!("         [{}]\n", plan.cta);
        }
    }
}
