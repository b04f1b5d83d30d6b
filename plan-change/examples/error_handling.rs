//! Error handling example showing how a pricing dialog reacts to each error.
//!
//! Every calculator error is a plain value: discount rejections become an
//! inline message under the code field, the rest indicate bad input or a
//! broken plan table.
//!
//! # Running this example
//!
//! ```bash
//! cargo run --example error_handling
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::uninlined_format_args,
    reason = "examples are allowed to use println and simple formatting"
)]

use plan_change::{
    BillingConfig, BillingCycle, BillingError, ChangeQuote, PlanChangeCalculator, Subscriber, Tier,
    pricing::display_amount,
};

fn main() {
    println!("Plan-Change: Error Handling Example\n");

    let calculator = PlanChangeCalculator::default();
    let subscriber = Subscriber::new(Tier::Plus, BillingCycle::Monthly);

    // Example 1: Code that exists but excludes the requested tier
    println!("Example 1: FIRSTMONTH50 on the Pro plan (should be rejected)");
    handle_quote_result(calculator.quote(
        &subscriber,
        Tier::Pro,
        BillingCycle::Monthly,
        Some("FIRSTMONTH50"),
    ));

    // Example 2: Code that does not exist
    println!("\nExample 2: Unknown code (should be rejected)");
    handle_quote_result(calculator.quote(
        &subscriber,
        Tier::Pro,
        BillingCycle::Monthly,
        Some("SAVE99"),
    ));

    // Example 3: Requesting the current plan
    println!("\nExample 3: Requesting the current plan");
    handle_quote_result(calculator.quote(&subscriber, Tier::Plus, BillingCycle::Annual, None));

    // Example 4: Parsing user input
    println!("\nExample 4: Parsing an unknown tier name");
    match "enterprise".parse::<Tier>() {
        Ok(tier) => println!("   Unexpected success: {}", tier),
        Err(e) => println!("   ✓ Caught input error: {}", e),
    }

    // Example 5: Broken configuration
    println!("\nExample 5: Loading a plan table with a missing tier");
    match BillingConfig::from_toml(
        r#"plans = [{ tier = "free", name = "Free", monthly_price = 0, annual_price = 0 }]"#,
    ) {
        Ok(_) => println!("   Unexpected success"),
        Err(e) => println!("   ✓ Caught configuration error: {}", e),
    }

    // Example 6: A valid quote
    println!("\nExample 6: SAVE20 on the Pro plan");
    handle_quote_result(calculator.quote(
        &subscriber,
        Tier::Pro,
        BillingCycle::Monthly,
        Some("save20"),
    ));

    println!("\n✓ Error handling examples complete");
}

/// Demonstrates how each outcome maps to what the dialog shows.
fn handle_quote_result(result: Result<ChangeQuote, BillingError>) {
    match result {
        Ok(quote) => {
            println!("   ✓ {} to {}", quote.direction, quote.plan_name);
            println!("   Due: {}", display_amount(quote.price_due));
        }

        // Discount rejections - show inline, let the user edit the code
        Err(e) if e.is_discount_rejection() => {
            eprintln!("   ✗ {}", e);
            eprintln!("   → Show: inline message under the discount field");
        }

        // The button for the current plan is disabled in the UI
        Err(BillingError::NoChange(tier)) => {
            eprintln!("   ✗ Already on {}", tier);
            eprintln!("   → Show: nothing, the action should not have been offered");
        }

        // Configuration errors - fix the plan table
        Err(BillingError::PlanNotFound(tier)) => {
            eprintln!("   ✗ Plan table has no {} plan", tier);
            eprintln!("   → Fix: add the tier to the billing configuration");
        }

        Err(e) => {
            eprintln!("   ✗ Other error: {}", e);
        }
    }
}
