//! CLI argument definitions using clap.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use plan_change::{BillingCycle, Tier};

#[derive(Parser, Debug)]
#[command(name = "plan-change")]
#[command(version)]
#[command(
    about = "Price subscription plan changes: upgrades, downgrades and discount codes",
    long_about = None
)]
pub struct Cli {
    /// TOML file replacing the built-in plan and discount tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List plans with prices and annual savings
    Plans(PlansArgs),

    /// Quote a change from one plan to another as JSON
    Quote(QuoteArgs),

    /// Validate a billing configuration file
    CheckConfig {
        /// Path to the TOML file
        path: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct PlansArgs {
    /// Billing cycle to price (monthly or annual)
    #[arg(long, default_value = "monthly")]
    pub cycle: BillingCycle,
}

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// Current plan (free, plus, pro, premium)
    #[arg(long)]
    pub current: Tier,

    /// Current billing cycle
    #[arg(long, default_value = "monthly")]
    pub cycle: BillingCycle,

    /// Requested plan
    #[arg(long)]
    pub target: Tier,

    /// Requested billing cycle (defaults to the current cycle)
    #[arg(long)]
    pub target_cycle: Option<BillingCycle>,

    /// Discount code to apply to the requested plan
    #[arg(long)]
    pub code: Option<String>,

    /// Next renewal date of the current subscription (YYYY-MM-DD)
    #[arg(long)]
    pub next_billing: Option<NaiveDate>,
}
