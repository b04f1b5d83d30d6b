//! Plan-Change CLI
//!
//! Prices subscription plan changes from the command line using the same
//! calculator the pricing page uses.
//!
//! Usage:
//!   plan-change plans --cycle annual
//!   plan-change quote --current plus --target pro --code SAVE20
//!   plan-change quote --current premium --target plus --next-billing 2026-11-16
//!   plan-change check-config billing.toml
//!
//! # Environment Variables
//!
//! - `LOG_FORMAT`: `json` or `pretty` (default: `pretty`)
//! - `RUST_LOG`: log level filter (default: `info`, or `debug` with `--verbose`)

#![allow(clippy::print_stdout, reason = "the CLI writes its results to stdout")]

mod cli;
mod commands;
mod observability;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use observability::{LogFormat, default_level, init_observability};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_observability(LogFormat::from_env(), default_level(cli.verbose));

    let output = match &cli.command {
        Commands::Plans(args) => {
            commands::plans(&commands::load_calculator(cli.config.as_deref())?, args)
        }
        Commands::Quote(args) => {
            commands::quote(&commands::load_calculator(cli.config.as_deref())?, args)?
        }
        Commands::CheckConfig { path } => commands::check_config(path)?,
    };

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }

    Ok(())
}
