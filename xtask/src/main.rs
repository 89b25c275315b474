// Host tooling crate: unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod check;
mod doc;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Cortex-M fault status development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check fault-status builds for every Cortex-M profile plus the host
    Check {
        /// Skip clippy and rustfmt
        #[arg(long)]
        quick: bool,
    },
    /// Run all host tests (unit, integration, property and doc tests)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Build fault-status documentation, private items included
    Doc {
        /// Open documentation in browser
        #[arg(long)]
        open: bool,
        /// Document for a Cortex-M target with the hardware block enabled
        /// (e.g. thumbv7em-none-eabihf)
        #[arg(long)]
        target: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { quick } => check::run(quick),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Doc { open, target } => doc::run(open, target.as_deref()),
    }
}
