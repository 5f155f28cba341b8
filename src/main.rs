//! Command-line entry point for the course planner.

use clap::Parser;

mod cli;

use cli::Cli;

fn main() -> anyhow::Result<()> {
    Cli::parse().run()
}
