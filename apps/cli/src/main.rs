use clap::Parser;
use novis_cli::{Cli, run};

fn main() -> anyhow::Result<()> {
    run(&Cli::parse())
}
