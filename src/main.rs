use std::time::Instant;

use anyhow::Context as _;
use clap::Parser as _;
use problem::Input;
use tracing::info;

mod cli;
mod problem;
pub mod solver;
mod util;

fn main() {
    let cli = cli::Cli::parse();
    cli.init_logging();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &cli::Cli) -> anyhow::Result<()> {
    let input = Input::read(&cli.input)
        .with_context(|| format!("failed to read input from {}", cli.input.display()))?;
    let solver = solver::get_solver(cli.day)?;

    info!(day = cli.day, bytes = input.text().len(), "solving");
    let since = Instant::now();
    let answer = solver
        .solve(&input)
        .with_context(|| format!("day {} failed", cli.day))?;
    info!(elapsed_ms = since.elapsed().as_millis() as u64, "solved");

    println!("{answer}");
    Ok(())
}
