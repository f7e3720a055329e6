use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_subscriber::{fmt, EnvFilter};

pub const DEFAULT_INPUT: &str = "input.txt";

#[derive(Parser, Debug)]
#[command(name = "aoc2023", version, about = "Advent of Code 2023 solvers")]
pub struct Cli {
    #[arg(
        value_parser = clap::value_parser!(u8).range(1..=25),
        help = "Puzzle day (1-25)"
    )]
    pub day: u8,
    #[arg(short, long, default_value = DEFAULT_INPUT, help = "Puzzle input file")]
    pub input: PathBuf,
    #[arg(short, long, action = ArgAction::Count, help = "Increase log verbosity (-v, -vv, -vvv)")]
    pub verbose: u8,
}

impl Cli {
    /// Logs go to stderr so that stdout carries only the answer line.
    /// `RUST_LOG` takes precedence over `-v`.
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
