use std::process;

use clap::Parser;
use log::info;

use simple_toy_bank::BankConfig;
use simple_toy_bank::orchestrator::{Command, run};

/// Create accounts, log in and move money in and out of a CSV-backed toy bank
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: BankConfig,

    /// Defaults to `interactive`
    #[command(subcommand)]
    command: Option<Command>,
}

fn main() {
    // Initialize logger (respect RUST_LOG env var if set)
    env_logger::init();

    let cli = Cli::parse();
    info!("starting toy bank with data file: {}", cli.config.data_file.display());

    if let Err(e) = run(&cli.config, cli.command.unwrap_or(Command::Interactive)) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
