use std::io::{self, BufRead, Write};

use clap::{Args, Subcommand};
use log::{debug, error};

use crate::config::BankConfig;
use crate::engine::{ACCOUNT_CREATED, BankEngine};
use crate::error::BankError;
use crate::storage::AccountStore;
use crate::transactions::money;

pub const INTRO: &str = "Please create an account or log in.";

pub const HELP: &str = "\
Commands:
  create <first> <last> <account#> <pin>
  login <first> <last> <account#> <pin>
  deposit <amount>
  withdraw <amount>
  balance
  exit     log out
  quit     leave the program";

#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    #[arg(long)]
    pub first: String,
    #[arg(long)]
    pub last: String,
    /// Four digit account number
    #[arg(long = "account")]
    pub account_number: String,
    /// Four digit PIN
    #[arg(long)]
    pub pin: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Open a new account
    Create(CredentialArgs),
    /// Log in and show the current balance
    Balance(CredentialArgs),
    /// Log in and deposit funds
    Deposit {
        #[command(flatten)]
        credentials: CredentialArgs,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// Log in and withdraw funds
    Withdraw {
        #[command(flatten)]
        credentials: CredentialArgs,
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
    },
    /// Read commands line by line from stdin
    Interactive,
}

/// Runs one command against the data file named in `config`.
pub fn run(config: &BankConfig, command: Command) -> Result<(), BankError> {
    let mut engine = BankEngine::from_config(config)?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    execute(&mut engine, command, stdin.lock(), stdout.lock())
}

pub fn execute<S, R, W>(
    engine: &mut BankEngine<S>,
    command: Command,
    input: R,
    mut out: W,
) -> Result<(), BankError>
where
    S: AccountStore,
    R: BufRead,
    W: Write,
{
    match command {
        Command::Create(c) => {
            engine.create_account(&c.first, &c.last, &c.account_number, &c.pin)?;
            writeln!(out, "{}", ACCOUNT_CREATED)?;
        }
        Command::Balance(c) => {
            let greeting = engine.login(&c.first, &c.last, &c.account_number, &c.pin)?;
            writeln!(out, "{}", greeting)?;
        }
        Command::Deposit { credentials: c, amount } => {
            engine.login(&c.first, &c.last, &c.account_number, &c.pin)?;
            let receipt = engine.deposit(&amount)?;
            writeln!(out, "{}", receipt)?;
        }
        Command::Withdraw { credentials: c, amount } => {
            engine.login(&c.first, &c.last, &c.account_number, &c.pin)?;
            let receipt = engine.withdraw(&amount)?;
            writeln!(out, "{}", receipt)?;
        }
        Command::Interactive => run_interactive(engine, input, out)?,
    }
    Ok(())
}

/// Line mode: one command per line until `quit` or end of input.
/// Mistakes are reported and the loop carries on; storage failures end it.
pub fn run_interactive<S, R, W>(engine: &mut BankEngine<S>, input: R, mut out: W) -> Result<(), BankError>
where
    S: AccountStore,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", INTRO)?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((command, args)) = words.split_first() else {
            continue;
        };
        debug!("interactive command {:?} with {} args", command, args.len());

        let outcome = match (command.to_lowercase().as_str(), args) {
            ("create", [first, last, number, pin]) => engine
                .create_account(first, last, number, pin)
                .map(|_| ACCOUNT_CREATED.to_string()),
            ("login", [first, last, number, pin]) => {
                engine.login(first, last, number, pin).map(|g| g.to_string())
            }
            ("deposit", [amount]) => engine.deposit(amount).map(|r| r.to_string()),
            ("withdraw", [amount]) => engine.withdraw(amount).map(|r| r.to_string()),
            ("balance", []) => engine
                .balance()
                .map(|b| format!("Your current balance: {}", money(b))),
            ("exit", []) | ("logout", []) => {
                engine.logout();
                Ok(INTRO.to_string())
            }
            ("help", []) => Ok(HELP.to_string()),
            ("quit", []) => break,
            _ => Ok(format!("Unrecognised command: {}\n{}", line.trim(), HELP)),
        };

        match outcome {
            Ok(message) => writeln!(out, "{}", message)?,
            Err(err) if err.is_storage_failure() => {
                error!("giving up on interactive session: {}", err);
                return Err(err);
            }
            Err(err) => writeln!(out, "{}", err)?,
        }
    }

    engine.logout();
    out.flush()?;
    Ok(())
}
