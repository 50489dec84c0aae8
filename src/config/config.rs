use std::path::PathBuf;

use clap::Args;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::BankError;

pub const DEFAULT_DATA_FILE: &str = "data.csv";
pub const DEFAULT_INITIAL_BALANCE: Decimal = dec!(100);

#[derive(Debug, Clone, Args)]
pub struct BankConfig {
    /// CSV file holding every account
    #[arg(long, env = "BANK_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Balance credited to newly created accounts
    #[arg(long, env = "BANK_INITIAL_BALANCE", default_value = "100")]
    pub initial_balance: Decimal,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            initial_balance: DEFAULT_INITIAL_BALANCE,
        }
    }
}

impl BankConfig {
    pub fn validate(&self) -> Result<(), BankError> {
        if self.initial_balance < Decimal::ZERO {
            return Err(BankError::InvalidConfig(format!(
                "initial balance must not be negative, got {}",
                self.initial_balance
            )));
        }
        if self.data_file.as_os_str().is_empty() {
            return Err(BankError::InvalidConfig("data file path is empty".to_string()));
        }
        Ok(())
    }
}
