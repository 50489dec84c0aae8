use thiserror::Error;

use crate::accounts::AccountNumber;
use crate::transactions::TransactionKind;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("All fields must be filled.")]
    MissingFields,
    #[error("Account number and PIN must be 4 digits")]
    InvalidDigits,
    #[error("Account already exists, please login.")]
    AccountExists,
    #[error("Account number is already taken, please choose another.")]
    AccountNumberTaken,
    #[error("No accounts exist yet. Please create an account to proceed.")]
    NoAccounts,
    #[error("Incorrect PIN, please try again.")]
    IncorrectPin,
    #[error(
        "No account found with those details. Please verify account number and other details are correct."
    )]
    AccountNotFound,
    #[error("Please log in first.")]
    NotLoggedIn,
    #[error("Amount must be a number: {0:?}")]
    InvalidAmount(String),
    #[error("Amount is too large")]
    AmountTooLarge,
    #[error("Insufficient funds")]
    InsufficientFunds,
    #[error("{0} amount must be positive")]
    NonPositiveAmount(TransactionKind),
    #[error("account {0} is no longer present in the data file")]
    RecordVanished(AccountNumber),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl BankError {
    /// Reading or writing the data file failed; nothing the user typed can fix it.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, BankError::Io(_) | BankError::Csv(_))
    }
}
