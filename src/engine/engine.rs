use std::fmt;

use log::{debug, info, warn};
use rust_decimal::Decimal;

use crate::accounts::{AccountRecord, Credentials};
use crate::config::BankConfig;
use crate::error::BankError;
use crate::storage::{AccountStore, CsvFileStore};
use crate::transactions::{Receipt, Transaction, TransactionKind, money};

pub const ACCOUNT_CREATED: &str = "Account created! Please log in.";

/// What the user sees right after logging in.
#[derive(Debug, Clone, PartialEq)]
pub struct Greeting {
    pub name: String,
    pub balance: Decimal,
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Welcome {}!\nYour current balance: {}", self.name, money(self.balance))
    }
}

pub struct BankEngine<S: AccountStore> {
    store: S,
    initial_balance: Decimal,
    session: Option<AccountRecord>,
}

impl BankEngine<CsvFileStore> {
    pub fn from_config(config: &BankConfig) -> Result<Self, BankError> {
        config.validate()?;
        debug!("using data file {}", config.data_file.display());
        Ok(Self::new(CsvFileStore::new(&config.data_file), config.initial_balance))
    }
}

impl<S: AccountStore> BankEngine<S> {
    pub fn new(store: S, initial_balance: Decimal) -> Self {
        Self {
            store,
            initial_balance,
            session: None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The logged in account, if any.
    pub fn session(&self) -> Option<&AccountRecord> {
        self.session.as_ref()
    }

    fn require_session(&self) -> Result<&AccountRecord, BankError> {
        self.session.as_ref().ok_or(BankError::NotLoggedIn)
    }

    /// Validate the input, make sure neither the holder nor the number is taken,
    /// then append the new account with the initial balance.
    pub fn create_account(
        &mut self,
        first: &str,
        last: &str,
        account_number: &str,
        pin: &str,
    ) -> Result<AccountRecord, BankError> {
        let credentials = Credentials::parse(first, last, account_number, pin)?;

        // Raw rows, so a malformed PIN or balance still reserves its number
        for existing in self.store.identities()? {
            if existing.account_number != credentials.account_number.as_str() {
                continue;
            }
            if existing.first.to_lowercase() == credentials.first
                && existing.last.to_lowercase() == credentials.last
            {
                return Err(BankError::AccountExists);
            }
            return Err(BankError::AccountNumberTaken);
        }

        let record = AccountRecord::open(credentials, self.initial_balance);
        self.store.append(&record)?;
        info!("created account {}", record.account_number);
        Ok(record)
    }

    /// Starts a session. Any previous session ends first, even if this login fails.
    pub fn login(
        &mut self,
        first: &str,
        last: &str,
        account_number: &str,
        pin: &str,
    ) -> Result<Greeting, BankError> {
        self.logout();
        let credentials = Credentials::parse(first, last, account_number, pin)?;

        if !self.store.exists() {
            return Err(BankError::NoAccounts);
        }

        // First row with this holder and number decides
        let record = self
            .store
            .load()?
            .into_iter()
            .find(|r| r.matches_identity(&credentials))
            .ok_or(BankError::AccountNotFound)?;

        if record.pin != credentials.pin {
            warn!("incorrect PIN for account {}", record.account_number);
            return Err(BankError::IncorrectPin);
        }

        info!("account {} logged in", record.account_number);
        let greeting = Greeting {
            name: record.display_name(),
            balance: record.balance,
        };
        self.session = Some(record);
        Ok(greeting)
    }

    pub fn balance(&self) -> Result<Decimal, BankError> {
        Ok(self.require_session()?.balance)
    }

    pub fn deposit(&mut self, amount_text: &str) -> Result<Receipt, BankError> {
        self.require_session()?;
        self.process_transaction(Transaction::parse(TransactionKind::Deposit, amount_text)?)
    }

    pub fn withdraw(&mut self, amount_text: &str) -> Result<Receipt, BankError> {
        self.require_session()?;
        self.process_transaction(Transaction::parse(TransactionKind::Withdrawal, amount_text)?)
    }

    /// Apply a transaction to the logged in account. The session balance only
    /// changes once the store has accepted the new balance.
    pub fn process_transaction(&mut self, tx: Transaction) -> Result<Receipt, BankError> {
        let mut updated = self.require_session()?.clone();
        let balance = match tx.kind {
            TransactionKind::Deposit => updated.deposit(tx.amount)?,
            TransactionKind::Withdrawal => updated.withdraw(tx.amount)?,
        };

        self.store.update_balance(&updated)?;
        info!(
            "{} of {} on account {}, balance now {}",
            tx.kind, tx.amount, updated.account_number, balance
        );
        self.session = Some(updated);

        Ok(Receipt {
            kind: tx.kind,
            amount: tx.amount,
            balance,
        })
    }

    /// Ends the session. Returns whether one was active.
    pub fn logout(&mut self) -> bool {
        match self.session.take() {
            Some(record) => {
                debug!("account {} logged out", record.account_number);
                true
            }
            None => false,
        }
    }
}
