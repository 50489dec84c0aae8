pub mod accounts;
pub mod config;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod storage;
pub mod transactions;

pub use accounts::{AccountRecord, Credentials};
pub use config::BankConfig;
pub use engine::BankEngine;
pub use error::BankError;
pub use orchestrator::run;
pub use storage::{AccountStore, CsvFileStore, MemoryStore, StoredIdentity};
pub use transactions::{Receipt, Transaction, TransactionKind};
