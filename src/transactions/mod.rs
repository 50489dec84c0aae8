pub mod transaction;

pub use transaction::{Receipt, Transaction, TransactionKind, money};
