pub mod csv_store;
pub mod memory_store;

pub use csv_store::CsvFileStore;
pub use memory_store::MemoryStore;

use crate::accounts::AccountRecord;
use crate::error::BankError;

/// Holder and account number of a stored row, kept even when the rest of the row is malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredIdentity {
    pub first: String,
    pub last: String,
    pub account_number: String,
}

/// Backing table for account records.
///
/// Every call goes to the backing table; nothing is cached between calls.
pub trait AccountStore {
    /// Whether the table has been created yet.
    fn exists(&self) -> bool;

    /// All well-formed records in table order. Empty when the table does not exist.
    fn load(&self) -> Result<Vec<AccountRecord>, BankError>;

    /// Holder and number of every row with a full set of fields, in table order.
    /// Rows with an unreadable PIN or balance still count here.
    fn identities(&self) -> Result<Vec<StoredIdentity>, BankError>;

    /// Adds a record, creating the table (and its header) when absent.
    fn append(&mut self, record: &AccountRecord) -> Result<(), BankError>;

    /// Sets the balance of every row with the record's names, account number and PIN.
    fn update_balance(&mut self, record: &AccountRecord) -> Result<(), BankError>;
}
