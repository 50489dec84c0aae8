use super::{AccountStore, StoredIdentity};
use crate::accounts::AccountRecord;
use crate::error::BankError;

/// Account table held in process memory. `None` until the first account is appended.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    records: Option<Vec<AccountRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AccountRecord>) -> Self {
        Self {
            records: Some(records),
        }
    }

    pub fn records(&self) -> &[AccountRecord] {
        self.records.as_deref().unwrap_or_default()
    }
}

impl AccountStore for MemoryStore {
    fn exists(&self) -> bool {
        self.records.is_some()
    }

    fn load(&self) -> Result<Vec<AccountRecord>, BankError> {
        Ok(self.records().to_vec())
    }

    fn identities(&self) -> Result<Vec<StoredIdentity>, BankError> {
        Ok(self
            .records()
            .iter()
            .map(|r| StoredIdentity {
                first: r.first.clone(),
                last: r.last.clone(),
                account_number: r.account_number.to_string(),
            })
            .collect())
    }

    fn append(&mut self, record: &AccountRecord) -> Result<(), BankError> {
        self.records.get_or_insert_with(Vec::new).push(record.clone());
        Ok(())
    }

    fn update_balance(&mut self, record: &AccountRecord) -> Result<(), BankError> {
        let mut updated = 0;
        for stored in self.records.iter_mut().flatten() {
            if stored.first.to_lowercase() == record.first.to_lowercase()
                && stored.last.to_lowercase() == record.last.to_lowercase()
                && stored.account_number == record.account_number
                && stored.pin == record.pin
            {
                stored.balance = record.balance;
                updated += 1;
            }
        }
        if updated == 0 {
            return Err(BankError::RecordVanished(record.account_number.clone()));
        }
        Ok(())
    }
}
