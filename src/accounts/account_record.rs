use rust_decimal::Decimal;

use super::credentials::{AccountNumber, Credentials, Pin};
use crate::error::BankError;
use crate::transactions::TransactionKind;

#[derive(Debug, Clone, PartialEq)]
pub struct AccountRecord {
    pub first: String,
    pub last: String,
    pub account_number: AccountNumber,
    pub pin: Pin,
    pub balance: Decimal,
}

impl AccountRecord {
    pub fn open(credentials: Credentials, initial_balance: Decimal) -> Self {
        Self {
            first: credentials.first,
            last: credentials.last,
            account_number: credentials.account_number,
            pin: credentials.pin,
            balance: initial_balance,
        }
    }

    /// Same holder and account number. The PIN is not part of identity.
    pub fn matches_identity(&self, credentials: &Credentials) -> bool {
        self.first.to_lowercase() == credentials.first
            && self.last.to_lowercase() == credentials.last
            && self.account_number == credentials.account_number
    }

    pub fn display_name(&self) -> String {
        let mut chars = self.first.chars();
        match chars.next() {
            Some(c) => c.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        }
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if amount <= Decimal::ZERO {
            return Err(BankError::NonPositiveAmount(TransactionKind::Deposit));
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(BankError::AmountTooLarge)?;
        Ok(self.balance)
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<Decimal, BankError> {
        if amount > self.balance {
            return Err(BankError::InsufficientFunds);
        }
        if amount <= Decimal::ZERO {
            return Err(BankError::NonPositiveAmount(TransactionKind::Withdrawal));
        }
        self.balance -= amount;
        Ok(self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(balance: Decimal) -> AccountRecord {
        let creds = Credentials::parse("alice", "smith", "1234", "1111").unwrap();
        AccountRecord::open(creds, balance)
    }

    #[test]
    fn test_deposit() {
        let mut acc = record(dec!(100));
        assert_eq!(acc.deposit(dec!(25.50)).unwrap(), dec!(125.50));
        assert_eq!(acc.balance, dec!(125.50));
    }

    #[test]
    fn test_deposit_must_be_positive() {
        let mut acc = record(dec!(100));
        assert!(matches!(
            acc.deposit(dec!(0)),
            Err(BankError::NonPositiveAmount(TransactionKind::Deposit))
        ));
        assert!(acc.deposit(dec!(-5)).is_err());
        assert_eq!(acc.balance, dec!(100));
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let mut acc = record(dec!(100));
        assert!(matches!(acc.deposit(Decimal::MAX), Err(BankError::AmountTooLarge)));
        assert_eq!(acc.balance, dec!(100));
    }

    #[test]
    fn test_withdraw() {
        let mut acc = record(dec!(100));
        acc.withdraw(dec!(40)).unwrap();
        assert_eq!(acc.balance, dec!(60));

        // Withdraw more than available → no change
        assert!(matches!(acc.withdraw(dec!(60.01)), Err(BankError::InsufficientFunds)));
        assert_eq!(acc.balance, dec!(60));

        // Whole balance is allowed
        acc.withdraw(dec!(60)).unwrap();
        assert_eq!(acc.balance, dec!(0));
    }

    #[test]
    fn test_withdraw_insufficient_checked_before_sign() {
        let mut acc = record(dec!(0));
        assert!(matches!(acc.withdraw(dec!(1)), Err(BankError::InsufficientFunds)));
        assert!(matches!(
            acc.withdraw(dec!(0)),
            Err(BankError::NonPositiveAmount(TransactionKind::Withdrawal))
        ));
    }

    #[test]
    fn test_matches_identity_ignores_pin_and_case() {
        let mut acc = record(dec!(100));
        acc.first = "Alice".to_string();
        let other_pin = Credentials::parse("ALICE", "smith", "1234", "9999").unwrap();
        assert!(acc.matches_identity(&other_pin));

        let other_number = Credentials::parse("alice", "smith", "4321", "1111").unwrap();
        assert!(!acc.matches_identity(&other_number));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(record(dec!(1)).display_name(), "Alice");
    }
}
