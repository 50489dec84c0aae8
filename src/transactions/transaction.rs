use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::BankError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Deposit => f.write_str("Deposit"),
            TransactionKind::Withdrawal => f.write_str("Withdrawal"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transaction {
    pub kind: TransactionKind,
    pub amount: Decimal,
}

impl Transaction {
    pub fn parse(kind: TransactionKind, amount_text: &str) -> Result<Self, BankError> {
        let text = amount_text.trim();
        let amount = Decimal::from_str(text)
            .or_else(|err| {
                if text.contains(['e', 'E']) {
                    Decimal::from_scientific(text)
                } else {
                    Err(err)
                }
            })
            .map_err(|_| BankError::InvalidAmount(amount_text.to_string()))?;
        Ok(Self { kind, amount })
    }
}

/// Formats money the way it is shown to the user: `$1234.50`.
pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub balance: Decimal,
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            TransactionKind::Deposit => "deposited",
            TransactionKind::Withdrawal => "withdrew",
        };
        write!(
            f,
            "You {}: {}. Your new balance is: {}",
            verb,
            money(self.amount),
            money(self.balance)
        )
    }
}
