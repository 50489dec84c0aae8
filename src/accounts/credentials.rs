use std::fmt;

use crate::error::BankError;

const CODE_LEN: usize = 4;

fn is_four_digits(value: &str) -> bool {
    value.len() == CODE_LEN && value.bytes().all(|b| b.is_ascii_digit())
}

/// Four digit account number, unique across the whole data file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountNumber(String);

impl AccountNumber {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        is_four_digits(value).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Four digit PIN. Stored in plaintext, but kept out of `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        is_four_digits(value).then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Pin(****)")
    }
}

/// Normalized name / account number / PIN tuple as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub first: String,
    pub last: String,
    pub account_number: AccountNumber,
    pub pin: Pin,
}

impl Credentials {
    pub fn parse(first: &str, last: &str, account_number: &str, pin: &str) -> Result<Self, BankError> {
        let first = first.trim().to_lowercase();
        let last = last.trim().to_lowercase();
        let (account_number, pin) = (account_number.trim(), pin.trim());

        if first.is_empty() || last.is_empty() || account_number.is_empty() || pin.is_empty() {
            return Err(BankError::MissingFields);
        }

        match (AccountNumber::parse(account_number), Pin::parse(pin)) {
            (Some(account_number), Some(pin)) => Ok(Self {
                first,
                last,
                account_number,
                pin,
            }),
            _ => Err(BankError::InvalidDigits),
        }
    }
}
