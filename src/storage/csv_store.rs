use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, info, warn};
use rust_decimal::Decimal;
use serde::Serialize;

use super::{AccountStore, StoredIdentity};
use crate::accounts::{AccountNumber, AccountRecord, Pin};
use crate::error::BankError;

const FIELD_COUNT: usize = 5;
const BALANCE_FIELD: usize = 4;

#[derive(Debug, Serialize)]
struct AccountRow<'a> {
    #[serde(rename = "First")]
    first: &'a str,
    #[serde(rename = "Last")]
    last: &'a str,
    #[serde(rename = "Account#")]
    account_number: &'a str,
    #[serde(rename = "PIN")]
    pin: &'a str,
    #[serde(rename = "Balance")]
    balance: Decimal,
}

impl<'a> From<&'a AccountRecord> for AccountRow<'a> {
    fn from(record: &'a AccountRecord) -> Self {
        Self {
            first: &record.first,
            last: &record.last,
            account_number: record.account_number.as_str(),
            pin: record.pin.as_str(),
            balance: record.balance.normalize(),
        }
    }
}

fn parse_balance(field: &str) -> Option<Decimal> {
    let field = field.trim();
    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .ok()
}

/// Turns a raw row into a record. The header row and anything malformed yield `None`.
pub fn parse_row(row: &StringRecord) -> Option<AccountRecord> {
    if row.len() < FIELD_COUNT {
        return None;
    }
    Some(AccountRecord {
        first: row.get(0)?.trim().to_string(),
        last: row.get(1)?.trim().to_string(),
        account_number: AccountNumber::parse(row.get(2)?)?,
        pin: Pin::parse(row.get(3)?)?,
        balance: parse_balance(row.get(BALANCE_FIELD)?)?,
    })
}

/// Every row of the table, header included, exactly as stored.
/// Fields are not trimmed so a rewrite leaves untouched rows as they were.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<StringRecord>, BankError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        rows.push(result?);
    }
    Ok(rows)
}

pub fn read_records<R: io::Read>(reader: R) -> Result<Vec<AccountRecord>, BankError> {
    let rows = read_rows(reader)?;
    let mut records = Vec::with_capacity(rows.len());
    for (line, row) in rows.iter().enumerate() {
        if row.len() < FIELD_COUNT {
            warn!("skipping row {} with {} fields", line + 1, row.len());
            continue;
        }
        match parse_row(row) {
            Some(record) => records.push(record),
            None => debug!("skipping unparseable row {}", line + 1),
        }
    }
    Ok(records)
}

pub fn write_rows<W: io::Write>(writer: W, rows: &[StringRecord]) -> Result<(), BankError> {
    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_writer(writer);
    for row in rows {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn append_record<W: io::Write>(
    writer: W,
    record: &AccountRecord,
    with_header: bool,
) -> Result<(), BankError> {
    let mut wtr = WriterBuilder::new().has_headers(with_header).from_writer(writer);
    wtr.serialize(AccountRow::from(record))?;
    wtr.flush()?;
    Ok(())
}

fn field(row: &StringRecord, i: usize) -> &str {
    row.get(i).map(str::trim).unwrap_or_default()
}

fn row_matches(row: &StringRecord, record: &AccountRecord) -> bool {
    row.len() >= FIELD_COUNT
        && field(row, 0).to_lowercase() == record.first.to_lowercase()
        && field(row, 1).to_lowercase() == record.last.to_lowercase()
        && field(row, 2) == record.account_number.as_str()
        && field(row, 3) == record.pin.as_str()
}

/// Name and number columns of every row with a full set of fields,
/// whether or not its PIN and balance parse.
pub fn read_identities<R: io::Read>(reader: R) -> Result<Vec<StoredIdentity>, BankError> {
    Ok(read_rows(reader)?
        .iter()
        .filter(|row| row.len() >= FIELD_COUNT)
        .map(|row| StoredIdentity {
            first: field(row, 0).to_string(),
            last: field(row, 1).to_string(),
            account_number: field(row, 2).to_string(),
        })
        .collect())
}

/// Rewrites the balance field of matching rows in place. Returns how many rows changed.
pub fn set_balance(rows: &mut [StringRecord], record: &AccountRecord) -> usize {
    let balance = record.balance.normalize().to_string();
    let mut updated = 0;
    for row in rows.iter_mut() {
        if !row_matches(row, record) {
            continue;
        }
        *row = row
            .iter()
            .enumerate()
            .map(|(i, field)| if i == BALANCE_FIELD { balance.as_str() } else { field })
            .collect();
        updated += 1;
    }
    updated
}

/// Account table kept in a single CSV file, read and rewritten whole.
#[derive(Debug, Clone)]
pub struct CsvFileStore {
    path: PathBuf,
}

impl CsvFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AccountStore for CsvFileStore {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn load(&self) -> Result<Vec<AccountRecord>, BankError> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        let records = read_records(File::open(&self.path)?)?;
        debug!("loaded {} accounts from {}", records.len(), self.path.display());
        Ok(records)
    }

    fn identities(&self) -> Result<Vec<StoredIdentity>, BankError> {
        if !self.exists() {
            return Ok(Vec::new());
        }
        read_identities(File::open(&self.path)?)
    }

    fn append(&mut self, record: &AccountRecord) -> Result<(), BankError> {
        let new_file = !self.exists();
        let file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        append_record(file, record, new_file)?;
        info!(
            "appended account {} to {}{}",
            record.account_number,
            self.path.display(),
            if new_file { " (new file)" } else { "" }
        );
        Ok(())
    }

    fn update_balance(&mut self, record: &AccountRecord) -> Result<(), BankError> {
        let mut rows = read_rows(File::open(&self.path)?)?;
        if set_balance(&mut rows, record) == 0 {
            warn!("account {} not found while rewriting {}", record.account_number, self.path.display());
            return Err(BankError::RecordVanished(record.account_number.clone()));
        }
        write_rows(File::create(&self.path)?, &rows)?;
        debug!("rewrote {} rows in {}", rows.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::Credentials;
    use rust_decimal_macros::dec;

    const DATA: &str = "\
First,Last,Account#,PIN,Balance
alice,smith,1234,1111,100
bob,jones,5678,2222,150.5
broken,row
carol,white,abcd,3333,10
";

    fn record(first: &str, last: &str, number: &str, pin: &str, balance: Decimal) -> AccountRecord {
        AccountRecord::open(Credentials::parse(first, last, number, pin).unwrap(), balance)
    }

    #[test]
    fn test_read_records_skips_header_and_malformed_rows() {
        let records = read_records(DATA.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].first, "alice");
        assert_eq!(records[0].balance, dec!(100));
        assert_eq!(records[1].account_number.as_str(), "5678");
        assert_eq!(records[1].balance, dec!(150.5));
    }

    #[test]
    fn test_read_rows_keeps_everything() {
        let rows = read_rows(DATA.as_bytes()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[0][2], "Account#");
        assert_eq!(rows[3].len(), 2);
    }

    #[test]
    fn test_append_with_header() {
        let mut buf = Vec::new();
        append_record(&mut buf, &record("alice", "smith", "1234", "1111", dec!(100)), true).unwrap();
        append_record(&mut buf, &record("bob", "jones", "5678", "2222", dec!(20.50)), false).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "First,Last,Account#,PIN,Balance\nalice,smith,1234,1111,100\nbob,jones,5678,2222,20.5\n"
        );
    }

    #[test]
    fn test_set_balance_preserves_other_rows() {
        let mut rows = read_rows(DATA.as_bytes()).unwrap();
        let bob = record("Bob", "Jones", "5678", "2222", dec!(75.25));
        assert_eq!(set_balance(&mut rows, &bob), 1);

        let mut buf = Vec::new();
        write_rows(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "First,Last,Account#,PIN,Balance\nalice,smith,1234,1111,100\nbob,jones,5678,2222,75.25\nbroken,row\ncarol,white,abcd,3333,10\n"
        );
    }

    #[test]
    fn test_set_balance_requires_pin_match() {
        let mut rows = read_rows(DATA.as_bytes()).unwrap();
        let wrong_pin = record("bob", "jones", "5678", "9999", dec!(1));
        assert_eq!(set_balance(&mut rows, &wrong_pin), 0);
    }

    #[test]
    fn test_set_balance_keeps_padding_of_other_rows() {
        let data = "First,Last,Account#,PIN,Balance\n bob , jones ,5678,2222, 7 \nalice,smith,1234,1111,50\n";
        let mut rows = read_rows(data.as_bytes()).unwrap();
        let alice = record("alice", "smith", "1234", "1111", dec!(51));
        assert_eq!(set_balance(&mut rows, &alice), 1);

        let mut buf = Vec::new();
        write_rows(&mut buf, &rows).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "First,Last,Account#,PIN,Balance\n bob , jones ,5678,2222, 7 \nalice,smith,1234,1111,51\n"
        );
    }

    #[test]
    fn test_padded_rows_still_parse_and_match() {
        let data = " bob , Jones , 5678 , 2222 , 7.5 \n";
        let records = read_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first, "bob");
        assert_eq!(records[0].balance, dec!(7.5));

        let mut rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(set_balance(&mut rows, &record("bob", "jones", "5678", "2222", dec!(8))), 1);
        assert_eq!(rows[0].get(4), Some("8"));
        assert_eq!(rows[0].get(0), Some(" bob "));
    }

    #[test]
    fn test_identities_include_rows_with_bad_pin() {
        let data = "First,Last,Account#,PIN,Balance\ndan,brown,1234,12345,100\nshort,row\n";
        let identities = read_identities(data.as_bytes()).unwrap();
        assert_eq!(identities.len(), 2);
        assert_eq!(
            identities[1],
            StoredIdentity {
                first: "dan".to_string(),
                last: "brown".to_string(),
                account_number: "1234".to_string(),
            }
        );
        assert!(read_records(data.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_row_scientific_balance() {
        let row = StringRecord::from(vec!["dan", "brown", "4444", "4444", "1e-05"]);
        assert_eq!(parse_row(&row).unwrap().balance, dec!(0.00001));
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let store = CsvFileStore::new(std::env::temp_dir().join("simple_toy_bank_never_created.csv"));
        assert!(!store.exists());
        assert!(store.load().unwrap().is_empty());
    }
}
