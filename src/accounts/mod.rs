pub mod account_record;
pub mod credentials;

pub use account_record::AccountRecord;
pub use credentials::{AccountNumber, Credentials, Pin};
