pub mod engine;

pub use engine::{ACCOUNT_CREATED, BankEngine, Greeting};
