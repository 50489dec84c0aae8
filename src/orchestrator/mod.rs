pub mod orchestrator;

pub use orchestrator::{Command, CredentialArgs, execute, run, run_interactive};
