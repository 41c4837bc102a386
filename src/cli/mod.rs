//! CLI command handlers.
//!
//! Testable handlers invoked by main.rs. Each returns the process exit code
//! for its subcommand.

mod check;
mod fix;

pub use check::{CheckOverrides, run_check};
pub use fix::run_fix;
