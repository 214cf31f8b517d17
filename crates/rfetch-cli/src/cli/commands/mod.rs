//! CLI command handlers. Each command is in its own file for clarity.

mod checksum;
mod fetch;

pub use checksum::run_checksum;
pub use fetch::run_fetch;
