//! CLI command handlers, one file per command.

mod checksum;
mod completions;
mod get;
mod prompt;

pub use checksum::run_checksum;
pub use completions::{print_completions, print_man_page};
pub use get::run_get;
