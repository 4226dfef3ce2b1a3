//! Command handlers. Each module translates parsed arguments into core
//! service calls and prints the outcome.

pub mod add;
pub mod apps;
pub mod completions;
pub mod config;
pub mod init;
pub mod story;

/// Today's date as stamped into generated documents.
pub(crate) fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
