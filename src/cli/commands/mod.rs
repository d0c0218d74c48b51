//! Command implementations for the DataVault CLI.

pub mod completions;
pub mod entries;
pub mod retrieve;
pub mod session;
pub mod store;
pub mod unlock;
