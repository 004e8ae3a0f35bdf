//! Utility modules for the profile store.
//!
//! Argument parsing, avatar encoding and logging setup for the CLI.

pub mod avatar;
pub mod logging;
pub mod parsing;
