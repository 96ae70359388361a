//! Subcommand implementations.

pub mod compare;
pub mod generate;
pub mod init;
