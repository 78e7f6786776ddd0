//! CLI command handlers

pub mod init;
pub mod key;
pub mod list;
pub mod send;
