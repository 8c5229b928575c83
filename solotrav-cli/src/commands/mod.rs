//! CLI command implementations.

pub mod check;
pub mod common;
pub mod config;
pub mod init;
pub mod nearby;
pub mod track;
