//! CLI command implementations
//!
//! This module contains all command implementations for the letterpress CLI.

pub mod build;
pub mod clean;
pub mod init;
