//! Configuration management for letterpress
//!
//! This crate owns the build configuration: loading `letterpress.toml`,
//! validating it, deriving per-template snapshots, and the mutable
//! [`ConfigBuilder`] handed to the `beforeCreate` lifecycle hook. It also
//! provides the tracing-based logging setup used by the CLI.

pub mod builder;
pub mod config;
pub mod error;
pub mod logging;

pub use builder::ConfigBuilder;
pub use config::{BuildConfig, Config, TransformConfig};
pub use error::{Error, Result};
