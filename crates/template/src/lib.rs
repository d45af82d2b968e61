//! # Letterpress Template
//!
//! Template engine integration for letterpress:
//!
//! - **Front matter**: `---` delimited per-template metadata
//! - **Engine**: minijinja wrapper with custom functions, filters, and a
//!   partial loader
//! - **Context**: the data templates can see during rendering

pub mod context;
pub mod engine;
pub mod error;
pub mod frontmatter;
pub mod functions;

pub use context::{BuildInfo, TemplateContext};
pub use engine::TemplateEngine;
pub use error::{Error, Result};
pub use frontmatter::FrontMatter;
