//! # Letterpress Engine
//!
//! The build pipeline for letterpress:
//!
//! - **Pipeline**: template discovery, per-template stage sequencing, and
//!   parallel execution
//! - **Hooks**: the five-point lifecycle hook system
//!   (`beforeCreate`, `beforeRender`, `afterRender`, `afterTransformers`,
//!   `afterBuild`)
//! - **Transform**: the post-compilation HTML transformer chain

pub mod error;
pub mod hooks;
pub mod pipeline;
pub mod transform;

pub use error::{Error, Result};
pub use hooks::{
    HookDispatcher, HookError, HookPayload, HookPoint, HookRegistry, HookResult,
};
pub use pipeline::{BuildPipeline, BuildReport, TemplateFailure};
pub use transform::{HtmlProcessor, ProcessedHtml, TransformerChain};
