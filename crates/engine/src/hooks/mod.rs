//! Lifecycle hook system for the build pipeline
//!
//! Hooks let user code intercept the pipeline at five fixed points and
//! optionally replace the value flowing through it.
//!
//! ## Pipeline Position
//!
//! ```text
//! config resolution
//!   → beforeCreate ← (mutate the config builder; runs once per build)
//! per template:
//!   → beforeRender ← (replace the html fed to the compiler)
//!   → template compilation
//!   → afterRender ← (replace the html fed to the transformer chain)
//!   → transformer chain
//!   → afterTransformers ← (replace the final html before disk write)
//!   → disk write
//! all templates written
//!   → afterBuild ← (observe the full file list; return value ignored)
//! ```
//!
//! ## Execution Model
//!
//! - At most one callback per point, registered once at startup and read-only
//!   during the build (no locking needed).
//! - A callback that produces no value leaves the pipeline value unchanged;
//!   callbacks may run purely for side effects.
//! - A callback error never crashes the process: it is surfaced to the
//!   pipeline driver as [`HookError::Execution`] tagged with the point, and
//!   the driver decides abort-vs-continue.
//! - There is deliberately no timeout: a hanging hook hangs its own
//!   template's pipeline (and only that one when templates run in parallel).
//!
//! ## Module Organization
//!
//! - `point`: the [`HookPoint`] enumeration
//! - `registry`: write-once callback storage per point
//! - `dispatch`: the [`HookDispatcher`], the sole invoker of user callbacks

pub mod dispatch;
pub mod point;
pub mod registry;

use thiserror::Error;

pub use dispatch::{HookDispatcher, HookPayload, HookResult};
pub use point::HookPoint;
pub use registry::{HookFn, HookRegistry};

/// Boxed error type hooks may return
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error produced by hook registration or dispatch
#[derive(Error, Debug)]
pub enum HookError {
    /// Invalid hook registration; fatal at startup
    #[error("Hook configuration error at '{point}': {message}")]
    Configuration {
        /// The lifecycle point being registered
        point: HookPoint,
        /// Human-readable error message
        message: String,
    },

    /// The hook itself failed; the driver decides abort-vs-continue
    #[error("Hook at '{point}' failed: {source}")]
    Execution {
        /// The lifecycle point where the hook ran
        point: HookPoint,
        /// The hook's own error
        #[source]
        source: BoxError,
    },

    /// The hook returned a value of the wrong shape for its point; fatal for
    /// the current stage, never coerced
    #[error("Hook at '{point}' returned {got}, expected {expected}")]
    Contract {
        /// The lifecycle point where the hook ran
        point: HookPoint,
        /// What the point's contract allows
        expected: &'static str,
        /// What the hook actually produced
        got: &'static str,
    },
}

impl HookError {
    /// The lifecycle point this error is tagged with
    #[must_use]
    pub fn point(&self) -> HookPoint {
        match self {
            HookError::Configuration { point, .. }
            | HookError::Execution { point, .. }
            | HookError::Contract { point, .. } => *point,
        }
    }
}
