//! Hook registry
//!
//! Holds at most one callback per lifecycle point. The registry is populated
//! once at startup and is read-only for the rest of the build, so dispatch
//! needs no locking.

use super::dispatch::{HookPayload, HookResult};
use super::{BoxError, HookError, HookPoint};
use std::fmt;
use std::sync::Arc;

/// A registered lifecycle callback
///
/// Callbacks are `Send + Sync` because the pipeline driver may run template
/// pipelines in parallel, reusing the same callback instance across all of
/// them for the render-scoped points.
pub type HookFn =
    Arc<dyn Fn(HookPayload<'_>) -> std::result::Result<HookResult, BoxError> + Send + Sync>;

/// Mapping from [`HookPoint`] to at most one callback
#[derive(Clone, Default)]
pub struct HookRegistry {
    before_create: Option<HookFn>,
    before_render: Option<HookFn>,
    after_render: Option<HookFn>,
    after_transformers: Option<HookFn>,
    after_build: Option<HookFn>,
}

impl HookRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no hooks are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        HookPoint::ALL.iter().all(|point| self.slot(*point).is_none())
    }

    /// Bind a callback to a lifecycle point
    ///
    /// # Errors
    ///
    /// Fails with [`HookError::Configuration`] if the point is already bound:
    /// exactly one callback may exist per point per build invocation.
    pub fn register<F>(&mut self, point: HookPoint, hook: F) -> Result<(), HookError>
    where
        F: Fn(HookPayload<'_>) -> std::result::Result<HookResult, BoxError>
            + Send
            + Sync
            + 'static,
    {
        let slot = self.slot_mut(point);
        if slot.is_some() {
            return Err(HookError::Configuration {
                point,
                message: "a hook is already registered for this point".to_string(),
            });
        }
        *slot = Some(Arc::new(hook));
        tracing::debug!(point = %point, "Registered hook");
        Ok(())
    }

    /// Bind a callback by point name
    ///
    /// Unrecognized names are ignored and `Ok(false)` is returned, so a
    /// configuration written for a future letterpress version still loads.
    pub fn register_named<F>(&mut self, name: &str, hook: F) -> Result<bool, HookError>
    where
        F: Fn(HookPayload<'_>) -> std::result::Result<HookResult, BoxError>
            + Send
            + Sync
            + 'static,
    {
        match HookPoint::from_name(name) {
            Some(point) => {
                self.register(point, hook)?;
                Ok(true)
            }
            None => {
                tracing::debug!(name, "Ignoring hook for unrecognized lifecycle point");
                Ok(false)
            }
        }
    }

    /// Look up the callback for a point, if any. No side effects.
    #[must_use]
    pub fn get(&self, point: HookPoint) -> Option<&HookFn> {
        self.slot(point).as_ref()
    }

    fn slot(&self, point: HookPoint) -> &Option<HookFn> {
        match point {
            HookPoint::BeforeCreate => &self.before_create,
            HookPoint::BeforeRender => &self.before_render,
            HookPoint::AfterRender => &self.after_render,
            HookPoint::AfterTransformers => &self.after_transformers,
            HookPoint::AfterBuild => &self.after_build,
        }
    }

    fn slot_mut(&mut self, point: HookPoint) -> &mut Option<HookFn> {
        match point {
            HookPoint::BeforeCreate => &mut self.before_create,
            HookPoint::BeforeRender => &mut self.before_render,
            HookPoint::AfterRender => &mut self.after_render,
            HookPoint::AfterTransformers => &mut self.after_transformers,
            HookPoint::AfterBuild => &mut self.after_build,
        }
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bound: Vec<&'static str> = HookPoint::ALL
            .iter()
            .filter(|point| self.slot(**point).is_some())
            .map(|point| point.name())
            .collect();
        f.debug_struct("HookRegistry").field("bound", &bound).finish()
    }
}
