//! Hook dispatcher
//!
//! The dispatcher is the sole component permitted to invoke user callbacks.
//! It builds the point-specific payload, invokes the registered hook if
//! present, validates the returned value against the point's contract, and
//! resolves to the effective value the pipeline carries forward.
//!
//! Dispatch always resolves to "original value" or "replacement value",
//! never to nothing: a hook that produces no value is a no-op from the
//! pipeline's perspective, which lets hooks run purely for side effects.

use super::{HookError, HookFn, HookPoint, HookRegistry};
use crate::transform::HtmlProcessor;
use letterpress_config::{Config, ConfigBuilder};
use letterpress_template::FrontMatter;
use std::borrow::Cow;
use std::path::PathBuf;

/// Point-specific payload handed to a hook
///
/// All fields are borrows into pipeline state. Only the `beforeCreate`
/// payload is mutable, and then only through the exclusively owned
/// [`ConfigBuilder`]; for every other point the returned [`HookResult`] is
/// the single channel through which a hook can affect the pipeline.
pub enum HookPayload<'a> {
    /// Payload for `beforeCreate`
    BeforeCreate {
        /// Mutable configuration builder, frozen after the hook returns
        config: &'a mut ConfigBuilder,
    },

    /// Payload for the render-scoped points (`beforeRender`, `afterRender`,
    /// `afterTransformers`)
    Render {
        /// The markup at this pipeline stage
        html: &'a str,
        /// The template's front matter (read-only)
        matter: &'a FrontMatter,
        /// The per-template configuration snapshot (read-only)
        config: &'a Config,
        /// Capability for running the HTML processor mid-pipeline
        processor: &'a dyn HtmlProcessor,
    },

    /// Payload for `afterBuild`
    AfterBuild {
        /// Every file written under the output directory, in order
        files: &'a [PathBuf],
        /// The environment configuration (read-only)
        config: &'a Config,
    },
}

/// Value produced by a hook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookResult {
    /// No value produced; the pipeline keeps its current value
    Unchanged,
    /// Replacement markup for the current stage
    Html(String),
}

impl HookResult {
    /// Short description of the variant, for contract error messages
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            HookResult::Unchanged => "no value",
            HookResult::Html(_) => "replacement markup",
        }
    }
}

/// Dispatches lifecycle hooks on behalf of the pipeline driver
#[derive(Clone, Debug, Default)]
pub struct HookDispatcher {
    registry: HookRegistry,
}

impl HookDispatcher {
    /// Create a dispatcher over a populated registry
    #[must_use]
    pub fn new(registry: HookRegistry) -> Self {
        Self { registry }
    }

    /// Access the underlying registry
    #[must_use]
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Dispatch `beforeCreate`
    ///
    /// The hook observes and mutates the exclusively owned builder; it must
    /// not return a value. After this call the driver freezes the builder
    /// into the immutable snapshot used by all subsequent stages.
    ///
    /// # Errors
    ///
    /// [`HookError::Execution`] if the hook fails, [`HookError::Contract`]
    /// if it returns replacement markup (the builder is the only mutation
    /// channel at this point).
    #[tracing::instrument(skip_all)]
    pub fn run_before_create(&self, builder: &mut ConfigBuilder) -> Result<(), HookError> {
        let point = HookPoint::BeforeCreate;
        let Some(hook) = self.registry.get(point) else {
            return Ok(());
        };

        match Self::invoke(point, hook, HookPayload::BeforeCreate { config: builder })? {
            HookResult::Unchanged => Ok(()),
            other => Err(HookError::Contract {
                point,
                expected: "no return value (mutate the config builder instead)",
                got: other.kind(),
            }),
        }
    }

    /// Dispatch one of the render-scoped points
    ///
    /// Resolves to the effective markup for the next stage: borrowed input
    /// on the fast path (no hook registered) and on fallback (hook produced
    /// no value), owned replacement otherwise.
    ///
    /// # Errors
    ///
    /// [`HookError::Configuration`] if `point` is not render-scoped,
    /// [`HookError::Execution`] if the hook fails.
    #[tracing::instrument(skip_all, fields(point = %point))]
    pub fn run_render<'a>(
        &self,
        point: HookPoint,
        html: &'a str,
        matter: &FrontMatter,
        config: &Config,
        processor: &dyn HtmlProcessor,
    ) -> Result<Cow<'a, str>, HookError> {
        if !point.is_render_scoped() {
            return Err(HookError::Configuration {
                point,
                message: "not a render-scoped point, no markup payload exists".to_string(),
            });
        }

        let Some(hook) = self.registry.get(point) else {
            return Ok(Cow::Borrowed(html));
        };

        let payload = HookPayload::Render {
            html,
            matter,
            config,
            processor,
        };

        match Self::invoke(point, hook, payload)? {
            HookResult::Unchanged => {
                tracing::trace!("Hook produced no value, keeping current markup");
                Ok(Cow::Borrowed(html))
            }
            HookResult::Html(replacement) => {
                tracing::debug!(bytes = replacement.len(), "Hook replaced markup");
                Ok(Cow::Owned(replacement))
            }
        }
    }

    /// Dispatch `afterBuild`
    ///
    /// Terminal notification hook: the file list is only ever complete here,
    /// and whatever the hook returns is ignored.
    ///
    /// # Errors
    ///
    /// [`HookError::Execution`] if the hook fails.
    #[tracing::instrument(skip_all, fields(files = files.len()))]
    pub fn run_after_build(&self, files: &[PathBuf], config: &Config) -> Result<(), HookError> {
        let point = HookPoint::AfterBuild;
        let Some(hook) = self.registry.get(point) else {
            return Ok(());
        };

        // Return value deliberately ignored.
        let _ = Self::invoke(point, hook, HookPayload::AfterBuild { files, config })?;
        Ok(())
    }

    /// Invoke a callback, tagging any failure with its point
    ///
    /// The callback runs to completion on the calling thread; there is no
    /// timeout and no retry (hooks are assumed non-idempotent).
    fn invoke(
        point: HookPoint,
        hook: &HookFn,
        payload: HookPayload<'_>,
    ) -> Result<HookResult, HookError> {
        hook(payload).map_err(|source| HookError::Execution { point, source })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;
    use crate::transform::TransformerChain;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn dispatcher_with(point: HookPoint, hook: impl Fn(HookPayload<'_>) -> Result<HookResult, super::super::BoxError> + Send + Sync + 'static) -> HookDispatcher {
        let mut registry = HookRegistry::new();
        registry.register(point, hook).unwrap();
        HookDispatcher::new(registry)
    }

    fn render_fixtures() -> (FrontMatter, Config, TransformerChain) {
        (FrontMatter::new(), Config::default(), TransformerChain::standard())
    }

    #[test]
    fn test_no_hook_is_identity() {
        let dispatcher = HookDispatcher::new(HookRegistry::new());
        let (matter, config, chain) = render_fixtures();

        for point in [
            HookPoint::BeforeRender,
            HookPoint::AfterRender,
            HookPoint::AfterTransformers,
        ] {
            let effective = dispatcher
                .run_render(point, "<p>hi</p>", &matter, &config, &chain)
                .unwrap();
            assert!(matches!(effective, Cow::Borrowed("<p>hi</p>")));
        }
    }

    #[test]
    fn test_fallback_on_no_value() {
        let dispatcher =
            dispatcher_with(HookPoint::AfterRender, |_| Ok(HookResult::Unchanged));
        let (matter, config, chain) = render_fixtures();

        let effective = dispatcher
            .run_render(HookPoint::AfterRender, "<p>original</p>", &matter, &config, &chain)
            .unwrap();
        assert_eq!(effective, "<p>original</p>");
        assert!(matches!(effective, Cow::Borrowed(_)));
    }

    #[test]
    fn test_replacement_law() {
        let dispatcher = dispatcher_with(HookPoint::AfterRender, |_| {
            Ok(HookResult::Html("<REPLACED>".to_string()))
        });
        let (matter, config, chain) = render_fixtures();

        // Replacement wins regardless of the input markup.
        for input in ["<p>a</p>", "", "anything at all"] {
            let effective = dispatcher
                .run_render(HookPoint::AfterRender, input, &matter, &config, &chain)
                .unwrap();
            assert_eq!(effective, "<REPLACED>");
        }
    }

    #[test]
    fn test_empty_string_is_a_valid_replacement() {
        let dispatcher =
            dispatcher_with(HookPoint::BeforeRender, |_| Ok(HookResult::Html(String::new())));
        let (matter, config, chain) = render_fixtures();

        let effective = dispatcher
            .run_render(HookPoint::BeforeRender, "<p>gone</p>", &matter, &config, &chain)
            .unwrap();
        assert_eq!(effective, "");
    }

    #[test]
    fn test_idempotent_with_pure_hook() {
        let dispatcher = dispatcher_with(HookPoint::AfterTransformers, |payload| {
            let HookPayload::Render { html, .. } = payload else {
                panic!("wrong payload variant");
            };
            Ok(HookResult::Html(html.to_uppercase()))
        });
        let (matter, config, chain) = render_fixtures();

        let first = dispatcher
            .run_render(HookPoint::AfterTransformers, "<p>hi</p>", &matter, &config, &chain)
            .unwrap()
            .into_owned();
        let second = dispatcher
            .run_render(HookPoint::AfterTransformers, "<p>hi</p>", &matter, &config, &chain)
            .unwrap()
            .into_owned();
        assert_eq!(first, second);
    }

    #[test]
    fn test_execution_error_is_point_tagged() {
        let dispatcher = dispatcher_with(HookPoint::AfterTransformers, |_| {
            Err("boom".into())
        });
        let (matter, config, chain) = render_fixtures();

        let err = dispatcher
            .run_render(HookPoint::AfterTransformers, "<p>x</p>", &matter, &config, &chain)
            .unwrap_err();

        assert_eq!(err.point(), HookPoint::AfterTransformers);
        let message = err.to_string();
        assert!(message.contains("afterTransformers"));
        assert!(message.contains("boom"));
    }

    #[test]
    fn test_non_render_point_rejected() {
        let dispatcher = HookDispatcher::new(HookRegistry::new());
        let (matter, config, chain) = render_fixtures();

        let err = dispatcher
            .run_render(HookPoint::AfterBuild, "<p>x</p>", &matter, &config, &chain)
            .unwrap_err();
        assert!(matches!(err, HookError::Configuration { .. }));
    }

    #[test]
    fn test_before_create_mutates_builder() {
        let dispatcher = dispatcher_with(HookPoint::BeforeCreate, |payload| {
            let HookPayload::BeforeCreate { config } = payload else {
                panic!("wrong payload variant");
            };
            config.set_variable("injected", serde_json::json!(true));
            config.build.extension = "htm".to_string();
            Ok(HookResult::Unchanged)
        });

        let mut builder = ConfigBuilder::new();
        dispatcher.run_before_create(&mut builder).unwrap();

        let config = builder.freeze();
        assert_eq!(config.variables["injected"], serde_json::json!(true));
        assert_eq!(config.build.extension, "htm");
    }

    #[test]
    fn test_before_create_rejects_returned_markup() {
        let dispatcher = dispatcher_with(HookPoint::BeforeCreate, |_| {
            Ok(HookResult::Html("<p>nope</p>".to_string()))
        });

        let mut builder = ConfigBuilder::new();
        let err = dispatcher.run_before_create(&mut builder).unwrap_err();
        assert!(matches!(
            err,
            HookError::Contract {
                point: HookPoint::BeforeCreate,
                ..
            }
        ));
    }

    #[test]
    fn test_before_create_absent_is_noop() {
        let dispatcher = HookDispatcher::new(HookRegistry::new());
        let mut builder = ConfigBuilder::new();
        dispatcher.run_before_create(&mut builder).unwrap();
        assert!(builder.variables.is_empty());
    }

    #[test]
    fn test_after_build_result_ignored() {
        // Even a markup result is ignored at the terminal point.
        let dispatcher = dispatcher_with(HookPoint::AfterBuild, |_| {
            Ok(HookResult::Html("ignored".to_string()))
        });

        let files = vec![PathBuf::from("dist/a.html")];
        dispatcher
            .run_after_build(&files, &Config::default())
            .unwrap();
    }

    #[test]
    fn test_after_build_sees_files() {
        let seen = std::sync::Arc::new(Mutex::new(Vec::new()));
        let seen_clone = std::sync::Arc::clone(&seen);

        let dispatcher = dispatcher_with(HookPoint::AfterBuild, move |payload| {
            let HookPayload::AfterBuild { files, .. } = payload else {
                panic!("wrong payload variant");
            };
            seen_clone.lock().unwrap().extend(files.iter().cloned());
            Ok(HookResult::Unchanged)
        });

        let files = vec![PathBuf::from("dist/a.html"), PathBuf::from("dist/b.html")];
        dispatcher
            .run_after_build(&files, &Config::default())
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), files);
    }

    #[test]
    fn test_side_effect_only_hook_counts_invocations() {
        let calls = std::sync::Arc::new(AtomicUsize::new(0));
        let calls_clone = std::sync::Arc::clone(&calls);

        let dispatcher = dispatcher_with(HookPoint::BeforeRender, move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
            Ok(HookResult::Unchanged)
        });
        let (matter, config, chain) = render_fixtures();

        for _ in 0..3 {
            let effective = dispatcher
                .run_render(HookPoint::BeforeRender, "<p>same</p>", &matter, &config, &chain)
                .unwrap();
            assert_eq!(effective, "<p>same</p>");
        }
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_hook_may_invoke_processor_capability() {
        let dispatcher = dispatcher_with(HookPoint::AfterRender, |payload| {
            let HookPayload::Render {
                html,
                config,
                processor,
                ..
            } = payload
            else {
                panic!("wrong payload variant");
            };
            // One extra pass through the transformer chain, mid-pipeline.
            let processed = processor.process(html, config).map_err(Box::new)?;
            Ok(HookResult::Html(processed.html))
        });

        let matter = FrontMatter::new();
        let config = Config::default(); // stripComments on by default
        let chain = TransformerChain::standard();

        let effective = dispatcher
            .run_render(
                HookPoint::AfterRender,
                "<p>keep</p><!-- drop -->",
                &matter,
                &config,
                &chain,
            )
            .unwrap();
        assert_eq!(effective, "<p>keep</p>");
    }
}
