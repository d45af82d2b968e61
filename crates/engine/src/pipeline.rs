//! Build pipeline driver
//!
//! The driver owns the end-to-end build: resolve configuration, run
//! `beforeCreate`, discover templates, push each template through the
//! per-template stage sequence (in parallel), and finish with `afterBuild`
//! over the complete file list.

use crate::error::{Error, Result};
use crate::hooks::{HookDispatcher, HookPoint, HookRegistry};
use crate::transform::{HtmlProcessor, TransformerChain};
use letterpress_config::{Config, ConfigBuilder};
use letterpress_template::{TemplateContext, TemplateEngine, frontmatter};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Source file extension for templates
const TEMPLATE_EXTENSION: &str = "html";

/// Outcome of a build
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Every file written under the output directory, lexicographically
    /// sorted
    pub files: Vec<PathBuf>,

    /// Templates that failed, in discovery order (only populated when the
    /// driver is configured to continue past failures)
    pub failures: Vec<TemplateFailure>,
}

impl BuildReport {
    /// True if every discovered template was built
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A template that failed to build
#[derive(Debug)]
pub struct TemplateFailure {
    /// Template path relative to the templates directory
    pub template: PathBuf,

    /// The error that stopped it
    pub error: Error,
}

/// Orchestrates a full build
pub struct BuildPipeline {
    config: Config,
    dispatcher: HookDispatcher,
    processor: TransformerChain,
    root: PathBuf,
    fail_fast: bool,
}

impl BuildPipeline {
    /// Create a pipeline over an environment configuration
    ///
    /// Defaults: no hooks, current directory as project root, fail-fast on
    /// the first template failure.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            dispatcher: HookDispatcher::new(HookRegistry::new()),
            processor: TransformerChain::standard(),
            root: PathBuf::from("."),
            fail_fast: true,
        }
    }

    /// Attach a hook registry
    #[must_use]
    pub fn with_hooks(mut self, registry: HookRegistry) -> Self {
        self.dispatcher = HookDispatcher::new(registry);
        self
    }

    /// Set the project root the configured directories resolve against
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Abort on the first template failure (`true`, the default) or keep
    /// building the remaining templates and report failures at the end
    #[must_use]
    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Run the build
    ///
    /// # Errors
    ///
    /// `beforeCreate` and `afterBuild` hook errors are always fatal, as are
    /// configuration and template discovery errors. Per-template errors are
    /// fatal only in fail-fast mode; otherwise they land in
    /// [`BuildReport::failures`].
    pub fn run(&self) -> Result<BuildReport> {
        // The hook gets an exclusively owned builder; nothing downstream
        // sees the configuration until it is frozen and re-validated.
        let mut builder = ConfigBuilder::from(self.config.clone());
        self.dispatcher.run_before_create(&mut builder)?;
        let config = builder.freeze();
        config.validate()?;

        let templates_dir = self.root.join(&config.build.templates_dir);
        let output_dir = self.root.join(&config.build.output_dir);

        let templates = discover_templates(&templates_dir)?;
        tracing::info!(
            count = templates.len(),
            templates_dir = %templates_dir.display(),
            "Discovered templates"
        );

        fs::create_dir_all(&output_dir).map_err(|source| Error::DirectoryCreate {
            path: output_dir.clone(),
            source,
        })?;

        let engine = TemplateEngine::with_template_dir(Some(templates_dir.clone()));

        let outcomes: Vec<(PathBuf, Result<PathBuf>)> = templates
            .par_iter()
            .map(|rel| {
                let outcome =
                    self.build_template(&engine, &config, &templates_dir, &output_dir, rel);
                (rel.clone(), outcome)
            })
            .collect();

        let mut files = Vec::new();
        let mut failures = Vec::new();
        for (template, outcome) in outcomes {
            match outcome {
                Ok(written) => files.push(written),
                Err(error) => {
                    tracing::error!(template = %template.display(), %error, "Template failed");
                    if self.fail_fast {
                        return Err(error);
                    }
                    failures.push(TemplateFailure { template, error });
                }
            }
        }

        files.sort();

        self.dispatcher.run_after_build(&files, &config)?;

        tracing::info!(
            written = files.len(),
            failed = failures.len(),
            output_dir = %output_dir.display(),
            "Build finished"
        );
        Ok(BuildReport { files, failures })
    }

    /// Run one template through the per-template stage sequence
    ///
    /// Stages, in order: parse front matter, derive the per-template config,
    /// `beforeRender`, compile, `afterRender`, transformer chain,
    /// `afterTransformers`, write.
    fn build_template(
        &self,
        engine: &TemplateEngine,
        config: &Config,
        templates_dir: &Path,
        output_dir: &Path,
        rel: &Path,
    ) -> Result<PathBuf> {
        let source_path = templates_dir.join(rel);
        let source = fs::read_to_string(&source_path).map_err(|source| Error::FileRead {
            path: source_path.clone(),
            source,
        })?;

        let (matter, body) = frontmatter::parse(&source)?;
        let config = config.for_template(&matter);

        let body = self.dispatcher.run_render(
            HookPoint::BeforeRender,
            body,
            &matter,
            &config,
            &self.processor,
        )?;

        let context = TemplateContext::from_config(&config).with_page(&matter);
        let rendered = engine.render_named_str(&rel.display().to_string(), &body, &context)?;

        let rendered = self.dispatcher.run_render(
            HookPoint::AfterRender,
            &rendered,
            &matter,
            &config,
            &self.processor,
        )?;

        let processed = self.processor.process(&rendered, &config)?;

        let html = self.dispatcher.run_render(
            HookPoint::AfterTransformers,
            &processed.html,
            &matter,
            &config,
            &self.processor,
        )?;

        let output_path = output_dir.join(rel.with_extension(&config.build.extension));
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&output_path, html.as_bytes()).map_err(|source| Error::FileWrite {
            path: output_path.clone(),
            source,
        })?;

        tracing::debug!(
            template = %rel.display(),
            output = %output_path.display(),
            "Built template"
        );
        Ok(output_path)
    }
}

/// Find template source files under `templates_dir`
///
/// Returns paths relative to `templates_dir`, lexicographically sorted.
/// Files and directories whose name starts with `_` are skipped; that
/// convention marks partials and layouts that are only ever included from
/// other templates.
fn discover_templates(templates_dir: &Path) -> Result<Vec<PathBuf>> {
    if !templates_dir.is_dir() {
        return Err(Error::TemplateScan {
            path: templates_dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut templates = Vec::new();
    let walker = WalkDir::new(templates_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('_')
        });

    for entry in walker {
        let entry = entry.map_err(|e| Error::TemplateScan {
            path: templates_dir.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != TEMPLATE_EXTENSION) {
            continue;
        }

        // Walkdir yields absolute-ish paths rooted at templates_dir
        let rel = path
            .strip_prefix(templates_dir)
            .map_err(|e| Error::TemplateScan {
                path: templates_dir.to_path_buf(),
                message: e.to_string(),
            })?;
        templates.push(rel.to_path_buf());
    }

    templates.sort();
    Ok(templates)
}
