//! Template engine implementation
//!
//! The engine wraps minijinja and provides template rendering with custom
//! functions and a loader for partials.

use crate::context::TemplateContext;
use crate::functions;
use crate::{Error, Result};
use minijinja::Environment;
use std::path::PathBuf;

/// Template engine for rendering templates
pub struct TemplateEngine {
    /// The minijinja environment
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine without partial loading
    #[must_use]
    pub fn new() -> Self {
        Self::with_template_dir(None)
    }

    /// Create a template engine with a template directory for partials
    ///
    /// When a template uses `{% include "header" %}`, the engine searches:
    /// 1. `<dir>/header`
    /// 2. `<dir>/header.html`
    /// 3. `<dir>/_partials/header`
    /// 4. `<dir>/_partials/header.html`
    #[must_use]
    pub fn with_template_dir(template_dir: Option<PathBuf>) -> Self {
        let mut env = Environment::new();

        // Jinja2 standard whitespace control:
        // trim_blocks removes newlines after block tags, lstrip_blocks strips
        // leading whitespace from block lines, keep_trailing_newline ensures
        // output files end with a newline.
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_keep_trailing_newline(true);

        // Register custom functions
        env.add_function("env", functions::env);
        env.add_function("now", functions::now);
        env.add_function("regexMatch", functions::regex_match);
        env.add_function("regexReplaceAll", functions::regex_replace_all);
        env.add_function("split", functions::split);
        env.add_function("join", functions::join);

        // Register filters
        env.add_filter("toJson", functions::to_json);
        env.add_filter("fromJson", functions::from_json);
        env.add_filter("trim", functions::trim);
        env.add_filter("trimStart", functions::trim_start);
        env.add_filter("trimEnd", functions::trim_end);

        // Set up the partial loader
        if let Some(template_dir) = template_dir
            && template_dir.exists()
            && template_dir.is_dir()
        {
            env.set_loader(move |name| {
                let candidates = vec![
                    template_dir.join(name),
                    template_dir.join(format!("{name}.html")),
                    template_dir.join("_partials").join(name),
                    template_dir.join("_partials").join(format!("{name}.html")),
                ];

                for path in candidates {
                    if path.is_file() {
                        return match std::fs::read_to_string(&path) {
                            Ok(content) => Ok(Some(content)),
                            Err(e) => Err(minijinja::Error::new(
                                minijinja::ErrorKind::InvalidOperation,
                                format!("Failed to read partial '{name}': {e}"),
                            )),
                        };
                    }
                }

                Ok(None)
            });
        }

        Self { env }
    }

    /// Render a template string with the given context
    ///
    /// # Errors
    ///
    /// Returns error if template rendering fails
    pub fn render_str(&self, template: &str, context: &TemplateContext) -> Result<String> {
        self.env.render_str(template, context).map_err(Error::from)
    }

    /// Render a template string with a specific name for better error messages
    ///
    /// Preferred over [`TemplateEngine::render_str`] when a file path is
    /// available; error messages include the name instead of `<string>`.
    ///
    /// # Errors
    ///
    /// Returns error if template rendering fails
    pub fn render_named_str(
        &self,
        name: &str,
        template: &str,
        context: &TemplateContext,
    ) -> Result<String> {
        self.env
            .render_named_str(name, template, context)
            .map_err(Error::from)
    }

    /// Get a mutable reference to the underlying minijinja environment
    ///
    /// This allows for advanced customization if needed.
    pub fn env_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
