//! Template context management
//!
//! The context provides data that is available to templates during rendering.

use crate::frontmatter::FrontMatter;
use indexmap::IndexMap;
use letterpress_config::Config;
use serde::{Deserialize, Serialize};
use std::env;

/// Context data available to templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateContext {
    /// Build information
    pub letterpress: BuildInfo,

    /// Environment variables
    pub env: IndexMap<String, String>,

    /// The template's front matter
    pub page: FrontMatter,

    /// Custom user-defined variables
    /// These are flattened so they can be accessed directly in templates,
    /// e.g. {{ `company` }} instead of {{ `variables.company` }}
    #[serde(flatten)]
    pub variables: IndexMap<String, serde_json::Value>,
}

/// Letterpress-specific runtime information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Templates directory path
    #[serde(rename = "templatesDir")]
    pub templates_dir: String,

    /// Output directory path
    #[serde(rename = "outputDir")]
    pub output_dir: String,

    /// Output file extension
    pub extension: String,
}

impl TemplateContext {
    /// Create an empty context with environment variables collected
    #[must_use]
    pub fn new() -> Self {
        Self {
            letterpress: BuildInfo::default(),
            env: Self::collect_env(),
            page: FrontMatter::new(),
            variables: IndexMap::new(),
        }
    }

    /// Create a context from a per-template configuration snapshot
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            letterpress: BuildInfo {
                templates_dir: config.build.templates_dir.display().to_string(),
                output_dir: config.build.output_dir.display().to_string(),
                extension: config.build.extension.clone(),
            },
            env: Self::collect_env(),
            page: FrontMatter::new(),
            variables: config.variables.clone(),
        }
    }

    /// Attach the template's front matter (exposed as `page`)
    #[must_use]
    pub fn with_page(mut self, matter: &FrontMatter) -> Self {
        Clone::clone_from(&mut self.page, matter);
        self
    }

    /// Add a single custom variable
    pub fn add_variable(&mut self, key: String, value: serde_json::Value) {
        self.variables.insert(key, value);
    }

    /// Collect environment variables into an ordered map
    fn collect_env() -> IndexMap<String, String> {
        env::vars().collect()
    }
}

impl Default for TemplateContext {
    fn default() -> Self {
        Self::new()
    }
}
