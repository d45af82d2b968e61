//! Configuration management
//!
//! This module handles loading and validating the letterpress build
//! configuration from `letterpress.toml`.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Build configuration section
///
/// ```toml
/// [build]
/// templatesDir = "templates"
/// outputDir = "dist"
/// extension = "html"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory containing source templates
    #[serde(default = "default_templates_dir", rename = "templatesDir")]
    pub templates_dir: PathBuf,

    /// Directory where final HTML files are written
    #[serde(default = "default_output_dir", rename = "outputDir")]
    pub output_dir: PathBuf,

    /// File extension for output files (without the leading dot)
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            templates_dir: default_templates_dir(),
            output_dir: default_output_dir(),
            extension: default_extension(),
        }
    }
}

/// Transformer chain configuration section
///
/// Controls the fixed set of HTML post-processing steps that run after
/// template compilation.
///
/// ```toml
/// [transform]
/// stripComments = true
/// collapseWhitespace = false
/// baseUrl = "https://cdn.example.com/"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Remove HTML comments from the output.
    ///
    /// MSO conditional comments (`<!--[if mso]>...<![endif]-->`) are always
    /// preserved; Outlook depends on them.
    #[serde(default = "default_strip_comments", rename = "stripComments")]
    pub strip_comments: bool,

    /// Collapse runs of inter-tag whitespace into single spaces
    #[serde(default, rename = "collapseWhitespace")]
    pub collapse_whitespace: bool,

    /// Prefix for root-relative `src`/`href`/`background` attribute values
    #[serde(default, rename = "baseUrl", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            strip_comments: default_strip_comments(),
            collapse_whitespace: false,
            base_url: None,
        }
    }
}

/// Immutable build configuration
///
/// A `Config` is constructed once per environment (from `letterpress.toml`,
/// optionally amended by the `beforeCreate` hook via
/// [`ConfigBuilder`](crate::ConfigBuilder)) and then re-derived per template
/// with [`Config::for_template`]. It is never mutated in place: every
/// derivation produces an independently owned copy, so concurrent template
/// pipelines cannot alias one another's configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Build paths and output settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Transformer chain settings
    #[serde(default)]
    pub transform: TransformConfig,

    /// Custom variables exposed to templates
    #[serde(default)]
    pub variables: IndexMap<String, serde_json::Value>,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, fails to parse, or fails
    /// validation.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!(config_path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load configuration from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(
                config_path = %path.display(),
                "Config file not found, using defaults"
            );
            Ok(Self::default())
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the templates directory is empty or equals the
    /// output directory (a build would overwrite its own sources).
    pub fn validate(&self) -> Result<()> {
        if self.build.templates_dir.as_os_str().is_empty() {
            return Err(Error::Validation(
                "build.templatesDir cannot be empty".to_string(),
            ));
        }

        if self.build.output_dir.as_os_str().is_empty() {
            return Err(Error::Validation(
                "build.outputDir cannot be empty".to_string(),
            ));
        }

        if self.build.templates_dir == self.build.output_dir {
            return Err(Error::Validation(format!(
                "build.outputDir must differ from build.templatesDir ({})",
                self.build.templates_dir.display()
            )));
        }

        if self.build.extension.is_empty() || self.build.extension.starts_with('.') {
            return Err(Error::Validation(format!(
                "build.extension must be a bare extension without a dot, got '{}'",
                self.build.extension
            )));
        }

        Ok(())
    }

    /// Derive an independently owned per-template configuration
    ///
    /// Front matter keys that name a recognized setting override that
    /// setting; all other keys become template variables. The environment
    /// configuration is left untouched.
    ///
    /// Recognized keys: `extension`, `stripComments`, `collapseWhitespace`,
    /// `baseUrl`.
    #[must_use]
    pub fn for_template(&self, overrides: &IndexMap<String, String>) -> Self {
        let mut derived = self.clone();

        for (key, value) in overrides {
            match key.as_str() {
                "extension" => derived.build.extension = value.clone(),
                "stripComments" => {
                    derived.transform.strip_comments = parse_bool(value, derived.transform.strip_comments);
                }
                "collapseWhitespace" => {
                    derived.transform.collapse_whitespace =
                        parse_bool(value, derived.transform.collapse_whitespace);
                }
                "baseUrl" => {
                    derived.transform.base_url = if value.is_empty() {
                        None
                    } else {
                        Some(value.clone())
                    };
                }
                _ => {
                    derived
                        .variables
                        .insert(key.clone(), serde_json::Value::String(value.clone()));
                }
            }
        }

        derived
    }
}

/// Parse a boolean front matter value, keeping `current` on anything else
fn parse_bool(value: &str, current: bool) -> bool {
    match value {
        "true" | "yes" | "on" => true,
        "false" | "no" | "off" => false,
        _ => {
            tracing::warn!(value, "Ignoring non-boolean front matter override");
            current
        }
    }
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dist")
}

fn default_extension() -> String {
    "html".to_string()
}

fn default_strip_comments() -> bool {
    true
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.build.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.build.output_dir, PathBuf::from("dist"));
        assert_eq!(config.build.extension, "html");
        assert!(config.transform.strip_comments);
        assert!(!config.transform.collapse_whitespace);
        assert!(config.transform.base_url.is_none());
        assert!(config.variables.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[build]
templatesDir = "src/emails"
outputDir = "build"
extension = "htm"

[transform]
stripComments = false
collapseWhitespace = true
baseUrl = "https://cdn.example.com/"

[variables]
company = "Acme"
year = 2026
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.build.templates_dir, PathBuf::from("src/emails"));
        assert_eq!(config.build.output_dir, PathBuf::from("build"));
        assert_eq!(config.build.extension, "htm");
        assert!(!config.transform.strip_comments);
        assert!(config.transform.collapse_whitespace);
        assert_eq!(
            config.transform.base_url.as_deref(),
            Some("https://cdn.example.com/")
        );
        assert_eq!(config.variables["company"], serde_json::json!("Acme"));
        assert_eq!(config.variables["year"], serde_json::json!(2026));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
[build]
outputDir = "out"
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.build.templates_dir, PathBuf::from("templates"));
        assert_eq!(config.build.output_dir, PathBuf::from("out"));
        assert_eq!(config.build.extension, "html");
    }

    #[test]
    fn test_validate_same_dirs() {
        let mut config = Config::default();
        config.build.output_dir.clone_from(&config.build.templates_dir);

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("must differ"));
    }

    #[test]
    fn test_validate_dotted_extension() {
        let mut config = Config::default();
        config.build.extension = ".html".to_string();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("without a dot"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = Config::load(&temp.path().join("nope.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config.build.extension, "html");
    }

    #[test]
    fn test_load_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("letterpress.toml");
        std::fs::write(
            &path,
            "[build]\ntemplatesDir = \"emails\"\n\n[variables]\nname = \"test\"\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.build.templates_dir, PathBuf::from("emails"));
        assert_eq!(config.variables["name"], serde_json::json!("test"));
    }

    #[test]
    fn test_for_template_overrides_settings() {
        let config = Config::default();
        let mut matter = IndexMap::new();
        matter.insert("extension".to_string(), "amp.html".to_string());
        matter.insert("stripComments".to_string(), "false".to_string());
        matter.insert("baseUrl".to_string(), "https://img.example.com/".to_string());
        matter.insert("title".to_string(), "Welcome".to_string());

        let derived = config.for_template(&matter);
        assert_eq!(derived.build.extension, "amp.html");
        assert!(!derived.transform.strip_comments);
        assert_eq!(
            derived.transform.base_url.as_deref(),
            Some("https://img.example.com/")
        );
        assert_eq!(derived.variables["title"], serde_json::json!("Welcome"));

        // Environment config is untouched
        assert_eq!(config.build.extension, "html");
        assert!(config.transform.strip_comments);
        assert!(!config.variables.contains_key("title"));
    }

    #[test]
    fn test_for_template_invalid_bool_keeps_current() {
        let config = Config::default();
        let mut matter = IndexMap::new();
        matter.insert("stripComments".to_string(), "maybe".to_string());

        let derived = config.for_template(&matter);
        assert!(derived.transform.strip_comments);
    }

    #[test]
    fn test_for_template_empty_base_url_clears() {
        let mut config = Config::default();
        config.transform.base_url = Some("https://cdn.example.com/".to_string());

        let mut matter = IndexMap::new();
        matter.insert("baseUrl".to_string(), String::new());

        let derived = config.for_template(&matter);
        assert!(derived.transform.base_url.is_none());
    }
}
