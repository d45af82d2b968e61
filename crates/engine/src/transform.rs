//! HTML post-processing transformers
//!
//! After template compilation each template's markup runs through a fixed
//! chain of transformers, each individually toggleable through the
//! `[transform]` configuration section (and, per template, through front
//! matter overrides). The chain is also exposed to hooks as the
//! [`HtmlProcessor`] capability so a hook can re-run the chain mid-pipeline.

use crate::error::Result;
use letterpress_config::Config;
use regex::Regex;
use std::sync::LazyLock;

static COMMENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--(.*?)-->").expect("Valid regex"));

static BLANK_LINES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*(?:\n[ \t]*)+").expect("Valid regex"));

static SPACE_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]{2,}").expect("Valid regex"));

static URL_ATTR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(src|href|background)\s*=\s*"(/[^/"][^"]*|/)""#).expect("Valid regex")
});

/// One step of the post-processing chain
pub trait Transformer: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Whether this step runs under the given configuration
    fn enabled(&self, config: &Config) -> bool;

    /// Apply the transformation
    fn apply(&self, html: &str, config: &Config) -> String;
}

/// Removes HTML comments, preserving Outlook conditionals
///
/// `<!--[if mso]>...<![endif]-->` blocks and downlevel-revealed closers
/// (`<!--<![endif]-->`) survive stripping; Outlook's rendering depends on
/// them.
pub struct StripComments;

impl Transformer for StripComments {
    fn name(&self) -> &'static str {
        "strip-comments"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.transform.strip_comments
    }

    fn apply(&self, html: &str, _config: &Config) -> String {
        COMMENT_PATTERN
            .replace_all(html, |caps: &regex::Captures<'_>| {
                let inner = caps[1].trim();
                if inner.starts_with("[if") || inner.starts_with("<![endif]") {
                    caps[0].to_string()
                } else {
                    String::new()
                }
            })
            .into_owned()
    }
}

/// Collapses runs of inter-tag whitespace
///
/// Blank lines are dropped and runs of spaces and tabs become a single
/// space. Newlines between tags are kept so the output stays diffable.
pub struct CollapseWhitespace;

impl Transformer for CollapseWhitespace {
    fn name(&self) -> &'static str {
        "collapse-whitespace"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.transform.collapse_whitespace
    }

    fn apply(&self, html: &str, _config: &Config) -> String {
        let collapsed = BLANK_LINES_PATTERN.replace_all(html, "\n");
        SPACE_RUN_PATTERN.replace_all(&collapsed, " ").into_owned()
    }
}

/// Prefixes root-relative URL attributes with the configured base URL
///
/// Rewrites `src`, `href` and `background` attribute values that start with
/// a single `/`. Absolute URLs, fragments and protocol-relative (`//`)
/// values are left alone.
pub struct RewriteUrls;

impl Transformer for RewriteUrls {
    fn name(&self) -> &'static str {
        "rewrite-urls"
    }

    fn enabled(&self, config: &Config) -> bool {
        config.transform.base_url.is_some()
    }

    fn apply(&self, html: &str, config: &Config) -> String {
        let Some(base_url) = config.transform.base_url.as_deref() else {
            return html.to_string();
        };
        let base = base_url.trim_end_matches('/');

        URL_ATTR_PATTERN
            .replace_all(html, |caps: &regex::Captures<'_>| {
                format!("{}=\"{}{}\"", &caps[1], base, &caps[2])
            })
            .into_owned()
    }
}

/// Markup produced by a full pass through the transformer chain
#[derive(Debug, Clone)]
pub struct ProcessedHtml {
    /// The transformed markup
    pub html: String,
}

/// Capability for running the post-processing chain
///
/// Hooks receive this as a trait object so they can re-run the chain on
/// markup they assembled themselves, without knowing its composition.
pub trait HtmlProcessor: Send + Sync {
    /// Run every enabled transformer over `html`, in chain order
    ///
    /// # Errors
    ///
    /// Implementations may fail; the built-in chain never does.
    fn process(&self, html: &str, config: &Config) -> Result<ProcessedHtml>;
}

/// The fixed, ordered transformer chain
///
/// Order matters: comment stripping runs before whitespace collapsing so
/// that removed comments do not leave stray blank lines behind, and URL
/// rewriting runs last over the final attribute layout.
pub struct TransformerChain {
    transformers: Vec<Box<dyn Transformer>>,
}

impl TransformerChain {
    /// The standard chain: strip comments, collapse whitespace, rewrite URLs
    #[must_use]
    pub fn standard() -> Self {
        Self {
            transformers: vec![
                Box::new(StripComments),
                Box::new(CollapseWhitespace),
                Box::new(RewriteUrls),
            ],
        }
    }
}

impl Default for TransformerChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl HtmlProcessor for TransformerChain {
    fn process(&self, html: &str, config: &Config) -> Result<ProcessedHtml> {
        let mut current = html.to_string();

        for transformer in &self.transformers {
            if !transformer.enabled(config) {
                tracing::trace!(transformer = transformer.name(), "Skipped (disabled)");
                continue;
            }
            let before = current.len();
            current = transformer.apply(&current, config);
            tracing::trace!(
                transformer = transformer.name(),
                bytes_before = before,
                bytes_after = current.len(),
                "Applied transformer"
            );
        }

        Ok(ProcessedHtml { html: current })
    }
}
