//! Mutable configuration builder for the `beforeCreate` lifecycle point
//!
//! The build pipeline hands the `beforeCreate` hook an exclusively owned
//! [`ConfigBuilder`] instead of letting it mutate ambient shared state. After
//! the hook returns, [`ConfigBuilder::freeze`] turns the builder into the
//! immutable [`Config`] snapshot used by every subsequent stage.

use crate::Config;
use crate::config::{BuildConfig, TransformConfig};
use indexmap::IndexMap;

/// Mutable counterpart of [`Config`]
///
/// All fields are public: the `beforeCreate` hook is the intended consumer
/// and may edit anything before the configuration is frozen.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    /// Build paths and output settings
    pub build: BuildConfig,

    /// Transformer chain settings
    pub transform: TransformConfig,

    /// Custom variables exposed to templates
    pub variables: IndexMap<String, serde_json::Value>,
}

impl ConfigBuilder {
    /// Create a builder with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a template variable
    pub fn set_variable(&mut self, key: impl Into<String>, value: serde_json::Value) -> &mut Self {
        self.variables.insert(key.into(), value);
        self
    }

    /// Freeze the builder into an immutable configuration snapshot
    #[must_use]
    pub fn freeze(self) -> Config {
        Config {
            build: self.build,
            transform: self.transform,
            variables: self.variables,
        }
    }
}

impl From<Config> for ConfigBuilder {
    fn from(config: Config) -> Self {
        Self {
            build: config.build,
            transform: config.transform,
            variables: config.variables,
        }
    }
}
