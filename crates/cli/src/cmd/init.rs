//! Init command implementation
//!
//! Scaffolds a new letterpress project: config file, templates directory,
//! a partials directory and a starter template.

use anyhow::{Context, Result, bail};
use clap::Args;
use std::fs;
use std::path::Path;
use tracing::debug;

const CONFIG_TEMPLATE: &str = r#"# Letterpress configuration

[build]
templatesDir = "templates"
outputDir = "dist"
extension = "html"

[transform]
stripComments = true
collapseWhitespace = false
# baseUrl = "https://cdn.example.com/"

[variables]
company = "Acme"
"#;

const STARTER_TEMPLATE: &str = r"---
title: Welcome
---
<!DOCTYPE html>
<html>
  <head>
    <title>{{ page.title }}</title>
  </head>
  <body>
    <h1>{{ page.title }} to {{ company }}</h1>
    {% include 'footer' %}
  </body>
</html>
";

const STARTER_PARTIAL: &str = "<footer>&copy; {{ now('%Y') }} {{ company }}</footer>\n";

/// Scaffold a new letterpress project
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    ///
    /// # Errors
    ///
    /// Returns an error if a project already exists (without `--force`) or
    /// scaffolding files cannot be written.
    pub fn execute(&self, root: &Path) -> Result<()> {
        let config_path = root.join("letterpress.toml");
        if config_path.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            );
        }

        let templates_dir = root.join("templates");
        fs::create_dir_all(templates_dir.join("_partials"))
            .context("Failed to create templates directory")?;

        fs::write(&config_path, CONFIG_TEMPLATE).context("Failed to write letterpress.toml")?;
        fs::write(templates_dir.join("welcome.html"), STARTER_TEMPLATE)
            .context("Failed to write starter template")?;
        fs::write(templates_dir.join("_partials/footer.html"), STARTER_PARTIAL)
            .context("Failed to write starter partial")?;

        debug!(root = %root.display(), "Scaffolded project");
        println!("Letterpress project created in {}", root.display());
        println!("\nNext steps:");
        println!("  1. Edit templates/welcome.html");
        println!("  2. Build: letterpress build");
        Ok(())
    }
}
