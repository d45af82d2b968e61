//! Build command implementation
//!
//! Runs the full pipeline: discover templates, compile, transform, write.

use anyhow::{Context, Result, bail};
use clap::Args;
use letterpress_config::Config;
use letterpress_engine::BuildPipeline;
use std::path::{Path, PathBuf};

/// Build all templates into the output directory
#[derive(Args)]
pub struct BuildCommand {
    /// Keep building remaining templates when one fails
    #[arg(short, long)]
    pub keep_going: bool,

    /// Override the output directory from the config file
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

impl BuildCommand {
    /// Execute the build command
    ///
    /// # Errors
    ///
    /// Returns an error if the build fails, or (in `--keep-going` mode) if
    /// any template failed.
    pub fn execute(&self, root: &Path, mut config: Config) -> Result<()> {
        if let Some(output) = &self.output {
            config.build.output_dir.clone_from(output);
        }

        let report = BuildPipeline::new(config)
            .with_root(root)
            .fail_fast(!self.keep_going)
            .run()
            .context("Build failed")?;

        println!("Built {} template(s)", report.files.len());

        if !report.is_success() {
            for failure in &report.failures {
                eprintln!("  failed: {}: {}", failure.template.display(), failure.error);
            }
            bail!("{} template(s) failed", report.failures.len());
        }
        Ok(())
    }
}
