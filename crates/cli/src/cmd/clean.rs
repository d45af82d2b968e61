//! Clean command implementation

use anyhow::{Context, Result};
use letterpress_config::Config;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Remove the configured output directory
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub fn run(root: &Path, config: &Config) -> Result<()> {
    let output_dir = root.join(&config.build.output_dir);
    if !output_dir.exists() {
        println!("Nothing to clean ({} does not exist)", output_dir.display());
        return Ok(());
    }

    fs::remove_dir_all(&output_dir)
        .with_context(|| format!("Failed to remove {}", output_dir.display()))?;
    debug!(output_dir = %output_dir.display(), "Removed output directory");
    println!("Removed {}", output_dir.display());
    Ok(())
}
