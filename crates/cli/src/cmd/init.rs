//! Implementation of the `tsbuild init` command.
//!
//! Scaffolds a starter `tsbuild.toml` in the given directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use tsbuild_lib::CONFIG_FILE_NAME;

use crate::output::symbols;

/// Starter configuration, matching the built-in defaults.
const CONFIG_TEMPLATE: &str = r#"# tsbuild configuration
#
# Every key is optional; the values below are the defaults.

compiler = "tsc"
compiler_args = []
out_dir = "build"
index_file = "index.html"
resources_dir = "res"
"#;

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if a config file already exists or the directory
/// cannot be written.
pub fn cmd_init(path: &Path) -> Result<()> {
  let config_path = path.join(CONFIG_FILE_NAME);

  if config_path.exists() {
    bail!("config file already exists: {}", config_path.display());
  }

  fs::create_dir_all(path).with_context(|| format!("Failed to create directory {}", path.display()))?;
  fs::write(&config_path, CONFIG_TEMPLATE)
    .with_context(|| format!("Failed to write {}", config_path.display()))?;

  println!(
    "{} {}",
    symbols::SUCCESS.green(),
    "Initialized tsbuild configuration!".green().bold()
  );
  println!();
  println!("  {} Config file: {}", symbols::INFO.cyan(), config_path.display());
  println!();
  println!("{}", "Next steps:".bold());
  println!(
    "  1. Edit {} to match your project",
    config_path.display().to_string().cyan()
  );
  println!("  2. Run: {}", "tsbuild".cyan());

  Ok(())
}
