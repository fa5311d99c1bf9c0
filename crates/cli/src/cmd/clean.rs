//! Implementation of the `tsbuild clean` command.

use std::path::Path;

use anyhow::{Context, Result};

use tsbuild_lib::{BuildConfig, clean_out_dir};

use crate::output::{print_info, print_success};

/// Execute the clean command.
///
/// Removes the build output directory if it exists; succeeds quietly when
/// there is nothing to remove.
pub fn cmd_clean(config_path: &Path) -> Result<()> {
  let config = BuildConfig::load_or_default(config_path)?;

  let removed = clean_out_dir(&config).context("Clean failed")?;

  if removed {
    print_success(&format!("Removed {}", config.out_dir.display()));
  } else {
    print_info(&format!(
      "{} does not exist, nothing to clean",
      config.out_dir.display()
    ));
  }

  Ok(())
}
