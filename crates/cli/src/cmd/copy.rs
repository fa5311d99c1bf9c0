//! Implementation of the `tsbuild copy` command.

use std::path::Path;

use anyhow::{Context, Result};

use tsbuild_lib::{BuildConfig, copy_assets};

use crate::output::print_success;

/// Execute the copy command.
///
/// Copies the index file and the resources tree into the build output
/// directory, which must already exist.
pub fn cmd_copy(config_path: &Path) -> Result<()> {
  let config = BuildConfig::load_or_default(config_path)?;

  copy_assets(&config).context("Copy failed")?;

  print_success(&format!(
    "Copied {} and {} into {}",
    config.index_file.display(),
    config.resources_dir.display(),
    config.out_dir.display()
  ));

  Ok(())
}
