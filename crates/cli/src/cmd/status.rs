//! Status command implementation.
//!
//! Displays the resolved configuration and the state of the build output
//! directory.

use std::path::Path;

use anyhow::Result;

use tsbuild_lib::BuildConfig;

use crate::output::{format_bytes, print_info, print_stat, print_success};

pub fn cmd_status(config_path: &Path) -> Result<()> {
  let config = BuildConfig::load_or_default(config_path)?;

  if config_path.exists() {
    print_success(&format!("Config: {}", config_path.display()));
  } else {
    print_info("No config file found, using defaults");
  }

  print_stat("Compiler", &config.compiler);
  if !config.compiler_args.is_empty() {
    print_stat("Compiler args", &config.compiler_args.join(" "));
  }
  print_stat("Output dir", &config.out_dir.display().to_string());
  print_stat("Index file", &config.index_file.display().to_string());
  print_stat("Resources", &config.resources_dir.display().to_string());

  println!();
  if config.out_dir.is_dir() {
    print_stat(
      "Output state",
      &format!("present ({})", format_bytes(dir_size(&config.out_dir))),
    );
  } else {
    print_stat("Output state", "absent");
  }

  Ok(())
}

fn dir_size(path: &Path) -> u64 {
  if !path.exists() {
    return 0;
  }

  let mut size = 0;
  if let Ok(entries) = std::fs::read_dir(path) {
    for entry in entries.flatten() {
      let entry_path = entry.path();
      if entry_path.is_file() {
        size += entry.metadata().map(|m| m.len()).unwrap_or(0);
      } else if entry_path.is_dir() {
        size += dir_size(&entry_path);
      }
    }
  }
  size
}
