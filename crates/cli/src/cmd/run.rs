//! Implementation of the default full-pipeline command.
//!
//! Runs clean, compile, and copy in their fixed order and prints a
//! summary of what happened.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use tsbuild_lib::{BuildConfig, CompilerStatus, RunOptions, run};

use crate::output::{format_duration, print_info, print_stat, print_success, print_warning};

/// Execute the full pipeline.
///
/// Loads the configuration, runs clean -> compile -> copy, and prints a
/// summary block. With `keep_going`, a failed compile is reported as a
/// warning but the assets are still published and the process exits zero.
pub fn cmd_run(config_path: &Path, keep_going: bool) -> Result<()> {
  let config = BuildConfig::load_or_default(config_path)?;

  print_info(&format!("Building with '{}'", config.compiler));

  let options = RunOptions { keep_going };

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let report = rt.block_on(run(&config, &options)).context("Build failed")?;

  // Print summary
  println!();
  print_success("Build complete!");
  print_stat(
    "Cleaned",
    if report.cleaned {
      "previous output removed"
    } else {
      "nothing to remove"
    },
  );
  match report.compiler {
    CompilerStatus::Success => print_stat("Compiler", "exit status 0"),
    CompilerStatus::Failed { code } => {
      let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
      print_warning(&format!("Compiler failed (exit code {}), assets copied anyway", code));
    }
  }
  print_stat("Output", &config.out_dir.display().to_string());
  print_stat("Elapsed", &format_duration(report.elapsed));

  info!(out_dir = %config.out_dir.display(), "build published");

  Ok(())
}
