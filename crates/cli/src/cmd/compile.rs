//! Implementation of the `tsbuild compile` command.

use std::path::Path;

use anyhow::{Context, Result, bail};

use tsbuild_lib::{BuildConfig, CompilerStatus, run_compiler};

use crate::output::{print_error, print_success};

/// Execute the compile command.
///
/// Runs the external compiler on its own and mirrors its failure as a
/// non-zero process exit.
pub fn cmd_compile(config_path: &Path) -> Result<()> {
  let config = BuildConfig::load_or_default(config_path)?;

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let status = rt.block_on(run_compiler(&config)).context("Compile failed")?;

  match status {
    CompilerStatus::Success => {
      print_success("Compiler finished");
      Ok(())
    }
    CompilerStatus::Failed { code: Some(code) } => {
      print_error(&format!("Compiler '{}' exited with code {}", config.compiler, code));
      bail!("compiler exited with code {}", code);
    }
    CompilerStatus::Failed { code: None } => {
      print_error(&format!("Compiler '{}' was terminated by a signal", config.compiler));
      bail!("compiler terminated by a signal");
    }
  }
}
