//! Pipeline orchestration.
//!
//! Drives the three build stages in their only meaningful order:
//!
//! 1. Clean the output directory
//! 2. Run the external compiler
//! 3. Copy static assets into the output directory
//!
//! Each stage stays individually callable; this module fixes the sequence
//! and decides what a compiler failure means for the rest of the run.

use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::compiler::{CompilerError, CompilerStatus, run_compiler};
use crate::config::BuildConfig;
use crate::stage::{StageError, clean_out_dir, copy_assets};

/// Errors that can occur during a full pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
  /// Clean or copy stage failed.
  #[error("stage error: {0}")]
  Stage(#[from] StageError),

  /// The compiler process could not be started.
  #[error("compiler error: {0}")]
  Compiler(#[from] CompilerError),

  /// The compiler exited with a failure and `keep_going` was not set.
  #[error("compiler exited with failure (exit code {code:?})")]
  CompilerFailed { code: Option<i32> },
}

/// Options for a full pipeline run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
  /// Copy static assets even when the compiler exits with failure.
  ///
  /// This reproduces the historical behavior of always publishing
  /// whatever the compiler left behind. Off by default.
  pub keep_going: bool,
}

/// Result of a full pipeline run.
#[derive(Debug)]
pub struct RunReport {
  /// Whether the clean stage removed a previous output directory.
  pub cleaned: bool,

  /// Outcome of the compiler stage.
  pub compiler: CompilerStatus,

  /// Wall-clock time of the whole run.
  pub elapsed: Duration,
}

/// Run the full pipeline: clean, compile, copy.
pub async fn run(config: &BuildConfig, options: &RunOptions) -> Result<RunReport, PipelineError> {
  let start = Instant::now();
  info!(out_dir = %config.out_dir.display(), "starting build");

  // 1. Clean
  let cleaned = clean_out_dir(config)?;

  // 2. Compile
  let status = run_compiler(config).await?;
  if let CompilerStatus::Failed { code } = status {
    if options.keep_going {
      warn!(code = ?code, "compiler failed, copying assets anyway");
    } else {
      return Err(PipelineError::CompilerFailed { code });
    }
  }

  // 3. Copy static assets
  copy_assets(config)?;

  let elapsed = start.elapsed();
  info!(
    cleaned,
    compiler_ok = status.is_success(),
    elapsed_ms = elapsed.as_millis() as u64,
    "build complete"
  );

  Ok(RunReport {
    cleaned,
    compiler: status,
    elapsed,
  })
}
