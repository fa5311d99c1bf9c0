//! External compiler invocation.
//!
//! The compiler is an external collaborator: it is spawned by name, reads
//! its own project configuration from the working directory, and writes
//! into the output directory. Its stdio is inherited so diagnostics reach
//! the terminal unchanged.

use std::io;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::BuildConfig;

/// Errors that can occur while starting the compiler process.
#[derive(Debug, Error)]
pub enum CompilerError {
  /// The compiler executable could not be started.
  #[error("failed to launch compiler '{command}': {source}")]
  Launch {
    command: String,
    #[source]
    source: io::Error,
  },
}

/// Outcome of a compiler run.
///
/// A non-zero exit is data, not an error: the caller decides whether to
/// proceed. `code` is `None` when the process was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilerStatus {
  Success,
  Failed { code: Option<i32> },
}

impl CompilerStatus {
  pub fn is_success(self) -> bool {
    matches!(self, CompilerStatus::Success)
  }
}

/// Run the configured compiler and wait for it to exit.
pub async fn run_compiler(config: &BuildConfig) -> Result<CompilerStatus, CompilerError> {
  info!(command = %config.compiler, "invoking compiler");

  let status = Command::new(&config.compiler)
    .args(&config.compiler_args)
    .status()
    .await
    .map_err(|e| CompilerError::Launch {
      command: config.compiler.clone(),
      source: e,
    })?;

  if status.success() {
    debug!(command = %config.compiler, "compiler finished");
    Ok(CompilerStatus::Success)
  } else {
    warn!(command = %config.compiler, code = ?status.code(), "compiler exited with failure");
    Ok(CompilerStatus::Failed { code: status.code() })
  }
}
