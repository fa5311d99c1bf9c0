//! tsbuild-lib: Configuration and pipeline for the tsbuild build helper.
//!
//! This crate provides the pieces the `tsbuild` binary is assembled from:
//! - `BuildConfig`: the immutable build configuration
//! - `clean_out_dir` / `run_compiler` / `copy_assets`: the three stages
//! - `run`: the fixed clean -> compile -> copy orchestration

pub mod compiler;
pub mod config;
pub mod pipeline;
pub mod stage;

pub use compiler::{CompilerError, CompilerStatus, run_compiler};
pub use config::{BuildConfig, CONFIG_FILE_NAME, ConfigError};
pub use pipeline::{PipelineError, RunOptions, RunReport, run};
pub use stage::{StageError, clean_out_dir, copy_assets};
