//! Build configuration loading and validation.
//!
//! The configuration is resolved once at startup from an optional
//! `tsbuild.toml` and passed by reference into every pipeline stage. There
//! are no process-wide globals; CLI flags override file values, and no
//! environment variables are consulted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Default name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "tsbuild.toml";

/// Errors that can occur while loading the build configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Failed to read the config file.
  #[error("failed to read config file '{path}': {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The config file is not valid TOML.
  #[error("failed to parse config file '{path}': {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: toml::de::Error,
  },

  /// A required field is empty.
  #[error("config field '{0}' must not be empty")]
  EmptyField(&'static str),
}

/// The build configuration.
///
/// All fields are fixed for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
  /// Name of the external compiler executable to invoke.
  pub compiler: String,

  /// Arguments passed to the compiler. Empty by default: the compiler is
  /// expected to read its own project configuration from the working
  /// directory.
  pub compiler_args: Vec<String>,

  /// Directory that receives build output.
  pub out_dir: PathBuf,

  /// File copied verbatim into `out_dir`.
  pub index_file: PathBuf,

  /// Directory copied recursively into `out_dir`.
  pub resources_dir: PathBuf,
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      compiler: "tsc".to_string(),
      compiler_args: Vec::new(),
      out_dir: PathBuf::from("build"),
      index_file: PathBuf::from("index.html"),
      resources_dir: PathBuf::from("res"),
    }
  }
}

impl BuildConfig {
  /// Load the configuration from a TOML file.
  ///
  /// Missing keys fall back to the defaults. The file must exist; use
  /// [`BuildConfig::load_or_default`] when the file is optional.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
      path: path.to_path_buf(),
      source: e,
    })?;

    let config: BuildConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
      path: path.to_path_buf(),
      source: e,
    })?;

    config.validate()?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
  }

  /// Load the configuration from `path` if it exists, defaults otherwise.
  pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
    if path.exists() {
      Self::load(path)
    } else {
      debug!(path = %path.display(), "no config file, using defaults");
      Ok(Self::default())
    }
  }

  /// Check that no required field is empty.
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.compiler.is_empty() {
      return Err(ConfigError::EmptyField("compiler"));
    }
    if self.out_dir.as_os_str().is_empty() {
      return Err(ConfigError::EmptyField("out_dir"));
    }
    if self.index_file.as_os_str().is_empty() {
      return Err(ConfigError::EmptyField("index_file"));
    }
    if self.resources_dir.as_os_str().is_empty() {
      return Err(ConfigError::EmptyField("resources_dir"));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  #[test]
  fn defaults_match_the_conventional_project_layout() {
    let config = BuildConfig::default();

    assert_eq!(config.compiler, "tsc");
    assert!(config.compiler_args.is_empty());
    assert_eq!(config.out_dir, PathBuf::from("build"));
    assert_eq!(config.index_file, PathBuf::from("index.html"));
    assert_eq!(config.resources_dir, PathBuf::from("res"));
  }

  #[test]
  fn load_reads_all_fields() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tsbuild.toml");
    fs::write(
      &path,
      r#"
      compiler = "deno"
      compiler_args = ["check", "main.ts"]
      out_dir = "dist"
      index_file = "public/index.html"
      resources_dir = "assets"
      "#,
    )
    .unwrap();

    let config = BuildConfig::load(&path).unwrap();

    assert_eq!(config.compiler, "deno");
    assert_eq!(config.compiler_args, vec!["check", "main.ts"]);
    assert_eq!(config.out_dir, PathBuf::from("dist"));
    assert_eq!(config.index_file, PathBuf::from("public/index.html"));
    assert_eq!(config.resources_dir, PathBuf::from("assets"));
  }

  #[test]
  fn load_fills_missing_keys_with_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tsbuild.toml");
    fs::write(&path, "out_dir = \"dist\"\n").unwrap();

    let config = BuildConfig::load(&path).unwrap();

    assert_eq!(config.out_dir, PathBuf::from("dist"));
    assert_eq!(config.compiler, "tsc");
    assert_eq!(config.index_file, PathBuf::from("index.html"));
  }

  #[test]
  fn load_rejects_unknown_keys() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tsbuild.toml");
    fs::write(&path, "compilr = \"tsc\"\n").unwrap();

    let result = BuildConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
  }

  #[test]
  fn load_rejects_empty_compiler() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tsbuild.toml");
    fs::write(&path, "compiler = \"\"\n").unwrap();

    let result = BuildConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::EmptyField("compiler"))));
  }

  #[test]
  fn load_rejects_empty_out_dir() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tsbuild.toml");
    fs::write(&path, "out_dir = \"\"\n").unwrap();

    let result = BuildConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::EmptyField("out_dir"))));
  }

  #[test]
  fn load_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");

    let result = BuildConfig::load(&path);
    assert!(matches!(result, Err(ConfigError::Read { .. })));
  }

  #[test]
  fn load_or_default_uses_defaults_when_absent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nope.toml");

    let config = BuildConfig::load_or_default(&path).unwrap();
    assert_eq!(config, BuildConfig::default());
  }

  #[test]
  fn load_or_default_reads_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("tsbuild.toml");
    fs::write(&path, "compiler = \"swc\"\n").unwrap();

    let config = BuildConfig::load_or_default(&path).unwrap();
    assert_eq!(config.compiler, "swc");
  }
}
