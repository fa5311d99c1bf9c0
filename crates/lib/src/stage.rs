//! Clean and copy stages.
//!
//! Both stages are plain filesystem work: `clean_out_dir` removes prior
//! build output, `copy_assets` places the static index file and the
//! resources tree into the build output directory. Each stage is
//! idempotent on its own; only the pipeline fixes their order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::BuildConfig;

/// Errors that can occur during the clean and copy stages.
#[derive(Debug, Error)]
pub enum StageError {
  /// Failed to remove the build output directory.
  #[error("failed to remove '{path}': {source}")]
  Remove {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to copy a single file.
  #[error("failed to copy '{from}' to '{to}': {source}")]
  CopyFile {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  /// Failed to copy a directory tree.
  #[error("failed to copy directory '{from}' to '{to}': {source}")]
  CopyDir {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: io::Error,
  },

  /// The build output directory does not exist yet.
  #[error("build output directory '{0}' does not exist (run the compiler first)")]
  OutDirMissing(PathBuf),
}

/// Remove the build output directory if it exists.
///
/// Returns `true` when a directory was actually removed, `false` when
/// there was nothing to do.
pub fn clean_out_dir(config: &BuildConfig) -> Result<bool, StageError> {
  let out_dir = &config.out_dir;

  if !out_dir.exists() {
    debug!(path = %out_dir.display(), "output directory absent, nothing to clean");
    return Ok(false);
  }

  fs::remove_dir_all(out_dir).map_err(|e| StageError::Remove {
    path: out_dir.clone(),
    source: e,
  })?;

  info!(path = %out_dir.display(), "removed output directory");
  Ok(true)
}

/// Copy the static assets into the build output directory.
///
/// Copies `index_file` to the root of `out_dir` and `resources_dir` to
/// `out_dir/<resources dir name>`, overwriting existing files. The output
/// directory must already exist; the compiler step normally creates it.
pub fn copy_assets(config: &BuildConfig) -> Result<(), StageError> {
  let out_dir = &config.out_dir;

  if !out_dir.is_dir() {
    return Err(StageError::OutDirMissing(out_dir.clone()));
  }

  let index_name = config
    .index_file
    .file_name()
    .unwrap_or(config.index_file.as_os_str());
  let index_dest = out_dir.join(index_name);
  fs::copy(&config.index_file, &index_dest).map_err(|e| StageError::CopyFile {
    from: config.index_file.clone(),
    to: index_dest.clone(),
    source: e,
  })?;
  debug!(from = %config.index_file.display(), to = %index_dest.display(), "copied index file");

  let res_name = config
    .resources_dir
    .file_name()
    .unwrap_or(config.resources_dir.as_os_str());
  let res_dest = out_dir.join(res_name);
  copy_dir_recursive(&config.resources_dir, &res_dest)?;
  debug!(from = %config.resources_dir.display(), to = %res_dest.display(), "copied resources");

  info!(out_dir = %out_dir.display(), "copied static assets");
  Ok(())
}

/// Copy a directory tree, creating destination directories as needed and
/// overwriting existing files.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), StageError> {
  let copy_err = |e: io::Error| StageError::CopyDir {
    from: src.to_path_buf(),
    to: dst.to_path_buf(),
    source: e,
  };

  for entry in WalkDir::new(src) {
    let entry = entry.map_err(|e| copy_err(io::Error::from(e)))?;

    let relative = entry
      .path()
      .strip_prefix(src)
      .expect("walkdir yields paths under its root");
    let target = dst.join(relative);

    if entry.file_type().is_dir() {
      fs::create_dir_all(&target).map_err(copy_err)?;
    } else {
      fs::copy(entry.path(), &target).map_err(copy_err)?;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::BTreeSet;
  use tempfile::TempDir;

  /// Config with all paths rooted in the given temp directory.
  fn temp_config(temp: &TempDir) -> BuildConfig {
    BuildConfig {
      out_dir: temp.path().join("build"),
      index_file: temp.path().join("index.html"),
      resources_dir: temp.path().join("res"),
      ..BuildConfig::default()
    }
  }

  /// Create the index file and a small resources tree.
  fn write_assets(temp: &TempDir) {
    fs::write(temp.path().join("index.html"), "<html></html>").unwrap();
    fs::create_dir_all(temp.path().join("res/img")).unwrap();
    fs::write(temp.path().join("res/style.css"), "body {}").unwrap();
    fs::write(temp.path().join("res/img/logo.svg"), "<svg/>").unwrap();
  }

  /// Collect the set of relative paths under a directory.
  fn content_set(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
      .into_iter()
      .map(|e| e.unwrap().path().strip_prefix(root).unwrap().to_path_buf())
      .collect()
  }

  mod clean_out_dir {
    use super::*;

    #[test]
    fn removes_existing_directory() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      fs::create_dir_all(config.out_dir.join("nested")).unwrap();
      fs::write(config.out_dir.join("nested/old.js"), "stale").unwrap();

      let removed = clean_out_dir(&config).unwrap();

      assert!(removed);
      assert!(!config.out_dir.exists());
    }

    #[test]
    fn noop_when_directory_absent() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);

      let removed = clean_out_dir(&config).unwrap();

      assert!(!removed);
      assert!(!config.out_dir.exists());
    }

    #[test]
    fn rerun_after_removal_is_a_noop() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      fs::create_dir_all(&config.out_dir).unwrap();

      assert!(clean_out_dir(&config).unwrap());
      assert!(!clean_out_dir(&config).unwrap());
    }
  }

  mod copy_assets {
    use super::*;

    #[test]
    fn places_index_and_resources_at_out_dir_root() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      write_assets(&temp);
      fs::create_dir_all(&config.out_dir).unwrap();

      copy_assets(&config).unwrap();

      assert!(config.out_dir.join("index.html").is_file());
      assert!(config.out_dir.join("res/style.css").is_file());
      assert!(config.out_dir.join("res/img/logo.svg").is_file());
    }

    #[test]
    fn fails_when_out_dir_missing() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      write_assets(&temp);

      let result = copy_assets(&config);
      assert!(matches!(result, Err(StageError::OutDirMissing(_))));
    }

    #[test]
    fn fails_when_index_file_missing() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      fs::create_dir_all(temp.path().join("res")).unwrap();
      fs::create_dir_all(&config.out_dir).unwrap();

      let result = copy_assets(&config);
      assert!(matches!(result, Err(StageError::CopyFile { .. })));
    }

    #[test]
    fn fails_when_resources_dir_missing() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      fs::write(temp.path().join("index.html"), "<html></html>").unwrap();
      fs::create_dir_all(&config.out_dir).unwrap();

      let result = copy_assets(&config);
      assert!(matches!(result, Err(StageError::CopyDir { .. })));
    }

    #[test]
    fn overwrites_stale_copies() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      write_assets(&temp);
      fs::create_dir_all(config.out_dir.join("res")).unwrap();
      fs::write(config.out_dir.join("index.html"), "old").unwrap();
      fs::write(config.out_dir.join("res/style.css"), "old").unwrap();

      copy_assets(&config).unwrap();

      assert_eq!(
        fs::read_to_string(config.out_dir.join("index.html")).unwrap(),
        "<html></html>"
      );
      assert_eq!(
        fs::read_to_string(config.out_dir.join("res/style.css")).unwrap(),
        "body {}"
      );
    }

    #[test]
    fn idempotent() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      write_assets(&temp);
      fs::create_dir_all(&config.out_dir).unwrap();

      copy_assets(&config).unwrap();
      let first = content_set(&config.out_dir);

      copy_assets(&config).unwrap();
      let second = content_set(&config.out_dir);

      assert_eq!(first, second);
    }

    #[test]
    fn leaves_compiler_output_in_place() {
      let temp = TempDir::new().unwrap();
      let config = temp_config(&temp);
      write_assets(&temp);
      fs::create_dir_all(&config.out_dir).unwrap();
      fs::write(config.out_dir.join("app.js"), "console.log(1)").unwrap();

      copy_assets(&config).unwrap();

      assert!(config.out_dir.join("app.js").is_file());
    }
  }
}
