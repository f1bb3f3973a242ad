//! Template tree copying
//!
//! Copies every non-ignored regular file from a source tree into a fresh
//! destination, preserving relative paths. There is no rollback: a failure
//! partway through leaves a partially populated destination.

use crate::collector::{FileCollector, PatternSet};
use crate::config::CopyConfig;
use crate::error::{Error, Result};
use crate::types::CopyReport;
use crate::utils::{canonical_or_self, require, resolve_path};
use camino::Utf8Path;
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, info};

/// Options for copying a template tree
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Remove an existing destination before copying
    pub force: bool,
    /// Glob patterns never copied
    pub ignore: Vec<String>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self::from_config(&CopyConfig::default(), false)
    }
}

impl CopyOptions {
    /// Build options from configuration
    pub fn from_config(config: &CopyConfig, force: bool) -> Self {
        Self {
            force,
            ignore: config.ignore.clone(),
        }
    }
}

/// Copy the template at `source` into `destination`
///
/// # Errors
/// Returns error if:
/// - `destination` is empty, equals the source, or contains it
/// - The destination exists and `force` is not set
/// - The source cannot be walked or a file cannot be copied
pub fn copy_project(
    source: &Utf8Path,
    destination: &str,
    options: &CopyOptions,
) -> Result<CopyReport> {
    copy_project_with_progress(source, destination, options, |_| {})
}

/// Same as [`copy_project`], calling `on_file` after each copied file
pub fn copy_project_with_progress(
    source: &Utf8Path,
    destination: &str,
    options: &CopyOptions,
    mut on_file: impl FnMut(&Utf8Path),
) -> Result<CopyReport> {
    require(destination, "Destination path")?;

    let source = canonical_or_self(&resolve_path(source.as_str())?);
    let dest = resolve_path(destination)?;

    if !source.is_dir() {
        return Err(Error::directory_not_found(source.as_str()));
    }
    if source.starts_with(canonical_or_self(&dest)) {
        return Err(Error::validation(format!(
            "Destination {} must not contain the source {}",
            dest, source
        )));
    }

    // Compile patterns before touching the filesystem
    let ignore = PatternSet::new(&options.ignore)?;

    info!("Copying project files to {}...", dest);

    if dest.symlink_metadata().is_ok() {
        if !options.force {
            return Err(Error::destination_exists(dest.as_str()));
        }
        debug!("Removing existing destination: {}", dest);
        remove_existing(&dest)?;
    }

    fs::create_dir_all(&dest)?;

    let mut collector = FileCollector::new(source.clone(), ignore);
    if let Ok(rel) = canonical_or_self(&dest).strip_prefix(&source) {
        debug!("Destination is inside the source, skipping {}", rel);
        collector = collector.with_skip_dir(rel.to_path_buf());
    }

    let mut files_copied = 0;
    for file in collector.files()? {
        let rel = file?;
        let from = source.join(&rel);
        let to = dest.join(&rel);

        if let Some(parent) = to.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::write_file(parent.as_str(), e))?;
        }
        fs::copy(&from, &to).map_err(|e| Error::write_file(to.as_str(), e))?;

        debug!("Copied: {}", rel);
        on_file(&rel);
        files_copied += 1;
    }

    info!("Copied {} files", files_copied);

    Ok(CopyReport {
        destination: dest,
        files_copied,
    })
}

/// Remove a file or directory tree, ignoring absence
fn remove_existing(path: &Utf8Path) -> Result<()> {
    let result = match path.symlink_metadata() {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };

    match result {
        Err(e) if e.kind() != ErrorKind::NotFound => Err(Error::write_file(path.as_str(), e)),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    fn write(root: &Utf8Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        (temp_dir, root)
    }

    fn template(root: &Utf8Path) -> Utf8PathBuf {
        let source = root.join("template");
        write(&source, "README.md", "# pkg-placeholder");
        write(&source, "package.json", "{\"name\": \"pkg-placeholder\"}");
        write(&source, ".github/workflows/ci.yml", "on: push");
        write(&source, "src/index.ts", "export const x = 1");
        write(&source, ".git/config", "[core]");
        write(&source, "node_modules/dep/index.js", "");
        write(&source, "pnpm-lock.yaml", "lockfileVersion: 9");
        source
    }

    #[test]
    fn test_copy_round_trip() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);
        let dest = root.join("out");

        let report = copy_project(&source, dest.as_str(), &CopyOptions::default()).unwrap();

        assert_eq!(report.files_copied, 4);
        assert_eq!(report.destination, dest);
        for rel in ["README.md", "package.json", ".github/workflows/ci.yml", "src/index.ts"] {
            assert_eq!(
                fs::read(source.join(rel)).unwrap(),
                fs::read(dest.join(rel)).unwrap()
            );
        }
        assert!(!dest.join(".git").exists());
        assert!(!dest.join("node_modules").exists());
        assert!(!dest.join("pnpm-lock.yaml").exists());
    }

    #[test]
    fn test_existing_destination_without_force() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);
        let dest = root.join("out");
        write(&dest, "keep.txt", "mine");

        let result = copy_project(&source, dest.as_str(), &CopyOptions::default());

        assert!(matches!(result, Err(Error::DestinationExists { .. })));
        assert_eq!(fs::read_to_string(dest.join("keep.txt")).unwrap(), "mine");
        assert!(!dest.join("README.md").exists());
    }

    #[test]
    fn test_force_replaces_destination() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);
        let dest = root.join("out");
        write(&dest, "stale.txt", "old");
        write(&dest, "README.md", "old readme");

        let options = CopyOptions {
            force: true,
            ..Default::default()
        };
        let report = copy_project(&source, dest.as_str(), &options).unwrap();

        assert_eq!(report.files_copied, 4);
        assert!(!dest.join("stale.txt").exists());
        assert_eq!(
            fs::read_to_string(dest.join("README.md")).unwrap(),
            "# pkg-placeholder"
        );
    }

    #[test]
    fn test_force_replaces_plain_file() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);
        let dest = root.join("out");
        fs::write(&dest, "not a directory").unwrap();

        let options = CopyOptions {
            force: true,
            ..Default::default()
        };
        copy_project(&source, dest.as_str(), &options).unwrap();
        assert!(dest.join("README.md").is_file());
    }

    #[test]
    fn test_empty_destination_is_validation_error() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);

        let result = copy_project(&source, "", &CopyOptions::default());
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    fn test_destination_containing_source_is_rejected() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);

        let options = CopyOptions {
            force: true,
            ..Default::default()
        };
        let result = copy_project(&source, root.as_str(), &options);

        assert!(matches!(result, Err(Error::Validation { .. })));
        assert!(source.join("README.md").exists());
    }

    #[test]
    fn test_destination_inside_source_is_not_copied_into_itself() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);
        let dest = source.join("nested-out");

        let report = copy_project(&source, dest.as_str(), &CopyOptions::default()).unwrap();

        assert_eq!(report.files_copied, 4);
        assert!(!dest.join("nested-out").exists());
    }

    #[test]
    fn test_missing_source_is_error() {
        let (_temp_dir, root) = temp_root();
        let result = copy_project(
            &root.join("missing"),
            root.join("out").as_str(),
            &CopyOptions::default(),
        );
        assert!(matches!(result, Err(Error::DirectoryNotFound { .. })));
        assert!(!root.join("out").exists());
    }

    #[test]
    fn test_progress_callback_sees_every_file() {
        let (_temp_dir, root) = temp_root();
        let source = template(&root);
        let mut seen = Vec::new();

        let report = copy_project_with_progress(
            &source,
            root.join("out").as_str(),
            &CopyOptions::default(),
            |rel| seen.push(rel.to_string()),
        )
        .unwrap();

        assert_eq!(seen.len(), report.files_copied);
        assert!(seen.contains(&"src/index.ts".to_string()));
    }
}
