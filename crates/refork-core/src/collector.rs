//! File collection for copy and replace operations.
//!
//! Walks a directory tree and yields relative paths of regular files,
//! honoring glob ignore patterns (and optionally include patterns).
//! Ignored directories are pruned rather than descended into.

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;
use walkdir::WalkDir;

/// A compiled set of glob patterns matched against relative paths.
#[derive(Debug, Clone)]
pub struct PatternSet {
    globset: GlobSet,
    len: usize,
}

impl PatternSet {
    /// Compiles the given glob patterns.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = GlobSetBuilder::new();
        let mut len = 0;

        for pattern in patterns {
            let pattern = pattern.as_ref();
            let glob =
                Glob::new(pattern).map_err(|e| Error::invalid_pattern(pattern, e.to_string()))?;
            builder.add(glob);
            len += 1;
        }

        let globset = builder
            .build()
            .map_err(|e| Error::invalid_pattern("<set>", e.to_string()))?;

        Ok(Self { globset, len })
    }

    /// A set that matches nothing.
    pub fn empty() -> Self {
        Self {
            globset: GlobSet::empty(),
            len: 0,
        }
    }

    /// Checks if a relative path matches any pattern.
    pub fn is_match(&self, path: impl AsRef<Path>) -> bool {
        self.globset.is_match(path)
    }

    /// Number of patterns in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the set has no patterns.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Enumerates regular files under a root directory.
#[derive(Debug, Clone)]
pub struct FileCollector {
    root: Utf8PathBuf,
    ignore: PatternSet,
    include: Option<PatternSet>,
    skip_dir: Option<Utf8PathBuf>,
}

impl FileCollector {
    /// Creates a collector rooted at `root` that skips paths matching `ignore`.
    pub fn new(root: impl Into<Utf8PathBuf>, ignore: PatternSet) -> Self {
        Self {
            root: root.into(),
            ignore,
            include: None,
            skip_dir: None,
        }
    }

    /// Only yield files matching one of the `include` patterns.
    pub fn with_include(mut self, include: PatternSet) -> Self {
        self.include = Some(include);
        self
    }

    /// Never descend into this directory (relative to the root).
    pub(crate) fn with_skip_dir(mut self, relative: Utf8PathBuf) -> Self {
        self.skip_dir = Some(relative);
        self
    }

    /// Returns a lazy iterator over relative file paths, in file-name order.
    ///
    /// Fails immediately if the root is missing or unreadable; errors found
    /// while walking are yielded as items.
    pub fn files(&self) -> Result<impl Iterator<Item = Result<Utf8PathBuf>> + '_> {
        if !self.root.is_dir() {
            return Err(Error::directory_not_found(self.root.as_str()));
        }
        std::fs::read_dir(&self.root).map_err(|e| Error::read_file(self.root.as_str(), e))?;

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(move |entry| {
                if entry.depth() == 0 {
                    return true;
                }
                match self.relative(entry.path()) {
                    Ok(rel) => !self.is_pruned(&rel),
                    // Surfaced as an error once the entry is yielded
                    Err(_) => true,
                }
            });

        Ok(walker.filter_map(move |entry| {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(Error::Walk(e))),
            };

            if !entry.file_type().is_file() {
                return None;
            }

            let rel = match self.relative(entry.path()) {
                Ok(rel) => rel,
                Err(e) => return Some(Err(e)),
            };

            if let Some(include) = &self.include {
                if !include.is_match(&rel) {
                    return None;
                }
            }

            Some(Ok(rel))
        }))
    }

    fn relative(&self, path: &Path) -> Result<Utf8PathBuf> {
        let rel = path
            .strip_prefix(&self.root)
            .map_err(|_| Error::invalid_path(path.to_string_lossy().into_owned()))?;
        Utf8PathBuf::from_path_buf(rel.to_path_buf())
            .map_err(|p| Error::invalid_path(p.to_string_lossy().into_owned()))
    }

    fn is_pruned(&self, rel: &Utf8Path) -> bool {
        if self.ignore.is_match(rel) {
            return true;
        }
        matches!(&self.skip_dir, Some(skip) if rel.starts_with(skip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Utf8Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn collect(collector: &FileCollector) -> Vec<String> {
        collector
            .files()
            .unwrap()
            .map(|f| f.unwrap().to_string())
            .collect()
    }

    fn fixture() -> (TempDir, Utf8PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();
        write(&root, "README.md", "# readme");
        write(&root, "package.json", "{}");
        write(&root, ".eslintrc.json", "{}");
        write(&root, "src/index.ts", "export {}");
        write(&root, "src/nested/deep.md", "deep");
        write(&root, ".git/HEAD", "ref: refs/heads/main");
        write(&root, "node_modules/pkg/package.json", "{}");
        write(&root, "dist/index.js", "");
        write(&root, "pnpm-lock.yaml", "");
        write(&root, "debug.log", "");
        (temp_dir, root)
    }

    fn copy_ignore() -> PatternSet {
        PatternSet::new(crate::config::CopyConfig::default().ignore).unwrap()
    }

    #[test]
    fn test_ignores_patterns_and_keeps_dotfiles() {
        let (_temp_dir, root) = fixture();
        let files = collect(&FileCollector::new(&root, copy_ignore()));

        assert_eq!(
            files,
            vec![
                ".eslintrc.json",
                "README.md",
                "package.json",
                "src/index.ts",
                "src/nested/deep.md",
            ]
        );
    }

    #[test]
    fn test_never_returns_ignored_paths() {
        let (_temp_dir, root) = fixture();
        let ignore = copy_ignore();
        for file in collect(&FileCollector::new(&root, ignore.clone())) {
            assert!(!ignore.is_match(&file), "{} should be ignored", file);
            assert!(root.join(&file).is_file());
        }
    }

    #[test]
    fn test_include_patterns() {
        let (_temp_dir, root) = fixture();
        let replace = crate::config::ReplaceConfig::default();
        let collector = FileCollector::new(&root, PatternSet::new(&replace.ignore).unwrap())
            .with_include(PatternSet::new(&replace.include).unwrap());

        let files = collect(&collector);
        assert!(files.contains(&"README.md".to_string()));
        assert!(files.contains(&"package.json".to_string()));
        assert!(files.contains(&".eslintrc.json".to_string()));
        assert!(files.contains(&"src/nested/deep.md".to_string()));
        assert!(!files.contains(&"src/index.ts".to_string()));
        assert!(!files.iter().any(|f| f.starts_with("node_modules")));
    }

    #[test]
    fn test_skip_dir_is_pruned() {
        let (_temp_dir, root) = fixture();
        let collector =
            FileCollector::new(&root, copy_ignore()).with_skip_dir(Utf8PathBuf::from("src"));

        let files = collect(&collector);
        assert!(!files.iter().any(|f| f.starts_with("src")));
        assert!(files.contains(&"README.md".to_string()));
    }

    #[test]
    fn test_missing_root_is_error() {
        let collector = FileCollector::new("/nonexistent/refork/root", PatternSet::empty());
        assert!(matches!(
            collector.files().err(),
            Some(Error::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_pattern() {
        let result = PatternSet::new(["[invalid"]);
        assert!(matches!(result, Err(Error::InvalidPattern { .. })));
    }

    #[test]
    fn test_pattern_set_len() {
        assert!(PatternSet::empty().is_empty());
        assert_eq!(PatternSet::new(["*.log", "dist"]).unwrap().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_yielded() {
        let (_temp_dir, root) = fixture();
        std::os::unix::fs::symlink(root.join("README.md"), root.join("LINK.md")).unwrap();

        let files = collect(&FileCollector::new(&root, copy_ignore()));
        assert!(!files.contains(&"LINK.md".to_string()));
    }
}
