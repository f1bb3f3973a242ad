//! Shared types for refork operations

use camino::Utf8PathBuf;
use std::fmt;

/// Visibility of the created hosting-service repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

impl Visibility {
    /// Build from the `--public` flag
    pub fn from_public_flag(is_public: bool) -> Self {
        if is_public {
            Self::Public
        } else {
            Self::Private
        }
    }

    /// Flag passed to `gh repo create`
    pub fn as_flag(&self) -> &'static str {
        match self {
            Self::Public => "--public",
            Self::Private => "--private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::Private => write!(f, "private"),
        }
    }
}

/// Result of copying a template tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    /// Absolute destination path
    pub destination: Utf8PathBuf,
    /// Number of files copied
    pub files_copied: usize,
}

/// Result of a symbol replacement pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaceReport {
    /// Number of candidate files inspected
    pub files_scanned: usize,
    /// Files rewritten, relative to the destination
    pub files_updated: Vec<Utf8PathBuf>,
}

impl ReplaceReport {
    /// Number of files rewritten
    pub fn updated_count(&self) -> usize {
        self.files_updated.len()
    }
}

/// How the remote repository ended up populated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// `gh repo create` created and pushed the repository
    Created { url: String },
    /// The repository already existed; the local tree was force-pushed to it
    PushedToExisting { url: String },
}

impl InitOutcome {
    /// Web URL of the repository
    pub fn url(&self) -> &str {
        match self {
            Self::Created { url } | Self::PushedToExisting { url } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_flags() {
        assert_eq!(Visibility::from_public_flag(true).as_flag(), "--public");
        assert_eq!(Visibility::from_public_flag(false).as_flag(), "--private");
        assert_eq!(Visibility::default(), Visibility::Private);
        assert_eq!(Visibility::Public.to_string(), "public");
    }
}
