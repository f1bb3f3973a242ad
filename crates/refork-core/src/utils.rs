//! Path helpers shared by the copy, replace, and init operations

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};

/// Resolve a user-supplied path to an absolute UTF-8 path.
///
/// The path does not need to exist. `.` and `..` components are kept as-is
/// apart from the leading current-directory join.
pub fn resolve_path(path: &str) -> Result<Utf8PathBuf> {
    if path.trim().is_empty() {
        return Err(Error::validation("Path is required"));
    }

    let absolute = std::path::absolute(path)?;
    Utf8PathBuf::from_path_buf(absolute)
        .map_err(|p| Error::invalid_path(p.to_string_lossy().into_owned()))
}

/// Require a non-empty argument
pub fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{} is required", what)));
    }
    Ok(())
}

/// Canonicalize when the path exists, otherwise return it unchanged
pub(crate) fn canonical_or_self(path: &Utf8Path) -> Utf8PathBuf {
    path.canonicalize_utf8().unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_path_is_absolute() {
        let resolved = resolve_path("some/dir").unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("some/dir"));
    }

    #[test]
    fn test_resolve_path_rejects_empty() {
        assert!(matches!(resolve_path(""), Err(Error::Validation { .. })));
        assert!(matches!(resolve_path("   "), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_require() {
        assert!(require("x", "Project name").is_ok());
        let err = require("", "Project name").unwrap_err();
        assert_eq!(err.to_string(), "Project name is required");
    }
}
