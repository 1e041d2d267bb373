use relative_path::{RelativePath, RelativePathBuf};
use std::path::{Path, PathBuf};

/* # Why use RelativePathBuf for FilePath?

FilePath wraps RelativePathBuf to enforce that all paths are relative to the
PAL's base directory, not absolute system paths. The compiler prevents
accidentally passing absolute paths, and all PAL operations share the same
relative-to-base semantics.
*/

/// Type-safe wrapper for file paths relative to the PAL base directory.
///
/// # Examples
///
/// ```
/// use httpdoc_base::FilePath;
///
/// let path = FilePath::from("docs/api.md");
/// assert_eq!(path.to_string(), "docs/api.md");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FilePath(RelativePathBuf);

impl FilePath {
    /// Returns the underlying RelativePath as a reference.
    pub fn as_relative(&self) -> &RelativePath {
        &self.0
    }

    /// Converts to a regular Path for use with std::fs operations.
    /// This returns the relative path portion without a base directory.
    pub fn as_path(&self) -> &Path {
        Path::new(self.as_relative().as_str())
    }

    /// Consumes the FilePath and returns a PathBuf.
    pub fn into_path_buf(self) -> PathBuf {
        PathBuf::from(self.0.as_str())
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self(RelativePathBuf::from(s))
    }
}

impl From<&Path> for FilePath {
    fn from(p: &Path) -> Self {
        Self(RelativePathBuf::from(p.to_string_lossy().into_owned()))
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<RelativePath> for FilePath {
    fn as_ref(&self) -> &RelativePath {
        &self.0
    }
}
