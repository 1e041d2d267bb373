use std::fs;
use std::path::PathBuf;

use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::{HttpdocError, HttpdocResult, error::ErrorKind};

use super::FilePath;
use super::traits::Pal;

/* # Why use std::fs instead of async?

The build is synchronous and single-threaded. std::fs is sufficient for the
file operations involved and keeps the codebase simple.
*/

/// Concrete PAL implementation using the real filesystem via std::fs.
///
/// All file paths are resolved relative to a configured base directory,
/// ensuring operations stay within intended boundaries.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    ///
    /// # Arguments
    /// * `base_dir` - All paths will be resolved relative to this directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to an absolute filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }

    /// Build a GlobSet from the given glob patterns.
    fn build_glob_set(&self, globs: &[String]) -> HttpdocResult<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        for glob in globs {
            let compiled = GlobBuilder::new(glob).build().map_err(|e| {
                Box::new(HttpdocError::message(format!(
                    "Invalid glob pattern '{}': {}",
                    glob, e
                )))
            })?;
            builder.add(compiled);
        }
        builder.build().map_err(|e| {
            Box::new(HttpdocError::message(format!(
                "Failed to build glob set: {}",
                e
            )))
        })
    }
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> HttpdocResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.exists();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file_to_string(&self, path: &FilePath) -> HttpdocResult<String> {
        let resolved = self.resolve_path(path);
        fs::read_to_string(&resolved).map_err(|e| {
            Box::new(HttpdocError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })
    }

    #[instrument(skip(self, contents), fields(path = %path))]
    fn write_file(&self, path: &FilePath, contents: &str) -> HttpdocResult<()> {
        let resolved = self.resolve_path(path);
        if let Some(parent) = resolved.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Box::new(HttpdocError::new(ErrorKind::FileError {
                    path: parent.to_path_buf(),
                    source: e,
                }))
            })?;
        }
        fs::write(&resolved, contents).map_err(|e| {
            Box::new(HttpdocError::new(ErrorKind::FileError {
                path: resolved,
                source: e,
            }))
        })
    }

    #[instrument(skip(self), fields(path = %path))]
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> HttpdocResult<Box<dyn Iterator<Item = HttpdocResult<FilePath>> + '_>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "starting directory walk");

        if !resolved.exists() {
            return Err(Box::new(HttpdocError::new(ErrorKind::FileError {
                path: resolved,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "directory not found"),
            })));
        }

        let glob_set = self.build_glob_set(globs)?;

        let base_path = path.clone();
        let iter = WalkDir::new(resolved.clone())
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(e) => {
                    // Match globs against the path relative to the walked directory
                    if let Ok(relative) = e.path().strip_prefix(&resolved) {
                        if e.file_type().is_file() && glob_set.is_match(relative) {
                            let full_relative = base_path.as_path().join(relative);
                            Some(Ok(FilePath::from(
                                full_relative.to_string_lossy().as_ref(),
                            )))
                        } else {
                            None
                        }
                    } else {
                        None
                    }
                }
                Err(e) => Some(Err(Box::new(HttpdocError::message(format!(
                    "error walking directory: {}",
                    e
                ))))),
            });

        Ok(Box::new(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_dir() -> (TempDir, RealPal) {
        let temp_dir = TempDir::new().unwrap();
        let pal = RealPal::new(temp_dir.path().to_path_buf());
        (temp_dir, pal)
    }

    #[test]
    fn test_file_exists() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("api.md"), "content").unwrap();

        assert!(pal.file_exists(&FilePath::from("api.md")).unwrap());
        assert!(!pal.file_exists(&FilePath::from("missing.md")).unwrap());
    }

    #[test]
    fn test_read_file_to_string() {
        let (temp_dir, pal) = setup_test_dir();
        fs::write(temp_dir.path().join("api.md"), "routes here").unwrap();

        let contents = pal.read_file_to_string(&FilePath::from("api.md")).unwrap();
        assert_eq!(contents, "routes here");
    }

    #[test]
    fn test_read_file_missing_is_file_error() {
        let (_temp_dir, pal) = setup_test_dir();

        let err = pal
            .read_file_to_string(&FilePath::from("missing.md"))
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::FileError { .. }));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let (temp_dir, pal) = setup_test_dir();

        pal.write_file(&FilePath::from("out/routing_table.md"), "# Routes")
            .unwrap();

        let written = fs::read_to_string(temp_dir.path().join("out/routing_table.md")).unwrap();
        assert_eq!(written, "# Routes");
    }

    #[test]
    fn test_walk_directory_with_glob() {
        let (temp_dir, pal) = setup_test_dir();

        fs::write(temp_dir.path().join("one.md"), "").unwrap();
        fs::write(temp_dir.path().join("two.md"), "").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "").unwrap();

        let globs = vec!["*.md".to_string()];
        let results: Vec<_> = pal
            .walk_directory(&FilePath::from("."), &globs)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        let names: Vec<String> = results.iter().map(|f| f.to_string()).collect();
        assert_eq!(results.len(), 2);
        assert!(names.iter().any(|n| n.ends_with("one.md")));
        assert!(names.iter().any(|n| n.ends_with("two.md")));
    }

    #[test]
    fn test_walk_missing_directory_fails() {
        let (_temp_dir, pal) = setup_test_dir();

        let result = pal.walk_directory(&FilePath::from("nope"), &["*.md".to_string()]);
        assert!(result.is_err());
    }
}
