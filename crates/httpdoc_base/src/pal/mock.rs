use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use globset::{GlobBuilder, GlobSetBuilder};

use crate::HttpdocError;
use crate::HttpdocResult;
use crate::error::ErrorKind;

use super::FilePath;
use super::traits::Pal;

/* # Why use a HashMap for MockPal storage?

MockPal keeps file contents in memory behind Arc<Mutex<..>>:
1. Speed: no filesystem I/O, deterministic and fast for unit tests
2. Isolation: no side effects on the real filesystem
3. Thread-safe: Mutex allows concurrent test execution
*/

/// In-memory PAL implementation for testing.
///
/// Stores file contents in a HashMap and supports all Pal operations without
/// touching the real filesystem.
///
/// # Examples
///
/// ```
/// use httpdoc_base::{MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("api.md"), "content");
/// let contents = mock.read_file_to_string(&FilePath::from("api.md")).unwrap();
/// assert_eq!(contents, "content");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, String>>>,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock storage.
    pub fn add_file(&self, path: FilePath, contents: impl Into<String>) {
        self.files.lock().unwrap().insert(path, contents.into());
    }

    /// Return the contents of a written file, if present.
    pub fn file_contents(&self, path: &FilePath) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> HttpdocResult<bool> {
        Ok(self.files.lock().unwrap().contains_key(path))
    }

    fn read_file_to_string(&self, path: &FilePath) -> HttpdocResult<String> {
        self.files.lock().unwrap().get(path).cloned().ok_or_else(|| {
            Box::new(HttpdocError::new(ErrorKind::FileError {
                path: path.as_path().to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
            }))
        })
    }

    fn write_file(&self, path: &FilePath, contents: &str) -> HttpdocResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.clone(), contents.to_string());
        Ok(())
    }

    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> HttpdocResult<Box<dyn Iterator<Item = HttpdocResult<FilePath>> + '_>> {
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
        let glob_set = builder
            .build()
            .map_err(|e| Box::new(HttpdocError::message(format!("Failed to build glob set: {}", e))))?;

        let prefix = path.as_relative().as_str().trim_end_matches('/').to_string();
        let mut matches: Vec<FilePath> = self
            .files
            .lock()
            .unwrap()
            .keys()
            .filter(|file| {
                let file_str = file.as_relative().as_str();
                let relative = if prefix.is_empty() || prefix == "." {
                    Some(file_str)
                } else {
                    file_str
                        .strip_prefix(&prefix)
                        .and_then(|rest| rest.strip_prefix('/'))
                };
                relative.is_some_and(|rel| glob_set.is_match(rel))
            })
            .cloned()
            .collect();
        // Deterministic ordering for tests
        matches.sort();

        Ok(Box::new(matches.into_iter().map(Ok)))
    }
}
