use std::sync::Arc;

use crate::HttpdocResult;

use super::file_path::FilePath;

/* # Why is Pal a trait instead of a struct?

Using a trait enables two key benefits:
1. Testability: MockPal implements Pal for fast, deterministic tests without
   filesystem side effects
2. Flexibility: code depends on the abstraction, not the concrete implementation
*/

/// Platform Abstraction Layer (PAL) trait providing filesystem operations.
///
/// Two implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs`
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file exists at the given path.
    fn file_exists(&self, path: &FilePath) -> HttpdocResult<bool>;

    /// Read entire file contents as a UTF-8 string.
    fn read_file_to_string(&self, path: &FilePath) -> HttpdocResult<String>;

    /// Write the given contents to a file, creating or overwriting it.
    /// Parent directories are created as needed.
    fn write_file(&self, path: &FilePath, contents: &str) -> HttpdocResult<()>;

    /// Walk a directory tree, yielding paths matching the given glob patterns.
    ///
    /// # Arguments
    /// * `path` - Directory to walk
    /// * `globs` - Glob patterns to match (e.g., `["*.md", "*.rst"]`)
    ///
    /// Returns an iterator of FilePath results that match any of the patterns.
    fn walk_directory(
        &self,
        path: &FilePath,
        globs: &[String],
    ) -> HttpdocResult<Box<dyn Iterator<Item = HttpdocResult<FilePath>> + '_>>;
}

/* # Why use Arc<dyn Pal> with PalHandle?

Arc enables cheap cloning of the entire PAL implementation, allowing it to be
shared across the application. PalHandle wraps this for ergonomic Deref access
and Clone support, avoiding lifetime parameters throughout the codebase.
*/

/// Handle to a PAL implementation, enabling shared ownership.
///
/// # Examples
///
/// ```no_run
/// use httpdoc_base::{RealPal, PalHandle};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone(); // Cheap clone, shares the same implementation
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
