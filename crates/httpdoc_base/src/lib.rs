/* # Why have httpdoc_base as a foundation library?

httpdoc_base provides the error handling, tracing setup, and filesystem
abstraction used across all crates. This ensures consistency in error handling
and prevents circular dependencies between crates.
*/

pub mod error;
mod error_tests;
pub mod pal;
pub mod tracing;

// Re-export commonly used types for convenience
pub use error::{HttpdocError, HttpdocResult, ResultExt};
pub use pal::{FilePath, MockPal, Pal, PalHandle, RealPal};
