use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

/* # Why a custom error type and not anyhow/eyre/thiserror?

- Better control over error handling
- Role errors (InvalidStatusCode, UnknownMethod) need to stay pattern-matchable
  so callers can render them as inline problem markers instead of failing the build
- More transparency into error handling logic
 */

/// Error variants that can occur in httpdoc operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A `statuscode` role was given a bare value that is not a known HTTP status code
    InvalidStatusCode { input: String },

    /// A `method` role was given a name outside the fixed HTTP/1.1 method set
    UnknownMethod { method: String },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* # Why separate ErrorKind and HttpdocError?

- ErrorKind: structural variants with specific contexts (file paths, role inputs)
- HttpdocError: wraps ErrorKind with additional runtime context strings

Users can pattern match on ErrorKind for specific handling, while context
attachment stays ergonomic during propagation.
*/

/// Error type wrapping ErrorKind with optional context.
/// Implements the standard Error trait and supports context attachment.
#[derive(Debug)]
pub struct HttpdocError {
    kind: ErrorKind,
    context: Vec<String>,
}

impl HttpdocError {
    /// Creates a new error from an ErrorKind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
        }
    }

    /// Creates a message error, the catch-all variant.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    /// Useful to avoid expensive string construction for successful paths.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    /// Allows pattern matching on specific error variants.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the attached context strings, outermost first.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the innermost error in the chain.
    /// Traverses the error source chain to find the root cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for HttpdocError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for HttpdocError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::InvalidStatusCode { .. }
            | ErrorKind::UnknownMethod { .. }
            | ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for HttpdocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display context first if present
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", ctx)?;
            } else {
                write!(f, ": {}", ctx)?;
            }
        }

        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        match &self.kind {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::InvalidStatusCode { input } => {
                write!(f, "'{}' is not a valid HTTP status code", input)
            }
            ErrorKind::UnknownMethod { method } => {
                write!(f, "{} is not a valid HTTP method", method.to_uppercase())
            }
            ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/* # Why use Box<HttpdocError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient
to return in the common case.
*/

/// Standard result type for httpdoc operations.
pub type HttpdocResult<T> = std::result::Result<T, Box<HttpdocError>>;

/// Creates a boxed message error from format arguments.
///
/// Shorthand for `Box::new(HttpdocError::message(format!(...)))`, used where
/// no structured ErrorKind variant applies.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::error::HttpdocError::message(format!($($arg)*)))
    };
}

/// Extension trait for attaching context to Results.
/// Provides ergonomic error context attachment during error propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    /// Eager evaluation: context is evaluated immediately.
    fn context(self, context: impl Into<String>) -> HttpdocResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    /// Prefer this to avoid expensive string formatting in the success path.
    fn with_context<F>(self, f: F) -> HttpdocResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for HttpdocResult<T> {
    fn context(self, context: impl Into<String>) -> HttpdocResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> HttpdocResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_from_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let path = PathBuf::from("test.txt");
        let kind = ErrorKind::FileError {
            path: path.clone(),
            source: io_err,
        };
        let error = HttpdocError::new(kind);

        match error.kind() {
            ErrorKind::FileError { path: p, .. } => {
                assert_eq!(p, &path);
            }
            _ => panic!("Expected FileError variant"),
        }
    }

    #[test]
    fn test_error_invalid_status_code() {
        let error = HttpdocError::new(ErrorKind::InvalidStatusCode {
            input: "999".to_string(),
        });
        assert_eq!(error.to_string(), "'999' is not a valid HTTP status code");
    }

    #[test]
    fn test_error_unknown_method_uppercases() {
        let error = HttpdocError::new(ErrorKind::UnknownMethod {
            method: "fetch".to_string(),
        });
        assert_eq!(error.to_string(), "FETCH is not a valid HTTP method");
    }

    #[test]
    fn test_error_context_attachment() {
        let error = HttpdocError::message("original error")
            .context("first context")
            .context("second context");

        assert_eq!(error.get_context().len(), 2);
        assert_eq!(error.get_context()[0], "first context");
        assert_eq!(error.get_context()[1], "second context");
    }

    #[test]
    fn test_error_with_context_lazy_evaluation() {
        let mut called = false;
        let error = HttpdocError::message("error").with_context(|| {
            called = true;
            "lazy context".to_string()
        });

        assert!(called);
        assert_eq!(error.get_context()[0], "lazy context");
    }

    #[test]
    fn test_error_display_with_context() {
        let error = HttpdocError::message("test message").context("operation failed");
        assert_eq!(error.to_string(), "operation failed: test message");
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = HttpdocError::message("root error")
            .context("first")
            .context("second")
            .context("third");
        assert_eq!(error.to_string(), "first: second: third: root error");
    }

    #[test]
    fn test_error_source_file_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let kind = ErrorKind::FileError {
            path: PathBuf::from("test.txt"),
            source: io_err,
        };
        let error = HttpdocError::new(kind);
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_source_role_errors() {
        let error = HttpdocError::new(ErrorKind::UnknownMethod {
            method: "brew".to_string(),
        });
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_root_cause_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let kind = ErrorKind::FileError {
            path: PathBuf::from("test.txt"),
            source: io_err,
        };
        let error = HttpdocError::new(kind);
        let root = error.root_cause();
        assert_eq!(root.to_string(), "not found");
    }

    #[test]
    fn test_err_macro() {
        let error = err!("failed to parse '{}'", "input");
        assert_eq!(error.to_string(), "failed to parse 'input'");
    }

    #[test]
    fn test_result_ext_context_success() {
        let result: HttpdocResult<i32> = Ok(42);
        let final_result = result.context("operation failed");
        assert_eq!(final_result.unwrap(), 42);
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: HttpdocResult<i32> = Err(Box::new(HttpdocError::message("root")));
        let final_result = result
            .context("step 1")
            .context("step 2")
            .with_context(|| "step 3".to_string());
        assert!(final_result.is_err());
        let err = final_result.unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: step 3: root");
    }
}
