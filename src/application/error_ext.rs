//! Error conversion helpers for common I/O operations
//!
//! Provides extension traits for cleaner error handling with path context.

use std::io;
use std::path::Path;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    ///
    /// A `NotFound` error becomes [`ApplicationError::InputNotFound`].
    ///
    /// # Example
    /// ```ignore
    /// fs.read_to_string(&path)
    ///     .with_path_context("read dump", &path)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => ApplicationError::InputNotFound(path.to_path_buf()),
            _ => ApplicationError::OperationFailed {
                context: format!("{}: {}", action, path.display()),
                source: Box::new(e),
            },
        })
    }
}

/// Extension trait for writes to the output stream.
pub trait WriteResultExt<T> {
    /// Tag an output write failure.
    fn output_context(self) -> ApplicationResult<T>;
}

impl<T> WriteResultExt<T> for io::Result<T> {
    fn output_context(self) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: "write output".to_string(),
            source: Box::new(e),
        })
    }
}
