use std::io::Error as IoError;

/// Result type for object store lookups.
pub type StoreResult<T> = Result<T, StoreError>;

/// A lookup against the object store failed.
///
/// This is distinct from the object simply not existing, which stores report as `Ok(None)`.
/// Responders never surface these errors to clients; they are logged and answered with the
/// not-found document.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading from local storage failed.
    #[error("io error: {0}")]
    Io(#[from] IoError),
    /// The storage backend reported a failure.
    #[error("backend error: {0}")]
    Backend(String),
    /// An OpenDAL operation failed.
    #[cfg(feature = "opendal")]
    #[error("opendal error: {0}")]
    Opendal(#[from] opendal::Error),
}

impl StoreError {
    /// Creates a backend error from any displayable message.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
