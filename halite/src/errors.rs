use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for Halite operations
///
/// This enum represents all possible error types that can occur during Halite
/// store operations. Each kind describes a specific category of failure,
/// enabling precise error handling.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::errors::{HaliteError, ErrorKind, HaliteResult};
///
/// fn example() -> HaliteResult<()> {
///     Err(HaliteError::new("collection is missing", ErrorKind::ValidationError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Validation Errors - reported before any I/O is attempted
    /// An operation argument is missing or has the wrong shape
    ValidationError,
    /// The document identifier field is present but invalid
    InvalidId,

    // Structural Errors - the collection path resolves to the wrong kind of entry
    /// The collection name resolves to a filesystem entry that is not a directory
    NotADirectory,

    // Data Errors - stored content cannot be decoded
    /// A persisted document does not parse as a JSON object
    DocumentCorrupted,
    /// Error encoding a document to its canonical text form
    EncodingError,

    // IO and Storage Errors - classified from the underlying filesystem
    /// The file was not found
    FileNotFound,
    /// Permission denied for a file operation
    PermissionDenied,
    /// Generic IO error
    IOError,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ValidationError => write!(f, "Validation error"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::NotADirectory => write!(f, "Not a directory"),
            ErrorKind::DocumentCorrupted => write!(f, "Document corrupted"),
            ErrorKind::EncodingError => write!(f, "Encoding error"),
            ErrorKind::FileNotFound => write!(f, "File not found"),
            ErrorKind::PermissionDenied => write!(f, "Permission denied"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Halite error type.
///
/// `HaliteError` encapsulates error information including the error message,
/// kind, and optional cause. It supports error chaining and backtraces for
/// debugging.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::errors::{HaliteError, ErrorKind};
///
/// // Create a simple error
/// let err = HaliteError::new("document is not parsable", ErrorKind::DocumentCorrupted);
///
/// // Create an error with a cause
/// let cause = HaliteError::new("IO failed", ErrorKind::IOError);
/// let err = HaliteError::new_with_cause("insert failed", ErrorKind::IOError, cause);
/// ```
///
/// # Type alias
///
/// The `HaliteResult<T>` type alias is equivalent to `Result<T, HaliteError>`
/// and is used throughout the codebase for operations that can fail.
#[derive(Clone)]
pub struct HaliteError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<HaliteError>>,
    backtrace: Atomic<Backtrace>,
}

impl HaliteError {
    /// Creates a new `HaliteError` with the specified message and error kind.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    ///
    /// # Returns
    ///
    /// A new `HaliteError` instance.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        HaliteError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `HaliteError` with a cause error.
    ///
    /// This creates an error chain where the cause error is preserved for
    /// debugging.
    ///
    /// # Arguments
    ///
    /// * `message` - A description of the error
    /// * `error_kind` - The category of error
    /// * `cause` - The underlying error that caused this error
    ///
    /// # Returns
    ///
    /// A new `HaliteError` instance with the cause error attached.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: HaliteError) -> Self {
        HaliteError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&Box<HaliteError>> {
        self.cause.as_ref()
    }
}

impl Display for HaliteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for HaliteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for HaliteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Halite operations.
///
/// `HaliteResult<T>` is shorthand for `Result<T, HaliteError>`.
/// All fallible Halite operations return this type.
///
/// # Examples
///
/// ```rust,ignore
/// use halite::errors::HaliteResult;
///
/// fn resolve_collection(name: &str) -> HaliteResult<String> {
///     Ok(name.to_string())
/// }
/// ```
pub type HaliteResult<T> = Result<T, HaliteError>;

// From trait implementations for automatic error conversion
impl From<std::io::Error> for HaliteError {
    fn from(err: std::io::Error) -> Self {
        let error_kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            std::io::ErrorKind::NotADirectory => ErrorKind::NotADirectory,
            _ => ErrorKind::IOError,
        };
        HaliteError::new(&format!("IO error: {}", err), error_kind)
    }
}

impl From<serde_json::Error> for HaliteError {
    fn from(err: serde_json::Error) -> Self {
        HaliteError::new(
            &format!("JSON encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<std::string::FromUtf8Error> for HaliteError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        HaliteError::new(
            &format!("UTF-8 encoding error: {}", err),
            ErrorKind::EncodingError,
        )
    }
}

impl From<String> for HaliteError {
    fn from(msg: String) -> Self {
        HaliteError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for HaliteError {
    fn from(msg: &str) -> Self {
        HaliteError::new(msg, ErrorKind::InternalError)
    }
}
