use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic, ReadExecutor};

/// Error kinds for copy operations.
///
/// Each kind describes one category of failure so callers can match on it
/// instead of inspecting messages.
///
/// # Examples
///
/// ```rust,ignore
/// use copyable::errors::{CopyError, CopyResult, ErrorKind};
///
/// fn example() -> CopyResult<()> {
///     Err(CopyError::new("Field 'zip' is not declared", ErrorKind::UnknownField))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Field Errors - raised while validating a copy plan or accessing a field
    /// A field name is not declared on the document type
    UnknownField,
    /// A field exists but has a different kind than the operation expects
    FieldKindMismatch,

    // Identity Errors
    /// An embedded document would share its identity with another document
    IdentityCollision,
    /// The provided identity value is invalid
    InvalidId,

    // Schema Errors - raised by the schema registry and type builders
    /// The document type is not registered
    SchemaNotFound,
    /// A document type with the same name is already registered
    SchemaAlreadyRegistered,
    /// A document type declaration is malformed
    InvalidSchema,
    /// Source and destination documents have different types
    TypeMismatch,

    // Operation Errors
    /// The operation is not valid in the current context
    InvalidOperation,

    // Generic/Internal Errors - used as fallback
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::UnknownField => write!(f, "Unknown field"),
            ErrorKind::FieldKindMismatch => write!(f, "Field kind mismatch"),
            ErrorKind::IdentityCollision => write!(f, "Identity collision"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::SchemaNotFound => write!(f, "Schema not found"),
            ErrorKind::SchemaAlreadyRegistered => write!(f, "Schema already registered"),
            ErrorKind::InvalidSchema => write!(f, "Invalid schema"),
            ErrorKind::TypeMismatch => write!(f, "Type mismatch"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type for every fallible operation in this crate.
///
/// `CopyError` carries a message, an [ErrorKind], an optional cause and the
/// backtrace captured at construction.
///
/// # Examples
///
/// ```rust,ignore
/// use copyable::errors::{CopyError, ErrorKind};
///
/// let cause = CopyError::new("Document type 'Child' is not registered", ErrorKind::SchemaNotFound);
/// let err = CopyError::new_with_cause("Copy plan rejected", ErrorKind::InvalidOperation, cause);
/// ```
#[derive(Clone)]
pub struct CopyError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CopyError>>,
    backtrace: Atomic<Backtrace>,
}

impl CopyError {
    /// Creates a new `CopyError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CopyError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `CopyError` that wraps an underlying cause.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CopyError) -> Self {
        CopyError {
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

    pub fn cause(&self) -> Option<&CopyError> {
        self.cause.as_deref()
    }
}

impl Display for CopyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CopyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // print error message with stack trace followed by cause
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => self
                .backtrace
                .read_with(|bt| write!(f, "{}\n{:?}", self.message, bt)),
        }
    }
}

impl Error for CopyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// Shorthand for `Result<T, CopyError>`, returned by all fallible operations.
pub type CopyResult<T> = Result<T, CopyError>;

impl From<String> for CopyError {
    fn from(msg: String) -> Self {
        CopyError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for CopyError {
    fn from(msg: &str) -> Self {
        CopyError::new(msg, ErrorKind::InternalError)
    }
}
